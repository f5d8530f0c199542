use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::agent::AgentProfile;
use crate::models::gig::GigProfile;
use crate::models::gig_agent::{DimensionStatus, MatchDetails, MatchStatus};

use super::experience::score_experience;
use super::industry::{score_activities, score_industry};
use super::language::score_languages;
use super::schedule::score_availability;
use super::skills::score_skills;
use super::timezone::{score_region, score_timezone};
use super::weights::Weights;

/// Composite result of scoring one agent against one gig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: f64,
    pub status: MatchStatus,
    pub details: MatchDetails,
}

/// Score every dimension and combine with the given weight vector. Pure:
/// no side effects, no I/O. Fails only on a malformed weight vector or a
/// malformed schedule.
pub fn compute_match(
    agent: &AgentProfile,
    gig: &GigProfile,
    weights: &Weights,
) -> Result<MatchOutcome> {
    weights.ensure_normalized()?;

    let details = MatchDetails {
        language: score_languages(&agent.languages, &gig.required_languages),
        skills: score_skills(agent, gig),
        industry: score_industry(&agent.industries, gig.industry.as_ref()),
        activity: score_activities(&agent.activities, &gig.activities),
        experience: score_experience(agent.experience_years, gig.required_experience_years),
        timezone: score_timezone(agent.timezone.as_ref(), gig.timezone.as_ref()),
        region: score_region(gig.destination_region.as_ref()),
        availability: score_availability(agent.availability.as_ref(), &gig.required_schedule)?,
    };

    let score = weighted_total(&details, weights).clamp(0.0, 1.0);
    let status = overall_status(&details, score);

    Ok(MatchOutcome {
        score,
        status,
        details,
    })
}

pub fn weighted_total(details: &MatchDetails, weights: &Weights) -> f64 {
    details.language.score * weights.language
        + details.skills.score * weights.skills
        + details.industry.score * weights.industry
        + details.activity.score * weights.activity
        + details.experience.score * weights.experience
        + details.timezone.score * weights.timezone
        + details.region.score * weights.region
        + details.availability.score * weights.availability
}

fn overall_status(details: &MatchDetails, composite: f64) -> MatchStatus {
    // Hard overrides first: the two dimensions that dominate hiring
    // decisions can force the bucket in either direction.
    if details.language.status == DimensionStatus::PerfectMatch
        && details.skills.status == DimensionStatus::PerfectMatch
        && details.industry.score == 1.0
        && composite >= 0.8
    {
        return MatchStatus::PerfectMatch;
    }
    if details.language.status == DimensionStatus::NoMatch
        && details.skills.status == DimensionStatus::NoMatch
    {
        return MatchStatus::NoMatch;
    }

    if composite >= 0.9 {
        MatchStatus::PerfectMatch
    } else if composite >= 0.5 {
        MatchStatus::PartialMatch
    } else if composite > 0.0 {
        MatchStatus::LowMatch
    } else {
        MatchStatus::NoMatch
    }
}
