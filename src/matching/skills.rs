use crate::models::agent::AgentProfile;
use crate::models::gig::GigProfile;
use crate::models::gig_agent::{DimensionScore, DimensionStatus};
use crate::models::reference::resolve;

/// Required skills match on canonical key AND category. Proficiency is
/// recorded in the breakdown but never gates a match.
pub fn score_skills(agent: &AgentProfile, gig: &GigProfile) -> DimensionScore {
    let agent_sets = agent.skill_sets();

    let mut total = 0usize;
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for (category, required) in gig.skill_sets() {
        let held = agent_sets
            .iter()
            .find(|(agent_category, _)| *agent_category == category)
            .map(|(_, entries)| *entries)
            .unwrap_or(&[]);

        for requirement in required {
            total += 1;
            let wanted = resolve(Some(&requirement.skill));
            let label = format!("{} ({})", wanted.label(), category.as_str());
            if wanted.key.is_empty() {
                missing.push(label);
                continue;
            }

            let hit = held
                .iter()
                .find(|entry| resolve(Some(&entry.skill)).key == wanted.key);
            match hit {
                Some(entry) => match entry.level {
                    Some(level) => matched.push(format!("{} at level {}", label, level)),
                    None => matched.push(label),
                },
                None => missing.push(label),
            }
        }
    }

    if total == 0 {
        return DimensionScore {
            score: 0.0,
            status: DimensionStatus::NoMatch,
            detail: "no required skills".to_string(),
            ..DimensionScore::default()
        };
    }

    let score = matched.len() as f64 / total as f64;
    let status = if matched.len() == total {
        DimensionStatus::PerfectMatch
    } else if !matched.is_empty() {
        DimensionStatus::PartialMatch
    } else {
        DimensionStatus::NoMatch
    };
    let detail = format!("{} of {} required skills matched", matched.len(), total);

    DimensionScore {
        score,
        status,
        matched,
        missing,
        insufficient: Vec::new(),
        detail,
    }
}
