use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::gig_agent::{EnrollmentStatus, GigAgent};
use super::reference::EntityRef;
use super::schedule::Availability;

/// Worker profile. Owned by the worker and mutated by profile-update
/// operations; the matching core only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentProfile {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(default)]
    pub technical_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub professional_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub soft_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub industries: Vec<EntityRef>,
    #[serde(default)]
    pub activities: Vec<EntityRef>,
    pub experience_years: Option<f64>,
    pub timezone: Option<EntityRef>,
    pub availability: Option<Availability>,
    /// Denormalized view of this agent's relationships. A projection of
    /// the canonical records, reconciled on read.
    #[serde(default)]
    pub gig_links: Vec<GigLink>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AgentProfile {
    pub fn skill_sets(&self) -> [(SkillCategory, &[SkillEntry]); 3] {
        [
            (SkillCategory::Technical, self.technical_skills.as_slice()),
            (
                SkillCategory::Professional,
                self.professional_skills.as_slice(),
            ),
            (SkillCategory::Soft, self.soft_skills.as_slice()),
        ]
    }
}

/// One (language, proficiency) pair. Levels are free-form strings from
/// reference data ("B2", "native", ...), interpreted by the language scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: EntityRef,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Technical,
    Professional,
    Soft,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Professional => "professional",
            SkillCategory::Soft => "soft",
        }
    }
}

/// A skill reference with a 0-5 proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: EntityRef,
    pub level: Option<u8>,
}

impl SkillEntry {
    pub fn new(skill: EntityRef, level: u8) -> Self {
        Self {
            skill,
            level: Some(level),
        }
    }
}

/// Embedded entry on the agent side: one gig this agent is linked to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigLink {
    pub gig_id: Uuid,
    pub status: EnrollmentStatus,
    pub since: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GigLink {
    pub fn from_record(record: &GigAgent) -> Self {
        Self {
            gig_id: record.gig_id,
            status: record.enrollment_status,
            since: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
