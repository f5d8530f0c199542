use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::{SkillCategory, SkillEntry};
use super::gig_agent::{EnrollmentStatus, GigAgent};
use super::reference::EntityRef;
use super::schedule::DayWindow;

/// Job opportunity with the requirements agents are matched against.
/// Owned by the company; read-only to the matching core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GigProfile {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub required_languages: Vec<LanguageRequirement>,
    #[serde(default)]
    pub technical_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub professional_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub soft_skills: Vec<SkillEntry>,
    /// The gig's single industry category.
    pub industry: Option<EntityRef>,
    #[serde(default)]
    pub activities: Vec<EntityRef>,
    pub required_experience_years: Option<f64>,
    pub timezone: Option<EntityRef>,
    pub destination_region: Option<EntityRef>,
    /// Weekdays the worker must cover, each with a start/end window.
    #[serde(default)]
    pub required_schedule: Vec<DayWindow>,
    /// Denormalized view of this gig's relationships. A projection of the
    /// canonical records, reconciled on read.
    #[serde(default)]
    pub agent_links: Vec<AgentLink>,
    #[serde(default)]
    pub enrolled_agents: Vec<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GigProfile {
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

/// One required language with a minimum proficiency level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRequirement {
    pub language: EntityRef,
    pub min_level: Option<String>,
}

/// Embedded entry on the gig side: one agent linked to this gig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentLink {
    pub agent_id: Uuid,
    pub status: EnrollmentStatus,
    pub since: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AgentLink {
    pub fn from_record(record: &GigAgent) -> Self {
        Self {
            agent_id: record.agent_id,
            status: record.enrollment_status,
            since: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
