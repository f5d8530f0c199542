use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::weights::Weights;

/// Fine-grained lifecycle state of an Agent×Gig relationship. This enum is
/// the single authority; the coarse view is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Invited,
    Requested,
    Enrolled,
    Rejected,
    Expired,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Invited => "invited",
            EnrollmentStatus::Requested => "requested",
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Rejected => "rejected",
            EnrollmentStatus::Expired => "expired",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states can be revived by a fresh enrollment request.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EnrollmentStatus::Rejected | EnrollmentStatus::Expired | EnrollmentStatus::Cancelled
        )
    }
}

/// Coarse relationship state derived from `EnrollmentStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    Pending,
    Active,
    Closed,
}

/// Composite outcome bucket for a whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    PerfectMatch,
    PartialMatch,
    LowMatch,
    NoMatch,
}

/// Outcome tag for a single dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionStatus {
    PerfectMatch,
    PartialMatch,
    #[default]
    NoMatch,
}

/// Score and diagnostic breakdown for one compatibility dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DimensionScore {
    pub score: f64,
    pub status: DimensionStatus,
    #[serde(default)]
    pub matched: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub insufficient: Vec<String>,
    pub detail: String,
}

/// Per-dimension breakdown stored on the relationship record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetails {
    pub language: DimensionScore,
    pub skills: DimensionScore,
    pub industry: DimensionScore,
    pub activity: DimensionScore,
    pub experience: DimensionScore,
    pub timezone: DimensionScore,
    pub region: DimensionScore,
    pub availability: DimensionScore,
}

/// Canonical join record between one agent and one gig. At most one exists
/// per (agent_id, gig_id) pair; the store enforces the uniqueness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GigAgent {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub gig_id: Uuid,
    pub match_score: f64,
    pub match_status: MatchStatus,
    pub match_details: MatchDetails,
    /// Weight vector that produced `match_score`.
    pub weights: Weights,
    pub enrollment_status: EnrollmentStatus,
    pub notes: Option<String>,
    pub invitation_expires_at: Option<DateTime<Utc>>,
    pub notified_at: Option<DateTime<Utc>>,
    pub requested_at: Option<DateTime<Utc>>,
    pub enrolled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GigAgent {
    /// Derived coarse view of the lifecycle state.
    pub fn status(&self) -> RelationshipStatus {
        match self.enrollment_status {
            EnrollmentStatus::Invited | EnrollmentStatus::Requested => RelationshipStatus::Pending,
            EnrollmentStatus::Enrolled => RelationshipStatus::Active,
            EnrollmentStatus::Rejected
            | EnrollmentStatus::Expired
            | EnrollmentStatus::Cancelled => RelationshipStatus::Closed,
        }
    }

    pub fn is_invitation_expired(&self, now: DateTime<Utc>) -> bool {
        self.enrollment_status == EnrollmentStatus::Invited
            && self
                .invitation_expires_at
                .map(|deadline| deadline < now)
                .unwrap_or(false)
    }
}
