use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Events the email/notification collaborator may act on. Delivery is
/// fire-and-forget: a failed send never rolls back the transition that
/// produced the event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelationshipEvent {
    InvitationCreated {
        relationship_id: Uuid,
        agent_id: Uuid,
        gig_id: Uuid,
        match_score: f64,
    },
    EnrollmentRequested {
        relationship_id: Uuid,
        agent_id: Uuid,
        gig_id: Uuid,
        match_score: f64,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn send(&self, event: RelationshipEvent) -> anyhow::Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OnboardingTracker: Send + Sync {
    async fn enrollment_confirmed(&self, agent_id: Uuid, gig_id: Uuid) -> anyhow::Result<()>;
}

/// Default sender: logs the event and succeeds. Deployments plug in a
/// real outbound channel behind the same trait.
pub struct LoggingNotifier;

#[async_trait]
impl NotificationSender for LoggingNotifier {
    async fn send(&self, event: RelationshipEvent) -> anyhow::Result<()> {
        info!(event = ?event, "relationship notification");
        Ok(())
    }
}

pub struct LoggingOnboardingTracker;

#[async_trait]
impl OnboardingTracker for LoggingOnboardingTracker {
    async fn enrollment_confirmed(&self, agent_id: Uuid, gig_id: Uuid) -> anyhow::Result<()> {
        info!(%agent_id, %gig_id, "onboarding progress update");
        Ok(())
    }
}
