use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::matching::compute_match;
use crate::matching::MatchOutcome;
use crate::models::agent::AgentProfile;
use crate::models::gig::GigProfile;
use crate::models::gig_agent::{EnrollmentStatus, GigAgent};
use crate::store::{ProfileStore, RelationshipStore};
use crate::utils::time::now;

use super::notification::{NotificationSender, OnboardingTracker, RelationshipEvent};
use super::sync_service::SyncService;

/// State machine over the canonical relationship record. Every transition
/// either fully succeeds or leaves the record untouched; collaborator side
/// effects (notification, onboarding, link sync) are isolated and can
/// never roll a transition back.
#[derive(Clone)]
pub struct EnrollmentService {
    profiles: Arc<dyn ProfileStore>,
    relationships: Arc<dyn RelationshipStore>,
    notifier: Arc<dyn NotificationSender>,
    onboarding: Arc<dyn OnboardingTracker>,
    sync: SyncService,
    config: Config,
}

impl EnrollmentService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        relationships: Arc<dyn RelationshipStore>,
        notifier: Arc<dyn NotificationSender>,
        onboarding: Arc<dyn OnboardingTracker>,
        config: Config,
    ) -> Self {
        let sync = SyncService::new(profiles.clone(), relationships.clone());
        Self {
            profiles,
            relationships,
            notifier,
            onboarding,
            sync,
            config,
        }
    }

    /// Company invites an agent to a gig. Scores the pair, stores the
    /// record as `invited` with an expiry deadline, and emits a
    /// notification event.
    pub async fn create_relationship(
        &self,
        agent_id: Uuid,
        gig_id: Uuid,
        notes: Option<String>,
    ) -> Result<GigAgent> {
        let (agent, gig) = self.load_profiles(agent_id, gig_id).await?;
        if self
            .bounded(self.relationships.find_pair(agent_id, gig_id))
            .await?
            .is_some()
        {
            return Err(Error::Conflict(format!(
                "relationship between agent {} and gig {} already exists",
                agent_id, gig_id
            )));
        }

        let outcome = compute_match(&agent, &gig, &self.config.weights)?;
        let at = now();
        let mut record = self.new_record(agent_id, gig_id, outcome, notes, at);
        record.invitation_expires_at =
            Some(at + Duration::hours(self.config.invitation_ttl_hours));

        // The store's pair uniqueness settles racing creates: the loser
        // gets a Conflict here.
        let record = self.bounded(self.relationships.insert(record)).await?;

        let event = RelationshipEvent::InvitationCreated {
            relationship_id: record.id,
            agent_id,
            gig_id,
            match_score: record.match_score,
        };
        let record = self.notify(record, event).await;
        self.sync.sync_links(&record).await;

        info!(
            relationship_id = %record.id,
            %agent_id,
            %gig_id,
            score = record.match_score,
            "agent invited to gig"
        );
        Ok(record)
    }

    /// Agent accepts an invitation.
    pub async fn accept_invitation(
        &self,
        relationship_id: Uuid,
        notes: Option<String>,
    ) -> Result<GigAgent> {
        const ACTION: &str = "accept invitation";
        let record = self.get(relationship_id).await?;
        let record = self.expire_if_due(record, ACTION).await?;
        if record.enrollment_status != EnrollmentStatus::Invited {
            return Err(Error::InvalidState {
                current: record.enrollment_status.as_str(),
                action: ACTION,
            });
        }
        self.enroll(record, notes).await
    }

    /// Agent rejects an invitation: the record and both denormalized
    /// entries are removed outright, not parked as `rejected`.
    pub async fn reject_invitation(&self, relationship_id: Uuid) -> Result<()> {
        const ACTION: &str = "reject invitation";
        let record = self.get(relationship_id).await?;
        let record = self.expire_if_due(record, ACTION).await?;
        if record.enrollment_status != EnrollmentStatus::Invited {
            return Err(Error::InvalidState {
                current: record.enrollment_status.as_str(),
                action: ACTION,
            });
        }

        self.bounded(self.relationships.delete(record.id)).await?;
        self.sync
            .remove_links(record.agent_id, record.gig_id)
            .await;
        info!(
            relationship_id = %record.id,
            agent_id = %record.agent_id,
            gig_id = %record.gig_id,
            "invitation rejected, relationship removed"
        );
        Ok(())
    }

    /// Agent asks to join a gig. A terminal record for the pair is
    /// revived in place, which keeps the pair constraint intact.
    pub async fn request_enrollment(
        &self,
        agent_id: Uuid,
        gig_id: Uuid,
        notes: Option<String>,
    ) -> Result<GigAgent> {
        const ACTION: &str = "request enrollment";
        let (agent, gig) = self.load_profiles(agent_id, gig_id).await?;
        let existing = self
            .bounded(self.relationships.find_pair(agent_id, gig_id))
            .await?;

        let outcome = compute_match(&agent, &gig, &self.config.weights)?;
        let at = now();
        let record = match existing {
            Some(prior) if !prior.enrollment_status.is_terminal() => {
                return Err(Error::InvalidState {
                    current: prior.enrollment_status.as_str(),
                    action: ACTION,
                });
            }
            Some(mut prior) => {
                prior.enrollment_status = EnrollmentStatus::Requested;
                prior.requested_at = Some(at);
                prior.invitation_expires_at = None;
                prior.match_score = outcome.score;
                prior.match_status = outcome.status;
                prior.match_details = outcome.details;
                prior.weights = self.config.weights;
                if notes.is_some() {
                    prior.notes = notes;
                }
                prior.updated_at = at;
                self.bounded(self.relationships.update(prior)).await?
            }
            None => {
                let mut record = self.new_record(agent_id, gig_id, outcome, notes, at);
                record.enrollment_status = EnrollmentStatus::Requested;
                record.requested_at = Some(at);
                record.invitation_expires_at = None;
                self.bounded(self.relationships.insert(record)).await?
            }
        };

        let event = RelationshipEvent::EnrollmentRequested {
            relationship_id: record.id,
            agent_id,
            gig_id,
            match_score: record.match_score,
        };
        let record = self.notify(record, event).await;
        self.sync.sync_links(&record).await;

        info!(
            relationship_id = %record.id,
            %agent_id,
            %gig_id,
            "agent requested enrollment"
        );
        Ok(record)
    }

    /// Company accepts an agent's enrollment request.
    pub async fn accept_enrollment_request(
        &self,
        relationship_id: Uuid,
        notes: Option<String>,
    ) -> Result<GigAgent> {
        const ACTION: &str = "accept enrollment request";
        let record = self.get(relationship_id).await?;
        if record.enrollment_status != EnrollmentStatus::Requested {
            return Err(Error::InvalidState {
                current: record.enrollment_status.as_str(),
                action: ACTION,
            });
        }
        self.enroll(record, notes).await
    }

    /// Company declines an agent's enrollment request. Unlike a rejected
    /// invitation the record persists, so the agent can request again
    /// later.
    pub async fn reject_enrollment_request(&self, relationship_id: Uuid) -> Result<GigAgent> {
        const ACTION: &str = "reject enrollment request";
        let mut record = self.get(relationship_id).await?;
        if record.enrollment_status != EnrollmentStatus::Requested {
            return Err(Error::InvalidState {
                current: record.enrollment_status.as_str(),
                action: ACTION,
            });
        }

        record.enrollment_status = EnrollmentStatus::Rejected;
        record.updated_at = now();
        let record = self.bounded(self.relationships.update(record)).await?;
        self.sync.sync_links(&record).await;
        info!(relationship_id = %record.id, "enrollment request rejected");
        Ok(record)
    }

    /// Company withdraws the gig side of a live relationship.
    pub async fn cancel_relationship(&self, relationship_id: Uuid) -> Result<GigAgent> {
        const ACTION: &str = "cancel relationship";
        let mut record = self.get(relationship_id).await?;
        if record.enrollment_status.is_terminal() {
            return Err(Error::InvalidState {
                current: record.enrollment_status.as_str(),
                action: ACTION,
            });
        }

        record.enrollment_status = EnrollmentStatus::Cancelled;
        record.updated_at = now();
        let record = self.bounded(self.relationships.update(record)).await?;
        self.sync.sync_links(&record).await;
        info!(relationship_id = %record.id, "relationship cancelled");
        Ok(record)
    }

    /// Sweep invitations past their deadline into `expired`. Intended to
    /// be driven by an external scheduler; returns how many records moved.
    pub async fn expire_overdue(&self) -> Result<usize> {
        let stale = self
            .bounded(self.relationships.list_expired_invitations(now()))
            .await?;
        let mut expired = 0usize;
        for mut record in stale {
            record.enrollment_status = EnrollmentStatus::Expired;
            record.updated_at = now();
            match self.bounded(self.relationships.update(record)).await {
                Ok(updated) => {
                    self.sync.sync_links(&updated).await;
                    expired += 1;
                }
                Err(err) => warn!(error = %err, "failed to expire invitation"),
            }
        }
        Ok(expired)
    }

    async fn enroll(&self, mut record: GigAgent, notes: Option<String>) -> Result<GigAgent> {
        let at = now();
        record.enrollment_status = EnrollmentStatus::Enrolled;
        record.enrolled_at = Some(at);
        record.updated_at = at;
        if notes.is_some() {
            record.notes = notes;
        }
        let record = self.bounded(self.relationships.update(record)).await?;

        if let Err(err) = self
            .bounded(
                self.profiles
                    .add_enrolled_agent(record.gig_id, record.agent_id),
            )
            .await
        {
            warn!(gig_id = %record.gig_id, error = %err, "enrolled set update failed");
        }
        self.sync.sync_links(&record).await;
        if let Err(err) = self
            .onboarding
            .enrollment_confirmed(record.agent_id, record.gig_id)
            .await
        {
            warn!(
                agent_id = %record.agent_id,
                error = %err,
                "onboarding progress update failed"
            );
        }

        info!(
            relationship_id = %record.id,
            agent_id = %record.agent_id,
            gig_id = %record.gig_id,
            "agent enrolled"
        );
        Ok(record)
    }

    /// Push a stale invitation to `expired` and refuse the attempted
    /// action. Valid transitions pass the record through untouched.
    async fn expire_if_due(
        &self,
        mut record: GigAgent,
        action: &'static str,
    ) -> Result<GigAgent> {
        if !self.config.enforce_invitation_expiry || !record.is_invitation_expired(now()) {
            return Ok(record);
        }

        record.enrollment_status = EnrollmentStatus::Expired;
        record.updated_at = now();
        match self.bounded(self.relationships.update(record.clone())).await {
            Ok(updated) => self.sync.sync_links(&updated).await,
            Err(err) => {
                warn!(relationship_id = %record.id, error = %err, "failed to persist expiry")
            }
        }
        Err(Error::InvalidState {
            current: EnrollmentStatus::Expired.as_str(),
            action,
        })
    }

    fn new_record(
        &self,
        agent_id: Uuid,
        gig_id: Uuid,
        outcome: MatchOutcome,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> GigAgent {
        GigAgent {
            id: Uuid::new_v4(),
            agent_id,
            gig_id,
            match_score: outcome.score,
            match_status: outcome.status,
            match_details: outcome.details,
            weights: self.config.weights,
            enrollment_status: EnrollmentStatus::Invited,
            notes,
            invitation_expires_at: None,
            notified_at: None,
            requested_at: None,
            enrolled_at: None,
            created_at: at,
            updated_at: at,
        }
    }

    async fn notify(&self, mut record: GigAgent, event: RelationshipEvent) -> GigAgent {
        match self.notifier.send(event).await {
            Ok(()) => {
                record.notified_at = Some(now());
                match self.bounded(self.relationships.update(record.clone())).await {
                    Ok(updated) => record = updated,
                    Err(err) => warn!(
                        relationship_id = %record.id,
                        error = %err,
                        "failed to persist notification timestamp"
                    ),
                }
            }
            Err(err) => {
                warn!(relationship_id = %record.id, error = %err, "notification send failed")
            }
        }
        record
    }

    async fn get(&self, relationship_id: Uuid) -> Result<GigAgent> {
        self.bounded(self.relationships.get(relationship_id))
            .await?
            .ok_or_else(|| Error::not_found("relationship", relationship_id))
    }

    async fn load_profiles(
        &self,
        agent_id: Uuid,
        gig_id: Uuid,
    ) -> Result<(AgentProfile, GigProfile)> {
        let agent = self
            .bounded(self.profiles.agent(agent_id))
            .await?
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        let gig = self
            .bounded(self.profiles.gig(gig_id))
            .await?
            .ok_or_else(|| Error::not_found("gig", gig_id))?;
        Ok((agent, gig))
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        Ok(timeout(self.config.store_deadline, fut).await??)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification::{
        LoggingNotifier, MockNotificationSender, MockOnboardingTracker,
    };
    use crate::store::MemoryStore;

    async fn seeded_store() -> (Arc<MemoryStore>, Uuid, Uuid) {
        let store = Arc::new(MemoryStore::new());
        let agent = AgentProfile {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            ..AgentProfile::default()
        };
        let gig = GigProfile {
            id: Uuid::new_v4(),
            title: "Backend gig".into(),
            ..GigProfile::default()
        };
        let (agent_id, gig_id) = (agent.id, gig.id);
        store.put_agent(agent).await.unwrap();
        store.put_gig(gig).await.unwrap();
        (store, agent_id, gig_id)
    }

    fn service_with(
        store: Arc<MemoryStore>,
        notifier: Arc<dyn NotificationSender>,
        onboarding: Arc<dyn OnboardingTracker>,
    ) -> EnrollmentService {
        EnrollmentService::new(
            store.clone(),
            store,
            notifier,
            onboarding,
            Config::default(),
        )
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_the_invite() {
        let (store, agent_id, gig_id) = seeded_store().await;
        let mut notifier = MockNotificationSender::new();
        notifier
            .expect_send()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("smtp down")));

        let service = service_with(
            store.clone(),
            Arc::new(notifier),
            Arc::new(MockOnboardingTracker::new()),
        );
        let record = service
            .create_relationship(agent_id, gig_id, None)
            .await
            .unwrap();

        assert_eq!(record.enrollment_status, EnrollmentStatus::Invited);
        assert!(record.notified_at.is_none());
        assert_eq!(store.relationship_count().await, 1);
    }

    #[tokio::test]
    async fn onboarding_failure_does_not_fail_the_acceptance() {
        let (store, agent_id, gig_id) = seeded_store().await;
        let mut onboarding = MockOnboardingTracker::new();
        onboarding
            .expect_enrollment_confirmed()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("tracker offline")));

        let service = service_with(store.clone(), Arc::new(LoggingNotifier), Arc::new(onboarding));
        let invited = service
            .create_relationship(agent_id, gig_id, None)
            .await
            .unwrap();
        let enrolled = service.accept_invitation(invited.id, None).await.unwrap();

        assert_eq!(enrolled.enrollment_status, EnrollmentStatus::Enrolled);
        let gig = store.gig(gig_id).await.unwrap().unwrap();
        assert!(gig.enrolled_agents.contains(&agent_id));
    }

    #[tokio::test]
    async fn successful_notification_stamps_the_record() {
        let (store, agent_id, gig_id) = seeded_store().await;
        let mut notifier = MockNotificationSender::new();
        notifier.expect_send().times(1).returning(|_| Ok(()));

        let service = service_with(
            store,
            Arc::new(notifier),
            Arc::new(MockOnboardingTracker::new()),
        );
        let record = service
            .create_relationship(agent_id, gig_id, None)
            .await
            .unwrap();
        assert!(record.notified_at.is_some());
    }
}
