use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use crate::error::Result;
use crate::models::agent::GigLink;
use crate::models::gig::AgentLink;
use crate::models::gig_agent::{EnrollmentStatus, GigAgent};
use crate::store::{ProfileStore, RelationshipStore};

/// Keeps the embedded relationship arrays on both profiles in step with
/// the canonical records. Writes are best-effort: the canonical record is
/// the authority, and the read paths rebuild a stale projection.
#[derive(Clone)]
pub struct SyncService {
    profiles: Arc<dyn ProfileStore>,
    relationships: Arc<dyn RelationshipStore>,
}

impl SyncService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        relationships: Arc<dyn RelationshipStore>,
    ) -> Self {
        Self {
            profiles,
            relationships,
        }
    }

    /// Upsert the entry for this record into both embedded arrays.
    /// Idempotent: replaying the same record leaves one entry per pair.
    pub async fn sync_links(&self, record: &GigAgent) {
        if let Err(err) = self
            .profiles
            .upsert_gig_link(record.agent_id, GigLink::from_record(record))
            .await
        {
            warn!(agent_id = %record.agent_id, error = %err, "agent link sync failed");
        }
        if let Err(err) = self
            .profiles
            .upsert_agent_link(record.gig_id, AgentLink::from_record(record))
            .await
        {
            warn!(gig_id = %record.gig_id, error = %err, "gig link sync failed");
        }
    }

    /// Drop the pair's entries from both embedded arrays.
    pub async fn remove_links(&self, agent_id: Uuid, gig_id: Uuid) {
        if let Err(err) = self.profiles.remove_gig_link(agent_id, gig_id).await {
            warn!(%agent_id, error = %err, "agent link removal failed");
        }
        if let Err(err) = self.profiles.remove_agent_link(gig_id, agent_id).await {
            warn!(%gig_id, error = %err, "gig link removal failed");
        }
    }

    /// Authoritative read of an agent's relationships: rebuilt from the
    /// canonical records, with the rebuilt projection persisted back.
    pub async fn agent_links(&self, agent_id: Uuid) -> Result<Vec<GigLink>> {
        let records = self.relationships.list_for_agent(agent_id).await?;
        let links: Vec<GigLink> = records.iter().map(GigLink::from_record).collect();
        if let Err(err) = self.profiles.set_gig_links(agent_id, links.clone()).await {
            warn!(%agent_id, error = %err, "agent projection rebuild failed");
        }
        Ok(links)
    }

    /// Authoritative read of a gig's relationships. Also reconciles the
    /// enrolled-agent set from the enrolled records.
    pub async fn gig_links(&self, gig_id: Uuid) -> Result<Vec<AgentLink>> {
        let records = self.relationships.list_for_gig(gig_id).await?;
        let links: Vec<AgentLink> = records.iter().map(AgentLink::from_record).collect();
        let enrolled: Vec<Uuid> = records
            .iter()
            .filter(|record| record.enrollment_status == EnrollmentStatus::Enrolled)
            .map(|record| record.agent_id)
            .collect();
        if let Err(err) = self.profiles.set_agent_links(gig_id, links.clone()).await {
            warn!(%gig_id, error = %err, "gig projection rebuild failed");
        }
        if let Err(err) = self.profiles.set_enrolled_agents(gig_id, enrolled).await {
            warn!(%gig_id, error = %err, "enrolled set rebuild failed");
        }
        Ok(links)
    }
}
