pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::agent::{AgentProfile, GigLink};
use crate::models::gig::{AgentLink, GigProfile};
use crate::models::gig_agent::GigAgent;

pub use memory::MemoryStore;

/// Read/write access to profile documents. Each method is one atomic
/// single-document operation; the store gives no cross-document guarantee.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn agent(&self, id: Uuid) -> Result<Option<AgentProfile>>;
    async fn gig(&self, id: Uuid) -> Result<Option<GigProfile>>;
    async fn put_agent(&self, profile: AgentProfile) -> Result<()>;
    async fn put_gig(&self, profile: GigProfile) -> Result<()>;

    /// Update-in-place by gig id, else append.
    async fn upsert_gig_link(&self, agent_id: Uuid, link: GigLink) -> Result<()>;
    /// Update-in-place by agent id, else append.
    async fn upsert_agent_link(&self, gig_id: Uuid, link: AgentLink) -> Result<()>;
    async fn remove_gig_link(&self, agent_id: Uuid, gig_id: Uuid) -> Result<()>;
    async fn remove_agent_link(&self, gig_id: Uuid, agent_id: Uuid) -> Result<()>;
    async fn set_gig_links(&self, agent_id: Uuid, links: Vec<GigLink>) -> Result<()>;
    async fn set_agent_links(&self, gig_id: Uuid, links: Vec<AgentLink>) -> Result<()>;

    /// Set semantics: appending an already-enrolled agent is a no-op.
    async fn add_enrolled_agent(&self, gig_id: Uuid, agent_id: Uuid) -> Result<()>;
    async fn set_enrolled_agents(&self, gig_id: Uuid, agent_ids: Vec<Uuid>) -> Result<()>;
}

/// Access to the canonical relationship records. The store enforces the
/// (agent_id, gig_id) uniqueness constraint: under two racing inserts the
/// loser gets a Conflict, never a duplicate.
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    async fn insert(&self, record: GigAgent) -> Result<GigAgent>;
    async fn get(&self, id: Uuid) -> Result<Option<GigAgent>>;
    async fn find_pair(&self, agent_id: Uuid, gig_id: Uuid) -> Result<Option<GigAgent>>;
    async fn update(&self, record: GigAgent) -> Result<GigAgent>;
    async fn delete(&self, id: Uuid) -> Result<()>;
    async fn list_for_agent(&self, agent_id: Uuid) -> Result<Vec<GigAgent>>;
    async fn list_for_gig(&self, gig_id: Uuid) -> Result<Vec<GigAgent>>;
    async fn list_expired_invitations(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<GigAgent>>;
}
