use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::agent::{AgentProfile, GigLink};
use crate::models::gig::{AgentLink, GigProfile};
use crate::models::gig_agent::GigAgent;

use super::{ProfileStore, RelationshipStore};

/// Document store kept in process memory. Single-document writes are
/// atomic (one lock per collection); the pair index lives under the same
/// lock as the records, so racing inserts serialize on it.
#[derive(Default)]
pub struct MemoryStore {
    agents: RwLock<HashMap<Uuid, AgentProfile>>,
    gigs: RwLock<HashMap<Uuid, GigProfile>>,
    relationships: RwLock<RelationshipTable>,
}

#[derive(Default)]
struct RelationshipTable {
    by_id: HashMap<Uuid, GigAgent>,
    by_pair: HashMap<(Uuid, Uuid), Uuid>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn relationship_count(&self) -> usize {
        self.relationships.read().await.by_id.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn agent(&self, id: Uuid) -> Result<Option<AgentProfile>> {
        Ok(self.agents.read().await.get(&id).cloned())
    }

    async fn gig(&self, id: Uuid) -> Result<Option<GigProfile>> {
        Ok(self.gigs.read().await.get(&id).cloned())
    }

    async fn put_agent(&self, profile: AgentProfile) -> Result<()> {
        self.agents.write().await.insert(profile.id, profile);
        Ok(())
    }

    async fn put_gig(&self, profile: GigProfile) -> Result<()> {
        self.gigs.write().await.insert(profile.id, profile);
        Ok(())
    }

    async fn upsert_gig_link(&self, agent_id: Uuid, link: GigLink) -> Result<()> {
        let mut agents = self.agents.write().await;
        let agent = agents
            .get_mut(&agent_id)
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        match agent
            .gig_links
            .iter_mut()
            .find(|existing| existing.gig_id == link.gig_id)
        {
            Some(existing) => *existing = link,
            None => agent.gig_links.push(link),
        }
        Ok(())
    }

    async fn upsert_agent_link(&self, gig_id: Uuid, link: AgentLink) -> Result<()> {
        let mut gigs = self.gigs.write().await;
        let gig = gigs
            .get_mut(&gig_id)
            .ok_or_else(|| Error::not_found("gig", gig_id))?;
        match gig
            .agent_links
            .iter_mut()
            .find(|existing| existing.agent_id == link.agent_id)
        {
            Some(existing) => *existing = link,
            None => gig.agent_links.push(link),
        }
        Ok(())
    }

    async fn remove_gig_link(&self, agent_id: Uuid, gig_id: Uuid) -> Result<()> {
        let mut agents = self.agents.write().await;
        if let Some(agent) = agents.get_mut(&agent_id) {
            agent.gig_links.retain(|link| link.gig_id != gig_id);
        }
        Ok(())
    }

    async fn remove_agent_link(&self, gig_id: Uuid, agent_id: Uuid) -> Result<()> {
        let mut gigs = self.gigs.write().await;
        if let Some(gig) = gigs.get_mut(&gig_id) {
            gig.agent_links.retain(|link| link.agent_id != agent_id);
        }
        Ok(())
    }

    async fn set_gig_links(&self, agent_id: Uuid, links: Vec<GigLink>) -> Result<()> {
        let mut agents = self.agents.write().await;
        let agent = agents
            .get_mut(&agent_id)
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        agent.gig_links = links;
        Ok(())
    }

    async fn set_agent_links(&self, gig_id: Uuid, links: Vec<AgentLink>) -> Result<()> {
        let mut gigs = self.gigs.write().await;
        let gig = gigs
            .get_mut(&gig_id)
            .ok_or_else(|| Error::not_found("gig", gig_id))?;
        gig.agent_links = links;
        Ok(())
    }

    async fn add_enrolled_agent(&self, gig_id: Uuid, agent_id: Uuid) -> Result<()> {
        let mut gigs = self.gigs.write().await;
        let gig = gigs
            .get_mut(&gig_id)
            .ok_or_else(|| Error::not_found("gig", gig_id))?;
        if !gig.enrolled_agents.contains(&agent_id) {
            gig.enrolled_agents.push(agent_id);
        }
        Ok(())
    }

    async fn set_enrolled_agents(&self, gig_id: Uuid, agent_ids: Vec<Uuid>) -> Result<()> {
        let mut gigs = self.gigs.write().await;
        let gig = gigs
            .get_mut(&gig_id)
            .ok_or_else(|| Error::not_found("gig", gig_id))?;
        gig.enrolled_agents = agent_ids;
        Ok(())
    }
}

#[async_trait]
impl RelationshipStore for MemoryStore {
    async fn insert(&self, record: GigAgent) -> Result<GigAgent> {
        let mut table = self.relationships.write().await;
        let pair = (record.agent_id, record.gig_id);
        if table.by_pair.contains_key(&pair) {
            return Err(Error::Conflict(format!(
                "relationship between agent {} and gig {} already exists",
                record.agent_id, record.gig_id
            )));
        }
        table.by_pair.insert(pair, record.id);
        table.by_id.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<GigAgent>> {
        Ok(self.relationships.read().await.by_id.get(&id).cloned())
    }

    async fn find_pair(&self, agent_id: Uuid, gig_id: Uuid) -> Result<Option<GigAgent>> {
        let table = self.relationships.read().await;
        Ok(table
            .by_pair
            .get(&(agent_id, gig_id))
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn update(&self, record: GigAgent) -> Result<GigAgent> {
        let mut table = self.relationships.write().await;
        if !table.by_id.contains_key(&record.id) {
            return Err(Error::not_found("relationship", record.id));
        }
        table.by_id.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut table = self.relationships.write().await;
        if let Some(record) = table.by_id.remove(&id) {
            table.by_pair.remove(&(record.agent_id, record.gig_id));
        }
        Ok(())
    }

    async fn list_for_agent(&self, agent_id: Uuid) -> Result<Vec<GigAgent>> {
        let table = self.relationships.read().await;
        Ok(table
            .by_id
            .values()
            .filter(|record| record.agent_id == agent_id)
            .cloned()
            .collect())
    }

    async fn list_for_gig(&self, gig_id: Uuid) -> Result<Vec<GigAgent>> {
        let table = self.relationships.read().await;
        Ok(table
            .by_id
            .values()
            .filter(|record| record.gig_id == gig_id)
            .cloned()
            .collect())
    }

    async fn list_expired_invitations(&self, now: DateTime<Utc>) -> Result<Vec<GigAgent>> {
        let table = self.relationships.read().await;
        Ok(table
            .by_id
            .values()
            .filter(|record| record.is_invitation_expired(now))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::Weights;
    use crate::models::gig_agent::{EnrollmentStatus, MatchDetails, MatchStatus};

    fn record(agent_id: Uuid, gig_id: Uuid) -> GigAgent {
        GigAgent {
            id: Uuid::new_v4(),
            agent_id,
            gig_id,
            match_score: 0.5,
            match_status: MatchStatus::PartialMatch,
            match_details: MatchDetails::default(),
            weights: Weights::DEFAULT,
            enrollment_status: EnrollmentStatus::Invited,
            notes: None,
            invitation_expires_at: None,
            notified_at: None,
            requested_at: None,
            enrolled_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_pair_insert_conflicts() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let agent_id = Uuid::new_v4();
            let gig_id = Uuid::new_v4();

            RelationshipStore::insert(&store, record(agent_id, gig_id))
                .await
                .unwrap();
            let err = RelationshipStore::insert(&store, record(agent_id, gig_id))
                .await
                .unwrap_err();
            assert!(matches!(err, Error::Conflict(_)));
            assert_eq!(store.relationship_count().await, 1);
        });
    }

    #[test]
    fn delete_frees_the_pair_for_reinsertion() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let agent_id = Uuid::new_v4();
            let gig_id = Uuid::new_v4();

            let first = RelationshipStore::insert(&store, record(agent_id, gig_id))
                .await
                .unwrap();
            RelationshipStore::delete(&store, first.id).await.unwrap();
            assert!(RelationshipStore::insert(&store, record(agent_id, gig_id))
                .await
                .is_ok());
        });
    }

    #[test]
    fn link_upsert_updates_in_place() {
        tokio_test::block_on(async {
            let store = MemoryStore::new();
            let agent = AgentProfile {
                id: Uuid::new_v4(),
                name: "Ada".into(),
                ..AgentProfile::default()
            };
            let agent_id = agent.id;
            store.put_agent(agent).await.unwrap();

            let gig_id = Uuid::new_v4();
            let rel = record(agent_id, gig_id);
            store
                .upsert_gig_link(agent_id, GigLink::from_record(&rel))
                .await
                .unwrap();
            store
                .upsert_gig_link(agent_id, GigLink::from_record(&rel))
                .await
                .unwrap();

            let stored = store.agent(agent_id).await.unwrap().unwrap();
            assert_eq!(stored.gig_links.len(), 1);
        });
    }
}
