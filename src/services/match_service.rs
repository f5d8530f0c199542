use std::sync::Arc;

use tokio::time::timeout;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::matching::{compute_match, MatchOutcome, Weights};
use crate::store::ProfileStore;

/// Loads both profiles and delegates to the pure scoring engine.
#[derive(Clone)]
pub struct MatchService {
    profiles: Arc<dyn ProfileStore>,
    config: Config,
}

impl MatchService {
    pub fn new(profiles: Arc<dyn ProfileStore>, config: Config) -> Self {
        Self { profiles, config }
    }

    pub async fn compute(
        &self,
        agent_id: Uuid,
        gig_id: Uuid,
        weights: Option<Weights>,
    ) -> Result<MatchOutcome> {
        let deadline = self.config.store_deadline;
        let agent = timeout(deadline, self.profiles.agent(agent_id))
            .await??
            .ok_or_else(|| Error::not_found("agent", agent_id))?;
        let gig = timeout(deadline, self.profiles.gig(gig_id))
            .await??
            .ok_or_else(|| Error::not_found("gig", gig_id))?;

        let weights = weights.unwrap_or(self.config.weights);
        compute_match(&agent, &gig, &weights)
    }
}
