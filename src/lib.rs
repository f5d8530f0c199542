pub mod config;
pub mod error;
pub mod matching;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::services::enrollment_service::EnrollmentService;
use crate::services::match_service::MatchService;
use crate::services::notification::{
    LoggingNotifier, LoggingOnboardingTracker, NotificationSender, OnboardingTracker,
};
use crate::services::sync_service::SyncService;
use crate::store::{MemoryStore, ProfileStore, RelationshipStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub match_service: MatchService,
    pub enrollment_service: EnrollmentService,
    pub sync_service: SyncService,
}

impl AppState {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        relationships: Arc<dyn RelationshipStore>,
        notifier: Arc<dyn NotificationSender>,
        onboarding: Arc<dyn OnboardingTracker>,
        config: Config,
    ) -> Self {
        let match_service = MatchService::new(profiles.clone(), config.clone());
        let enrollment_service = EnrollmentService::new(
            profiles.clone(),
            relationships.clone(),
            notifier,
            onboarding,
            config.clone(),
        );
        let sync_service = SyncService::new(profiles, relationships);

        Self {
            config,
            match_service,
            enrollment_service,
            sync_service,
        }
    }

    /// Everything wired over one in-memory store with logging
    /// collaborators. The default entry point for tests and embedding.
    pub fn in_memory(config: Config) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = Self::new(
            store.clone(),
            store.clone(),
            Arc::new(LoggingNotifier),
            Arc::new(LoggingOnboardingTracker),
            config,
        );
        (state, store)
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
