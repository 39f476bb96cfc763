//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::services::{EventPlayService, EventPlayServiceImpl};
use crate::infrastructure::backend_client::BackendClient;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::random_adapter::StdRngAdapter;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub event_play_service: Arc<dyn EventPlayService>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        // Initialize backend client
        let backend = BackendClient::new(&config.backend_base_url, config.backend_timeout)?;

        // One generator for the whole process; seeded when configured
        let rng = StdRngAdapter::from_seed_option(config.rng_seed);

        let event_play_service = EventPlayServiceImpl::new(Arc::new(backend), Box::new(rng));

        Ok(Self::with_service(config, Arc::new(event_play_service)))
    }

    pub fn with_service(config: AppConfig, event_play_service: Arc<dyn EventPlayService>) -> Self {
        Self {
            config,
            event_play_service,
        }
    }
}
