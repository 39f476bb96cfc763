//! Event play service - fetch an event, resolve it once, hand back the result
//!
//! The resolution is computed immediately when a play is requested. Any
//! suspense delay before revealing it is left to the client; nothing here
//! re-rolls when the result is finally shown.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::application::ports::outbound::{EventSourcePort, RandomPort};
use crate::domain::entities::Event;
use crate::domain::services::{resolve, validate_event, ResolutionResult, ResolveError};
use crate::domain::value_objects::{CharacterId, EventId};

#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("Event {event_id} not found for character {character_id}")]
    EventNotFound {
        character_id: CharacterId,
        event_id: EventId,
    },
    #[error(transparent)]
    Source(#[from] anyhow::Error),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// A resolved play together with the event snapshot it was rolled against
#[derive(Debug, Clone)]
pub struct PlayOutcome {
    pub event: Event,
    pub result: ResolutionResult,
}

/// Event play use cases
#[async_trait]
pub trait EventPlayService: Send + Sync {
    /// Fetch an event from the backend and resolve it
    async fn play(
        &self,
        character_id: CharacterId,
        event_id: EventId,
        session_cookie: Option<&str>,
    ) -> Result<PlayOutcome, PlayError>;

    /// Resolve an event the caller already holds
    async fn play_event(&self, event: &Event) -> Result<ResolutionResult, ResolveError>;

    /// List a character's events
    async fn list_events(
        &self,
        character_id: CharacterId,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Event>, PlayError>;
}

/// Default implementation backed by an `EventSourcePort`
pub struct EventPlayServiceImpl {
    source: Arc<dyn EventSourcePort>,
    rng: Mutex<Box<dyn RandomPort>>,
}

impl EventPlayServiceImpl {
    pub fn new(source: Arc<dyn EventSourcePort>, rng: Box<dyn RandomPort>) -> Self {
        Self {
            source,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl EventPlayService for EventPlayServiceImpl {
    #[instrument(skip(self, session_cookie))]
    async fn play(
        &self,
        character_id: CharacterId,
        event_id: EventId,
        session_cookie: Option<&str>,
    ) -> Result<PlayOutcome, PlayError> {
        debug!(character_id = %character_id, event_id = %event_id, "Fetching event to play");
        let event = self
            .source
            .get_event(character_id, event_id, session_cookie)
            .await?
            .ok_or(PlayError::EventNotFound {
                character_id,
                event_id,
            })?;

        let result = self.play_event(&event).await?;
        Ok(PlayOutcome { event, result })
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn play_event(&self, event: &Event) -> Result<ResolutionResult, ResolveError> {
        for issue in validate_event(event) {
            warn!(event_id = %event.id, issue = %issue, "Event configuration issue");
        }

        let result = {
            let mut rng = self.rng.lock().await;
            resolve(event, &mut || rng.random_f64())
        };

        match &result {
            Ok(resolution) => info!(
                event_id = %event.id,
                triggered = resolution.triggered,
                roll = resolution.roll,
                steps = resolution.steps.len(),
                "Event resolved"
            ),
            Err(e) => warn!(event_id = %event.id, error = %e, "Event resolution failed"),
        }
        result
    }

    #[instrument(skip(self, session_cookie))]
    async fn list_events(
        &self,
        character_id: CharacterId,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Event>, PlayError> {
        debug!(character_id = %character_id, "Listing events for character");
        Ok(self
            .source
            .list_events(character_id, session_cookie)
            .await?)
    }
}
