//! Event source port - Read access to events owned by the character backend
//!
//! Persistence and authentication belong to the backend. The application only
//! needs materialized events, fetched on behalf of the caller's session.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::Event;
use crate::domain::value_objects::{CharacterId, EventId};

/// Port for fetching events, keyed by the owning character
#[async_trait]
pub trait EventSourcePort: Send + Sync {
    /// Get one event with all of its scenarios.
    ///
    /// `session_cookie` is the caller's raw `Cookie` header, forwarded as-is.
    async fn get_event(
        &self,
        character_id: CharacterId,
        event_id: EventId,
        session_cookie: Option<&str>,
    ) -> Result<Option<Event>>;

    /// List every event attached to a character
    async fn list_events(
        &self,
        character_id: CharacterId,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Event>>;
}
