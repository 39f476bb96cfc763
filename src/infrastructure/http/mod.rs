//! HTTP REST API routes

mod event_play_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character event routes
        .route(
            "/api/characters/{character_id}/events",
            get(event_play_routes::list_character_events),
        )
        .route(
            "/api/characters/{character_id}/events/{event_id}/play",
            post(event_play_routes::play_character_event),
        )
        // Ad-hoc event routes
        .route("/api/events/resolve", post(event_play_routes::resolve_event))
        .route(
            "/api/events/validate",
            post(event_play_routes::validate_event_config),
        )
}
