//! Event play API routes
//!
//! Endpoints for rolling a character's events and checking their scenario
//! trees. Events themselves are created and edited on the backend.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::application::dto::{EventSummaryDto, PlayPresentationDto, ValidationReportDto};
use crate::application::services::PlayError;
use crate::domain::entities::Event;
use crate::domain::services::{validate_event, ResolveError};
use crate::domain::value_objects::{CharacterId, EventId};
use crate::infrastructure::backend_client::BackendError;
use crate::infrastructure::state::AppState;

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::COOKIE).and_then(|v| v.to_str().ok())
}

fn play_error_response(error: PlayError) -> (StatusCode, String) {
    match error {
        e @ PlayError::EventNotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
        PlayError::Source(e) => match e.downcast_ref::<BackendError>() {
            Some(BackendError::ApiError { status, message }) if matches!(*status, 401 | 403) => {
                tracing::warn!("Backend rejected the session ({}): {}", status, message);
                let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::UNAUTHORIZED);
                (code, message.clone())
            }
            _ => {
                tracing::error!("Backend request failed: {:#}", e);
                (StatusCode::BAD_GATEWAY, format!("{:#}", e))
            }
        },
        PlayError::Resolve(e) => resolve_error_response(e),
    }
}

fn resolve_error_response(error: ResolveError) -> (StatusCode, String) {
    (StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// List a character's events
pub async fn list_character_events(
    State(state): State<Arc<AppState>>,
    Path(character_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<Vec<EventSummaryDto>>, (StatusCode, String)> {
    let events = state
        .event_play_service
        .list_events(CharacterId::new(character_id), session_cookie(&headers))
        .await
        .map_err(play_error_response)?;

    Ok(Json(events.iter().map(EventSummaryDto::from).collect()))
}

/// Fetch an event from the backend and play it
pub async fn play_character_event(
    State(state): State<Arc<AppState>>,
    Path((character_id, event_id)): Path<(i64, i64)>,
    headers: HeaderMap,
) -> Result<Json<PlayPresentationDto>, (StatusCode, String)> {
    let outcome = state
        .event_play_service
        .play(
            CharacterId::new(character_id),
            EventId::new(event_id),
            session_cookie(&headers),
        )
        .await
        .map_err(play_error_response)?;

    Ok(Json(PlayPresentationDto::from_resolution(
        &outcome.event,
        outcome.result,
        state.config.reveal_delay,
    )))
}

/// Play an event supplied in the request body
pub async fn resolve_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<Event>,
) -> Result<Json<PlayPresentationDto>, (StatusCode, String)> {
    let result = state
        .event_play_service
        .play_event(&event)
        .await
        .map_err(resolve_error_response)?;

    Ok(Json(PlayPresentationDto::from_resolution(
        &event,
        result,
        state.config.reveal_delay,
    )))
}

/// Report configuration issues of an event supplied in the request body
pub async fn validate_event_config(Json(event): Json<Event>) -> Json<ValidationReportDto> {
    let issues = validate_event(&event);
    Json(ValidationReportDto::new(&event, &issues))
}
