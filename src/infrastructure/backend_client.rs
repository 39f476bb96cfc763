//! Backend client for character-owned events
//!
//! Talks to the REST backend that owns characters, events and scenarios.
//! Authentication stays with the backend: the caller's session cookie is
//! forwarded untouched.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, StatusCode};

use crate::application::ports::outbound::EventSourcePort;
use crate::domain::entities::Event;
use crate::domain::value_objects::{CharacterId, EventId};

/// Client for the events API
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self, character_id: CharacterId) -> String {
        format!("{}/api/events/characters/{}/", self.base_url, character_id)
    }

    fn event_url(&self, character_id: CharacterId, event_id: EventId) -> String {
        format!(
            "{}/api/events/characters/{}/{}/",
            self.base_url, character_id, event_id
        )
    }

    fn with_session(request: RequestBuilder, session_cookie: Option<&str>) -> RequestBuilder {
        match session_cookie {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }

    /// Fetch a single event with its scenarios. `None` on 404.
    pub async fn fetch_event(
        &self,
        character_id: CharacterId,
        event_id: EventId,
        session_cookie: Option<&str>,
    ) -> Result<Option<Event>, BackendError> {
        let request = self.client.get(self.event_url(character_id, event_id));
        let response = Self::with_session(request, session_cookie).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(BackendError::ApiError {
                status,
                message: flatten_drf_errors(&body, "Failed to fetch event"),
            });
        }

        Ok(Some(response.json().await?))
    }

    /// Fetch every event of a character. Empty on 404.
    pub async fn fetch_events(
        &self,
        character_id: CharacterId,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Event>, BackendError> {
        let request = self.client.get(self.events_url(character_id));
        let response = Self::with_session(request, session_cookie).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(BackendError::ApiError {
                status,
                message: flatten_drf_errors(&body, "Failed to fetch events"),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl EventSourcePort for BackendClient {
    async fn get_event(
        &self,
        character_id: CharacterId,
        event_id: EventId,
        session_cookie: Option<&str>,
    ) -> Result<Option<Event>> {
        self.fetch_event(character_id, event_id, session_cookie)
            .await
            .with_context(|| format!("Failed to fetch event {event_id} from backend"))
    }

    async fn list_events(
        &self,
        character_id: CharacterId,
        session_cookie: Option<&str>,
    ) -> Result<Vec<Event>> {
        self.fetch_events(character_id, session_cookie)
            .await
            .with_context(|| format!("Failed to list events of character {character_id}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },
}

/// Flatten a Django REST Framework error body into one readable line.
///
/// `{"title": ["Too long."], "detail": "Nope"}` becomes
/// `Title: Too long. • Error: Nope`. Bodies that are not a JSON object are
/// returned as-is, or `fallback` when empty.
pub fn flatten_drf_errors(body: &str, fallback: &str) -> String {
    let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            fallback.to_string()
        } else {
            trimmed.to_string()
        };
    };
    if fields.is_empty() {
        return fallback.to_string();
    }

    fields
        .iter()
        .map(|(key, value)| {
            let label = match key.as_str() {
                "non_field_errors" | "detail" => "Error".to_string(),
                _ => capitalize(key),
            };
            let messages = match value {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(json_text)
                    .collect::<Vec<_>>()
                    .join(", "),
                other => json_text(other),
            };
            format!("{label}: {messages}")
        })
        .collect::<Vec<_>>()
        .join(" • ")
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_follow_backend_layout() {
        let client = BackendClient::new("http://backend.test/", Duration::from_secs(1))
            .expect("client builds");
        assert_eq!(
            client.events_url(CharacterId::new(4)),
            "http://backend.test/api/events/characters/4/"
        );
        assert_eq!(
            client.event_url(CharacterId::new(4), EventId::new(17)),
            "http://backend.test/api/events/characters/4/17/"
        );
    }

    #[test]
    fn test_flatten_field_errors() {
        let body = r#"{"title": ["This field is required."], "chance_to_trigger": ["Too big.", "Not a number."]}"#;
        assert_eq!(
            flatten_drf_errors(body, "Request failed"),
            "Title: This field is required. • Chance_to_trigger: Too big., Not a number."
        );
    }

    #[test]
    fn test_flatten_keeps_backend_field_order() {
        let body = r#"{"title": ["Required."], "chance_to_trigger": ["Too big."], "description": ["Too long."]}"#;
        assert_eq!(
            flatten_drf_errors(body, "x"),
            "Title: Required. • Chance_to_trigger: Too big. • Description: Too long."
        );
    }

    #[test]
    fn test_flatten_detail_and_non_field_errors() {
        assert_eq!(
            flatten_drf_errors(r#"{"detail": "Not found."}"#, "Request failed"),
            "Error: Not found."
        );
        assert_eq!(
            flatten_drf_errors(r#"{"non_field_errors": ["Bad pair"]}"#, "Request failed"),
            "Error: Bad pair"
        );
    }

    #[test]
    fn test_flatten_non_json_bodies() {
        assert_eq!(flatten_drf_errors("", "Failed to fetch event"), "Failed to fetch event");
        assert_eq!(flatten_drf_errors("{}", "Failed to fetch event"), "Failed to fetch event");
        assert_eq!(
            flatten_drf_errors("<h1>Server Error</h1>", "Failed"),
            "<h1>Server Error</h1>"
        );
    }

    /// Serve a fixed status and body for every request on a local port
    async fn stub_backend(status: u16, body: &'static str) -> BackendClient {
        use axum::{http::StatusCode as AxumStatus, Router};

        let status = AxumStatus::from_u16(status).expect("valid status");
        let app = Router::new().fallback(move || async move { (status, body) });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind local port");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        BackendClient::new(&format!("http://{addr}"), Duration::from_secs(5))
            .expect("client builds")
    }

    #[tokio::test]
    async fn test_fetch_events_unknown_character_is_empty() {
        let client = stub_backend(404, r#"{"detail": "Not found."}"#).await;
        let events = client
            .fetch_events(CharacterId::new(404), None)
            .await
            .expect("404 is not an error");
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_event_missing_is_none() {
        let client = stub_backend(404, "").await;
        let event = client
            .fetch_event(CharacterId::new(1), EventId::new(2), None)
            .await
            .expect("404 is not an error");
        assert!(event.is_none());
    }

    #[tokio::test]
    async fn test_fetch_event_rejected_session_keeps_status() {
        let client = stub_backend(
            401,
            r#"{"detail": "Authentication credentials were not provided."}"#,
        )
        .await;
        let error = client
            .fetch_event(CharacterId::new(1), EventId::new(2), Some("sessionid=stale"))
            .await
            .expect_err("401 is an error");

        match error {
            BackendError::ApiError { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Error: Authentication credentials were not provided.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_events_server_error_is_api_error() {
        let client = stub_backend(500, "").await;
        let error = client
            .fetch_events(CharacterId::new(1), None)
            .await
            .expect_err("500 is an error");
        assert!(matches!(error, BackendError::ApiError { status: 500, .. }));
    }
}
