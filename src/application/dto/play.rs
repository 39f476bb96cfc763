use std::time::Duration;

use serde::Serialize;

use crate::domain::entities::Event;
use crate::domain::services::{EventConfigError, ResolutionResult};

pub const COIN_SUCCESS: &str = "SUCCESS";
pub const COIN_FAIL: &str = "FAIL";
pub const BADGE_TRIGGERED: &str = "Event triggered";
pub const BADGE_NOT_TRIGGERED: &str = "Event not triggered";
pub const SUMMARY_NOT_TRIGGERED: &str = "The event did not trigger this time. Try again.";
pub const SUMMARY_NO_STEPS: &str = "The event triggered, but there were no scenarios to follow.";

/// Display-ready play result.
///
/// Built once from an already-computed resolution. `reveal_after_ms` is a
/// hint for how long a client may hold the result back for suspense.
#[derive(Debug, Clone, Serialize)]
pub struct PlayPresentationDto {
    pub event_id: i64,
    pub title: String,
    pub chance_to_trigger: f64,
    pub triggered: bool,
    pub roll: f64,
    /// Coin face: `SUCCESS` or `FAIL`
    pub coin: String,
    pub badge: String,
    pub reason: String,
    /// Set when there are no steps to show
    pub summary: Option<String>,
    pub steps: Vec<PlayStepDto>,
    pub reveal_after_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayStepDto {
    /// 1-based
    pub position: usize,
    pub scenario_id: i64,
    /// `Step {position}: {title}`
    pub heading: String,
    pub title: String,
    pub markdown: String,
    pub is_terminal: bool,
}

impl PlayPresentationDto {
    pub fn from_resolution(event: &Event, result: ResolutionResult, reveal_after: Duration) -> Self {
        let (coin, badge) = if result.triggered {
            (COIN_SUCCESS, BADGE_TRIGGERED)
        } else {
            (COIN_FAIL, BADGE_NOT_TRIGGERED)
        };

        let summary = if !result.triggered {
            Some(SUMMARY_NOT_TRIGGERED.to_string())
        } else if result.steps.is_empty() {
            Some(SUMMARY_NO_STEPS.to_string())
        } else {
            None
        };

        let steps = result
            .steps
            .into_iter()
            .enumerate()
            .map(|(idx, step)| PlayStepDto {
                position: idx + 1,
                scenario_id: step.id.value(),
                heading: format!("Step {}: {}", idx + 1, step.title),
                title: step.title,
                markdown: step.description,
                is_terminal: step.is_terminal,
            })
            .collect();

        Self {
            event_id: event.id.value(),
            title: event.title.clone(),
            chance_to_trigger: event.chance_to_trigger,
            triggered: result.triggered,
            roll: result.roll,
            coin: coin.to_string(),
            badge: badge.to_string(),
            reason: result.reason,
            summary,
            steps,
            reveal_after_ms: u64::try_from(reveal_after.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// One row of a character's event list
#[derive(Debug, Clone, Serialize)]
pub struct EventSummaryDto {
    pub id: i64,
    pub title: String,
    pub chance_to_trigger: f64,
    pub scenario_count: usize,
    pub root_count: usize,
}

impl From<&Event> for EventSummaryDto {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id.value(),
            title: e.title.clone(),
            chance_to_trigger: e.chance_to_trigger,
            scenario_count: e.scenarios.len(),
            root_count: e.root_count(),
        }
    }
}

/// Result of checking an event's configuration
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReportDto {
    pub event_id: i64,
    pub valid: bool,
    pub issues: Vec<String>,
}

impl ValidationReportDto {
    pub fn new(event: &Event, issues: &[EventConfigError]) -> Self {
        Self {
            event_id: event.id.value(),
            valid: issues.is_empty(),
            issues: issues.iter().map(ToString::to_string).collect(),
        }
    }
}
