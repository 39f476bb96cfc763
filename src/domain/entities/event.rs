//! Event entity - Character-owned probabilistic narrative events
//!
//! An event fires with `chance_to_trigger` percent probability and then walks
//! a forest of weighted scenarios. The event owns every scenario as a flat
//! arena; parent and child links are ids into that arena, never pointers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{CharacterId, EventId, ScenarioId};

/// A narrative event attached to a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Markdown body
    #[serde(default)]
    pub description: String,
    /// Percentage in [0, 100]
    pub chance_to_trigger: f64,
    #[serde(default)]
    pub character: Option<CharacterId>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// Every scenario of the event, roots and descendants alike
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

/// Builders for assembling events in memory. Production events always
/// arrive deserialized from the backend.
#[cfg(test)]
impl Event {
    pub fn new(id: EventId, title: impl Into<String>, chance_to_trigger: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            chance_to_trigger,
            character: None,
            owner: None,
            created_at: None,
            last_modified: None,
            scenarios: Vec::new(),
        }
    }

    pub fn with_character(mut self, character: CharacterId) -> Self {
        self.character = Some(character);
        self
    }

    /// Append a scenario, stamping it with this event's id
    pub fn with_scenario(mut self, mut scenario: Scenario) -> Self {
        scenario.event = Some(self.id);
        self.scenarios.push(scenario);
        self
    }

    /// Append a child scenario and register it on its parent's `children`
    pub fn with_child(mut self, parent: ScenarioId, mut scenario: Scenario) -> Self {
        scenario.event = Some(self.id);
        scenario.parent = Some(parent);
        if let Some(owner) = self.scenarios.iter_mut().find(|s| s.id == parent) {
            owner.children.push(ScenarioRef {
                id: scenario.id,
                title: scenario.title.clone(),
            });
        }
        self.scenarios.push(scenario);
        self
    }
}

impl Event {
    /// Number of scenarios without a parent
    pub fn root_count(&self) -> usize {
        self.scenarios.iter().filter(|s| s.is_root()).count()
    }
}

/// A node in an event's scenario tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    #[serde(default)]
    pub event: Option<EventId>,
    /// `None` for root scenarios
    #[serde(default)]
    pub parent: Option<ScenarioId>,
    pub title: String,
    /// Markdown body
    #[serde(default)]
    pub description: String,
    /// Relative chance among siblings. Higher = more likely.
    pub weight: f64,
    /// Branch stops here even if children exist
    #[serde(default)]
    pub is_terminal: bool,
    #[serde(default)]
    pub children: Vec<ScenarioRef>,
}

#[cfg(test)]
impl Scenario {
    pub fn new(id: ScenarioId, title: impl Into<String>, weight: f64) -> Self {
        Self {
            id,
            event: None,
            parent: None,
            title: title.into(),
            description: String::new(),
            weight,
            is_terminal: false,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }
}

impl Scenario {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Lightweight child reference as served by the backend (id + label)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRef {
    pub id: ScenarioId,
    #[serde(default)]
    pub title: String,
}
