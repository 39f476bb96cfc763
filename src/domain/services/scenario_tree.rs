//! Scenario tree index - id lookup over an event's scenario arena

use std::collections::HashMap;

use crate::domain::entities::Scenario;
use crate::domain::services::event_validation::EventConfigError;
use crate::domain::value_objects::ScenarioId;

/// Borrowed view over an event's scenarios, keyed by id.
///
/// Stores arena positions rather than references so the event stays the
/// single owner of every node.
#[derive(Debug, Clone)]
pub struct ScenarioTreeIndex<'a> {
    scenarios: &'a [Scenario],
    by_id: HashMap<ScenarioId, usize>,
}

impl<'a> ScenarioTreeIndex<'a> {
    /// Index the arena. Duplicate ids are rejected.
    pub fn build(scenarios: &'a [Scenario]) -> Result<Self, EventConfigError> {
        let mut by_id = HashMap::with_capacity(scenarios.len());
        for (position, scenario) in scenarios.iter().enumerate() {
            if by_id.insert(scenario.id, position).is_some() {
                return Err(EventConfigError::DuplicateScenarioId {
                    scenario_id: scenario.id,
                });
            }
        }
        Ok(Self { scenarios, by_id })
    }

    pub fn get(&self, id: ScenarioId) -> Option<&'a Scenario> {
        self.by_id.get(&id).map(|&position| &self.scenarios[position])
    }

    #[cfg(test)]
    pub fn contains(&self, id: ScenarioId) -> bool {
        self.by_id.contains_key(&id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Scenarios without a parent, in arena order
    pub fn roots(&self) -> Vec<&'a Scenario> {
        self.scenarios.iter().filter(|s| s.is_root()).collect()
    }

    /// Full nodes for `scenario.children`, in reference order.
    ///
    /// Stale references with no entry in the index are dropped.
    pub fn resolve_children(&self, scenario: &Scenario) -> Vec<&'a Scenario> {
        scenario
            .children
            .iter()
            .filter_map(|child| self.get(child.id))
            .collect()
    }
}
