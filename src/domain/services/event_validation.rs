//! Eager configuration checks for events
//!
//! Resolution tolerates most malformed data (non-selectable weights, stale
//! child references). These checks report every such issue up front so
//! authors can fix their trees before they are played.

use std::collections::{HashMap, HashSet};

use crate::domain::entities::{Event, Scenario};
use crate::domain::value_objects::ScenarioId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventConfigError {
    #[error("Scenario id {scenario_id} appears more than once")]
    DuplicateScenarioId { scenario_id: ScenarioId },

    #[error("Chance to trigger {chance} is outside [0, 100]")]
    ChanceOutOfRange { chance: f64 },

    #[error("Scenario {scenario_id} has non-positive weight {weight}")]
    NonPositiveWeight { scenario_id: ScenarioId, weight: f64 },

    #[error("Scenario {scenario_id} points at unknown parent {parent}")]
    UnknownParent {
        scenario_id: ScenarioId,
        parent: ScenarioId,
    },

    #[error("Scenario {scenario_id} lists unknown child {child}")]
    DanglingChild {
        scenario_id: ScenarioId,
        child: ScenarioId,
    },

    #[error("Scenario {scenario_id} lists child {child} whose parent is elsewhere")]
    ChildParentMismatch {
        scenario_id: ScenarioId,
        child: ScenarioId,
    },

    #[error("Scenario {child} names parent {scenario_id} but is missing from its children")]
    MissingChildReference {
        scenario_id: ScenarioId,
        child: ScenarioId,
    },

    #[error("Scenario {scenario_id} is reachable from itself")]
    Cycle { scenario_id: ScenarioId },
}

/// Every configuration issue found in `event`, in discovery order.
pub fn validate_event(event: &Event) -> Vec<EventConfigError> {
    let mut issues = Vec::new();

    if !(0.0..=100.0).contains(&event.chance_to_trigger) {
        issues.push(EventConfigError::ChanceOutOfRange {
            chance: event.chance_to_trigger,
        });
    }

    let mut by_id = HashMap::with_capacity(event.scenarios.len());
    for scenario in &event.scenarios {
        if by_id.insert(scenario.id, scenario).is_some() {
            issues.push(EventConfigError::DuplicateScenarioId {
                scenario_id: scenario.id,
            });
        }
    }

    for scenario in &event.scenarios {
        if !(scenario.weight.is_finite() && scenario.weight > 0.0) {
            issues.push(EventConfigError::NonPositiveWeight {
                scenario_id: scenario.id,
                weight: scenario.weight,
            });
        }

        if let Some(parent_id) = scenario.parent {
            match by_id.get(&parent_id) {
                None => issues.push(EventConfigError::UnknownParent {
                    scenario_id: scenario.id,
                    parent: parent_id,
                }),
                Some(parent) if !parent.children.iter().any(|c| c.id == scenario.id) => {
                    issues.push(EventConfigError::MissingChildReference {
                        scenario_id: parent_id,
                        child: scenario.id,
                    })
                }
                Some(_) => {}
            }
        }

        for child in &scenario.children {
            match by_id.get(&child.id) {
                None => issues.push(EventConfigError::DanglingChild {
                    scenario_id: scenario.id,
                    child: child.id,
                }),
                Some(node) if node.parent != Some(scenario.id) => {
                    issues.push(EventConfigError::ChildParentMismatch {
                        scenario_id: scenario.id,
                        child: child.id,
                    })
                }
                Some(_) => {}
            }
        }
    }

    for scenario_id in find_cycles(event, &by_id) {
        issues.push(EventConfigError::Cycle { scenario_id });
    }

    issues
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Visiting,
    Done,
}

/// Entry points of cycles in the children graph, the one the walk follows.
fn find_cycles(
    event: &Event,
    by_id: &HashMap<ScenarioId, &Scenario>,
) -> Vec<ScenarioId> {
    let mut marks: HashMap<ScenarioId, Mark> = HashMap::new();
    let mut reported = HashSet::new();
    let mut cycles = Vec::new();

    for start in &event.scenarios {
        if marks.contains_key(&start.id) {
            continue;
        }
        // Iterative DFS: (node, next child position)
        let mut stack = vec![(start.id, 0usize)];
        marks.insert(start.id, Mark::Visiting);

        while let Some((node_id, position)) = stack.pop() {
            let children = by_id.get(&node_id).map(|s| s.children.as_slice()).unwrap_or(&[]);
            if let Some(child) = children.get(position) {
                stack.push((node_id, position + 1));
                if !by_id.contains_key(&child.id) {
                    continue;
                }
                match marks.get(&child.id) {
                    Some(Mark::Visiting) => {
                        if reported.insert(child.id) {
                            cycles.push(child.id);
                        }
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(child.id, Mark::Visiting);
                        stack.push((child.id, 0));
                    }
                }
            } else {
                marks.insert(node_id, Mark::Done);
            }
        }
    }

    cycles
}
