//! Event resolution - trigger roll followed by a weighted walk of the
//! scenario forest.
//!
//! The computation is pure: a snapshot of the event and a source of uniform
//! draws go in, a `ResolutionResult` comes out. Each call draws its
//! randomness exactly once, so a result may be shown later without being
//! recomputed.

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::entities::{Event, Scenario};
use crate::domain::services::event_validation::EventConfigError;
use crate::domain::services::scenario_tree::ScenarioTreeIndex;
use crate::domain::services::weighted_picker;
use crate::domain::value_objects::ScenarioId;

pub const REASON_TRIGGERED: &str = "Event triggered successfully.";
pub const REASON_NO_ROOTS: &str = "Event triggered, but there are no root scenarios configured.";

/// Outcome of one play of an event. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub triggered: bool,
    /// Trigger roll in [0, 100)
    pub roll: f64,
    /// Path walked from the chosen root to the stopping node
    pub steps: Vec<Scenario>,
    pub reason: String,
}

impl ResolutionResult {
    fn not_triggered(roll: f64, chance: f64) -> Self {
        Self {
            triggered: false,
            roll,
            steps: Vec::new(),
            reason: format!(
                "Event did not trigger (rolled {:.1} vs chance {}%).",
                roll, chance
            ),
        }
    }

    fn triggered(roll: f64, steps: Vec<Scenario>, reason: &str) -> Self {
        Self {
            triggered: true,
            roll,
            steps,
            reason: reason.to_string(),
        }
    }

    #[cfg(test)]
    pub fn step_ids(&self) -> Vec<ScenarioId> {
        self.steps.iter().map(|s| s.id).collect()
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("Invalid event configuration: {0}")]
    InvalidConfiguration(#[from] EventConfigError),

    #[error("Cycle detected: scenario {scenario_id} was reached twice in one walk")]
    CycleDetected { scenario_id: ScenarioId },
}

/// Decide whether `event` fires and, if so, which path its scenarios take.
///
/// `draw` yields uniform values in `[0, 1)`. The trigger test is strict: a
/// roll in [0, 100) fires only when `roll < chance_to_trigger`, so 0% never
/// fires and 100% always does.
///
/// Duplicate scenario ids are rejected before anything is drawn, so a
/// malformed event fails the same way whatever the roll would have been.
pub fn resolve(
    event: &Event,
    draw: &mut dyn FnMut() -> f64,
) -> Result<ResolutionResult, ResolveError> {
    let index = ScenarioTreeIndex::build(&event.scenarios)?;

    let roll = draw() * 100.0;
    if roll >= event.chance_to_trigger {
        return Ok(ResolutionResult::not_triggered(
            roll,
            event.chance_to_trigger,
        ));
    }

    let roots = index.roots();
    let Some(mut current) = weighted_picker::pick(&roots, draw).copied() else {
        return Ok(ResolutionResult::triggered(roll, Vec::new(), REASON_NO_ROOTS));
    };

    let mut visited = HashSet::new();
    let mut steps = Vec::new();
    loop {
        if !visited.insert(current.id) {
            return Err(ResolveError::CycleDetected {
                scenario_id: current.id,
            });
        }
        steps.push(current.clone());

        if current.is_terminal {
            break;
        }

        let children = index.resolve_children(current);
        match weighted_picker::pick(&children, draw) {
            Some(&next) => current = next,
            None => break,
        }
    }

    Ok(ResolutionResult::triggered(roll, steps, REASON_TRIGGERED))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::application::ports::outbound::{FixedRandomPort, RandomPort};
    use crate::domain::entities::ScenarioRef;
    use crate::domain::value_objects::EventId;

    fn id(value: i64) -> ScenarioId {
        ScenarioId::new(value)
    }

    /// A (root) -> B (terminal)
    fn two_step_event(chance: f64) -> Event {
        Event::new(EventId::new(1), "Night watch", chance)
            .with_scenario(Scenario::new(id(1), "A", 1.0))
            .with_child(id(1), Scenario::new(id(2), "B", 1.0).terminal())
    }

    #[test]
    fn test_walks_root_to_terminal_child() {
        let event = two_step_event(100.0);
        let mut rng = FixedRandomPort::new(vec![0.5]);

        let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
        assert!(result.triggered);
        assert_eq!(result.step_ids(), vec![id(1), id(2)]);
        assert_eq!(result.reason, REASON_TRIGGERED);
    }

    #[test]
    fn test_zero_chance_never_triggers() {
        let event = two_step_event(0.0);
        for draw in [0.0, 0.001, 0.5, 0.999_999] {
            let mut rng = FixedRandomPort::new(vec![draw]);
            let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
            assert!(!result.triggered);
            assert!(result.steps.is_empty());
            assert!(result.reason.contains("did not trigger"));
        }
    }

    #[test]
    fn test_full_chance_always_triggers() {
        let event = two_step_event(100.0);
        for draw in [0.0, 0.25, 0.75, 0.999_999_999] {
            let mut rng = FixedRandomPort::new(vec![draw]);
            let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
            assert!(result.triggered);
        }
    }

    #[test]
    fn test_trigger_comparison_is_strict() {
        let event = two_step_event(30.0);

        let mut rng = FixedRandomPort::new(vec![0.3]);
        let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
        assert!(!result.triggered, "roll equal to chance must not fire");
        assert_eq!(result.reason, "Event did not trigger (rolled 30.0 vs chance 30%).");

        let mut rng = FixedRandomPort::new(vec![0.2999]);
        assert!(resolve(&event, &mut || rng.random_f64()).expect("well-formed event").triggered);
    }

    #[test]
    fn test_no_scenarios_reports_missing_roots() {
        let event = Event::new(EventId::new(2), "Empty", 100.0);
        let mut rng = FixedRandomPort::new(vec![0.1]);

        let result = resolve(&event, &mut || rng.random_f64()).expect("empty event is valid");
        assert!(result.triggered);
        assert!(result.steps.is_empty());
        assert!(result.reason.contains("no root scenarios"));
    }

    #[test]
    fn test_terminal_root_ignores_children() {
        let event = Event::new(EventId::new(3), "Sealed door", 100.0)
            .with_scenario(Scenario::new(id(1), "A", 1.0).terminal())
            .with_child(id(1), Scenario::new(id(2), "B", 3.0))
            .with_child(id(1), Scenario::new(id(3), "C", 5.0));
        let mut rng = FixedRandomPort::new(vec![0.0, 0.5]);

        let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
        assert_eq!(result.step_ids(), vec![id(1)]);
        // trigger roll + root pick, children never drawn for
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_stale_children_end_the_walk() {
        let mut event = Event::new(EventId::new(4), "Ghost branch", 100.0)
            .with_scenario(Scenario::new(id(1), "A", 1.0));
        event.scenarios[0].children.push(ScenarioRef {
            id: id(404),
            title: "Deleted".to_string(),
        });
        let mut rng = FixedRandomPort::new(vec![0.0]);

        let result = resolve(&event, &mut || rng.random_f64()).expect("stale refs are tolerated");
        assert_eq!(result.step_ids(), vec![id(1)]);
        assert_eq!(result.reason, REASON_TRIGGERED);
    }

    #[test]
    fn test_weighted_path_follows_draws() {
        // roots: R1 (w1), R2 (w3); R2 -> X (w1), Y (w1, terminal)
        let event = Event::new(EventId::new(5), "Crossroads", 100.0)
            .with_scenario(Scenario::new(id(1), "R1", 1.0))
            .with_scenario(Scenario::new(id(2), "R2", 3.0))
            .with_child(id(2), Scenario::new(id(3), "X", 1.0))
            .with_child(id(2), Scenario::new(id(4), "Y", 1.0).terminal());
        // trigger, root draw 0.5*4=2.0 -> R2, child draw 0.9*2=1.8 -> Y
        let mut rng = FixedRandomPort::new(vec![0.0, 0.5, 0.9]);

        let result = resolve(&event, &mut || rng.random_f64()).expect("well-formed event");
        assert_eq!(result.step_ids(), vec![id(2), id(4)]);
    }

    #[test]
    fn test_cycle_is_reported_instead_of_looping() {
        let mut event = two_step_event(100.0);
        event.scenarios[1].is_terminal = false;
        event.scenarios[1].children.push(ScenarioRef {
            id: id(1),
            title: "A".to_string(),
        });
        let mut rng = FixedRandomPort::new(vec![0.0]);

        let err = resolve(&event, &mut || rng.random_f64()).unwrap_err();
        assert_eq!(err, ResolveError::CycleDetected { scenario_id: id(1) });
    }

    #[test]
    fn test_duplicate_ids_fail_fast() {
        let event = Event::new(EventId::new(6), "Twins", 100.0)
            .with_scenario(Scenario::new(id(1), "A", 1.0))
            .with_scenario(Scenario::new(id(1), "B", 1.0));
        let mut rng = FixedRandomPort::new(vec![0.0]);

        assert!(matches!(
            resolve(&event, &mut || rng.random_f64()),
            Err(ResolveError::InvalidConfiguration(
                EventConfigError::DuplicateScenarioId { .. }
            ))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected_whatever_the_roll() {
        for chance in [0.0, 50.0, 100.0] {
            let event = Event::new(EventId::new(6), "Twins", chance)
                .with_scenario(Scenario::new(id(1), "A", 1.0))
                .with_scenario(Scenario::new(id(1), "B", 1.0));
            for roll in [0.0, 0.5, 0.99] {
                let mut rng = FixedRandomPort::new(vec![roll]);

                let err = resolve(&event, &mut || rng.random_f64()).unwrap_err();
                assert_eq!(
                    err,
                    ResolveError::InvalidConfiguration(EventConfigError::DuplicateScenarioId {
                        scenario_id: id(1)
                    })
                );
                assert_eq!(rng.draws(), 0, "no draw before the configuration check");
            }
        }
    }

    #[test]
    fn test_steps_form_a_parent_chain() {
        let event = Event::new(EventId::new(7), "Deep woods", 100.0)
            .with_scenario(Scenario::new(id(1), "Edge", 1.0))
            .with_scenario(Scenario::new(id(2), "Clearing", 2.0))
            .with_child(id(1), Scenario::new(id(3), "Wolves", 1.0))
            .with_child(id(1), Scenario::new(id(4), "Hermit", 1.0).terminal())
            .with_child(id(2), Scenario::new(id(5), "Shrine", 1.0))
            .with_child(id(3), Scenario::new(id(6), "Flee", 1.0).terminal())
            .with_child(id(5), Scenario::new(id(7), "Blessing", 1.0));
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let result = resolve(&event, &mut || rng.gen::<f64>()).expect("well-formed event");
            assert!(result.triggered);
            let steps = &result.steps;
            assert!(!steps.is_empty());
            assert!(steps[0].is_root());
            for pair in steps.windows(2) {
                assert_eq!(pair[1].parent, Some(pair[0].id));
            }
            let last = steps.last().expect("non-empty path");
            assert!(last.is_terminal || last.children.is_empty());
        }
    }
}
