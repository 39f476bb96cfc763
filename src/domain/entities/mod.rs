//! Domain entities - Core business objects with identity

mod event;

pub use event::{Event, Scenario};
#[cfg(test)]
pub use event::ScenarioRef;
