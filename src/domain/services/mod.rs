//! Domain services - Pure business logic operations
//!
//! Event play is split into three pieces: weighted selection, the scenario
//! tree index, and the resolver that drives both.

pub mod event_resolver;
pub mod event_validation;
pub mod scenario_tree;
pub mod weighted_picker;

pub use event_resolver::{resolve, ResolutionResult, ResolveError};
pub use event_validation::{validate_event, EventConfigError};
