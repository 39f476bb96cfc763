//! Application services - Use case implementations
//!
//! Services accept port dependencies and return domain results; transport
//! concerns stay in the infrastructure layer.

pub mod event_play_service;

pub use event_play_service::{EventPlayService, EventPlayServiceImpl, PlayError};
