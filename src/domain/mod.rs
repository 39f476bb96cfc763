//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Event and its Scenario arena
//! - Value Objects: Typed ids, the randomness capability
//! - Domain Services: Weighted selection, tree indexing, event resolution

pub mod entities;
pub mod services;
pub mod value_objects;
