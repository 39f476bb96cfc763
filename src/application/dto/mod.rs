//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP) can serialize
//! client-facing shapes without leaking them into the domain model.

pub mod play;

pub use play::*;
