//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Backend client: REST adapter for the character/event backend
//! - Random adapter: seeded or entropy-backed `RandomPort`
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod backend_client;
pub mod config;
pub mod http;
pub mod random_adapter;
pub mod state;
