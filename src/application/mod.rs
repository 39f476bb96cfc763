//! Application layer - Use cases over the domain
//!
//! This layer contains:
//! - Ports: Interfaces the application needs from external systems
//! - Services: Event play orchestration
//! - DTOs: Shapes served to clients

pub mod dto;
pub mod ports;
pub mod services;
