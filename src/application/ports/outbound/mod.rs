//! Outbound ports - Interfaces that the application requires from external systems

mod event_source_port;
mod random_port;

pub use event_source_port::EventSourcePort;
#[cfg(test)]
pub use random_port::FixedRandomPort;
pub use random_port::RandomPort;
