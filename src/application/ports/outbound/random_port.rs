//! Random number generation port for event plays.
//!
//! Plays never reach for a global generator. The play service owns one
//! `RandomPort` and feeds its draws to the resolver, so production plays
//! can be seeded and tests can script every draw.

/// Source of uniform draws for event resolution.
///
/// # Implementations
///
/// - `StdRngAdapter` in infrastructure (production, seeded or entropy)
/// - `FixedRandomPort` for deterministic testing (returns scripted values)
pub trait RandomPort: Send {
    /// Generate a random f64 in range [0.0, 1.0)
    fn random_f64(&mut self) -> f64;
}

/// Fixed random port for deterministic testing.
///
/// Returns values from a provided sequence, cycling if needed.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FixedRandomPort {
    values: Vec<f64>,
    index: usize,
}

#[cfg(test)]
impl FixedRandomPort {
    /// Create a new FixedRandomPort with the given sequence of values.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "FixedRandomPort needs at least one value");
        Self { values, index: 0 }
    }

    /// Create a FixedRandomPort that always returns the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
impl RandomPort for FixedRandomPort {
    fn random_f64(&mut self) -> f64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
