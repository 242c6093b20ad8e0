//! Counter metrics recorded by tasks.

use serde::{Deserialize, Serialize};

/// A named monotonic counter recorded against a run context.
///
/// Counters are collected by the engine after a task completes and shipped
/// to the metrics pipeline together with the run identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    /// Metric name, e.g. `size`.
    name: String,
    /// Recorded value.
    value: u64,
}

impl Counter {
    /// Creates a counter with the given name and value.
    pub fn of(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns the metric name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the recorded value.
    pub fn value(&self) -> u64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_of() {
        let counter = Counter::of("size", 42);

        assert_eq!(counter.name(), "size");
        assert_eq!(counter.value(), 42);
    }

    #[test]
    fn test_counter_serde_round_trip() {
        let counter = Counter::of("size", 3);

        let json = serde_json::to_string(&counter).unwrap();
        let parsed: Counter = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, counter);
    }
}
