//! Common types used across the application

use serde::{Deserialize, Serialize};

/// The last committed state of one sensor
///
/// Mutated only at poll-cycle completion. When `fault` is set, `value` keeps
/// the previous committed reading; it is never reset to a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorReading {
    /// Last committed scalar value
    pub value: f64,
    /// Whether the last poll cycle failed
    pub fault: bool,
    /// Unix timestamp of the last successful commit
    pub last_updated: i64,
}

impl SensorReading {
    /// Initial state for a freshly started poller
    pub fn initial() -> Self {
        Self {
            value: 0.0,
            fault: false,
            last_updated: chrono::Utc::now().timestamp(),
        }
    }

    /// Commit a successful reading
    pub fn commit(&mut self, value: f64) {
        self.value = value;
        self.fault = false;
        self.last_updated = chrono::Utc::now().timestamp();
    }

    /// Mark the state as faulted, preserving the last committed value
    pub fn mark_fault(&mut self) {
        self.fault = true;
    }
}

/// Device identity presented to the host
///
/// Purely informational; the poll loop never reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Display name
    pub name: String,
    /// Manufacturer label (defaults to the URL hostname)
    pub manufacturer: String,
    /// Model label (defaults to the URL path)
    pub model: String,
    /// Serial number (defaults to a stable hash of url + selector)
    pub serial: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_clears_fault() {
        let mut reading = SensorReading::initial();
        reading.mark_fault();
        assert!(reading.fault);

        reading.commit(23.5);
        assert!(!reading.fault);
        assert!((reading.value - 23.5).abs() < 0.001);
        assert!(reading.last_updated > 0);
    }

    #[test]
    fn test_fault_preserves_value() {
        let mut reading = SensorReading::initial();
        reading.commit(42.0);
        let committed_at = reading.last_updated;

        reading.mark_fault();
        assert!(reading.fault);
        assert!((reading.value - 42.0).abs() < 0.001);
        assert_eq!(reading.last_updated, committed_at);
    }

    #[test]
    fn test_initial_state() {
        let reading = SensorReading::initial();
        assert_eq!(reading.value, 0.0);
        assert!(!reading.fault);
    }
}
