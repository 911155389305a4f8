//! Host-facing notification channel
//!
//! The poller reports committed readings and fault transitions through this
//! trait; the home-automation host supplies the implementation. An error
//! returned by the host is logged at the poll-completion point and never
//! aborts the poll loop.

use crate::core::Result;

/// Notification interface implemented by the host
///
/// Both operations are invoked synchronously from the poll-completion
/// point, at most once per channel per cycle.
pub trait Publisher: Send + Sync {
    /// A cycle committed a new reading
    fn on_reading(&self, value: f64) -> Result<()>;

    /// The device fault flag for the cycle that just completed
    fn on_fault(&self, fault: bool) -> Result<()>;
}

/// Publisher that reports through the log facade
///
/// Default host binding for the daemon binary; real hosts supply their own
/// `Publisher` to bridge readings into their device model.
pub struct LogPublisher {
    device: String,
}

impl LogPublisher {
    pub fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
        }
    }
}

impl Publisher for LogPublisher {
    fn on_reading(&self, value: f64) -> Result<()> {
        log::info!("[{}] reading: {}", self.device, value);
        Ok(())
    }

    fn on_fault(&self, fault: bool) -> Result<()> {
        if fault {
            log::warn!("[{}] fault raised", self.device);
        } else {
            log::debug!("[{}] fault clear", self.device);
        }
        Ok(())
    }
}
