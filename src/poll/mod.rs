//! Poll loop and sensor state
//!
//! Drives fetch → extract → publish on a fixed cadence, one spawned task
//! per device. Cycles are strictly serialized: the next tick is armed only
//! after the current cycle completes, so a cycle that overruns the interval
//! delays the next one but never overlaps it.

use crate::core::{DeviceConfig, DeviceInfo, Result, SensorReading};
use crate::publish::Publisher;
use crate::sensor::SensorSource;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Poller lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    /// Constructed; the first cycle has not completed yet
    Idle,
    /// The last cycle committed a reading
    Healthy,
    /// The last cycle failed; the previous value is retained
    Faulted,
    /// Explicitly stopped; terminal
    Stopped,
}

/// State shared between the handle and the poll task
struct Shared {
    reading: RwLock<SensorReading>,
    state: RwLock<PollerState>,
}

/// Handle to one device's running poll loop
///
/// Owns the device configuration and sensor state for its lifetime. The
/// getters return fully-formed snapshots and never block on the poll task.
pub struct Poller {
    shared: Arc<Shared>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
    info: DeviceInfo,
}

impl Poller {
    /// Start polling: one immediate cycle, then the recurring timer
    pub fn start<S: SensorSource>(
        device: DeviceConfig,
        source: S,
        publisher: Arc<dyn Publisher>,
    ) -> Self {
        let shared = Arc::new(Shared {
            reading: RwLock::new(SensorReading::initial()),
            state: RwLock::new(PollerState::Idle),
        });
        let (shutdown, shutdown_rx) = watch::channel(false);
        let info = device.info.clone();

        let task = tokio::spawn(poll_loop(
            device,
            source,
            publisher,
            Arc::clone(&shared),
            shutdown_rx,
        ));

        Self {
            shared,
            shutdown,
            task: Some(task),
            info,
        }
    }

    /// Last committed reading (non-blocking snapshot)
    pub fn reading(&self) -> SensorReading {
        self.shared.reading.read().unwrap().clone()
    }

    /// Current lifecycle state
    pub fn state(&self) -> PollerState {
        *self.shared.state.read().unwrap()
    }

    /// Identity of the polled device
    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Stop polling: cancel the timer and any in-flight cycle
    ///
    /// A cycle cancelled mid-flight leaves the sensor state exactly as it
    /// was before the cycle started. After this returns, no further cycles
    /// run and no further publisher callbacks occur.
    pub async fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return; // already stopped
        };

        let _ = self.shutdown.send(true);
        let _ = task.await;
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
    }
}

/// Background task that runs one device's cycles until shutdown
async fn poll_loop<S: SensorSource>(
    device: DeviceConfig,
    source: S,
    publisher: Arc<dyn Publisher>,
    shared: Arc<Shared>,
    mut shutdown: watch::Receiver<bool>,
) {
    log::info!(
        "Polling '{}' from {} every {:.1}s",
        device.info.name,
        device.url,
        device.refresh_interval.as_secs_f64()
    );

    loop {
        // Shutdown cancels an in-flight cycle before it reaches the
        // completion point, so no partial state is ever committed.
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            result = run_cycle(&source, device.max_retries) => {
                complete_cycle(&device, publisher.as_ref(), &shared, result);
            }
        }

        // Re-arm relative to cycle completion, not wall-clock offsets
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(device.refresh_interval) => {}
        }
    }

    *shared.state.write().unwrap() = PollerState::Stopped;
    log::info!("Poll loop for '{}' stopped", device.info.name);
}

/// One fetch + extract attempt chain
///
/// Bounded retries happen here, at the scheduler layer, never inside the
/// fetcher.
async fn run_cycle<S: SensorSource>(source: &S, max_retries: u32) -> Result<f64> {
    let mut attempt = 0;
    loop {
        match source.sample().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_retries => {
                attempt += 1;
                log::debug!(
                    "{}: attempt {} failed, retrying: {}",
                    source.name(),
                    attempt,
                    e
                );
            }
            Err(e) => return Err(e),
        }
    }
}

/// The single poll-completion point: commit state and notify the host
fn complete_cycle(
    device: &DeviceConfig,
    publisher: &dyn Publisher,
    shared: &Shared,
    result: Result<f64>,
) {
    match result {
        Ok(value) => {
            shared.reading.write().unwrap().commit(value);
            *shared.state.write().unwrap() = PollerState::Healthy;
            log::debug!("'{}': committed reading {}", device.info.name, value);

            if let Err(e) = publisher.on_reading(value) {
                log::error!("'{}': publisher rejected reading: {}", device.info.name, e);
            }
            if let Err(e) = publisher.on_fault(false) {
                log::error!("'{}': publisher rejected fault clear: {}", device.info.name, e);
            }
        }
        Err(e) => {
            log::error!("'{}': poll cycle failed: {}", device.info.name, e);
            shared.reading.write().unwrap().mark_fault();
            *shared.state.write().unwrap() = PollerState::Faulted;

            if let Err(e) = publisher.on_fault(true) {
                log::error!("'{}': publisher rejected fault: {}", device.info.name, e);
            }
        }
    }
}
