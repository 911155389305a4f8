//! Sensor source module
//!
//! Abstracts where scalar readings come from. The production source scrapes
//! a remote HTML page over HTTP; tests substitute scripted sources.

mod extract;
mod fetch;
mod web;

pub use extract::Extractor;
pub use fetch::Fetcher;
pub use web::WebSource;

use crate::core::Result;
use std::future::Future;

/// Trait for scalar sensor sources
///
/// One call produces one sample. Failures are per-sample and carry no
/// state; the poller decides what a failure means for the device.
pub trait SensorSource: Send + Sync + 'static {
    /// Produce one scalar sample
    fn sample(&self) -> impl Future<Output = Result<f64>> + Send;

    /// Name of this source (for logs)
    fn name(&self) -> &str;
}
