//! Web-scraping sensor source
//!
//! Composes the fetcher and extractor into the source the poller drives:
//! one GET, one selector application, one scalar out.

use crate::core::{DeviceConfig, Result};
use crate::sensor::{Extractor, Fetcher, SensorSource};
use std::future::Future;

/// Sensor source backed by a scraped web page
pub struct WebSource {
    fetcher: Fetcher,
    extractor: Extractor,
    name: String,
}

impl WebSource {
    /// Build the source for one validated device
    pub fn new(device: &DeviceConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(device.url.clone(), device.timeout)?,
            extractor: Extractor::new(&device.selector)?,
            name: device.info.name.clone(),
        })
    }
}

impl SensorSource for WebSource {
    fn sample(&self) -> impl Future<Output = Result<f64>> + Send {
        async move {
            let body = self.fetcher.retrieve().await?;
            self.extractor.extract(&body)
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
