//! WebSensor - Main entry point
//!
//! A lightweight daemon that polls remote web pages for scalar sensor
//! readings and maintains a fault-aware state per device for a
//! home-automation host.

use std::sync::Arc;

use websensor_lib::core::{Config, DeviceConfig};
use websensor_lib::poll::Poller;
use websensor_lib::publish::LogPublisher;
use websensor_lib::sensor::WebSource;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting WebSensor v{}", env!("CARGO_PKG_VERSION"));

    // Load or create configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::error!("Failed to load config: {}", e);
        std::process::exit(1);
    });

    if config.devices.is_empty() {
        match Config::config_path() {
            Ok(path) => log::error!(
                "No devices configured; add [[devices]] entries to {}",
                path.display()
            ),
            Err(_) => log::error!("No devices configured"),
        }
        std::process::exit(1);
    }

    // Validate every device up front; a bad entry never reaches a poll loop
    let mut pollers = Vec::new();
    for entry in &config.devices {
        let device = DeviceConfig::new(entry).unwrap_or_else(|e| {
            log::error!("Invalid device '{}': {}", entry.name, e);
            std::process::exit(1);
        });

        let source = WebSource::new(&device).unwrap_or_else(|e| {
            log::error!("Failed to build source for '{}': {}", entry.name, e);
            std::process::exit(1);
        });

        let publisher = Arc::new(LogPublisher::new(&device.info.name));
        pollers.push(Poller::start(device, source, publisher));
    }

    log::info!("{} device(s) polling", pollers.len());

    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }

    log::info!("Shutting down");
    for poller in &mut pollers {
        poller.stop().await;
    }
}
