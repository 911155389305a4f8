//! WebSensor - Demo CLI
//!
//! Polls a single page from the command line and prints the live sensor
//! state once per second.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

// Import from our library
use websensor_lib::core::{DeviceConfig, DeviceEntry};
use websensor_lib::poll::{Poller, PollerState};
use websensor_lib::publish::LogPublisher;
use websensor_lib::sensor::WebSource;

#[tokio::main]
async fn main() {
    // Keep the table readable; raise RUST_LOG for the poll loop's own logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: websensor-demo <url> <selector> [refresh_interval_secs]");
        std::process::exit(2);
    }

    let entry = DeviceEntry {
        name: "Demo Sensor".to_string(),
        url: args[1].clone(),
        selector: args[2].clone(),
        refresh_interval_secs: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(5.0),
        timeout_secs: 10,
        max_retries: 0,
        manufacturer: None,
        model: None,
        serial: None,
    };

    let device = DeviceConfig::new(&entry).unwrap_or_else(|e| {
        eprintln!("Invalid device: {}", e);
        std::process::exit(1);
    });

    let source = WebSource::new(&device).unwrap_or_else(|e| {
        eprintln!("Failed to build source: {}", e);
        std::process::exit(1);
    });

    println!("==============================================");
    println!("   WebSensor - Demo CLI");
    println!("==============================================\n");
    println!("  Device:   {} ({})", device.info.name, device.url);
    println!("  Selector: {}", device.selector);
    println!("  Interval: {:.1}s\n", device.refresh_interval.as_secs_f64());
    println!("----------------------------------------------");
    println!("  Time   |  Value   |  Fault  |  State");
    println!("  (sec)  |          |         |");
    println!("----------------------------------------------");

    let info = device.info.clone();
    let publisher = Arc::new(LogPublisher::new(&device.info.name));
    let mut poller = Poller::start(device, source, publisher);

    // Run for 30 seconds
    for i in 0..30 {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let reading = poller.reading();
        let state = match poller.state() {
            PollerState::Idle => "idle",
            PollerState::Healthy => "healthy",
            PollerState::Faulted => "faulted",
            PollerState::Stopped => "stopped",
        };

        print!(
            "\r  {:>4}   | {:>8.2} | {:>7} | {}",
            i + 1,
            reading.value,
            reading.fault,
            state
        );
        io::stdout().flush().unwrap();
    }

    println!("\n----------------------------------------------\n");

    let reading = poller.reading();
    println!("=== Session Summary ===\n");
    println!("  Device:       {} (serial {})", info.name, info.serial);
    println!("  Last value:   {:.2}", reading.value);
    println!("  Fault:        {}", reading.fault);
    println!("  Last update:  {}", reading.last_updated);

    poller.stop().await;
}
