//! Configuration management

use crate::core::{DeviceInfo, Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configured sensor devices
    #[serde(default)]
    pub devices: Vec<DeviceEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self { devices: Vec::new() }
    }
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        let app_config_dir = config_dir.join("websensor");

        if !app_config_dir.exists() {
            fs::create_dir_all(&app_config_dir)?;
        }

        Ok(app_config_dir.join("config.toml"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// One configured device as written in the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Display name
    #[serde(default = "default_name")]
    pub name: String,
    /// Page to scrape
    pub url: String,
    /// CSS selector for the element holding the reading
    pub selector: String,
    /// Seconds between poll cycles
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: f64,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Bounded fetch retries within one poll cycle
    #[serde(default)]
    pub max_retries: u32,
    /// Manufacturer label (defaults to the URL hostname)
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Model label (defaults to the URL path)
    #[serde(default)]
    pub model: Option<String>,
    /// Serial number (defaults to a stable hash of url + selector)
    #[serde(default)]
    pub serial: Option<String>,
}

fn default_name() -> String { "Web Sensor".to_string() }
fn default_refresh_interval() -> f64 { 60.0 }
fn default_timeout() -> u64 { 10 }

/// Validated per-device configuration consumed by a poller
///
/// Construction is the validation boundary: a malformed URL, an empty or
/// uncompilable selector, or a non-positive interval/timeout is a
/// `Error::Config` here and never a per-poll condition.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Identity presented to the host
    pub info: DeviceInfo,
    /// Absolute URL of the page to scrape
    pub url: reqwest::Url,
    /// CSS selector for the element holding the reading
    pub selector: String,
    /// Time between the completion of one cycle and the start of the next
    pub refresh_interval: Duration,
    /// HTTP request timeout
    pub timeout: Duration,
    /// Bounded fetch retries within one poll cycle
    pub max_retries: u32,
}

impl DeviceConfig {
    /// Validate a config file entry into a device configuration
    pub fn new(entry: &DeviceEntry) -> Result<Self> {
        let url = reqwest::Url::parse(&entry.url)
            .map_err(|e| Error::Config(format!("Invalid url '{}': {}", entry.url, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config(format!(
                    "Unsupported url scheme '{}' for '{}'",
                    other, entry.url
                )));
            }
        }

        if entry.selector.trim().is_empty() {
            return Err(Error::Config("Selector must not be empty".to_string()));
        }

        // Compile once here so a bad expression fails the constructor, not a cycle
        scraper::Selector::parse(&entry.selector).map_err(|e| {
            Error::Config(format!("Invalid selector '{}': {}", entry.selector, e))
        })?;

        if !(entry.refresh_interval_secs.is_finite() && entry.refresh_interval_secs > 0.0) {
            return Err(Error::Config(format!(
                "Refresh interval must be positive, got {}",
                entry.refresh_interval_secs
            )));
        }

        if entry.timeout_secs == 0 {
            return Err(Error::Config("Timeout must be positive".to_string()));
        }

        let info = DeviceInfo {
            name: entry.name.clone(),
            manufacturer: entry
                .manufacturer
                .clone()
                .unwrap_or_else(|| url.host_str().unwrap_or("unknown").to_string()),
            model: entry.model.clone().unwrap_or_else(|| url.path().to_string()),
            serial: entry
                .serial
                .clone()
                .unwrap_or_else(|| derive_serial(&entry.url, &entry.selector)),
        };

        Ok(Self {
            info,
            url,
            selector: entry.selector.clone(),
            refresh_interval: Duration::from_secs_f64(entry.refresh_interval_secs),
            timeout: Duration::from_secs(entry.timeout_secs),
            max_retries: entry.max_retries,
        })
    }
}

/// Derive a stable serial number from the device's url and selector
fn derive_serial(url: &str, selector: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    format!("{}_{}", url, selector).hash(&mut hasher);

    format!("{:016X}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str, selector: &str) -> DeviceEntry {
        DeviceEntry {
            name: "Garage Thermometer".to_string(),
            url: url.to_string(),
            selector: selector.to_string(),
            refresh_interval_secs: 60.0,
            timeout_secs: 10,
            max_retries: 0,
            manufacturer: None,
            model: None,
            serial: None,
        }
    }

    #[test]
    fn test_parse_config_with_defaults() {
        let toml_str = r##"
            [[devices]]
            name = "Garage Thermometer"
            url = "http://thermometer.local/status"
            selector = "#temperature"
        "##;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.devices.len(), 1);

        let device = &config.devices[0];
        assert_eq!(device.refresh_interval_secs, 60.0);
        assert_eq!(device.timeout_secs, 10);
        assert_eq!(device.max_retries, 0);
    }

    #[test]
    fn test_valid_device() {
        let device = DeviceConfig::new(&entry("http://thermometer.local/status", "#temperature")).unwrap();

        assert_eq!(device.refresh_interval, Duration::from_secs(60));
        assert_eq!(device.timeout, Duration::from_secs(10));
        assert_eq!(device.info.manufacturer, "thermometer.local");
        assert_eq!(device.info.model, "/status");
        assert!(!device.info.serial.is_empty());
    }

    #[test]
    fn test_serial_is_stable() {
        let a = DeviceConfig::new(&entry("http://a.local/x", "#t")).unwrap();
        let b = DeviceConfig::new(&entry("http://a.local/x", "#t")).unwrap();
        let c = DeviceConfig::new(&entry("http://a.local/x", "#other")).unwrap();

        assert_eq!(a.info.serial, b.info.serial);
        assert_ne!(a.info.serial, c.info.serial);
    }

    #[test]
    fn test_rejects_malformed_url() {
        let result = DeviceConfig::new(&entry("not a url", "#t"));
        assert!(matches!(result, Err(Error::Config(_))));

        // Relative URLs are not absolute URLs
        let result = DeviceConfig::new(&entry("thermometer.local/status", "#t"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = DeviceConfig::new(&entry("ftp://thermometer.local/status", "#t"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_empty_selector() {
        let result = DeviceConfig::new(&entry("http://thermometer.local/", "  "));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_invalid_selector() {
        let result = DeviceConfig::new(&entry("http://thermometer.local/", "###"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        let mut e = entry("http://thermometer.local/", "#t");
        e.refresh_interval_secs = 0.0;
        assert!(matches!(DeviceConfig::new(&e), Err(Error::Config(_))));

        e.refresh_interval_secs = -5.0;
        assert!(matches!(DeviceConfig::new(&e), Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut e = entry("http://thermometer.local/", "#t");
        e.timeout_secs = 0;
        assert!(matches!(DeviceConfig::new(&e), Err(Error::Config(_))));
    }

    #[test]
    fn test_explicit_identity_overrides() {
        let mut e = entry("http://thermometer.local/status", "#t");
        e.manufacturer = Some("Acme".to_string());
        e.model = Some("TH-100".to_string());
        e.serial = Some("SN-1234".to_string());

        let device = DeviceConfig::new(&e).unwrap();
        assert_eq!(device.info.manufacturer, "Acme");
        assert_eq!(device.info.model, "TH-100");
        assert_eq!(device.info.serial, "SN-1234");
    }
}
