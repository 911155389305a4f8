//! Error types for the application

use thiserror::Error;

/// Application-wide error type
///
/// `Config` is fatal and only raised at construction time. `Fetch`,
/// `Extraction` and `Parse` are transient per-cycle failures that drive a
/// poller into the faulted state without ever stopping it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Publisher error: {0}")]
    Publisher(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
