//! WebSensor library
//!
//! This module exposes the core functionality for use in tests
//! and as a library.

pub mod core;
pub mod poll;
pub mod publish;
pub mod sensor;
