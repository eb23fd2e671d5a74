//! Chime Controller Library
//!
//! Configuration, credential files, the simulated decoder backend and the
//! control loop behind the `chime-controller` binary.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod controller;
pub mod decoder;
pub mod error;
pub mod settings;

// Re-export commonly used types for convenience
pub use config::{ControllerConfig, DEFAULT_CONFIG_PATH};
pub use controller::{run, Controller};
pub use decoder::SimulatedDecoder;
pub use error::{ControllerError, Result};
pub use settings::{MqttSettings, WifiSettings};
