//! # Mini-EVM Telemetry
//!
//! Structured logging for the Mini-EVM workspace, built on `tracing` and
//! `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mvm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//!
//!     // Engine spans and events are now written to stderr
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MVM_SERVICE_NAME` | `mini-evm` | Service name in the startup record |
//! | `MVM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `MVM_CONSOLE_OUTPUT` | `true` | Write logs to stderr |
//! | `MVM_JSON_LOGS` | `false` | JSON instead of pretty output |

#![warn(missing_docs)]

mod config;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use tracing_setup::env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed, or installation failed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    SubscriberInit(String),

    /// The configured filter directive is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging for the process.
///
/// # Errors
///
/// Returns `TelemetryError` if the filter is invalid or a subscriber is
/// already installed.
///
/// # Example
///
/// ```rust,ignore
/// let config = TelemetryConfig::from_env();
/// init_telemetry(&config)?;
/// ```
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}
