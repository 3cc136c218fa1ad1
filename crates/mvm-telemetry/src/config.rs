//! Telemetry configuration from environment variables.

use std::env;

/// Default service name attached to log output.
pub const DEFAULT_SERVICE_NAME: &str = "mini-evm";

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name recorded when telemetry starts
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or full `EnvFilter` directive
    pub log_level: String,

    /// Whether to write logs to stderr at all
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `MVM_SERVICE_NAME`: Service name (default: mini-evm)
    /// - `MVM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `MVM_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `MVM_JSON_LOGS`: Enable JSON logs (default: false)
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            service_name: lookup("MVM_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("MVM_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("MVM_CONSOLE_OUTPUT")
                .map_or(defaults.console_output, |v| {
                    v.to_lowercase() != "false" && v != "0"
                }),

            json_logs: lookup("MVM_JSON_LOGS")
                .map_or(defaults.json_logs, |v| v.to_lowercase() == "true" || v == "1"),
        }
    }

    /// Sets the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}
