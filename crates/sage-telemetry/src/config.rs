//! Telemetry configuration, read from the environment the way this
//! stack's own telemetry crate does for its subsystem services.

use std::env;

/// Logging configuration for an embedder wiring up the security engine.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name attached to every log line.
    pub service_name: String,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `"info"` or
    /// `"sage_gateway=debug,sage_handshake=trace"`.
    pub log_level: String,
    /// Emit newline-delimited JSON instead of the human-readable format.
    /// Production deployments want `true`; local development `false`.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "sage".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Reads `SAGE_SERVICE_NAME`, `SAGE_LOG_LEVEL` (falling back to
    /// `RUST_LOG`), and `SAGE_JSON_LOGS`, defaulting any unset variable.
    pub fn from_env() -> Self {
        Self {
            service_name: env::var("SAGE_SERVICE_NAME").unwrap_or_else(|_| "sage".to_string()),
            log_level: env::var("SAGE_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            json_logs: env::var("SAGE_JSON_LOGS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_pretty_info_logs() {
        let config = TelemetryConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }
}
