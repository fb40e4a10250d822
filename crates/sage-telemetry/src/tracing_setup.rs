//! Builds and installs the global `tracing` subscriber.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to parse log filter directive: {0}")]
    InvalidFilter(String),

    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Installs a process-global `tracing` subscriber built from `config`:
/// an `EnvFilter` over `config.log_level`, formatted as JSON in
/// production or human-readable text in development. Call once, at
/// process startup — a second call returns `AlreadyInitialized`.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    let registry = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json_logs {
        registry.json().try_init()
    } else {
        registry.try_init()
    };

    result.map_err(|_| TelemetryError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_a_malformed_filter_directive() {
        let config = TelemetryConfig {
            log_level: "not a valid directive!!".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(init_tracing(&config), Err(TelemetryError::InvalidFilter(_))));
    }
}
