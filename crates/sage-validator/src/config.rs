use time::Duration;

/// Tunables for [`crate::MessageValidator`], sourced from `SageConfig`
/// (§6.5) by the embedder rather than duplicated here with its own
/// defaults — there is exactly one source of truth for these durations.
#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    pub timestamp_tolerance: Duration,
    pub nonce_ttl: Duration,
    pub max_out_of_order_window: Duration,
    pub duplicate_ttl: Duration,
}

impl From<&sage_types::config::SageConfig> for ValidatorConfig {
    fn from(config: &sage_types::config::SageConfig) -> Self {
        Self {
            timestamp_tolerance: config.timestamp_tolerance,
            nonce_ttl: config.nonce_ttl,
            max_out_of_order_window: config.max_out_of_order_window,
            duplicate_ttl: config.duplicate_ttl,
        }
    }
}
