//! Single source of truth for every tunable in §6.5, plus the handful of
//! ambient knobs (HPKE suite pin, admission control) left implicit
//! elsewhere.
//!
//! No config-file parser ships from this crate — loading `SageConfig` from
//! TOML, YAML, or the environment is an embedding application's concern.
//! `SageConfig` is plain `serde` data so an embedder can use whichever
//! format-specific crate it already depends on.

use serde::{Deserialize, Serialize};
use time::Duration;

/// Thin wrapper so `time::Duration` can be embedded in `serde`-derived
/// config without pulling in a third duration-serialization crate: we
/// serialize as whole seconds, which is sufficient precision for every
/// tunable in §6.5.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.whole_seconds().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Ok(Duration::seconds(secs))
    }
}

/// Top-level configuration for the SAGE security engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SageConfig {
    /// Session absolute lifetime. Default 1h.
    #[serde(with = "duration_secs")]
    pub max_age: Duration,
    /// Session idle lifetime. Default 10min.
    #[serde(with = "duration_secs")]
    pub idle_timeout: Duration,
    /// Period of background purge (session store, nonce store). Default 30s.
    #[serde(with = "duration_secs")]
    pub cleanup_interval: Duration,
    /// Nonce retention after first use. Default 5min.
    #[serde(with = "duration_secs")]
    pub nonce_ttl: Duration,
    /// Accepted drift on a signature's `created` parameter. Default 5min.
    #[serde(with = "duration_secs")]
    pub max_clock_skew: Duration,
    /// Accepted drift on a packet's application timestamp. Default 5min.
    #[serde(with = "duration_secs")]
    pub timestamp_tolerance: Duration,
    /// Allowed backward slack on per-session packet timestamps. Default 1s.
    #[serde(with = "duration_secs")]
    pub max_out_of_order_window: Duration,
    /// Max wall-clock for the three handshake phases. Default 30s.
    #[serde(with = "duration_secs")]
    pub handshake_timeout: Duration,
    /// Retention window for the duplicate message-id check (§4.5). Default
    /// 5min, matching `nonce_ttl`.
    #[serde(with = "duration_secs")]
    pub duplicate_ttl: Duration,
    /// Timeout for DID resolver lookups (§5). Default 30s.
    #[serde(with = "duration_secs")]
    pub resolver_timeout: Duration,
    /// Timeout for session/nonce store operations (§5). Default 10s.
    #[serde(with = "duration_secs")]
    pub store_timeout: Duration,
    /// Maximum number of packets admitted concurrently before new packets
    /// are rejected with `Overloaded` (§5 "Backpressure").
    pub max_concurrent_packets: usize,
}

impl Default for SageConfig {
    fn default() -> Self {
        Self {
            max_age: Duration::hours(1),
            idle_timeout: Duration::minutes(10),
            cleanup_interval: Duration::seconds(30),
            nonce_ttl: Duration::minutes(5),
            max_clock_skew: Duration::minutes(5),
            timestamp_tolerance: Duration::minutes(5),
            max_out_of_order_window: Duration::seconds(1),
            handshake_timeout: Duration::seconds(30),
            duplicate_ttl: Duration::minutes(5),
            resolver_timeout: Duration::seconds(30),
            store_timeout: Duration::seconds(10),
            max_concurrent_packets: 256,
        }
    }
}
