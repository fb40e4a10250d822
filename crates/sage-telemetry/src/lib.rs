//! # SAGE Telemetry
//!
//! Logging setup for an embedder of the security engine: an `EnvFilter`
//! plus JSON-or-pretty formatting, matching how the rest of this
//! workspace's `tracing` instrumentation (`#[instrument]` on every
//! handshake/session/signature operation) expects to be consumed.
//! OpenTelemetry trace export is out of scope — this crate emits
//! `tracing` events and nothing more.

mod config;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::{init_tracing, TelemetryError};
