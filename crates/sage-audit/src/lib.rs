//! # Structured Audit Events
//!
//! Every rejection path across the security engine records a
//! `{ timestamp, peer_did, error_code, packet_id }` event (§7) through the
//! [`AuditSink`] port. [`TracingSink`] is the always-on default; [`AuditBus`]
//! additionally republishes on an in-process broadcast channel for whatever
//! observability backend an embedder plugs in.

pub mod bus;
pub mod event;
pub mod sink;

pub use bus::AuditBus;
pub use event::AuditEvent;
pub use sink::{AuditSink, TracingSink};
