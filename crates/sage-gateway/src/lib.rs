//! # Protected-Channel Orchestrator (C9)
//!
//! Assembles every other component crate into the single pipeline an
//! embedder calls once per inbound protected-channel packet (§4.9):
//! signature verification, session lookup, message validation, body
//! decryption, application dispatch, reply encryption, and session
//! touch — all before the embedder's own application code ever sees a
//! plaintext byte.
//!
//! This crate owns no transport. An embedder adapts whatever HTTP or RPC
//! library it uses into [`request::InboundRequest`] and turns a
//! [`request::OutboundResponse`] back into its own reply type.

pub mod admission;
pub mod error;
pub mod handler;
pub mod orchestrator;
pub mod request;
pub mod validators;

pub use admission::{AdmissionControl, AdmissionGuard};
pub use handler::MessageHandler;
pub use orchestrator::{Gateway, GatewayConfig};
pub use request::{InboundRequest, OutboundResponse};
pub use validators::ValidatorRegistry;
