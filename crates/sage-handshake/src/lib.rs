//! # SAGE Handshake Engine (C7)
//!
//! The HPKE three-phase exchange — `Invitation` -> `Request` -> `Complete`
//! — that turns two resolved DIDs into a shared, forward-secret session
//! (§4.7). `Request` is a single synchronous round trip: both sides hold
//! the ECDH shared secret by the time it completes, but the responder
//! defers deriving the session key and promoting the session to `Active`
//! until it separately receives `Complete`, so the protocol's three phases
//! are still enforced (H4) even though the crypto material was ready a
//! round trip earlier.
//!
//! This crate produces a ready-to-persist [`sage_types::session::Session`]
//! but never stores one itself — that is `sage-session`'s job, sitting a
//! layer above [`engine::HandshakeEngine`].
//!
//! Every phase a [`engine::HandshakeEngine`] method accepts is a
//! [`SignedPhase`], verified against the sender's resolved signing key
//! before any other phase logic runs (H1, [`auth`]).

pub mod auth;
pub mod engine;
pub mod error;
pub mod payload;
pub mod state;

pub use auth::SignedPhase;
pub use engine::HandshakeEngine;
pub use error::HandshakeError;
pub use payload::{CompleteConfirmation, InvitationPayload, RequestInner, ResponseInner, SealedPayload};
pub use state::HandshakeState;
