//! # Storage Ports
//!
//! `NonceStore` backs the replay check in §4.5; `SessionStore` backs
//! session lifecycle in §4.8. Both are driven ports — no concrete,
//! production backend ships from this crate. `sage-testkit` provides the
//! in-memory doubles this workspace's tests run against.

pub mod error;
pub mod nonce;
pub mod session;

pub use error::SessionStoreError;
pub use nonce::NonceStore;
pub use session::SessionStore;
