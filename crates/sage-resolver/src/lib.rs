//! # DID Resolution (C2)
//!
//! The `DidResolver` driven port and a `CachingResolver` decorator around
//! it. No concrete resolver ships from this crate — resolving a `did:sage`
//! identifier against a particular chain's registry contract is an
//! embedding application's concern; see `sage-testkit` for an in-memory
//! resolver used by this workspace's own tests.

pub mod cache;
pub mod error;
pub mod port;

pub use cache::CachingResolver;
pub use error::ResolveError;
pub use port::DidResolver;
