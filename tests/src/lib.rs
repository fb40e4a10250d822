//! # SAGE Integration Test Suite
//!
//! Exercises the security engine the way an embedder would: build two
//! fixture agents, run them through the real `sage-handshake` and
//! `sage-gateway` crates wired to `sage-testkit`'s in-memory adapters, and
//! assert on the outcomes §8 names. The six concrete scenarios live in
//! [`integration::scenarios`]; the property-style checks (P1, P3, P6) live
//! in [`integration::properties`].
//!
//! ```text
//! tests/src/
//! ├── support.rs               # shared fixture/envelope builders
//! └── integration/
//!     ├── scenarios.rs         # §8 scenarios 1-6
//!     └── properties.rs        # §8 P1, P3, P6 via proptest
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;
