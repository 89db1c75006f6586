//! Shared types for the Birchwood workspace.
//!
//! Pure types only - no I/O, no HTTP, no database access - so both the
//! storefront and the CLI can depend on this crate from anywhere. Database
//! encode/decode impls are gated behind the `postgres` feature.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
