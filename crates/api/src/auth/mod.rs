//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation (and generation, for tooling and tests).
//! - [`api_key`] -- admin API-key hashing and comparison.

pub mod api_key;
pub mod jwt;
