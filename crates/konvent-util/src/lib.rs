//! Shared utilities for the Konvent convention resolver.
//!
//! This crate provides cross-cutting concerns used by all other Konvent
//! crates: the error taxonomy, filesystem helpers, content hashing, and
//! Cargo-style status lines.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
