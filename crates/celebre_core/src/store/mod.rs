//! Synchronous key-value persistence.
//!
//! # Responsibility
//! - Define the raw key-value contract and its typed, fail-open helpers.
//! - Provide SQLite-backed and in-memory implementations.
//! - Name the keys tracked by the state layer.
//!
//! # Invariants
//! - Each key is its own atomic unit; there are no cross-key transactions.
//! - Typed reads never fail; typed writes never surface errors.

pub mod keys;
pub mod kv_store;
