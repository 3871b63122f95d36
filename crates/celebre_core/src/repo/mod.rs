//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the asynchronous document persistence contract.
//! - Isolate SQLite query details from state orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Multi-row writes are all-or-nothing.

pub mod document_repo;
