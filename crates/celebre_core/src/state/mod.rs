//! In-memory application state and write-through orchestration.
//!
//! # Responsibility
//! - Own the authoritative snapshot of every entity collection.
//! - Route each mutation through a pure transition, then commit the changed
//!   key to storage before returning.
//! - Hold transient UI state that is never persisted.
//!
//! # Invariants
//! - A key's store value is written after its snapshot is replaced and before
//!   the mutating call returns.
//! - Collections are committed independently; untouched keys are not
//!   rewritten.
//! - `current_user` is never absent after `EntityStateManager::open`.

pub mod manager;
pub mod transitions;
pub mod ui;
