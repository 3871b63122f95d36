//! Organizational domain model shared by state and persistence layers.
//!
//! # Responsibility
//! - Define the entity shapes kept in memory and written to storage.
//! - Keep stored JSON field names stable (`camelCase`) across sessions.
//!
//! # Invariants
//! - Ids are unique within their own collection, not globally.
//! - Every observable `Settings` value is fully populated.

pub mod document;
pub mod event;
pub mod notification;
pub mod person;
pub mod project;
pub mod settings;
