//! Core use-case services.
//!
//! # Responsibility
//! - Hold the rules that sit above raw storage: settings merging and
//!   session transitions.
//! - Stay storage-agnostic; the state manager applies their results.

pub mod auth_service;
pub mod settings_merge;
