//! Numeric id generation for newly created entities.
//!
//! # Responsibility
//! - Produce ids for projects, events and mirror-only documents.
//!
//! # Invariants
//! - An id is the clock reading in epoch milliseconds.
//! - Two calls within the same millisecond return the same id. Collisions
//!   are not errors; downstream lookups keyed by id see the later entity.

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock abstraction so id generation can be pinned in tests.
pub trait Clock {
    /// Milliseconds since the unix epoch.
    fn now_epoch_ms(&self) -> i64;
}

/// Reads `SystemTime::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        // A clock before 1970 yields 0 rather than failing the caller.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock that never advances.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0
    }
}

/// Source of ids for new entities.
pub trait IdGenerator {
    fn generate(&self) -> i64;
}

/// Timestamp-derived id generator.
#[derive(Debug, Clone, Default)]
pub struct ClockIdGenerator<C: Clock = SystemClock> {
    clock: C,
}

impl ClockIdGenerator<SystemClock> {
    pub fn system() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ClockIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for ClockIdGenerator<C> {
    fn generate(&self) -> i64 {
        self.clock.now_epoch_ms()
    }
}
