// src/utils/clock.rs
//! Injectable time source.
//!
//! Expiry and not-before checks depend on "now". Reading it through a trait
//! keeps the protocol free of direct system-clock reads and makes the
//! boundary checks deterministic under test.

use chrono::{DateTime, Utc};

/// A source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current instant. Read fresh on every validation call;
    /// never cached across calls.
    fn now(&self) -> DateTime<Utc>;
}

/// The production time source backed by the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
