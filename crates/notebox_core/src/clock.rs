//! Time source for note timestamps.
//!
//! # Invariants
//! - Returned instants are truncated to millisecond precision, the finest
//!   resolution the persisted timestamp format carries.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Supplies "now" to the note manager.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        truncate_to_millis(Utc::now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Drops sub-millisecond precision from `instant`.
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .duration_trunc(TimeDelta::milliseconds(1))
        .unwrap_or(instant)
}
