//! # Injectable Clock and Id Generation
//!
//! The workflow and service layers never read the wall clock or call
//! `Uuid::new_v4()` directly — they go through these seams, so tests can
//! pin time and produce stable identifiers.

use chrono::Utc;
use uuid::Uuid;

use crate::temporal::{CivilDate, Timestamp};

/// Source of the current time.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Timestamp;

    /// Today's civil date.
    fn today(&self) -> CivilDate;
}

/// Production clock backed by the system's UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn today(&self) -> CivilDate {
        CivilDate::from_naive(Utc::now().date_naive())
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: Timestamp,
    today: CivilDate,
}

impl FixedClock {
    /// Create a clock pinned to the given instant and date.
    pub fn new(now: Timestamp, today: CivilDate) -> Self {
        Self { now, today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now
    }

    fn today(&self) -> CivilDate {
        self.today
    }
}

/// Source of fresh identifiers.
pub trait IdGenerator {
    /// The next raw UUID.
    fn next_uuid(&mut self) -> Uuid;
}

/// Production generator producing random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Sequential generator for deterministic tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds {
    counter: u128,
}

impl IdGenerator for SequentialIds {
    fn next_uuid(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::from_u128(self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_stable() {
        let ts = Timestamp::parse("2025-03-10T12:00:00Z").unwrap();
        let date = CivilDate::parse("2025-03-10").unwrap();
        let clock = FixedClock::new(ts, date);
        assert_eq!(clock.now(), ts);
        assert_eq!(clock.today(), date);
    }

    #[test]
    fn test_sequential_ids_are_distinct_and_ordered() {
        let mut ids = SequentialIds::default();
        let a = ids.next_uuid();
        let b = ids.next_uuid();
        assert_ne!(a, b);
        assert_eq!(a, Uuid::from_u128(1));
        assert_eq!(b, Uuid::from_u128(2));
    }
}
