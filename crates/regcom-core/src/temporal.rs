//! # Temporal Types — Timestamps, Civil Dates, Canonical Times
//!
//! Three temporal primitives with distinct roles:
//!
//! - [`Timestamp`] — UTC instant, seconds precision, for audit history.
//! - [`CivilDate`] — calendar date (`YYYY-MM-DD`) for assembly scheduling.
//! - [`TimeOfDay`] — time slot canonicalized to zero-padded 24h `HH:MM`.
//!
//! ## Canonicalization Invariant
//!
//! All scheduling comparisons (availability blocks, booking collisions)
//! run over canonical `HH:MM` values. [`TimeOfDay::parse`] accepts
//! `HH:MM`, `HH:MM:SS`, and loosely separated or unpadded input, and
//! always renders back as zero-padded `HH:MM` — so a block stored as
//! `"9:00"` matches a booking queried as `"09:00:00"`. The string-level
//! helper [`normalize_time`] is idempotent.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

// ── Timestamp ──────────────────────────────────────────────────────────

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Used for status-history entries and audit records. Always renders as
/// ISO8601 with `Z` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Parse a timestamp from an RFC 3339 string with `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] if the string is not valid
    /// RFC 3339 or uses a non-`Z` timezone offset.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if !s.ends_with('Z') {
            return Err(CoreError::InvalidTimestamp {
                input: s.to_string(),
                reason: "must use Z suffix (UTC only)".to_string(),
            });
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| CoreError::InvalidTimestamp {
            input: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with `Z` suffix (e.g., `2025-03-10T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ── CivilDate ──────────────────────────────────────────────────────────

/// A calendar date in `YYYY-MM-DD` form, with no time or zone component.
///
/// Availability blocks and assembly slots are keyed by civil date — the
/// day the assembly happens in the commune, not a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    /// Parse a date from `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDate`] for any other shape or an
    /// out-of-range calendar date.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CoreError::InvalidDate {
                input: s.to_string(),
            })
    }

    /// Build a date from numeric components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, CoreError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(CoreError::InvalidDate {
                input: format!("{year:04}-{month:02}-{day:02}"),
            })
    }

    /// Wrap an existing `chrono::NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Access the inner `chrono::NaiveDate`.
    pub fn as_naive(&self) -> &NaiveDate {
        &self.0
    }

    /// Whole years elapsed from this date to `at` (0 if `at` is earlier).
    ///
    /// Used for the minor check: a person is a minor when
    /// `birth_date.years_until(assembly_date) < 18`.
    pub fn years_until(&self, at: CivilDate) -> u32 {
        if at.0 < self.0 {
            return 0;
        }
        let mut years = at.0.year() - self.0.year();
        if (at.0.month(), at.0.day()) < (self.0.month(), self.0.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for CivilDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ── TimeOfDay ──────────────────────────────────────────────────────────

/// A time slot, stored in canonical zero-padded 24h `HH:MM` form.
///
/// This is the time normalizer of the scheduling engine: every time that
/// enters the system — from a block, a booking, or a query — passes
/// through [`TimeOfDay::parse`] before comparison, so `"9:5"`,
/// `"09:05:00"`, and `"09.05"` all denote the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parse a time-of-day from loosely formatted input.
    ///
    /// Accepts `HH:MM`, `HH:MM:SS` (seconds validated then discarded),
    /// unpadded components, and `.`, `-`, or spaces as separators.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTime`] when components are missing,
    /// non-numeric, or out of range.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let reject = |reason: &str| CoreError::InvalidTime {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = input
            .trim()
            .split(|c: char| c == ':' || c == '.' || c == '-' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() < 2 || parts.len() > 3 {
            return Err(reject("expected hour and minute"));
        }

        let hour: u8 = parts[0].parse().map_err(|_| reject("hour is not a number"))?;
        let minute: u8 = parts[1]
            .parse()
            .map_err(|_| reject("minute is not a number"))?;
        if hour > 23 {
            return Err(reject("hour out of range"));
        }
        if minute > 59 {
            return Err(reject("minute out of range"));
        }
        if let Some(secs) = parts.get(2) {
            let seconds: u8 = secs.parse().map_err(|_| reject("seconds are not a number"))?;
            if seconds > 59 {
                return Err(reject("seconds out of range"));
            }
        }

        Ok(Self { hour, minute })
    }

    /// Build a time from numeric components.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self, CoreError> {
        if hour > 23 || minute > 59 {
            return Err(CoreError::InvalidTime {
                input: format!("{hour}:{minute}"),
                reason: "out of range".to_string(),
            });
        }
        Ok(Self { hour, minute })
    }

    /// The hour component (0-23).
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// The minute component (0-59).
    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        TimeOfDay::parse(&s).map_err(de::Error::custom)
    }
}

/// Canonicalize a time-of-day string to zero-padded 24h `HH:MM`.
///
/// Idempotent: feeding the output back returns the same string.
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] for input [`TimeOfDay::parse`]
/// rejects.
pub fn normalize_time(input: &str) -> Result<String, CoreError> {
    TimeOfDay::parse(input).map(|t| t.to_string())
}
