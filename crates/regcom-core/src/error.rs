//! # Error Types — Core Validation Failures
//!
//! Errors raised by the validated constructors in this crate. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Parse errors carry the offending input verbatim so the acting user
//!   can correct it without guessing.
//! - None of these are fatal; each aborts only the current operation.

use thiserror::Error;

/// Validation error for the core domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A time-of-day string could not be canonicalized.
    #[error("invalid time of day {input:?}: {reason}")]
    InvalidTime {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A civil date string could not be parsed.
    #[error("invalid date {input:?}: expected YYYY-MM-DD")]
    InvalidDate {
        /// The rejected input.
        input: String,
    },

    /// A timestamp string could not be parsed.
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A RUT failed format or check-digit validation.
    #[error("invalid RUT {input:?}: {reason}")]
    InvalidRut {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A content digest string was not `sha256:` followed by 64 hex chars.
    #[error("invalid content digest {input:?}")]
    InvalidDigest {
        /// The rejected input.
        input: String,
    },

    /// A person reference named a founding member that is not on the roster.
    #[error("unknown founding member: {id}")]
    UnknownMember {
        /// The member identifier that failed to resolve.
        id: String,
    },
}
