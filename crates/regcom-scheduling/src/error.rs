//! # Scheduling Errors
//!
//! Conflict and precondition failures for the scheduling subsystem. All
//! recoverable; each aborts only the current operation.

use thiserror::Error;

/// Errors raised by the availability and assignment stores.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// An active block already covers this exact (official, date, slot).
    ///
    /// Hard uniqueness constraint — unlike booking collisions, which are
    /// advisory.
    #[error("duplicate availability block for {official_id} on {date} ({slot})")]
    DuplicateBlock {
        /// The official the block belongs to.
        official_id: String,
        /// The blocked date.
        date: String,
        /// The blocked slot, or `whole day`.
        slot: String,
    },

    /// Referenced availability block does not exist.
    #[error("availability block not found: {id}")]
    BlockNotFound {
        /// The missing block id.
        id: String,
    },

    /// Referenced assignment does not exist.
    #[error("assignment not found: {id}")]
    AssignmentNotFound {
        /// The missing assignment id.
        id: String,
    },

    /// A mutation supplied a stale version; the write was rejected.
    #[error("stale write on assignment {id}: expected version {expected}, found {actual}")]
    StaleVersion {
        /// The assignment id.
        id: String,
        /// The version the caller supplied.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// The assignment's status does not permit the requested change.
    #[error("assignment {id} is {status} and does not permit this change")]
    InvalidAssignmentState {
        /// The assignment id.
        id: String,
        /// Its current status.
        status: String,
    },
}
