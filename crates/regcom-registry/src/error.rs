//! # Service Errors
//!
//! The error surface of the orchestration layer: not-found failures
//! (never silent no-ops), optimistic-concurrency rejections, scheduling
//! gates, and pass-through domain errors.

use thiserror::Error;

use regcom_assembly::AssemblyError;
use regcom_scheduling::SchedulingError;
use regcom_workflow::WorkflowError;

/// Errors raised by the registry service and its repositories.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Referenced application does not exist.
    #[error("application not found: {id}")]
    ApplicationNotFound {
        /// The missing application id.
        id: String,
    },

    /// Referenced official does not exist.
    #[error("official not found: {id}")]
    OfficialNotFound {
        /// The missing official id.
        id: String,
    },

    /// The official exists but is deactivated.
    #[error("official {id} is inactive and cannot be scheduled")]
    OfficialInactive {
        /// The inactive official id.
        id: String,
    },

    /// Hard availability gate: an active block covers the slot.
    #[error("official {official} is unavailable on {date} ({slot}): {reason}")]
    OfficialUnavailable {
        /// The blocked official.
        official: String,
        /// The requested date.
        date: String,
        /// The requested slot, or `whole day`.
        slot: String,
        /// The block's reason.
        reason: String,
    },

    /// Advisory collision gate: the slot already has bookings and the
    /// administrator has not confirmed the override.
    #[error("booking collides with {count} existing assignment(s); administrator override required")]
    ConflictRequiresOverride {
        /// How many bookings collide.
        count: usize,
    },

    /// A mutation supplied a stale application version; the write was
    /// rejected rather than merged.
    #[error("stale write on application {id}: expected version {expected}, found {actual}")]
    StaleVersion {
        /// The application id.
        id: String,
        /// The version the caller supplied.
        expected: u64,
        /// The version currently stored.
        actual: u64,
    },

    /// Document generation failed.
    #[error("document generation failed: {0}")]
    DocumentGeneration(String),

    /// Workflow transition failure.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// Scheduling store failure.
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),

    /// Certification validation failure.
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
}
