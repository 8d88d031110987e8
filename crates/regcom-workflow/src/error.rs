//! # Workflow Errors
//!
//! Transition preconditions for the application lifecycle. Precondition
//! errors should not occur when UI gating is in place, but the state
//! machine validates them regardless.

use thiserror::Error;

use regcom_assembly::AssemblyError;

/// Errors raised by the application workflow state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Attempted transition is not valid from the current status.
    #[error("invalid application transition: {from} -> {to}: {reason}")]
    InvalidTransition {
        /// Current status.
        from: String,
        /// Attempted target status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },

    /// The application is dissolved and accepts no further transitions.
    #[error("application {id} is dissolved and cannot transition")]
    Terminal {
        /// The application identifier.
        id: String,
    },

    /// Rejection was attempted with an empty correction set — an empty
    /// set means "nothing wrong" and must never produce a rejection.
    #[error("rejection requires at least one correction")]
    EmptyCorrections,

    /// Forwarding to the registry was attempted with corrections still
    /// outstanding.
    #[error("cannot forward to registry with {count} outstanding corrections")]
    OutstandingCorrections {
        /// How many corrections remain marked.
        count: usize,
    },

    /// The certification record failed its invariant validation.
    #[error("certification record invalid: {0}")]
    Certification(#[from] AssemblyError),
}
