//! # Assembly Validation Errors
//!
//! Conflict and precondition failures for the certification protocol.
//! Conflict errors name the person and role involved so the official can
//! correct the selection without guessing; precondition errors cover
//! callers that bypass the step ordering.

use thiserror::Error;

use regcom_core::CoreError;

/// Errors raised by the certification session and record validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// An operation was attempted outside its protocol step.
    #[error("protocol step out of order: currently in {current}, operation belongs to {required}")]
    StepOrder {
        /// The step the session is currently in.
        current: String,
        /// The step the operation belongs to.
        required: String,
    },

    /// A person was selected for a second role.
    #[error("{person} already serves as {existing_role} and cannot also hold {attempted_role}")]
    RoleAlreadyHeld {
        /// The person involved.
        person: String,
        /// The role they already hold.
        existing_role: String,
        /// The role that was attempted.
        attempted_role: String,
    },

    /// A commission member overlaps the board.
    #[error("electoral commission member {person} already serves on the board as {conflicting_role}")]
    CommissionOverlap {
        /// The person involved.
        person: String,
        /// The board role they hold.
        conflicting_role: String,
    },

    /// The same person was selected twice for the commission.
    #[error("{person} is already on the electoral commission")]
    DuplicateCommissionMember {
        /// The person involved.
        person: String,
    },

    /// The commission already has its three seats.
    #[error("the electoral commission already has 3 members")]
    CommissionFull,

    /// The commission does not have exactly three seats.
    #[error("the electoral commission requires exactly 3 members, found {found}")]
    CommissionIncomplete {
        /// How many seats were filled.
        found: usize,
    },

    /// A minor was selected for a role.
    #[error("{person} is under 18 at the assembly date and cannot hold a role")]
    MinorNotEligible {
        /// The person involved.
        person: String,
    },

    /// A directorio role was left unassigned.
    #[error("directorio is incomplete: {role} is unassigned")]
    MissingRole {
        /// The unassigned role.
        role: String,
    },

    /// An additional board seat was added without a cargo label.
    #[error("additional board seat requires a cargo label")]
    MissingCargo,

    /// The same person was added to the attendee roster twice.
    #[error("{person} is already on the attendee roster")]
    DuplicateAttendee {
        /// The person involved.
        person: String,
    },

    /// A person reference failed to resolve or validate.
    #[error(transparent)]
    Person(#[from] CoreError),
}
