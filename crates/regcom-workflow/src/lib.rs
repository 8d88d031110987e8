//! # regcom-workflow — Organization Certification Workflow
//!
//! The top-level lifecycle of an organization application:
//!
//! - **Status** ([`status`]): the state enum with its transition graph —
//!   `WAITING_MINISTRO_REQUEST` through `APPROVED`, terminal
//!   `DISSOLVED`, and the rejection/resubmission loop.
//!
//! - **Application** ([`application`]): the state machine itself, with
//!   typed transition methods, an append-only status history, and a
//!   monotonic version checked by repositories against stale writes.
//!
//! - **Corrections** ([`corrections`]): the reviewer's working set of
//!   field-level annotations and the frozen set attached at rejection.

pub mod application;
pub mod corrections;
pub mod error;
pub mod status;

// Re-export primary types for ergonomic imports.
pub use application::{
    MinistroAssignment, OrganizationApplication, RequestedSlot, ReviewOutcome, StatusChange,
    TransitionContext,
};
pub use corrections::{Correction, CorrectionKind, CorrectionSet, CorrectionTracker};
pub use error::WorkflowError;
pub use status::ApplicationStatus;
