//! # regcom-assembly — Constitutive Assembly Validation
//!
//! The certification protocol the Ministro de Fe executes at a founding
//! assembly:
//!
//! - **Record** ([`record`]): the finalized [`CertificationRecord`] with
//!   board, electoral commission, attendee roster, and the official's
//!   signature — plus the full invariant validation that runs at
//!   finalization regardless of how the record was assembled.
//!
//! - **Session** ([`session`]): the five-step ordered data-collection
//!   state machine with selection-time uniqueness, disjointness, and
//!   minor-eligibility checks, and the advisory-only attendee minimum.
//!
//! - **Errors** ([`error`]): conflict errors naming the person and role
//!   involved, and precondition errors for out-of-order callers.

pub mod error;
pub mod record;
pub mod session;

// Re-export primary types for ergonomic imports.
pub use error::AssemblyError;
pub use record::{
    AdditionalSeat, Attendee, BoardRole, CertificationRecord, CertifiedPerson, Directorio,
};
pub use session::{CertificationSession, RosterAdvisory, SessionStep};
