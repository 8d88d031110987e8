//! # regcom-scheduling — Official Scheduling
//!
//! Books certifying officials against assembly slots and detects the two
//! kinds of collision:
//!
//! - **Blocks** ([`block`]): per-official unavailability (whole day or
//!   single slot) with a hard uniqueness constraint on active blocks.
//!
//! - **Assignments** ([`assignment`]): committed bookings with status
//!   tracking and version-checked mutations (stale writes rejected).
//!
//! - **Engine** ([`engine`]): the composed read view answering
//!   `is_available` (hard) and `has_conflict` (advisory, administrator
//!   may override).

pub mod assignment;
pub mod block;
pub mod engine;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use assignment::{Assignment, AssignmentStatus, AssignmentStore};
pub use block::{AvailabilityBlock, AvailabilityStore};
pub use engine::SchedulingEngine;
pub use error::SchedulingError;
