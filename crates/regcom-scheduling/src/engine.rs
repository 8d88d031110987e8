//! # Scheduling Engine
//!
//! Read-only composition of the availability and assignment stores,
//! answering the two questions an administrator asks before committing
//! a booking:
//!
//! - **`is_available`** — hard gate. An active block for the date (whole
//!   day or exact slot) makes the official unavailable, full stop.
//! - **`has_conflict`** — advisory. An existing non-cancelled booking at
//!   the same slot is flagged, but the administrator may proceed after
//!   explicit confirmation — the statute allows one official to preside
//!   over delegated simultaneous sub-sessions.
//!
//! All times entering the engine are already canonical [`TimeOfDay`]
//! values, so comparisons never depend on input formatting.

use regcom_core::{CivilDate, OfficialId, TimeOfDay};

use crate::assignment::{Assignment, AssignmentStore};
use crate::block::{AvailabilityBlock, AvailabilityStore};

/// Composed read view over availability blocks and assignments.
#[derive(Debug, Clone, Copy)]
pub struct SchedulingEngine<'a> {
    availability: &'a AvailabilityStore,
    assignments: &'a AssignmentStore,
}

impl<'a> SchedulingEngine<'a> {
    /// Compose an engine over the two stores.
    pub fn new(availability: &'a AvailabilityStore, assignments: &'a AssignmentStore) -> Self {
        Self {
            availability,
            assignments,
        }
    }

    /// Whether the official can work the given slot.
    pub fn is_available(&self, official_id: &OfficialId, date: CivilDate, time: TimeOfDay) -> bool {
        self.blocking_block(official_id, date, time).is_none()
    }

    /// The block that makes the official unavailable, if any — used to
    /// name the reason in the error surfaced to the administrator.
    pub fn blocking_block(
        &self,
        official_id: &OfficialId,
        date: CivilDate,
        time: TimeOfDay,
    ) -> Option<&'a AvailabilityBlock> {
        self.availability
            .iter()
            .find(|b| b.covers(official_id, date, time))
    }

    /// Whether a non-cancelled booking already occupies the slot.
    pub fn has_conflict(&self, official_id: &OfficialId, date: CivilDate, time: TimeOfDay) -> bool {
        !self.conflicting_assignments(official_id, date, time).is_empty()
    }

    /// The bookings that collide with the slot, for the administrator's
    /// override confirmation.
    pub fn conflicting_assignments(
        &self,
        official_id: &OfficialId,
        date: CivilDate,
        time: TimeOfDay,
    ) -> Vec<&'a Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.occupies(official_id, date, time))
            .collect()
    }
}
