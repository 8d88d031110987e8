//! # Assignments — Booked Certification Sessions
//!
//! An assignment records that an administrator booked an official
//! against an organization's assembly slot. Assignments carry a
//! monotonic version; every mutation must supply the version the caller
//! last observed, and stale writes are rejected rather than merged.

use serde::{Deserialize, Serialize};

use regcom_core::{ApplicationId, AssignmentId, CivilDate, OfficialId, TimeOfDay};

use crate::error::SchedulingError;

/// Status of a booked assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentStatus {
    /// Booked, certification not yet performed.
    Pending,
    /// Certification session completed.
    Completed,
    /// Booking cancelled; the slot no longer collides.
    Cancelled,
}

impl AssignmentStatus {
    /// The canonical string name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booked (official, organization, date, time, location) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: AssignmentId,
    /// The booked official.
    pub official_id: OfficialId,
    /// The organization application being certified.
    pub application_id: ApplicationId,
    /// Assembly date.
    pub date: CivilDate,
    /// Assembly slot (canonical `HH:MM`).
    pub time: TimeOfDay,
    /// Assembly location.
    pub location: String,
    /// Booking status.
    pub status: AssignmentStatus,
    /// Flips true only when the validation protocol finalizes.
    pub signatures_validated: bool,
    /// Monotonic version for optimistic concurrency.
    pub version: u64,
}

impl Assignment {
    /// Create a fresh pending booking.
    pub fn book(
        id: AssignmentId,
        official_id: OfficialId,
        application_id: ApplicationId,
        date: CivilDate,
        time: TimeOfDay,
        location: String,
    ) -> Self {
        Self {
            id,
            official_id,
            application_id,
            date,
            time,
            location,
            status: AssignmentStatus::Pending,
            signatures_validated: false,
            version: 1,
        }
    }

    /// Whether this assignment occupies the given slot for collision
    /// purposes. Cancelled bookings occupy nothing.
    pub fn occupies(&self, official_id: &OfficialId, date: CivilDate, time: TimeOfDay) -> bool {
        self.status != AssignmentStatus::Cancelled
            && &self.official_id == official_id
            && self.date == date
            && self.time == time
    }
}

/// Collection of assignments for all officials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentStore {
    assignments: Vec<Assignment>,
}

impl AssignmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from previously persisted assignments.
    pub fn from_assignments(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }

    /// Record a booking. Collisions are the engine's concern, not the
    /// store's — booking always succeeds.
    pub fn add(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Look up an assignment by id.
    pub fn find(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }

    /// All assignments for one official.
    pub fn for_official(&self, official_id: &OfficialId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| &a.official_id == official_id)
            .collect()
    }

    /// Cancel a pending booking.
    ///
    /// # Errors
    ///
    /// Not-found, stale-version, or already-terminal failures.
    pub fn cancel(
        &mut self,
        id: &AssignmentId,
        expected_version: u64,
    ) -> Result<(), SchedulingError> {
        self.mutate(id, expected_version, |a| {
            if a.status != AssignmentStatus::Pending {
                return Err(SchedulingError::InvalidAssignmentState {
                    id: a.id.to_string(),
                    status: a.status.to_string(),
                });
            }
            a.status = AssignmentStatus::Cancelled;
            Ok(())
        })
    }

    /// Mark the certification session completed.
    ///
    /// # Errors
    ///
    /// Not-found, stale-version, or already-terminal failures.
    pub fn complete(
        &mut self,
        id: &AssignmentId,
        expected_version: u64,
    ) -> Result<(), SchedulingError> {
        self.mutate(id, expected_version, |a| {
            if a.status != AssignmentStatus::Pending {
                return Err(SchedulingError::InvalidAssignmentState {
                    id: a.id.to_string(),
                    status: a.status.to_string(),
                });
            }
            a.status = AssignmentStatus::Completed;
            Ok(())
        })
    }

    /// Flip `signatures_validated`; called only when the validation
    /// protocol emits its finalized record.
    ///
    /// # Errors
    ///
    /// Not-found, stale-version, or cancelled-assignment failures.
    pub fn mark_signatures_validated(
        &mut self,
        id: &AssignmentId,
        expected_version: u64,
    ) -> Result<(), SchedulingError> {
        self.mutate(id, expected_version, |a| {
            if a.status == AssignmentStatus::Cancelled {
                return Err(SchedulingError::InvalidAssignmentState {
                    id: a.id.to_string(),
                    status: a.status.to_string(),
                });
            }
            a.signatures_validated = true;
            Ok(())
        })
    }

    /// Iterate over every assignment in the store.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.assignments.iter()
    }

    /// Consume the store, yielding its assignments for persistence.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }

    /// Version-checked mutation: the closure runs only when the caller's
    /// expected version matches, and a successful change bumps it.
    fn mutate(
        &mut self,
        id: &AssignmentId,
        expected_version: u64,
        f: impl FnOnce(&mut Assignment) -> Result<(), SchedulingError>,
    ) -> Result<(), SchedulingError> {
        let assignment = self
            .assignments
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| SchedulingError::AssignmentNotFound { id: id.to_string() })?;
        if assignment.version != expected_version {
            return Err(SchedulingError::StaleVersion {
                id: id.to_string(),
                expected: expected_version,
                actual: assignment.version,
            });
        }
        f(assignment)?;
        assignment.version += 1;
        Ok(())
    }
}
