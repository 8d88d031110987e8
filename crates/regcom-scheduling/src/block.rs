//! # Availability Blocks
//!
//! An official marks dates or individual slots as unworkable ("cannot
//! work this day", "cannot work this slot"). Blocks are created and
//! deleted by the official and are read-only to the scheduling engine.
//!
//! ## Uniqueness Invariant
//!
//! At most one ACTIVE block may exist per (official, date, slot-or-day).
//! Creating a duplicate is a hard [`SchedulingError::DuplicateBlock`] —
//! this is the one scheduling constraint that is not advisory.

use serde::{Deserialize, Serialize};

use regcom_core::{BlockId, CivilDate, OfficialId, TimeOfDay};

use crate::error::SchedulingError;

/// A per-official blocked date or slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityBlock {
    /// Unique block identifier.
    pub id: BlockId,
    /// The official who cannot work.
    pub official_id: OfficialId,
    /// The blocked date.
    pub date: CivilDate,
    /// The blocked slot; `None` blocks the whole day.
    pub time: Option<TimeOfDay>,
    /// Human-readable reason entered by the official.
    pub reason: String,
    /// Whether the block is currently in force.
    pub active: bool,
}

impl AvailabilityBlock {
    /// Whether this block covers the given slot.
    ///
    /// A whole-day block (`time == None`) covers every slot of its date;
    /// a slot block covers only the exact canonical time. Inactive
    /// blocks cover nothing.
    pub fn covers(&self, official_id: &OfficialId, date: CivilDate, time: TimeOfDay) -> bool {
        self.active
            && &self.official_id == official_id
            && self.date == date
            && self.time.map_or(true, |blocked| blocked == time)
    }

    /// The blocked slot as display text (`whole day` for day blocks).
    pub fn slot_label(&self) -> String {
        match self.time {
            Some(t) => t.to_string(),
            None => "whole day".to_string(),
        }
    }
}

/// Collection of availability blocks for all officials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailabilityStore {
    blocks: Vec<AvailabilityBlock>,
}

impl AvailabilityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from previously persisted blocks.
    pub fn from_blocks(blocks: Vec<AvailabilityBlock>) -> Self {
        Self { blocks }
    }

    /// Add a block, enforcing the active-uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::DuplicateBlock`] when an active block
    /// already exists for the same (official, date, slot-or-day).
    pub fn add_block(&mut self, block: AvailabilityBlock) -> Result<(), SchedulingError> {
        let duplicate = self.blocks.iter().any(|b| {
            b.active
                && block.active
                && b.official_id == block.official_id
                && b.date == block.date
                && b.time == block.time
        });
        if duplicate {
            return Err(SchedulingError::DuplicateBlock {
                official_id: block.official_id.to_string(),
                date: block.date.to_string(),
                slot: block.slot_label(),
            });
        }
        self.blocks.push(block);
        Ok(())
    }

    /// Remove a block outright.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::BlockNotFound`] for an unknown id —
    /// never a silent no-op.
    pub fn remove_block(&mut self, id: &BlockId) -> Result<AvailabilityBlock, SchedulingError> {
        let idx = self
            .blocks
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| SchedulingError::BlockNotFound { id: id.to_string() })?;
        Ok(self.blocks.remove(idx))
    }

    /// Deactivate a block, keeping it for the record.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::BlockNotFound`] for an unknown id.
    pub fn deactivate_block(&mut self, id: &BlockId) -> Result<(), SchedulingError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| SchedulingError::BlockNotFound { id: id.to_string() })?;
        block.active = false;
        Ok(())
    }

    /// All blocks for one official, active or not.
    pub fn blocks_for(&self, official_id: &OfficialId) -> Vec<&AvailabilityBlock> {
        self.blocks
            .iter()
            .filter(|b| &b.official_id == official_id)
            .collect()
    }

    /// Iterate over every block in the store.
    pub fn iter(&self) -> impl Iterator<Item = &AvailabilityBlock> {
        self.blocks.iter()
    }

    /// Consume the store, yielding its blocks for persistence.
    pub fn into_blocks(self) -> Vec<AvailabilityBlock> {
        self.blocks
    }
}
