//! # Official Registry
//!
//! The Ministro de Fe roster: independent lifecycle, created and
//! deactivated by administrators. The registry contract is what the
//! service layer consumes; the in-memory implementation backs tests and
//! the file-backed CLI.

use serde::{Deserialize, Serialize};

use regcom_core::{OfficialId, Rut};

use crate::error::ServiceError;

/// A certifying official (Ministro de Fe).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Official {
    /// Unique official identifier.
    pub id: OfficialId,
    /// Full legal name.
    pub name: String,
    /// National identity number.
    pub rut: Rut,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Whether the official can currently be scheduled.
    pub active: bool,
}

/// Contract for the official roster.
pub trait OfficialRegistry {
    /// Look up an official by id.
    fn get_by_id(&self, id: &OfficialId) -> Option<Official>;

    /// All officials currently active.
    fn get_active(&self) -> Vec<Official>;

    /// All officials, active or not.
    fn get_all(&self) -> Vec<Official>;

    /// Register a new official.
    fn create(&mut self, official: Official);

    /// Replace an official's data.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::OfficialNotFound`] for an unknown id.
    fn update(&mut self, official: Official) -> Result<(), ServiceError>;

    /// Flip the active flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::OfficialNotFound`] for an unknown id.
    fn toggle_active(&mut self, id: &OfficialId) -> Result<bool, ServiceError>;
}

/// In-memory official roster.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryOfficialRegistry {
    officials: Vec<Official>,
}

impl InMemoryOfficialRegistry {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a roster from persisted officials.
    pub fn from_officials(officials: Vec<Official>) -> Self {
        Self { officials }
    }

    /// Consume the roster, yielding its officials for persistence.
    pub fn into_officials(self) -> Vec<Official> {
        self.officials
    }
}

impl OfficialRegistry for InMemoryOfficialRegistry {
    fn get_by_id(&self, id: &OfficialId) -> Option<Official> {
        self.officials.iter().find(|o| &o.id == id).cloned()
    }

    fn get_active(&self) -> Vec<Official> {
        self.officials.iter().filter(|o| o.active).cloned().collect()
    }

    fn get_all(&self) -> Vec<Official> {
        self.officials.clone()
    }

    fn create(&mut self, official: Official) {
        self.officials.push(official);
    }

    fn update(&mut self, official: Official) -> Result<(), ServiceError> {
        let slot = self
            .officials
            .iter_mut()
            .find(|o| o.id == official.id)
            .ok_or_else(|| ServiceError::OfficialNotFound {
                id: official.id.to_string(),
            })?;
        *slot = official;
        Ok(())
    }

    fn toggle_active(&mut self, id: &OfficialId) -> Result<bool, ServiceError> {
        let official = self
            .officials
            .iter_mut()
            .find(|o| &o.id == id)
            .ok_or_else(|| ServiceError::OfficialNotFound { id: id.to_string() })?;
        official.active = !official.active;
        Ok(official.active)
    }
}
