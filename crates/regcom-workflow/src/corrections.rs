//! # Correction Tracking
//!
//! During review an administrator annotates the fields, documents,
//! certificates, members, or commission entries that need fixing. The
//! working set lives in a [`CorrectionTracker`]; rejecting an
//! application snapshots it into a [`CorrectionSet`] that travels back
//! to the applicant.
//!
//! Corrections are a typed list of tagged [`Correction`] values — one
//! collection, one shape — rather than parallel per-kind maps.

use serde::{Deserialize, Serialize};

/// What part of the application a correction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionKind {
    /// A form field.
    Field,
    /// An uploaded document.
    Document,
    /// A certificate.
    Certificate,
    /// A founding member entry.
    Member,
    /// An electoral commission entry.
    Commission,
}

impl CorrectionKind {
    /// All kinds as a slice.
    pub fn all() -> &'static [CorrectionKind] {
        &[
            Self::Field,
            Self::Document,
            Self::Certificate,
            Self::Member,
            Self::Commission,
        ]
    }

    /// The canonical string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Document => "document",
            Self::Certificate => "certificate",
            Self::Member => "member",
            Self::Commission => "commission",
        }
    }
}

impl std::fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CorrectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "field" => Ok(Self::Field),
            "document" => Ok(Self::Document),
            "certificate" => Ok(Self::Certificate),
            "member" => Ok(Self::Member),
            "commission" => Ok(Self::Commission),
            other => Err(format!("unknown correction kind: {other}")),
        }
    }
}

/// A single field-level rejection annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// What part of the application this targets.
    pub kind: CorrectionKind,
    /// Key identifying the entry within its kind (field name, document
    /// id, member id…).
    pub key: String,
    /// The reviewer's comment.
    pub comment: String,
    /// Human-readable label shown to the applicant.
    pub label: String,
}

/// An immutable snapshot of corrections, attached to an application at
/// rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionSet {
    corrections: Vec<Correction>,
}

impl CorrectionSet {
    /// Whether the set holds no corrections.
    pub fn is_empty(&self) -> bool {
        self.corrections.is_empty()
    }

    /// Number of corrections in the set.
    pub fn len(&self) -> usize {
        self.corrections.len()
    }

    /// Iterate over the corrections.
    pub fn iter(&self) -> impl Iterator<Item = &Correction> {
        self.corrections.iter()
    }

    /// Look up a correction by kind and key.
    pub fn get(&self, kind: CorrectionKind, key: &str) -> Option<&Correction> {
        self.corrections
            .iter()
            .find(|c| c.kind == kind && c.key == key)
    }
}

/// Mutable per-review working set of corrections.
///
/// Created per review cycle; [`snapshot`](CorrectionTracker::snapshot)
/// freezes it for attachment at rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionTracker {
    entries: Vec<Correction>,
}

impl CorrectionTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an entry for correction. Re-marking the same (kind, key)
    /// replaces the earlier comment and label.
    pub fn mark(&mut self, kind: CorrectionKind, key: &str, comment: &str, label: &str) {
        let correction = Correction {
            kind,
            key: key.to_string(),
            comment: comment.to_string(),
            label: label.to_string(),
        };
        match self
            .entries
            .iter_mut()
            .find(|c| c.kind == kind && c.key == key)
        {
            Some(existing) => *existing = correction,
            None => self.entries.push(correction),
        }
    }

    /// Remove a mark. Returns whether an entry was removed.
    pub fn unmark(&mut self, kind: CorrectionKind, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|c| !(c.kind == kind && c.key == key));
        self.entries.len() != before
    }

    /// Number of marked entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is marked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the working set into an attachable snapshot.
    pub fn snapshot(&self) -> CorrectionSet {
        CorrectionSet {
            corrections: self.entries.clone(),
        }
    }

    /// Clear the working set for a new review cycle.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_and_count() {
        let mut tracker = CorrectionTracker::new();
        tracker.mark(CorrectionKind::Field, "nombre", "Nombre incompleto", "Nombre");
        tracker.mark(CorrectionKind::Member, "m-1", "RUT ilegible", "Socio 1");
        assert_eq!(tracker.count(), 2);
        assert!(!tracker.is_empty());
    }

    #[test]
    fn remarking_replaces_instead_of_duplicating() {
        let mut tracker = CorrectionTracker::new();
        tracker.mark(CorrectionKind::Field, "nombre", "primer comentario", "Nombre");
        tracker.mark(CorrectionKind::Field, "nombre", "comentario final", "Nombre");
        assert_eq!(tracker.count(), 1);
        let snapshot = tracker.snapshot();
        assert_eq!(
            snapshot.get(CorrectionKind::Field, "nombre").unwrap().comment,
            "comentario final"
        );
    }

    #[test]
    fn same_key_under_different_kinds_is_distinct() {
        let mut tracker = CorrectionTracker::new();
        tracker.mark(CorrectionKind::Field, "x", "a", "A");
        tracker.mark(CorrectionKind::Document, "x", "b", "B");
        assert_eq!(tracker.count(), 2);
    }

    #[test]
    fn unmark_removes_only_the_named_entry() {
        let mut tracker = CorrectionTracker::new();
        tracker.mark(CorrectionKind::Field, "nombre", "a", "A");
        tracker.mark(CorrectionKind::Field, "direccion", "b", "B");
        assert!(tracker.unmark(CorrectionKind::Field, "nombre"));
        assert!(!tracker.unmark(CorrectionKind::Field, "nombre"));
        assert_eq!(tracker.count(), 1);
    }

    #[test]
    fn snapshot_is_independent_of_later_edits() {
        let mut tracker = CorrectionTracker::new();
        tracker.mark(CorrectionKind::Commission, "c-2", "firma faltante", "Comisión 2");
        let snapshot = tracker.snapshot();
        tracker.clear();
        assert_eq!(snapshot.len(), 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn kind_parses_from_cli_text() {
        assert_eq!("field".parse::<CorrectionKind>().unwrap(), CorrectionKind::Field);
        assert_eq!(" Commission ".parse::<CorrectionKind>().unwrap(), CorrectionKind::Commission);
        assert!("other".parse::<CorrectionKind>().is_err());
    }
}
