//! # Certification Record
//!
//! The immutable output of a completed validation protocol: the
//! provisional board, the electoral commission, the attendee roster,
//! and the official's own signature.
//!
//! ## Validation Invariants
//!
//! [`CertificationRecord::validate`] enforces every invariant at
//! finalization, regardless of how the record was built:
//!
//! - The three directorio roles and all additional seats reference
//!   pairwise-distinct people (by member id when present, else by
//!   normalized name + RUT).
//! - The electoral commission has exactly 3 members, internally distinct
//!   and disjoint from the board — a violation names the person and the
//!   conflicting role.
//! - No role holder is a minor at the assembly date.
//!
//! The interactive session performs the same checks at selection time;
//! re-running them here means the invariants hold even for records built
//! by callers that bypass the session.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use regcom_core::{CivilDate, NamedPerson, PersonKey, SignatureRef};

use crate::error::AssemblyError;

// ── Board Roles ────────────────────────────────────────────────────────

/// The three statutory roles of the provisional board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardRole {
    /// Presidente del directorio provisorio.
    President,
    /// Secretario.
    Secretary,
    /// Tesorero.
    Treasurer,
}

impl BoardRole {
    /// All roles in statutory order.
    pub fn all() -> &'static [BoardRole] {
        &[Self::President, Self::Secretary, Self::Treasurer]
    }

    /// The canonical role label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::President => "presidente",
            Self::Secretary => "secretario",
            Self::Treasurer => "tesorero",
        }
    }
}

impl std::fmt::Display for BoardRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Record Components ──────────────────────────────────────────────────

/// A person together with their captured signature.
///
/// The signature reference is mandatory by construction — there is no
/// way to build a certified person without one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertifiedPerson {
    /// The resolved person.
    pub person: NamedPerson,
    /// Their captured signature.
    pub signature: SignatureRef,
}

/// The provisional board: the three statutory roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directorio {
    /// Presidente.
    pub president: CertifiedPerson,
    /// Secretario.
    pub secretary: CertifiedPerson,
    /// Tesorero.
    pub treasurer: CertifiedPerson,
}

impl Directorio {
    /// The three role holders in statutory order.
    pub fn entries(&self) -> [(BoardRole, &CertifiedPerson); 3] {
        [
            (BoardRole::President, &self.president),
            (BoardRole::Secretary, &self.secretary),
            (BoardRole::Treasurer, &self.treasurer),
        ]
    }
}

/// An additional board seat beyond the three statutory roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalSeat {
    /// The cargo label (e.g., `director`, `pro-secretario`).
    pub cargo: String,
    /// The seat holder.
    pub member: CertifiedPerson,
}

/// An attendee of the constitutive assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// The resolved person.
    pub person: NamedPerson,
    /// Their signature on the attendance roster.
    pub signature: SignatureRef,
    /// Whether the entry (and its signature) carried over from a
    /// board/commission role.
    pub carried_over: bool,
}

// ── The Record ─────────────────────────────────────────────────────────

/// Finalized output of the constitutive-assembly validation protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRecord {
    /// The provisional board.
    pub directorio: Directorio,
    /// Additional board seats, possibly empty.
    pub additional_seats: Vec<AdditionalSeat>,
    /// The electoral commission — exactly 3 members once finalized.
    pub electoral_commission: Vec<CertifiedPerson>,
    /// The attendance roster with signatures.
    pub attendees: Vec<Attendee>,
    /// The certifying official's own signature.
    pub official_signature: SignatureRef,
    /// Free-text notes entered at confirmation.
    pub notes: String,
}

impl CertificationRecord {
    /// Validate every record invariant against the assembly date.
    ///
    /// # Errors
    ///
    /// - [`AssemblyError::RoleAlreadyHeld`] — a person holds two board
    ///   roles or seats.
    /// - [`AssemblyError::CommissionIncomplete`] — the commission does
    ///   not have exactly 3 members.
    /// - [`AssemblyError::CommissionOverlap`] — a commission member also
    ///   sits on the board, named with the conflicting role.
    /// - [`AssemblyError::DuplicateCommissionMember`] — a person appears
    ///   twice on the commission.
    /// - [`AssemblyError::MinorNotEligible`] — a role holder is under 18
    ///   at the assembly date.
    pub fn validate(&self, assembly_date: CivilDate) -> Result<(), AssemblyError> {
        // Board: statutory roles plus additional seats, pairwise distinct.
        let mut board: HashMap<PersonKey, String> = HashMap::new();
        for (role, holder) in self.directorio.entries() {
            claim_role(&mut board, &holder.person, role.as_str())?;
            require_adult(&holder.person, assembly_date)?;
        }
        for seat in &self.additional_seats {
            if seat.cargo.trim().is_empty() {
                return Err(AssemblyError::MissingCargo);
            }
            claim_role(&mut board, &seat.member.person, seat.cargo.trim())?;
            require_adult(&seat.member.person, assembly_date)?;
        }

        // Commission: exactly 3, internally distinct, disjoint from board.
        if self.electoral_commission.len() != 3 {
            return Err(AssemblyError::CommissionIncomplete {
                found: self.electoral_commission.len(),
            });
        }
        let mut commission_seen: HashSet<PersonKey> = HashSet::new();
        for member in &self.electoral_commission {
            if let Some(conflicting_role) = board.get(&member.person.key()) {
                return Err(AssemblyError::CommissionOverlap {
                    person: member.person.to_string(),
                    conflicting_role: conflicting_role.clone(),
                });
            }
            if !commission_seen.insert(member.person.key()) {
                return Err(AssemblyError::DuplicateCommissionMember {
                    person: member.person.to_string(),
                });
            }
            require_adult(&member.person, assembly_date)?;
        }

        Ok(())
    }
}

/// Claim a role for a person, failing if they already hold one.
fn claim_role(
    board: &mut HashMap<PersonKey, String>,
    person: &NamedPerson,
    role: &str,
) -> Result<(), AssemblyError> {
    if let Some(existing) = board.get(&person.key()) {
        return Err(AssemblyError::RoleAlreadyHeld {
            person: person.to_string(),
            existing_role: existing.clone(),
            attempted_role: role.to_string(),
        });
    }
    board.insert(person.key(), role.to_string());
    Ok(())
}

/// Reject minors for any role. Absent birth dates pass — an unknown age
/// cannot block, it only removes the protection of the check.
fn require_adult(person: &NamedPerson, assembly_date: CivilDate) -> Result<(), AssemblyError> {
    if person.is_minor(assembly_date) {
        return Err(AssemblyError::MinorNotEligible {
            person: person.to_string(),
        });
    }
    Ok(())
}
