//! # Person References
//!
//! Every role in the validation protocol — board member, commission
//! member, attendee — is held by a person who is either a founding
//! member from the application roster or someone entered manually by
//! the certifying official.
//!
//! A [`PersonRef`] is the unresolved form captured from input; resolving
//! it against the roster yields a [`NamedPerson`], which always carries a
//! usable name/RUT pair. Identity comparisons (role uniqueness,
//! commission disjointness) go through [`PersonKey`]: the member id when
//! the person comes from the roster, otherwise the normalized name + RUT.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::MemberId;
use crate::rut::Rut;
use crate::temporal::CivilDate;

/// A founding member listed on the organization application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundingMember {
    /// Unique member identifier.
    pub id: MemberId,
    /// Full legal name.
    pub name: String,
    /// National identity number.
    pub rut: Rut,
    /// Birth date, when captured. Absent for incomplete rosters.
    pub birth_date: Option<CivilDate>,
}

/// Reference to a person, as captured by the validation protocol.
///
/// Either a founding member (by id) or a manually entered person with
/// name and RUT. Serialized untagged so persistence shapes stay plain:
/// `{"id": …}` or `{"name": …, "rut": …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonRef {
    /// A founding member from the application roster.
    Member {
        /// The roster member id.
        id: MemberId,
    },
    /// A person entered manually by the official.
    Manual {
        /// Full legal name as entered.
        name: String,
        /// National identity number as entered.
        rut: Rut,
    },
}

impl PersonRef {
    /// Resolve this reference against the founding-member roster.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownMember`] when a member reference does
    /// not appear on the roster. Manual references always resolve; they
    /// carry no birth date, so the minor derivation treats them as adults.
    pub fn resolve(&self, roster: &[FoundingMember]) -> Result<NamedPerson, CoreError> {
        match self {
            Self::Member { id } => roster
                .iter()
                .find(|m| &m.id == id)
                .map(|m| NamedPerson {
                    member_id: Some(m.id.clone()),
                    name: m.name.clone(),
                    rut: m.rut.clone(),
                    birth_date: m.birth_date,
                })
                .ok_or_else(|| CoreError::UnknownMember { id: id.to_string() }),
            Self::Manual { name, rut } => Ok(NamedPerson {
                member_id: None,
                name: name.clone(),
                rut: rut.clone(),
                birth_date: None,
            }),
        }
    }
}

/// A resolved person with a usable name/RUT pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPerson {
    /// Roster member id, when the person came from the roster.
    pub member_id: Option<MemberId>,
    /// Full legal name.
    pub name: String,
    /// National identity number.
    pub rut: Rut,
    /// Birth date, when known.
    pub birth_date: Option<CivilDate>,
}

impl NamedPerson {
    /// Identity key for uniqueness and disjointness checks.
    pub fn key(&self) -> PersonKey {
        match &self.member_id {
            Some(id) => PersonKey::Member(id.clone()),
            None => PersonKey::Named {
                name: self.name.trim().to_lowercase(),
                rut: self.rut.clone(),
            },
        }
    }

    /// Whether the person is under 18 at the given reference date.
    ///
    /// `false` when the birth date is absent — an unknown age never
    /// blocks, it only removes the protection of the check.
    pub fn is_minor(&self, at: CivilDate) -> bool {
        match self.birth_date {
            Some(birth) => birth.years_until(at) < 18,
            None => false,
        }
    }
}

impl std::fmt::Display for NamedPerson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.rut)
    }
}

/// Identity of a person for set-membership comparisons.
///
/// Member id when present, else normalized name + RUT — the same person
/// entered twice manually with different spacing still collides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PersonKey {
    /// Identified by roster membership.
    Member(MemberId),
    /// Identified by normalized name and RUT.
    Named {
        /// Trimmed, lowercased name.
        name: String,
        /// Canonical RUT.
        rut: Rut,
    },
}
