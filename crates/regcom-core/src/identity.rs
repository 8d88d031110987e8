//! # Domain Identity Newtypes
//!
//! Newtype wrappers for all entity identifiers in the registry. These
//! prevent accidental identifier confusion — you cannot pass an
//! `OfficialId` where an `ApplicationId` is expected.
//!
//! Each identifier wraps a v4 UUID and displays with a namespace prefix
//! (`application:…`, `official:…`) so log lines and error messages are
//! unambiguous about which namespace an id belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an organization application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(Uuid);

/// Unique identifier for a certifying official (Ministro de Fe).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OfficialId(Uuid);

/// Unique identifier for a booked assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(Uuid);

/// Unique identifier for an availability block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(Uuid);

/// Unique identifier for a founding member of an organization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(Uuid);

macro_rules! impl_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Generate a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create an identifier from an existing UUID.
            pub fn from_uuid(id: Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

impl_id!(ApplicationId, "application");
impl_id!(OfficialId, "official");
impl_id!(AssignmentId, "assignment");
impl_id!(BlockId, "block");
impl_id!(MemberId, "member");
