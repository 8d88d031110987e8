//! # regcom-core — Foundational Types for the Registro Comunitario
//!
//! This crate is the bedrock of the community-organization registry. It
//! defines the domain primitives every other crate builds on; it depends
//! on no other `regcom-*` crate.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ApplicationId`,
//!    `OfficialId`, `Rut`, `TimeOfDay` — all newtypes with validated
//!    constructors. No bare strings for identifiers or time slots.
//!
//! 2. **Canonical times.** Every time-of-day flows through
//!    [`TimeOfDay::parse`] and compares in zero-padded 24h `HH:MM` form,
//!    so scheduling collisions cannot be split by formatting.
//!
//! 3. **Injectable clock and id source.** No wall-clock reads or random
//!    ids inside domain logic — [`Clock`] and [`IdGenerator`] are seams
//!    for deterministic tests.
//!
//! 4. **Content-addressed attachments.** Signature and document blobs
//!    are referenced by SHA-256 digest ([`SignatureRef`], [`ArtifactRef`]),
//!    never embedded in domain records.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `regcom-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod category;
pub mod clock;
pub mod error;
pub mod identity;
pub mod person;
pub mod rut;
pub mod signature;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use category::OrganizationCategory;
pub use clock::{Clock, FixedClock, IdGenerator, RandomIds, SequentialIds, SystemClock};
pub use error::CoreError;
pub use identity::{ApplicationId, AssignmentId, BlockId, MemberId, OfficialId};
pub use person::{FoundingMember, NamedPerson, PersonKey, PersonRef};
pub use rut::Rut;
pub use signature::{ArtifactRef, ContentDigest, SignatureRef};
pub use temporal::{normalize_time, CivilDate, TimeOfDay, Timestamp};
