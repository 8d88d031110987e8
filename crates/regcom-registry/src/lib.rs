//! # regcom-registry — Orchestration and Collaborator Contracts
//!
//! The integration layer of the Registro Comunitario:
//!
//! - **Officials** ([`official`]): the Ministro de Fe roster and its
//!   registry contract.
//!
//! - **Repository** ([`repository`]): version-checked application
//!   persistence, constructor-injected into the service.
//!
//! - **Notifications** ([`notification`]): fire-and-forget delivery seam
//!   with recording and tracing implementations.
//!
//! - **Documents** ([`documents`]): the generation seam — the core
//!   stores artifact references and never inspects generated bytes.
//!
//! - **Attachments** ([`attachments`]): content-addressed signature
//!   blob storage behind [`regcom_core::SignatureRef`].
//!
//! - **Service** ([`service`]): [`RegistryService`], wiring scheduling
//!   gates, certification side effects, the review cycle, optimistic
//!   concurrency, and notifications.

pub mod attachments;
pub mod documents;
pub mod error;
pub mod notification;
pub mod official;
pub mod repository;
pub mod service;

// Re-export primary types for ergonomic imports.
pub use attachments::{InMemorySignatureStore, SignatureStore};
pub use documents::{DigestArtifactGenerator, DocumentGenerator};
pub use error::ServiceError;
pub use notification::{Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink};
pub use official::{InMemoryOfficialRegistry, Official, OfficialRegistry};
pub use repository::{ApplicationRepository, InMemoryApplicationRepository};
pub use service::RegistryService;
