//! # Registry File Storage
//!
//! The CLI's persistence backend: the whole registry state lives in one
//! JSON file, loaded into the in-memory repositories before each command
//! and written back after. The domain crates never see the file — they
//! operate on the repository contracts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use regcom_core::{ApplicationId, OfficialId, RandomIds, SystemClock};
use regcom_registry::{
    DigestArtifactGenerator, InMemoryApplicationRepository, InMemoryOfficialRegistry,
    InMemorySignatureStore, Notification, Official, RecordingSink, RegistryService,
};
use regcom_scheduling::{Assignment, AvailabilityBlock, AvailabilityStore, AssignmentStore};
use regcom_workflow::{CorrectionTracker, OrganizationApplication};

/// The service type the CLI drives: in-memory repositories hydrated from
/// the registry file.
pub type FileService = RegistryService<
    InMemoryApplicationRepository,
    InMemoryOfficialRegistry,
    RecordingSink,
    DigestArtifactGenerator,
>;

/// Serialized shape of the registry file.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RegistryFile {
    /// All organization applications.
    #[serde(default)]
    pub applications: Vec<OrganizationApplication>,
    /// The official roster.
    #[serde(default)]
    pub officials: Vec<Official>,
    /// Availability blocks.
    #[serde(default)]
    pub blocks: Vec<AvailabilityBlock>,
    /// Booked assignments.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// Delivered notifications (the outbox a frontend would drain).
    #[serde(default)]
    pub notifications: Vec<Notification>,
    /// Captured signature blobs, content-addressed.
    #[serde(default)]
    pub signatures: InMemorySignatureStore,
    /// Per-application review working sets, keyed by application UUID.
    #[serde(default)]
    pub review_corrections: BTreeMap<String, CorrectionTracker>,
}

impl RegistryFile {
    /// Load the registry file; a missing file is an empty registry.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading registry file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing registry file {}", path.display()))
    }

    /// Write the registry file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self).context("serializing registry state")?;
        fs::write(path, raw)
            .with_context(|| format!("writing registry file {}", path.display()))
    }

    /// Hydrate a service from this file's state.
    pub fn into_service(self) -> (FileService, InMemorySignatureStore, BTreeMap<String, CorrectionTracker>) {
        let service = RegistryService::new(
            InMemoryApplicationRepository::from_applications(self.applications),
            InMemoryOfficialRegistry::from_officials(self.officials),
            RecordingSink {
                delivered: self.notifications,
            },
            DigestArtifactGenerator,
            AvailabilityStore::from_blocks(self.blocks),
            AssignmentStore::from_assignments(self.assignments),
            Box::new(SystemClock),
            Box::new(RandomIds),
        );
        (service, self.signatures, self.review_corrections)
    }

    /// Rebuild the file shape from a service's parts.
    pub fn from_service(
        service: FileService,
        signatures: InMemorySignatureStore,
        review_corrections: BTreeMap<String, CorrectionTracker>,
    ) -> Self {
        let (applications, officials, notifications, availability, assignments) =
            service.into_parts();
        Self {
            applications: applications.into_applications(),
            officials: officials.into_officials(),
            blocks: availability.into_blocks(),
            assignments: assignments.into_assignments(),
            notifications: notifications.delivered,
            signatures,
            review_corrections,
        }
    }
}

/// Run a command against the registry file: load, operate, save.
pub fn with_registry<T>(
    path: &Path,
    f: impl FnOnce(
        &mut FileService,
        &mut InMemorySignatureStore,
        &mut BTreeMap<String, CorrectionTracker>,
    ) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let (mut service, mut signatures, mut corrections) = RegistryFile::load(path)?.into_service();
    let result = f(&mut service, &mut signatures, &mut corrections)?;
    RegistryFile::from_service(service, signatures, corrections).save(path)?;
    Ok(result)
}

/// Parse an application id from its UUID form.
pub fn parse_application_id(s: &str) -> anyhow::Result<ApplicationId> {
    let raw = s.strip_prefix("application:").unwrap_or(s);
    let uuid = Uuid::parse_str(raw).with_context(|| format!("invalid application id: {s}"))?;
    Ok(ApplicationId::from_uuid(uuid))
}

/// Parse an official id from its UUID form.
pub fn parse_official_id(s: &str) -> anyhow::Result<OfficialId> {
    let raw = s.strip_prefix("official:").unwrap_or(s);
    let uuid = Uuid::parse_str(raw).with_context(|| format!("invalid official id: {s}"))?;
    Ok(OfficialId::from_uuid(uuid))
}
