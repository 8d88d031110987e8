//! # Application Repository
//!
//! The applicant-facing persistence contract. Repositories are
//! constructor-injected into the service — no global stores — and the
//! update path is version-checked: a write carrying a version that no
//! longer matches the stored record is rejected, never merged.

use serde::{Deserialize, Serialize};

use regcom_core::ApplicationId;
use regcom_workflow::{ApplicationStatus, OrganizationApplication};

use crate::error::ServiceError;

/// Contract for application persistence.
pub trait ApplicationRepository {
    /// Store a newly created application.
    fn create(&mut self, application: OrganizationApplication);

    /// Look up an application by id.
    fn find(&self, id: &ApplicationId) -> Option<OrganizationApplication>;

    /// Replace an application, verifying the version the caller read.
    ///
    /// `expected_version` is the version the caller observed before
    /// mutating; the stored record must still carry it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::ApplicationNotFound`] for unknown ids,
    /// [`ServiceError::StaleVersion`] when another write got there first.
    fn update(
        &mut self,
        application: OrganizationApplication,
        expected_version: u64,
    ) -> Result<(), ServiceError>;

    /// All applications in the given status.
    fn find_by_status(&self, status: ApplicationStatus) -> Vec<OrganizationApplication>;

    /// All applications created by the given citizen.
    fn find_by_creator(&self, creator: &str) -> Vec<OrganizationApplication>;
}

/// In-memory application repository.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryApplicationRepository {
    applications: Vec<OrganizationApplication>,
}

impl InMemoryApplicationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a repository from persisted applications.
    pub fn from_applications(applications: Vec<OrganizationApplication>) -> Self {
        Self { applications }
    }

    /// Consume the repository, yielding its applications for persistence.
    pub fn into_applications(self) -> Vec<OrganizationApplication> {
        self.applications
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn create(&mut self, application: OrganizationApplication) {
        self.applications.push(application);
    }

    fn find(&self, id: &ApplicationId) -> Option<OrganizationApplication> {
        self.applications.iter().find(|a| &a.id == id).cloned()
    }

    fn update(
        &mut self,
        application: OrganizationApplication,
        expected_version: u64,
    ) -> Result<(), ServiceError> {
        let slot = self
            .applications
            .iter_mut()
            .find(|a| a.id == application.id)
            .ok_or_else(|| ServiceError::ApplicationNotFound {
                id: application.id.to_string(),
            })?;
        if slot.version != expected_version {
            return Err(ServiceError::StaleVersion {
                id: application.id.to_string(),
                expected: expected_version,
                actual: slot.version,
            });
        }
        *slot = application;
        Ok(())
    }

    fn find_by_status(&self, status: ApplicationStatus) -> Vec<OrganizationApplication> {
        self.applications
            .iter()
            .filter(|a| a.status == status)
            .cloned()
            .collect()
    }

    fn find_by_creator(&self, creator: &str) -> Vec<OrganizationApplication> {
        self.applications
            .iter()
            .filter(|a| a.creator == creator)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regcom_core::{CivilDate, OrganizationCategory, TimeOfDay, Timestamp};
    use regcom_workflow::{RequestedSlot, TransitionContext};

    fn application(creator: &str) -> OrganizationApplication {
        OrganizationApplication::new(
            ApplicationId::new(),
            "Club Deportivo Estrella".to_string(),
            OrganizationCategory::ClubDeportivo,
            creator.to_string(),
            vec![],
            RequestedSlot {
                election_date: CivilDate::parse("2025-03-10").unwrap(),
                election_time: TimeOfDay::parse("10:00").unwrap(),
                assembly_address: "Cancha municipal".to_string(),
            },
            Timestamp::parse("2025-03-01T09:00:00Z").unwrap(),
        )
    }

    #[test]
    fn stale_update_is_rejected() {
        let mut repo = InMemoryApplicationRepository::new();
        let app = application("citizen-1");
        let id = app.id.clone();
        repo.create(app);

        // First writer wins.
        let mut first = repo.find(&id).unwrap();
        let observed = first.version;
        first
            .schedule_official(
                regcom_workflow::MinistroAssignment {
                    official_id: regcom_core::OfficialId::new(),
                    assignment_id: regcom_core::AssignmentId::new(),
                    date: CivilDate::parse("2025-03-10").unwrap(),
                    time: TimeOfDay::parse("10:00").unwrap(),
                    location: "Cancha municipal".to_string(),
                },
                TransitionContext::at(Timestamp::parse("2025-03-02T09:00:00Z").unwrap()),
            )
            .unwrap();
        repo.update(first.clone(), observed).unwrap();

        // Second writer read the same version; its write must fail.
        let err = repo.update(first, observed).unwrap_err();
        assert!(matches!(err, ServiceError::StaleVersion { .. }));
    }

    #[test]
    fn find_by_creator_and_status() {
        let mut repo = InMemoryApplicationRepository::new();
        repo.create(application("citizen-1"));
        repo.create(application("citizen-1"));
        repo.create(application("citizen-2"));

        assert_eq!(repo.find_by_creator("citizen-1").len(), 2);
        assert_eq!(
            repo.find_by_status(ApplicationStatus::WaitingMinistroRequest).len(),
            3
        );
        assert!(repo.find_by_status(ApplicationStatus::Approved).is_empty());
    }

    #[test]
    fn updating_missing_application_fails() {
        let mut repo = InMemoryApplicationRepository::new();
        let err = repo.update(application("citizen-1"), 1).unwrap_err();
        assert!(matches!(err, ServiceError::ApplicationNotFound { .. }));
    }
}
