//! # Registry Service
//!
//! Synchronous orchestration over the injected repositories: scheduling
//! preconditions, certification side effects, the review cycle, and
//! notifications. One logical actor per session — every operation is a
//! plain request/response against the backing stores, and every
//! mutating operation carries the version its caller last observed.
//!
//! ## Concurrency Policy
//!
//! Stale writes are rejected, not merged: the service checks the
//! caller's expected version against the loaded record, and the
//! repository re-checks at write time. Two administrator sessions
//! racing on one application cannot silently overwrite each other.

use regcom_assembly::CertificationRecord;
use regcom_core::{
    ApplicationId, ArtifactRef, AssignmentId, BlockId, CivilDate, Clock, FoundingMember,
    IdGenerator, OfficialId, OrganizationCategory, Rut, TimeOfDay,
};
use regcom_scheduling::{
    Assignment, AvailabilityBlock, AvailabilityStore, AssignmentStore, SchedulingEngine,
};
use regcom_workflow::{
    ApplicationStatus, CorrectionSet, MinistroAssignment, OrganizationApplication, RequestedSlot,
    TransitionContext,
};

use crate::documents::DocumentGenerator;
use crate::error::ServiceError;
use crate::notification::{Notification, NotificationKind, NotificationSink};
use crate::official::{Official, OfficialRegistry};
use crate::repository::ApplicationRepository;

/// The orchestration layer wiring scheduling, certification, and the
/// review workflow over constructor-injected collaborators.
pub struct RegistryService<R, O, N, G>
where
    R: ApplicationRepository,
    O: OfficialRegistry,
    N: NotificationSink,
    G: DocumentGenerator,
{
    applications: R,
    officials: O,
    notifications: N,
    documents: G,
    availability: AvailabilityStore,
    assignments: AssignmentStore,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
}

impl<R, O, N, G> RegistryService<R, O, N, G>
where
    R: ApplicationRepository,
    O: OfficialRegistry,
    N: NotificationSink,
    G: DocumentGenerator,
{
    /// Assemble the service from its collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        applications: R,
        officials: O,
        notifications: N,
        documents: G,
        availability: AvailabilityStore,
        assignments: AssignmentStore,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Self {
        Self {
            applications,
            officials,
            notifications,
            documents,
            availability,
            assignments,
            clock,
            ids,
        }
    }

    // ── Applications ───────────────────────────────────────────────────

    /// Register a new application in `WAITING_MINISTRO_REQUEST`.
    pub fn create_application(
        &mut self,
        name: &str,
        category: OrganizationCategory,
        creator: &str,
        members: Vec<FoundingMember>,
        requested_slot: RequestedSlot,
    ) -> ApplicationId {
        let id = ApplicationId::from_uuid(self.ids.next_uuid());
        let application = OrganizationApplication::new(
            id.clone(),
            name.to_string(),
            category,
            creator.to_string(),
            members,
            requested_slot,
            self.clock.now(),
        );
        tracing::info!(application = %id, %category, "application created");
        self.applications.create(application);
        id
    }

    /// Fetch an application; unknown ids are a clear failure.
    pub fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<OrganizationApplication, ServiceError> {
        self.applications
            .find(id)
            .ok_or_else(|| ServiceError::ApplicationNotFound { id: id.to_string() })
    }

    /// Applications currently in the given status.
    pub fn applications_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Vec<OrganizationApplication> {
        self.applications.find_by_status(status)
    }

    /// Applications created by the given citizen.
    pub fn applications_by_creator(&self, creator: &str) -> Vec<OrganizationApplication> {
        self.applications.find_by_creator(creator)
    }

    // ── Officials ──────────────────────────────────────────────────────

    /// Register a new certifying official.
    pub fn create_official(
        &mut self,
        name: &str,
        rut: Rut,
        email: &str,
        phone: &str,
    ) -> OfficialId {
        let id = OfficialId::from_uuid(self.ids.next_uuid());
        self.officials.create(Official {
            id: id.clone(),
            name: name.to_string(),
            rut,
            email: email.to_string(),
            phone: phone.to_string(),
            active: true,
        });
        tracing::info!(official = %id, "official registered");
        id
    }

    /// Fetch an official; unknown ids are a clear failure.
    pub fn get_official(&self, id: &OfficialId) -> Result<Official, ServiceError> {
        self.officials
            .get_by_id(id)
            .ok_or_else(|| ServiceError::OfficialNotFound { id: id.to_string() })
    }

    /// Replace an official's roster data.
    pub fn update_official(&mut self, official: Official) -> Result<(), ServiceError> {
        let id = official.id.clone();
        self.officials.update(official)?;
        tracing::info!(official = %id, "official updated");
        Ok(())
    }

    /// Flip an official's active flag, returning the new value.
    pub fn toggle_official(&mut self, id: &OfficialId) -> Result<bool, ServiceError> {
        self.officials.toggle_active(id)
    }

    /// Officials currently available for scheduling.
    pub fn active_officials(&self) -> Vec<Official> {
        self.officials.get_active()
    }

    /// Every registered official.
    pub fn all_officials(&self) -> Vec<Official> {
        self.officials.get_all()
    }

    // ── Availability ───────────────────────────────────────────────────

    /// Record that an official cannot work a date or slot.
    ///
    /// # Errors
    ///
    /// Unknown officials fail loudly; duplicate active blocks are a hard
    /// [`regcom_scheduling::SchedulingError::DuplicateBlock`].
    pub fn add_availability_block(
        &mut self,
        official_id: &OfficialId,
        date: CivilDate,
        time: Option<TimeOfDay>,
        reason: &str,
    ) -> Result<BlockId, ServiceError> {
        if self.officials.get_by_id(official_id).is_none() {
            return Err(ServiceError::OfficialNotFound {
                id: official_id.to_string(),
            });
        }
        let id = BlockId::from_uuid(self.ids.next_uuid());
        self.availability.add_block(AvailabilityBlock {
            id: id.clone(),
            official_id: official_id.clone(),
            date,
            time,
            reason: reason.to_string(),
            active: true,
        })?;
        tracing::info!(official = %official_id, %date, "availability block added");
        Ok(id)
    }

    /// Remove an availability block.
    pub fn remove_availability_block(&mut self, id: &BlockId) -> Result<(), ServiceError> {
        self.availability.remove_block(id)?;
        Ok(())
    }

    /// All blocks for one official.
    pub fn blocks_for(&self, official_id: &OfficialId) -> Vec<AvailabilityBlock> {
        self.availability
            .blocks_for(official_id)
            .into_iter()
            .cloned()
            .collect()
    }

    // ── Scheduling ─────────────────────────────────────────────────────

    /// Book an official for an application's assembly.
    ///
    /// Availability is a hard gate; collisions with existing bookings
    /// are advisory and require `override_conflict = true` — the
    /// administrator's explicit confirmation.
    #[allow(clippy::too_many_arguments)]
    pub fn schedule_official(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        official_id: &OfficialId,
        date: CivilDate,
        time: TimeOfDay,
        location: &str,
        override_conflict: bool,
    ) -> Result<AssignmentId, ServiceError> {
        let mut application = self.load(app_id, expected_version)?;

        let official = self
            .officials
            .get_by_id(official_id)
            .ok_or_else(|| ServiceError::OfficialNotFound {
                id: official_id.to_string(),
            })?;
        if !official.active {
            return Err(ServiceError::OfficialInactive {
                id: official_id.to_string(),
            });
        }

        let (blocking, conflict_count) = {
            let engine = SchedulingEngine::new(&self.availability, &self.assignments);
            let blocking = engine
                .blocking_block(official_id, date, time)
                .map(|b| (b.slot_label(), b.reason.clone()));
            (blocking, engine.conflicting_assignments(official_id, date, time).len())
        };

        if let Some((slot, reason)) = blocking {
            return Err(ServiceError::OfficialUnavailable {
                official: official.name.clone(),
                date: date.to_string(),
                slot,
                reason,
            });
        }
        if conflict_count > 0 && !override_conflict {
            return Err(ServiceError::ConflictRequiresOverride {
                count: conflict_count,
            });
        }

        let assignment_id = AssignmentId::from_uuid(self.ids.next_uuid());
        self.assignments.add(Assignment::book(
            assignment_id.clone(),
            official_id.clone(),
            app_id.clone(),
            date,
            time,
            location.to_string(),
        ));

        let mut ctx = TransitionContext::at(self.clock.now());
        if conflict_count > 0 {
            ctx = ctx.with_comment(format!(
                "booked over {conflict_count} colliding assignment(s) with administrator override"
            ));
            tracing::warn!(
                official = %official_id,
                %date,
                %time,
                conflicts = conflict_count,
                "booking committed with conflict override"
            );
        }
        application.schedule_official(
            MinistroAssignment {
                official_id: official_id.clone(),
                assignment_id: assignment_id.clone(),
                date,
                time,
                location: location.to_string(),
            },
            ctx,
        )?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: official_id.to_string(),
            kind: NotificationKind::MinistroAssigned,
            title: "Nueva asamblea asignada".to_string(),
            message: format!(
                "Asamblea de {} el {} a las {} en {}",
                application.name, date, time, location
            ),
            data: serde_json::json!({
                "application": app_id,
                "date": date.to_string(),
                "time": time.to_string(),
                "location": location,
            }),
        });
        tracing::info!(application = %app_id, official = %official_id, "official scheduled");
        Ok(assignment_id)
    }

    // ── Certification ──────────────────────────────────────────────────

    /// Accept the finalized certification record from the official's
    /// session: validate, store, flip `signatures_validated` on the
    /// booking, generate the certificate artifact, and notify the
    /// applicant.
    pub fn complete_certification(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        record: CertificationRecord,
    ) -> Result<ArtifactRef, ServiceError> {
        let mut application = self.load(app_id, expected_version)?;

        let assignment_id = application
            .ministro
            .as_ref()
            .map(|m| m.assignment_id.clone())
            .ok_or_else(|| ServiceError::Workflow(regcom_workflow::WorkflowError::InvalidTransition {
                from: application.status.to_string(),
                to: ApplicationStatus::MinistroApproved.to_string(),
                reason: "no official has been scheduled".to_string(),
            }))?;

        let artifact = self.documents.generate(&application, &record)?;
        application.complete_certification(
            record,
            Some(artifact.clone()),
            TransitionContext::at(self.clock.now()),
        )?;

        let assignment_version = self
            .assignments
            .find(&assignment_id)
            .map(|a| a.version)
            .ok_or_else(|| ServiceError::Scheduling(
                regcom_scheduling::SchedulingError::AssignmentNotFound {
                    id: assignment_id.to_string(),
                },
            ))?;
        self.assignments
            .mark_signatures_validated(&assignment_id, assignment_version)?;
        self.assignments.complete(&assignment_id, assignment_version + 1)?;

        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::CertificationCompleted,
            title: "Asamblea certificada".to_string(),
            message: format!(
                "La asamblea constitutiva de {} fue certificada por el Ministro de Fe",
                application.name
            ),
            data: serde_json::json!({
                "application": app_id,
                "artifact": artifact.digest.to_string(),
            }),
        });
        tracing::info!(application = %app_id, "certification completed");
        Ok(artifact)
    }

    // ── Review Cycle ───────────────────────────────────────────────────

    /// Applicant submits for municipal review.
    pub fn submit_for_review(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.submit_for_review(TransitionContext::at(self.clock.now()))?;
        self.applications.update(application, expected_version)?;
        tracing::info!(application = %app_id, "submitted for review");
        Ok(())
    }

    /// An administrator takes the application for review.
    pub fn start_review(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.start_review(TransitionContext::at(self.clock.now()))?;
        self.applications.update(application, expected_version)?;
        tracing::info!(application = %app_id, "review started");
        Ok(())
    }

    /// Reject the application, attaching the marked corrections.
    pub fn reject_with_corrections(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        corrections: CorrectionSet,
        general_comment: Option<String>,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        let labels: Vec<String> = corrections.iter().map(|c| c.label.clone()).collect();
        application.reject_with_corrections(
            corrections,
            general_comment,
            TransitionContext::at(self.clock.now()),
        )?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::ApplicationRejected,
            title: "Solicitud observada".to_string(),
            message: format!(
                "La solicitud de {} fue rechazada con {} observación(es)",
                application.name,
                labels.len()
            ),
            data: serde_json::json!({ "application": app_id, "labels": labels }),
        });
        tracing::info!(application = %app_id, corrections = labels.len(), "rejected with corrections");
        Ok(())
    }

    /// Forward the application to the civil registry. Only reachable
    /// with zero outstanding corrections.
    pub fn send_to_registry(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        outstanding_corrections: usize,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.send_to_registry(
            outstanding_corrections,
            TransitionContext::at(self.clock.now()),
        )?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::ApplicationForwarded,
            title: "Solicitud enviada al registro".to_string(),
            message: format!("La solicitud de {} fue enviada al registro civil", application.name),
            data: serde_json::json!({ "application": app_id }),
        });
        tracing::info!(application = %app_id, "sent to registry");
        Ok(())
    }

    /// Registry approval: the organization is legally constituted.
    pub fn approve(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.approve(TransitionContext::at(self.clock.now()))?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::ApplicationApproved,
            title: "Organización registrada".to_string(),
            message: format!("{} quedó legalmente constituida", application.name),
            data: serde_json::json!({ "application": app_id }),
        });
        tracing::info!(application = %app_id, "approved");
        Ok(())
    }

    /// Registry rejection with observations.
    pub fn reject_from_registry(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        corrections: CorrectionSet,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.reject_from_registry(corrections, TransitionContext::at(self.clock.now()))?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::ApplicationRejected,
            title: "Solicitud observada por el registro".to_string(),
            message: format!("El registro civil observó la solicitud de {}", application.name),
            data: serde_json::json!({ "application": app_id }),
        });
        tracing::info!(application = %app_id, "rejected by registry");
        Ok(())
    }

    /// Applicant resubmits after correcting.
    pub fn resubmit(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.resubmit(TransitionContext::at(self.clock.now()))?;
        self.applications.update(application, expected_version)?;
        tracing::info!(application = %app_id, "resubmitted after corrections");
        Ok(())
    }

    /// Dissolve an approved organization. Irreversible.
    pub fn dissolve(
        &mut self,
        app_id: &ApplicationId,
        expected_version: u64,
        reason: &str,
        actor: &str,
    ) -> Result<(), ServiceError> {
        let mut application = self.load(app_id, expected_version)?;
        application.dissolve(reason, actor, TransitionContext::at(self.clock.now()))?;
        self.applications.update(application.clone(), expected_version)?;

        self.notifications.deliver(Notification {
            recipient: application.creator.clone(),
            kind: NotificationKind::OrganizationDissolved,
            title: "Organización disuelta".to_string(),
            message: format!("{} fue disuelta: {reason}", application.name),
            data: serde_json::json!({ "application": app_id, "actor": actor }),
        });
        tracing::info!(application = %app_id, actor, "organization dissolved");
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────────

    /// The notification sink, for inspection.
    pub fn notifications(&self) -> &N {
        &self.notifications
    }

    /// The availability store, read-only.
    pub fn availability(&self) -> &AvailabilityStore {
        &self.availability
    }

    /// The assignment store, read-only.
    pub fn assignments(&self) -> &AssignmentStore {
        &self.assignments
    }

    /// Disassemble the service for persistence of its stateful parts.
    pub fn into_parts(self) -> (R, O, N, AvailabilityStore, AssignmentStore) {
        (
            self.applications,
            self.officials,
            self.notifications,
            self.availability,
            self.assignments,
        )
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// Load an application and verify the caller's observed version.
    fn load(
        &self,
        id: &ApplicationId,
        expected_version: u64,
    ) -> Result<OrganizationApplication, ServiceError> {
        let application = self.get_application(id)?;
        if application.version != expected_version {
            return Err(ServiceError::StaleVersion {
                id: id.to_string(),
                expected: expected_version,
                actual: application.version,
            });
        }
        Ok(application)
    }
}
