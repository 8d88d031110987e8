//! End-to-end certification flow through the registry service: an
//! application travels from creation through scheduling, the official's
//! certification session, municipal review, and registry approval.

use regcom_assembly::{BoardRole, CertificationSession};
use regcom_core::{
    CivilDate, ContentDigest, FixedClock, MemberId, OrganizationCategory, PersonRef, Rut,
    SequentialIds, SignatureRef, TimeOfDay, Timestamp,
};
use regcom_registry::{
    DigestArtifactGenerator, InMemoryApplicationRepository, InMemoryOfficialRegistry,
    NotificationKind, RecordingSink, RegistryService, ServiceError,
};
use regcom_scheduling::{AssignmentStatus, AvailabilityStore, AssignmentStore};
use regcom_workflow::{
    ApplicationStatus, CorrectionKind, CorrectionTracker, RequestedSlot, WorkflowError,
};

type Service = RegistryService<
    InMemoryApplicationRepository,
    InMemoryOfficialRegistry,
    RecordingSink,
    DigestArtifactGenerator,
>;

fn service() -> Service {
    RegistryService::new(
        InMemoryApplicationRepository::new(),
        InMemoryOfficialRegistry::new(),
        RecordingSink::new(),
        DigestArtifactGenerator,
        AvailabilityStore::new(),
        AssignmentStore::new(),
        Box::new(FixedClock::new(
            Timestamp::parse("2025-03-01T09:00:00Z").unwrap(),
            CivilDate::parse("2025-03-01").unwrap(),
        )),
        Box::new(SequentialIds::default()),
    )
}

fn date(s: &str) -> CivilDate {
    CivilDate::parse(s).unwrap()
}

fn time(s: &str) -> TimeOfDay {
    TimeOfDay::parse(s).unwrap()
}

fn sig(seed: &str) -> SignatureRef {
    SignatureRef {
        digest: ContentDigest::of_bytes(seed.as_bytes()),
        media_type: "image/png".to_string(),
        byte_len: seed.len() as u64,
    }
}

fn manual(name: &str, rut: &str) -> PersonRef {
    PersonRef::Manual {
        name: name.to_string(),
        rut: Rut::parse(rut).unwrap(),
    }
}

fn slot() -> RequestedSlot {
    RequestedSlot {
        election_date: date("2025-03-10"),
        election_time: time("10:00"),
        assembly_address: "Sede vecinal, Calle Uno 123".to_string(),
    }
}

fn roster() -> Vec<regcom_core::FoundingMember> {
    vec![regcom_core::FoundingMember {
        id: MemberId::new(),
        name: "María Soto".to_string(),
        rut: Rut::parse("11111111-1").unwrap(),
        birth_date: Some(date("1980-05-01")),
    }]
}

/// Run the official's five-step session for a scheduled application.
fn run_certification_session(
    category: OrganizationCategory,
    assembly_date: CivilDate,
    roster: Vec<regcom_core::FoundingMember>,
) -> regcom_assembly::CertificationRecord {
    let mut session = CertificationSession::new(category, assembly_date, roster);
    session
        .assign_role(BoardRole::President, manual("P Uno", "11111112-K"), sig("p"))
        .unwrap();
    session
        .assign_role(BoardRole::Secretary, manual("S Dos", "22222222-2"), sig("s"))
        .unwrap();
    session
        .assign_role(BoardRole::Treasurer, manual("T Tres", "33333333-3"), sig("t"))
        .unwrap();
    session.complete_directorio().unwrap();
    session.complete_seats().unwrap();
    session
        .add_commission_member(manual("C Uno", "44444444-4"), sig("c1"))
        .unwrap();
    session
        .add_commission_member(manual("C Dos", "55555555-5"), sig("c2"))
        .unwrap();
    session
        .add_commission_member(manual("C Tres", "66666666-6"), sig("c3"))
        .unwrap();
    session.complete_commission().unwrap();
    // 6 attendees for a category recommending more: advisory only.
    let advisory = session.complete_attendees().unwrap();
    assert!(advisory.is_some());
    session
        .confirm("Asamblea sin observaciones".to_string(), sig("ministro"))
        .unwrap()
}

#[test]
fn whole_day_block_prevents_scheduling() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app = svc.create_application(
        "Junta de Vecinos Villa Sur",
        OrganizationCategory::JuntaVecinos,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.add_availability_block(&official, date("2025-03-10"), None, "feriado local")
        .unwrap();

    let err = svc
        .schedule_official(&app, 1, &official, date("2025-03-10"), time("10:00"), "Sede", false)
        .unwrap_err();
    match err {
        ServiceError::OfficialUnavailable { reason, slot, .. } => {
            assert_eq!(reason, "feriado local");
            assert_eq!(slot, "whole day");
        }
        other => panic!("expected OfficialUnavailable, got {other}"),
    }
    // Another date works.
    svc.schedule_official(&app, 1, &official, date("2025-03-11"), time("10:00"), "Sede", false)
        .unwrap();
}

#[test]
fn double_booking_requires_explicit_override() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let org_a = svc.create_application(
        "Organización A",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    let org_b = svc.create_application(
        "Organización B",
        OrganizationCategory::ClubDeportivo,
        "citizen-2",
        roster(),
        slot(),
    );

    svc.schedule_official(&org_a, 1, &official, date("2025-03-10"), time("10:00"), "Sede A", false)
        .unwrap();

    // Same slot for org B: advisory conflict, blocked without override.
    let err = svc
        .schedule_official(&org_b, 1, &official, date("2025-03-10"), time("10:00"), "Sede B", false)
        .unwrap_err();
    assert!(matches!(err, ServiceError::ConflictRequiresOverride { count: 1 }));

    // The administrator confirms the override; booking proceeds.
    svc.schedule_official(&org_b, 1, &official, date("2025-03-10"), time("10:00"), "Sede B", true)
        .unwrap();
    let app_b = svc.get_application(&org_b).unwrap();
    assert_eq!(app_b.status, ApplicationStatus::MinistroScheduled);
    // The override is recorded in the history trail.
    assert!(app_b
        .status_history
        .last()
        .unwrap()
        .comment
        .as_deref()
        .unwrap()
        .contains("override"));
}

#[test]
fn certification_flips_signatures_validated_and_notifies() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Club Deportivo Estrella",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    let assignment_id = svc
        .schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Cancha", false)
        .unwrap();

    let record = run_certification_session(
        OrganizationCategory::ClubDeportivo,
        date("2025-03-10"),
        roster(),
    );
    assert_eq!(record.electoral_commission.len(), 3);

    let artifact = svc.complete_certification(&app_id, 2, record).unwrap();
    assert_eq!(artifact.label, "acta constitutiva");

    let app = svc.get_application(&app_id).unwrap();
    assert_eq!(app.status, ApplicationStatus::MinistroApproved);
    assert!(app.certification.is_some());
    assert_eq!(app.certificate_artifact, Some(artifact));

    let assignment = svc.assignments().find(&assignment_id).unwrap();
    assert!(assignment.signatures_validated);
    assert_eq!(assignment.status, AssignmentStatus::Completed);

    let kinds: Vec<NotificationKind> = svc
        .notifications()
        .delivered
        .iter()
        .map(|n| n.kind)
        .collect();
    assert!(kinds.contains(&NotificationKind::MinistroAssigned));
    assert!(kinds.contains(&NotificationKind::CertificationCompleted));
}

#[test]
fn invalid_record_is_refused_by_the_service() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Club Deportivo Estrella",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Cancha", false)
        .unwrap();

    // Build a record whose commission overlaps the board, bypassing the
    // session's selection-time checks entirely.
    let mut record = run_certification_session(
        OrganizationCategory::ClubDeportivo,
        date("2025-03-10"),
        roster(),
    );
    record.electoral_commission[0] = regcom_assembly::CertifiedPerson {
        person: record.directorio.president.person.clone(),
        signature: sig("x"),
    };

    let err = svc.complete_certification(&app_id, 2, record).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::Certification(_))
    ));
    // Nothing advanced.
    let app = svc.get_application(&app_id).unwrap();
    assert_eq!(app.status, ApplicationStatus::MinistroScheduled);
}

#[test]
fn review_cycle_rejection_and_resubmission() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Junta de Vecinos Villa Sur",
        OrganizationCategory::JuntaVecinos,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Sede", false)
        .unwrap();
    let record = run_certification_session(
        OrganizationCategory::JuntaVecinos,
        date("2025-03-10"),
        roster(),
    );
    svc.complete_certification(&app_id, 2, record).unwrap();
    svc.submit_for_review(&app_id, 3).unwrap();
    svc.start_review(&app_id, 4).unwrap();

    // The administrator marks two fields, then rejects.
    let mut tracker = CorrectionTracker::new();
    tracker.mark(CorrectionKind::Field, "nombre", "Nombre incompleto", "Nombre");
    tracker.mark(CorrectionKind::Field, "direccion", "Dirección inválida", "Dirección");

    let history_before = svc.get_application(&app_id).unwrap().status_history.len();
    svc.reject_with_corrections(
        &app_id,
        5,
        tracker.snapshot(),
        Some("Corregir antecedentes".to_string()),
    )
    .unwrap();

    let app = svc.get_application(&app_id).unwrap();
    assert_eq!(app.status, ApplicationStatus::Rejected);
    assert_eq!(app.corrections.as_ref().unwrap().len(), 2);
    assert_eq!(app.status_history.len(), history_before + 1);

    // Applicant corrects and resubmits; the cycle forwards cleanly.
    tracker.clear();
    svc.resubmit(&app_id, 6).unwrap();
    svc.start_review(&app_id, 7).unwrap();
    svc.send_to_registry(&app_id, 8, tracker.count()).unwrap();
    svc.approve(&app_id, 9).unwrap();

    let app = svc.get_application(&app_id).unwrap();
    assert_eq!(app.status, ApplicationStatus::Approved);
    assert!(app.corrections.is_none());
}

#[test]
fn forward_with_marked_corrections_is_blocked() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Club Deportivo Estrella",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Cancha", false)
        .unwrap();
    let record = run_certification_session(
        OrganizationCategory::ClubDeportivo,
        date("2025-03-10"),
        roster(),
    );
    svc.complete_certification(&app_id, 2, record).unwrap();
    svc.submit_for_review(&app_id, 3).unwrap();
    svc.start_review(&app_id, 4).unwrap();

    let mut tracker = CorrectionTracker::new();
    tracker.mark(CorrectionKind::Document, "estatuto", "Falta firma", "Estatuto");

    let err = svc.send_to_registry(&app_id, 5, tracker.count()).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::OutstandingCorrections { count: 1 })
    ));

    // Rejecting with nothing marked is equally refused.
    tracker.clear();
    let err = svc
        .reject_with_corrections(&app_id, 5, tracker.snapshot(), None)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::EmptyCorrections)
    ));
}

#[test]
fn stale_version_is_rejected_by_the_service() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Club Deportivo Estrella",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Cancha", false)
        .unwrap();

    // A second session still holding version 1 must not win.
    let err = svc
        .schedule_official(&app_id, 1, &official, date("2025-03-11"), time("12:00"), "Cancha", false)
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::StaleVersion { expected: 1, actual: 2, .. }
    ));
}

#[test]
fn dissolution_is_terminal() {
    let mut svc = service();
    let official = svc.create_official("Ministra Pérez", Rut::parse("77777777-7").unwrap(), "mp@muni.cl", "+56 9 1111");
    let app_id = svc.create_application(
        "Club Deportivo Estrella",
        OrganizationCategory::ClubDeportivo,
        "citizen-1",
        roster(),
        slot(),
    );
    svc.schedule_official(&app_id, 1, &official, date("2025-03-10"), time("10:00"), "Cancha", false)
        .unwrap();
    let record = run_certification_session(
        OrganizationCategory::ClubDeportivo,
        date("2025-03-10"),
        roster(),
    );
    svc.complete_certification(&app_id, 2, record).unwrap();
    svc.submit_for_review(&app_id, 3).unwrap();
    svc.start_review(&app_id, 4).unwrap();
    svc.send_to_registry(&app_id, 5, 0).unwrap();
    svc.approve(&app_id, 6).unwrap();
    svc.dissolve(&app_id, 7, "inactividad prolongada", "admin-1").unwrap();

    let app = svc.get_application(&app_id).unwrap();
    assert_eq!(app.status, ApplicationStatus::Dissolved);

    let err = svc.resubmit(&app_id, 8).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Workflow(WorkflowError::Terminal { .. })
    ));
}

#[test]
fn unknown_ids_fail_loudly() {
    let mut svc = service();
    let missing_app = regcom_core::ApplicationId::new();
    assert!(matches!(
        svc.get_application(&missing_app),
        Err(ServiceError::ApplicationNotFound { .. })
    ));
    assert!(matches!(
        svc.submit_for_review(&missing_app, 1),
        Err(ServiceError::ApplicationNotFound { .. })
    ));
    assert!(matches!(
        svc.add_availability_block(&regcom_core::OfficialId::new(), date("2025-03-10"), None, "x"),
        Err(ServiceError::OfficialNotFound { .. })
    ));
}
