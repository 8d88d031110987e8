//! Drives a full certification through the CLI plumbing: registry file
//! on disk, session description JSON, and the certify handler.

use std::fs;

use regcom_cli::certify::{self, CertifyArgs};
use regcom_cli::storage::with_registry;
use regcom_core::{CivilDate, OrganizationCategory, Rut, TimeOfDay};
use regcom_workflow::{ApplicationStatus, RequestedSlot};

#[test]
fn certify_from_session_file_advances_the_application() {
    let dir = tempfile::tempdir().unwrap();
    let registry_path = dir.path().join("regcom.json");
    let session_path = dir.path().join("session.json");

    // Seed the registry: one official, one scheduled application.
    let (app_id, _official_id) = with_registry(&registry_path, |service, _, _| {
        let official_id = service.create_official(
            "Ministra Pérez",
            Rut::parse("77.777.777-7").unwrap(),
            "mp@municipio.cl",
            "+56 9 1234 5678",
        );
        let app_id = service.create_application(
            "Club Deportivo Estrella",
            OrganizationCategory::ClubDeportivo,
            "citizen-1",
            vec![],
            RequestedSlot {
                election_date: CivilDate::parse("2025-03-10").unwrap(),
                election_time: TimeOfDay::parse("10:00").unwrap(),
                assembly_address: "Cancha municipal".to_string(),
            },
        );
        service.schedule_official(
            &app_id,
            1,
            &official_id,
            CivilDate::parse("2025-03-10").unwrap(),
            TimeOfDay::parse("10:00").unwrap(),
            "Cancha municipal",
            false,
        )?;
        Ok((app_id, official_id))
    })
    .unwrap();

    // The session description an interactive capture would produce.
    let session = serde_json::json!({
        "application": app_id.as_uuid().to_string(),
        "version": 2,
        "directorio": {
            "president": { "person": { "name": "P Uno", "rut": "11111112-K" }, "signature": "firma-p" },
            "secretary": { "person": { "name": "S Dos", "rut": "22222222-2" }, "signature": "firma-s" },
            "treasurer": { "person": { "name": "T Tres", "rut": "33333333-3" }, "signature": "firma-t" }
        },
        "additional_seats": [
            { "cargo": "director", "person": { "name": "D Cuatro", "rut": "44444444-4" }, "signature": "firma-d" }
        ],
        "electoral_commission": [
            { "person": { "name": "C Uno", "rut": "55555555-5" }, "signature": "firma-c1" },
            { "person": { "name": "C Dos", "rut": "66666666-6" }, "signature": "firma-c2" },
            { "person": { "name": "C Tres", "rut": "88888888-8" }, "signature": "firma-c3" }
        ],
        "attendees": [
            { "person": { "name": "Vecina Externa", "rut": "99999999-9" }, "signature": "firma-v" }
        ],
        "notes": "Asamblea sin observaciones",
        "official_signature": "firma-ministro"
    });
    fs::write(&session_path, serde_json::to_string_pretty(&session).unwrap()).unwrap();

    certify::run(
        CertifyArgs {
            session: session_path,
        },
        &registry_path,
    )
    .unwrap();

    // The registry file reflects the completed certification.
    with_registry(&registry_path, |service, signatures, _| {
        let app = service.get_application(&app_id)?;
        assert_eq!(app.status, ApplicationStatus::MinistroApproved);

        let record = app.certification.as_ref().expect("record stored");
        assert_eq!(record.electoral_commission.len(), 3);
        assert_eq!(record.additional_seats.len(), 1);
        // 3 directorio + 1 seat + 3 commission carried over, 1 ad hoc.
        assert_eq!(record.attendees.len(), 8);

        // Signature blobs are stored content-addressed and resolvable.
        use regcom_registry::SignatureStore;
        let president_sig = &record.directorio.president.signature;
        assert_eq!(
            signatures.get(&president_sig.digest).expect("blob present"),
            b"firma-p"
        );
        Ok(())
    })
    .unwrap();
}
