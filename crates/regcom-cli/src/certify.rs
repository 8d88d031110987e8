//! # `certify` Subcommand
//!
//! Executes the official's five-step certification session from a JSON
//! session description, stores the captured signature blobs
//! content-addressed, and completes the workflow transition on success.
//!
//! The session file carries the data an interactive capture UI would
//! collect:
//!
//! ```json
//! {
//!   "application": "…uuid…",
//!   "version": 2,
//!   "directorio": {
//!     "president": { "person": { "name": "…", "rut": "…" }, "signature": "…" },
//!     "secretary": { "person": { "id": "…member uuid…" }, "signature": "…" },
//!     "treasurer": { "person": { "name": "…", "rut": "…" }, "signature": "…" }
//!   },
//!   "additional_seats": [ { "cargo": "director", "person": …, "signature": "…" } ],
//!   "electoral_commission": [ …3 entries… ],
//!   "attendees": [ … ],
//!   "notes": "…",
//!   "official_signature": "…"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Deserialize;

use regcom_assembly::{BoardRole, CertificationSession};
use regcom_core::PersonRef;
use regcom_registry::SignatureStore;

use crate::storage::{parse_application_id, with_registry};

/// Run a certification session from a session file.
#[derive(Args, Debug)]
pub struct CertifyArgs {
    /// Path to the JSON session description.
    #[arg(long)]
    pub session: PathBuf,
}

#[derive(Deserialize, Debug)]
struct SessionFile {
    application: String,
    version: u64,
    directorio: DirectorioInput,
    #[serde(default)]
    additional_seats: Vec<SeatInput>,
    electoral_commission: Vec<PersonInput>,
    #[serde(default)]
    attendees: Vec<PersonInput>,
    #[serde(default)]
    notes: String,
    official_signature: String,
}

#[derive(Deserialize, Debug)]
struct DirectorioInput {
    president: PersonInput,
    secretary: PersonInput,
    treasurer: PersonInput,
}

#[derive(Deserialize, Debug)]
struct PersonInput {
    person: PersonRef,
    signature: String,
}

#[derive(Deserialize, Debug)]
struct SeatInput {
    cargo: String,
    person: PersonRef,
    signature: String,
}

/// Execute the session and complete the certification.
pub fn run(args: CertifyArgs, registry: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(&args.session)
        .with_context(|| format!("reading session file {}", args.session.display()))?;
    let input: SessionFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing session file {}", args.session.display()))?;
    let app_id = parse_application_id(&input.application)?;

    let artifact = with_registry(registry, |service, signatures, _| {
        let application = service.get_application(&app_id)?;
        let mut session = CertificationSession::new(
            application.category,
            application.assembly_date(),
            application.members.clone(),
        );

        // Step 1: directorio.
        let roles = [
            (BoardRole::President, &input.directorio.president),
            (BoardRole::Secretary, &input.directorio.secretary),
            (BoardRole::Treasurer, &input.directorio.treasurer),
        ];
        for (role, entry) in roles {
            let signature = signatures.put(entry.signature.as_bytes(), "text/plain");
            session.assign_role(role, entry.person.clone(), signature)?;
        }
        session.complete_directorio()?;

        // Step 2: additional seats.
        for seat in &input.additional_seats {
            let signature = signatures.put(seat.signature.as_bytes(), "text/plain");
            session.add_seat(&seat.cargo, seat.person.clone(), signature)?;
        }
        session.complete_seats()?;

        // Step 3: electoral commission.
        for member in &input.electoral_commission {
            let signature = signatures.put(member.signature.as_bytes(), "text/plain");
            session.add_commission_member(member.person.clone(), signature)?;
        }
        session.complete_commission()?;

        // Step 4: attendees beyond those carried over.
        for attendee in &input.attendees {
            let signature = signatures.put(attendee.signature.as_bytes(), "text/plain");
            session.add_attendee(attendee.person.clone(), signature)?;
        }
        if let Some(advisory) = session.complete_attendees()? {
            tracing::warn!(%advisory, "attendee roster below recommended minimum");
            println!("warning: {advisory}");
        }

        // Step 5: confirmation.
        let official_signature = signatures.put(input.official_signature.as_bytes(), "text/plain");
        let record = session.confirm(input.notes.clone(), official_signature)?;

        Ok(service.complete_certification(&app_id, input.version, record)?)
    })?;

    println!("certification completed; acta artifact: {}", artifact.digest);
    Ok(())
}
