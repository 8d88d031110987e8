//! # `application` Subcommand
//!
//! Creation and lifecycle of organization applications: submission,
//! review with correction marking, registry outcome, resubmission, and
//! dissolution.

use std::path::Path;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Subcommand};

use regcom_core::{
    CivilDate, FoundingMember, MemberId, OrganizationCategory, Rut, TimeOfDay,
};
use regcom_workflow::{ApplicationStatus, CorrectionKind, CorrectionTracker, RequestedSlot};

use crate::storage::{parse_application_id, with_registry};

/// Application lifecycle management.
#[derive(Args, Debug)]
pub struct ApplicationArgs {
    #[command(subcommand)]
    command: ApplicationCommand,
}

#[derive(Subcommand, Debug)]
enum ApplicationCommand {
    /// Create a new application.
    Create {
        /// Organization name.
        #[arg(long)]
        name: String,
        /// Category: junta_vecinos, club_deportivo, centro_madres,
        /// comite_vivienda, organizacion_funcional.
        #[arg(long)]
        category: String,
        /// Creating citizen's identifier.
        #[arg(long)]
        creator: String,
        /// Founding member as "Name,RUT[,YYYY-MM-DD]". Repeatable.
        #[arg(long = "member")]
        members: Vec<String>,
        /// Requested election date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Requested election time (HH:MM).
        #[arg(long)]
        time: String,
        /// Assembly address.
        #[arg(long)]
        address: String,
    },
    /// Show an application.
    Show {
        /// Application id.
        id: String,
    },
    /// List applications, optionally filtered.
    List {
        /// Filter by status name (e.g. PENDING_REVIEW).
        #[arg(long)]
        status: Option<String>,
        /// Filter by creator.
        #[arg(long)]
        creator: Option<String>,
    },
    /// Print an application's status history.
    History {
        /// Application id.
        id: String,
    },
    /// Submit for municipal review.
    Submit {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
    },
    /// Start reviewing (administrator).
    Review {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
    },
    /// Mark an entry for correction during review.
    Mark {
        /// Application id.
        id: String,
        /// field | document | certificate | member | commission.
        #[arg(long)]
        kind: String,
        /// Key within the kind (field name, member id…).
        #[arg(long)]
        key: String,
        /// Reviewer comment.
        #[arg(long)]
        comment: String,
        /// Label shown to the applicant.
        #[arg(long)]
        label: String,
    },
    /// Remove a correction mark.
    Unmark {
        /// Application id.
        id: String,
        /// field | document | certificate | member | commission.
        #[arg(long)]
        kind: String,
        /// Key within the kind.
        #[arg(long)]
        key: String,
    },
    /// Show the marked corrections for an application under review.
    Corrections {
        /// Application id.
        id: String,
    },
    /// Reject with the marked corrections.
    Reject {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
        /// General comment accompanying the rejection.
        #[arg(long)]
        comment: Option<String>,
    },
    /// Forward to the civil registry (requires zero marked corrections).
    Forward {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
    },
    /// Registry approval.
    Approve {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
    },
    /// Resubmit after correcting a rejection.
    Resubmit {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
    },
    /// Dissolve an approved organization.
    Dissolve {
        /// Application id.
        id: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
        /// Reason for dissolution.
        #[arg(long)]
        reason: String,
        /// Acting administrator.
        #[arg(long)]
        actor: String,
    },
}

/// Execute an `application` subcommand against the registry file.
pub fn run(args: ApplicationArgs, registry: &Path) -> anyhow::Result<()> {
    match args.command {
        ApplicationCommand::Create {
            name,
            category,
            creator,
            members,
            date,
            time,
            address,
        } => {
            let category = parse_category(&category)?;
            let members = members
                .iter()
                .map(|m| parse_member(m))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let slot = RequestedSlot {
                election_date: CivilDate::parse(&date)?,
                election_time: TimeOfDay::parse(&time)?,
                assembly_address: address,
            };
            let id = with_registry(registry, |service, _, _| {
                Ok(service.create_application(&name, category, &creator, members, slot))
            })?;
            println!("application created: {id}");
        }
        ApplicationCommand::Show { id } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                let app = service.get_application(&id)?;
                println!("{}  {}  {}", app.id, app.name, app.status);
                println!("  category: {}", app.category);
                println!("  creator:  {}", app.creator);
                println!("  version:  {}", app.version);
                println!(
                    "  requested: {} {} at {}",
                    app.requested_slot.election_date,
                    app.requested_slot.election_time,
                    app.requested_slot.assembly_address
                );
                if let Some(m) = &app.ministro {
                    println!(
                        "  ministro:  {} on {} {} at {}",
                        m.official_id, m.date, m.time, m.location
                    );
                }
                if let Some(artifact) = &app.certificate_artifact {
                    println!("  acta:      {}", artifact.digest);
                }
                if let Some(corrections) = &app.corrections {
                    println!("  corrections:");
                    for c in corrections.iter() {
                        println!("    [{}] {}: {} — {}", c.kind, c.key, c.label, c.comment);
                    }
                }
                Ok(())
            })?;
        }
        ApplicationCommand::List { status, creator } => {
            let status = status
                .as_deref()
                .map(parse_status)
                .transpose()?;
            with_registry(registry, |service, _, _| {
                let apps = match (&status, &creator) {
                    (Some(s), _) => service.applications_by_status(*s),
                    (None, Some(c)) => service.applications_by_creator(c),
                    (None, None) => {
                        let mut all = Vec::new();
                        for s in ALL_STATUSES {
                            all.extend(service.applications_by_status(*s));
                        }
                        all
                    }
                };
                for app in apps {
                    if let Some(c) = &creator {
                        if &app.creator != c {
                            continue;
                        }
                    }
                    println!("{}  v{}  {}  {}", app.id, app.version, app.status, app.name);
                }
                Ok(())
            })?;
        }
        ApplicationCommand::History { id } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                let app = service.get_application(&id)?;
                for entry in &app.status_history {
                    match &entry.comment {
                        Some(comment) => println!("{}  {}  {}", entry.at, entry.status, comment),
                        None => println!("{}  {}", entry.at, entry.status),
                    }
                }
                Ok(())
            })?;
        }
        ApplicationCommand::Submit { id, version } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                service.submit_for_review(&id, version)?;
                Ok(())
            })?;
            println!("application submitted for review");
        }
        ApplicationCommand::Review { id, version } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, corrections| {
                service.start_review(&id, version)?;
                // A fresh working set for this review cycle.
                corrections.insert(tracker_key(&id), CorrectionTracker::new());
                Ok(())
            })?;
            println!("review started");
        }
        ApplicationCommand::Mark {
            id,
            kind,
            key,
            comment,
            label,
        } => {
            let id = parse_application_id(&id)?;
            let kind: CorrectionKind = kind.parse().map_err(|e: String| anyhow!(e))?;
            with_registry(registry, |_, _, corrections| {
                corrections
                    .entry(tracker_key(&id))
                    .or_default()
                    .mark(kind, &key, &comment, &label);
                Ok(())
            })?;
            println!("marked {kind}:{key}");
        }
        ApplicationCommand::Unmark { id, kind, key } => {
            let id = parse_application_id(&id)?;
            let kind: CorrectionKind = kind.parse().map_err(|e: String| anyhow!(e))?;
            let removed = with_registry(registry, |_, _, corrections| {
                Ok(corrections
                    .get_mut(&tracker_key(&id))
                    .map(|t| t.unmark(kind, &key))
                    .unwrap_or(false))
            })?;
            if removed {
                println!("unmarked {kind}:{key}");
            } else {
                println!("nothing marked under {kind}:{key}");
            }
        }
        ApplicationCommand::Corrections { id } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |_, _, corrections| {
                if let Some(tracker) = corrections.get(&tracker_key(&id)) {
                    for c in tracker.snapshot().iter() {
                        println!("[{}] {}: {} — {}", c.kind, c.key, c.label, c.comment);
                    }
                    println!("{} correction(s) marked", tracker.count());
                } else {
                    println!("no review in progress");
                }
                Ok(())
            })?;
        }
        ApplicationCommand::Reject {
            id,
            version,
            comment,
        } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, corrections| {
                let tracker = corrections
                    .get(&tracker_key(&id))
                    .cloned()
                    .unwrap_or_default();
                service.reject_with_corrections(&id, version, tracker.snapshot(), comment)?;
                corrections.remove(&tracker_key(&id));
                Ok(())
            })?;
            println!("application rejected with corrections");
        }
        ApplicationCommand::Forward { id, version } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, corrections| {
                let outstanding = corrections
                    .get(&tracker_key(&id))
                    .map(|t| t.count())
                    .unwrap_or(0);
                service.send_to_registry(&id, version, outstanding)?;
                corrections.remove(&tracker_key(&id));
                Ok(())
            })?;
            println!("application forwarded to the registry");
        }
        ApplicationCommand::Approve { id, version } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                service.approve(&id, version)?;
                Ok(())
            })?;
            println!("organization registered");
        }
        ApplicationCommand::Resubmit { id, version } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                service.resubmit(&id, version)?;
                Ok(())
            })?;
            println!("application resubmitted");
        }
        ApplicationCommand::Dissolve {
            id,
            version,
            reason,
            actor,
        } => {
            let id = parse_application_id(&id)?;
            with_registry(registry, |service, _, _| {
                service.dissolve(&id, version, &reason, &actor)?;
                Ok(())
            })?;
            println!("organization dissolved");
        }
    }
    Ok(())
}

const ALL_STATUSES: &[ApplicationStatus] = &[
    ApplicationStatus::WaitingMinistroRequest,
    ApplicationStatus::MinistroScheduled,
    ApplicationStatus::MinistroApproved,
    ApplicationStatus::PendingReview,
    ApplicationStatus::InReview,
    ApplicationStatus::Rejected,
    ApplicationStatus::SentToRegistry,
    ApplicationStatus::Approved,
    ApplicationStatus::Dissolved,
];

/// Key for an application's review working set in the registry file.
fn tracker_key(id: &regcom_core::ApplicationId) -> String {
    id.as_uuid().to_string()
}

/// Parse a category from its CLI form.
fn parse_category(s: &str) -> anyhow::Result<OrganizationCategory> {
    match s.trim().to_lowercase().as_str() {
        "junta_vecinos" => Ok(OrganizationCategory::JuntaVecinos),
        "club_deportivo" => Ok(OrganizationCategory::ClubDeportivo),
        "centro_madres" => Ok(OrganizationCategory::CentroMadres),
        "comite_vivienda" => Ok(OrganizationCategory::ComiteVivienda),
        "organizacion_funcional" => Ok(OrganizationCategory::OrganizacionFuncional),
        other => bail!("unknown category: {other}"),
    }
}

/// Parse a status filter from its SCREAMING_SNAKE form.
fn parse_status(s: &str) -> anyhow::Result<ApplicationStatus> {
    ALL_STATUSES
        .iter()
        .find(|status| status.as_str() == s.trim().to_uppercase())
        .copied()
        .ok_or_else(|| anyhow!("unknown status: {s}"))
}

/// Parse a founding member from "Name,RUT[,YYYY-MM-DD]".
fn parse_member(s: &str) -> anyhow::Result<FoundingMember> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() < 2 || parts.len() > 3 {
        bail!("member must be \"Name,RUT[,YYYY-MM-DD]\", got: {s}");
    }
    let birth_date = parts
        .get(2)
        .map(|d| CivilDate::parse(d))
        .transpose()
        .with_context(|| format!("invalid birth date in member: {s}"))?;
    Ok(FoundingMember {
        id: MemberId::new(),
        name: parts[0].to_string(),
        rut: Rut::parse(parts[1])?,
        birth_date,
    })
}
