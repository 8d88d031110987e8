//! # `schedule` Subcommand
//!
//! Books an official against an assembly slot, after the availability
//! and collision checks the admin UI would run. `check` answers both
//! questions without committing anything.

use std::path::Path;

use clap::{Args, Subcommand};

use regcom_core::{CivilDate, TimeOfDay};
use regcom_scheduling::SchedulingEngine;

use crate::storage::{parse_application_id, parse_official_id, with_registry};

/// Assembly scheduling against the official roster.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(subcommand)]
    command: ScheduleCommand,
}

#[derive(Subcommand, Debug)]
enum ScheduleCommand {
    /// Book an official for an application's assembly.
    Book {
        /// Application id.
        #[arg(long)]
        application: String,
        /// The application version last observed.
        #[arg(long)]
        version: u64,
        /// Official id.
        #[arg(long)]
        official: String,
        /// Assembly date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Assembly slot (HH:MM, normalized on input).
        #[arg(long)]
        time: String,
        /// Assembly location.
        #[arg(long)]
        location: String,
        /// Confirm booking over colliding assignments.
        #[arg(long = "override")]
        override_conflict: bool,
    },
    /// Check availability and collisions for a slot without booking.
    Check {
        /// Official id.
        #[arg(long)]
        official: String,
        /// Date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Slot (HH:MM, normalized on input).
        #[arg(long)]
        time: String,
    },
}

/// Execute a `schedule` subcommand against the registry file.
pub fn run(args: ScheduleArgs, registry: &Path) -> anyhow::Result<()> {
    match args.command {
        ScheduleCommand::Book {
            application,
            version,
            official,
            date,
            time,
            location,
            override_conflict,
        } => {
            let app_id = parse_application_id(&application)?;
            let official_id = parse_official_id(&official)?;
            let date = CivilDate::parse(&date)?;
            let time = TimeOfDay::parse(&time)?;
            let assignment_id = with_registry(registry, |service, _, _| {
                Ok(service.schedule_official(
                    &app_id,
                    version,
                    &official_id,
                    date,
                    time,
                    &location,
                    override_conflict,
                )?)
            })?;
            println!("official booked: {assignment_id}");
        }
        ScheduleCommand::Check {
            official,
            date,
            time,
        } => {
            let official_id = parse_official_id(&official)?;
            let date = CivilDate::parse(&date)?;
            let time = TimeOfDay::parse(&time)?;
            with_registry(registry, |service, _, _| {
                let engine = SchedulingEngine::new(service.availability(), service.assignments());
                match engine.blocking_block(&official_id, date, time) {
                    Some(block) => println!(
                        "unavailable: blocked on {} ({}) — {}",
                        block.date,
                        block.slot_label(),
                        block.reason
                    ),
                    None => println!("available"),
                }
                let conflicts = engine.conflicting_assignments(&official_id, date, time);
                if conflicts.is_empty() {
                    println!("no colliding assignments");
                } else {
                    println!("{} colliding assignment(s):", conflicts.len());
                    for a in conflicts {
                        println!("  {}  {}  {} {}  {}", a.id, a.application_id, a.date, a.time, a.location);
                    }
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}
