//! # `official` Subcommand
//!
//! Roster management for certifying officials and their availability
//! blocks. Argument parsing only — business rules live in the domain
//! crates.

use std::path::Path;

use anyhow::Context;
use clap::{Args, Subcommand};
use uuid::Uuid;

use regcom_core::{BlockId, CivilDate, Rut, TimeOfDay};

use crate::storage::{parse_official_id, with_registry};

/// Official roster and availability management.
#[derive(Args, Debug)]
pub struct OfficialArgs {
    #[command(subcommand)]
    command: OfficialCommand,
}

#[derive(Subcommand, Debug)]
enum OfficialCommand {
    /// Register a new certifying official.
    Add {
        /// Full legal name.
        #[arg(long)]
        name: String,
        /// National identity number (with or without dots).
        #[arg(long)]
        rut: String,
        /// Contact email.
        #[arg(long)]
        email: String,
        /// Contact phone.
        #[arg(long)]
        phone: String,
    },
    /// List officials (active only unless --all).
    List {
        /// Include deactivated officials.
        #[arg(long)]
        all: bool,
    },
    /// Update an official's roster data.
    Update {
        /// Official id.
        id: String,
        /// New full legal name.
        #[arg(long)]
        name: Option<String>,
        /// New contact email.
        #[arg(long)]
        email: Option<String>,
        /// New contact phone.
        #[arg(long)]
        phone: Option<String>,
    },
    /// Flip an official's active flag.
    Toggle {
        /// Official id.
        id: String,
    },
    /// Block a date or slot for an official.
    Block {
        /// Official id.
        id: String,
        /// Blocked date (YYYY-MM-DD).
        #[arg(long)]
        date: String,
        /// Blocked slot; omit to block the whole day.
        #[arg(long)]
        time: Option<String>,
        /// Reason for the block.
        #[arg(long)]
        reason: String,
    },
    /// Remove an availability block.
    Unblock {
        /// Block id.
        block_id: String,
    },
    /// List an official's availability blocks.
    Blocks {
        /// Official id.
        id: String,
    },
}

/// Execute an `official` subcommand against the registry file.
pub fn run(args: OfficialArgs, registry: &Path) -> anyhow::Result<()> {
    match args.command {
        OfficialCommand::Add {
            name,
            rut,
            email,
            phone,
        } => {
            let rut = Rut::parse(&rut)?;
            let id = with_registry(registry, |service, _, _| {
                Ok(service.create_official(&name, rut, &email, &phone))
            })?;
            println!("official registered: {id}");
        }
        OfficialCommand::List { all } => {
            with_registry(registry, |service, _, _| {
                let officials = if all {
                    service.all_officials()
                } else {
                    service.active_officials()
                };
                for o in officials {
                    let state = if o.active { "active" } else { "inactive" };
                    println!("{}  {}  {}  {}", o.id, o.name, o.rut, state);
                }
                Ok(())
            })?;
        }
        OfficialCommand::Update {
            id,
            name,
            email,
            phone,
        } => {
            let id = parse_official_id(&id)?;
            with_registry(registry, |service, _, _| {
                let mut official = service.get_official(&id)?;
                if let Some(name) = name {
                    official.name = name;
                }
                if let Some(email) = email {
                    official.email = email;
                }
                if let Some(phone) = phone {
                    official.phone = phone;
                }
                service.update_official(official)?;
                Ok(())
            })?;
            println!("official updated: {id}");
        }
        OfficialCommand::Toggle { id } => {
            let id = parse_official_id(&id)?;
            let active = with_registry(registry, |service, _, _| {
                Ok(service.toggle_official(&id)?)
            })?;
            println!("official {id} is now {}", if active { "active" } else { "inactive" });
        }
        OfficialCommand::Block {
            id,
            date,
            time,
            reason,
        } => {
            let id = parse_official_id(&id)?;
            let date = CivilDate::parse(&date)?;
            let time = time.as_deref().map(TimeOfDay::parse).transpose()?;
            let block_id = with_registry(registry, |service, _, _| {
                Ok(service.add_availability_block(&id, date, time, &reason)?)
            })?;
            println!("availability block created: {block_id}");
        }
        OfficialCommand::Unblock { block_id } => {
            let block_id = parse_block_id(&block_id)?;
            with_registry(registry, |service, _, _| {
                service.remove_availability_block(&block_id)?;
                Ok(())
            })?;
            println!("availability block removed: {block_id}");
        }
        OfficialCommand::Blocks { id } => {
            let id = parse_official_id(&id)?;
            with_registry(registry, |service, _, _| {
                for block in service.blocks_for(&id) {
                    let state = if block.active { "active" } else { "inactive" };
                    println!(
                        "{}  {}  {}  {}  {}",
                        block.id,
                        block.date,
                        block.slot_label(),
                        state,
                        block.reason
                    );
                }
                Ok(())
            })?;
        }
    }
    Ok(())
}

/// Parse a block id from its UUID form.
fn parse_block_id(s: &str) -> anyhow::Result<BlockId> {
    let raw = s.strip_prefix("block:").unwrap_or(s);
    let uuid = Uuid::parse_str(raw).with_context(|| format!("invalid block id: {s}"))?;
    Ok(BlockId::from_uuid(uuid))
}
