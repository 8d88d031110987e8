//! # regcom CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

/// Registro Comunitario — municipal toolchain for community
/// organization certification.
///
/// Manages the official roster and availability, books assembly slots,
/// runs certification sessions, and operates the municipal review cycle.
#[derive(Parser, Debug)]
#[command(name = "regcom", version, about)]
struct Cli {
    /// Path to the JSON registry file.
    #[arg(long, global = true, default_value = "regcom.json")]
    registry: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Official roster and availability management.
    Official(regcom_cli::official::OfficialArgs),
    /// Assembly scheduling.
    Schedule(regcom_cli::schedule::ScheduleArgs),
    /// Application lifecycle management.
    Application(regcom_cli::application::ApplicationArgs),
    /// Run a certification session.
    Certify(regcom_cli::certify::CertifyArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Official(args) => regcom_cli::official::run(args, &cli.registry),
        Commands::Schedule(args) => regcom_cli::schedule::run(args, &cli.registry),
        Commands::Application(args) => regcom_cli::application::run(args, &cli.registry),
        Commands::Certify(args) => regcom_cli::certify::run(args, &cli.registry),
    }
}
