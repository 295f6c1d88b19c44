//! # track CLI entry point
//!
//! Parses command-line arguments and dispatches to the ledger subcommands.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use track_cli::commands::{run_ledger, LedgerCommand};

/// Asset ledger CLI.
///
/// Runs asset ledger contract functions against a world-state snapshot on
/// disk: manufacture, transfer, update, delete and list tracked assets.
#[derive(Parser, Debug)]
#[command(name = "track", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ledger snapshot file.
    #[arg(long, global = true, env = "TRACK_LEDGER", default_value = track_cli::DEFAULT_LEDGER)]
    ledger: PathBuf,

    /// Identity label of the submitting client.
    #[arg(long, global = true, env = "TRACK_CLIENT_ID")]
    client_id: Option<String>,

    #[command(subcommand)]
    command: LedgerCommand,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(ledger = %cli.ledger.display(), "track CLI starting");

    match run_ledger(&cli.command, &cli.ledger, cli.client_id.as_deref()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
