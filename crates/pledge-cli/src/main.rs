//! # pledge CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pledge_cli::describe::{run_describe, run_reference_id, DescribeArgs, ReferenceIdArgs};
use pledge_cli::draft::{run_draft, DraftArgs};
use pledge_cli::load_config;
use pledge_cli::receipt::{run_receipt, ReceiptArgs};
use pledge_cli::submit::{run_submit, SubmitArgs};

/// Policy acknowledgement form, headless.
///
/// Submits filled-in acknowledgement forms to the configured sheet endpoint,
/// manages the local draft, and renders printable receipts.
#[derive(Parser, Debug)]
#[command(name = "pledge", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of the draft store. Overrides config and environment.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a user-agent string into a device descriptor.
    Describe(DescribeArgs),

    /// Mint a submission reference id.
    ReferenceId(ReferenceIdArgs),

    /// Validate and submit an answers file.
    Submit(SubmitArgs),

    /// Show, save, or clear the stored draft.
    Draft(DraftArgs),

    /// Render the printable receipt for a submitted answers file.
    Receipt(ReceiptArgs),
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

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "pledge CLI starting");

    let config = match load_config(cli.config.as_deref()) {
        Ok(mut config) => {
            if let Some(dir) = cli.store_dir {
                config.store_dir = Some(dir);
            }
            config
        }
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Describe(args) => run_describe(&args),
        Commands::ReferenceId(args) => run_reference_id(&args, &config.reference_prefix),
        Commands::Submit(args) => run_submit(&args, config),
        Commands::Draft(args) => run_draft(&args, &config),
        Commands::Receipt(args) => run_receipt(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
