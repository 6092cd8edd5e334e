//! # Submit Subcommand
//!
//! Runs the full controller flow over an answers file: auto-save, validate,
//! dispatch, present. Exit code 0 means the record was dispatched; it does
//! not mean the endpoint stored it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use pledge_client::config::parse_endpoint;
use pledge_client::HttpTransport;
use pledge_form::{
    DisplaySurface, DisplayTarget, FilePrintTarget, FormConfig, FormController, MemoryDisplay,
    SubmissionOutcome,
};

/// Arguments for `pledge submit`.
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// JSON answers file describing the filled-in form.
    #[arg(long, value_name = "FILE")]
    pub answers: PathBuf,

    /// Submission endpoint. Overrides config and environment; an empty value
    /// clears it.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// User-agent string used to describe the submitting device.
    #[arg(long, value_name = "UA", default_value = "")]
    pub user_agent: String,

    /// Write the printable receipt here after a successful submission.
    #[arg(long, value_name = "FILE")]
    pub receipt: Option<PathBuf>,
}

/// Execute `pledge submit`.
pub fn run_submit(args: &SubmitArgs, mut config: FormConfig) -> Result<u8> {
    if let Some(raw) = &args.endpoint {
        config.submit.endpoint = parse_endpoint(raw).context("invalid --endpoint")?;
    }
    log_endpoint(config.endpoint());

    let form = crate::read_answers(&args.answers)?;
    let store = crate::open_store(&config)?;
    let transport = HttpTransport::new().context("failed to build HTTP client")?;
    let mut controller = FormController::new(
        config,
        form,
        store,
        transport,
        MemoryDisplay::new(),
        args.user_agent.as_str(),
    );
    controller.on_agreement_change();

    let receipt = args.receipt.as_deref();
    crate::runtime()?.block_on(async {
        let outcome = controller.on_submit().await;
        report(&outcome, controller.display());
        if let (SubmissionOutcome::Succeeded { .. }, Some(path)) = (&outcome, receipt) {
            write_receipt(&controller, path).await?;
        }
        anyhow::Ok(if outcome.is_success() { 0 } else { 1 })
    })
}

fn log_endpoint(endpoint: Option<&Url>) {
    match endpoint {
        Some(url) => tracing::info!(endpoint = %url, "submitting"),
        None => tracing::warn!("no endpoint configured; submission will fail"),
    }
}

fn report(outcome: &SubmissionOutcome, display: &MemoryDisplay) {
    match outcome {
        SubmissionOutcome::Succeeded { reference_id, ack } => {
            println!("OK: submitted reference={reference_id} endpoint={}", ack.endpoint);
            if let Some(at) = display.text(DisplayTarget::SubmittedAt) {
                println!("    at {at}");
            }
        }
        SubmissionOutcome::Failed {
            reference_id,
            message,
        } => eprintln!("FAILED: reference={reference_id}: {message}"),
        SubmissionOutcome::Invalid(e) => {
            let title = display
                .text(DisplayTarget::ErrorTitle)
                .unwrap_or_else(|| "Invalid".to_string());
            eprintln!("INVALID: {title}: {e}");
        }
        SubmissionOutcome::Busy => eprintln!("BUSY: a submission is already in flight"),
    }
}

async fn write_receipt<F, S, T>(
    controller: &FormController<F, S, T, MemoryDisplay>,
    path: &Path,
) -> Result<()>
where
    F: pledge_core::FormSurface,
    S: pledge_store::KeyValueStore,
    T: pledge_client::Transport,
{
    let mut target = FilePrintTarget::new(path);
    let printed = controller
        .print(&mut target)
        .await
        .with_context(|| format!("failed to write receipt: {}", path.display()))?;
    if printed {
        println!("OK: receipt written to {}", path.display());
    } else {
        tracing::warn!(path = %path.display(), "receipt not written");
    }
    Ok(())
}
