//! # Receipt Subcommand
//!
//! Re-renders the printable receipt for an already-submitted answers file.
//! Nothing is sent anywhere.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use pledge_core::{collect, ReferenceId};
use pledge_form::{FilePrintTarget, MemoryDisplay, Presenter};

/// Arguments for `pledge receipt`.
#[derive(Args, Debug)]
pub struct ReceiptArgs {
    /// JSON answers file describing the submitted form.
    #[arg(long, value_name = "FILE")]
    pub answers: PathBuf,

    /// Reference id the submission was assigned.
    #[arg(long, value_name = "ID")]
    pub reference_id: String,

    /// Output HTML file.
    #[arg(long, short, value_name = "FILE")]
    pub output: PathBuf,
}

/// Execute `pledge receipt`.
pub fn run_receipt(args: &ReceiptArgs) -> Result<u8> {
    let reference_id = ReferenceId::parse(&args.reference_id)
        .with_context(|| format!("invalid reference id: {}", args.reference_id))?;
    let record = collect(&crate::read_answers(&args.answers)?);

    let presenter = Presenter::new();
    let mut display = MemoryDisplay::new();
    presenter.show_success(&mut display, &reference_id, &record);

    let mut target = FilePrintTarget::new(&args.output);
    let printed = crate::runtime()?
        .block_on(presenter.print(&display, &mut target))
        .with_context(|| format!("failed to write receipt: {}", args.output.display()))?;
    if !printed {
        bail!("output location unavailable: {}", args.output.display());
    }

    println!("OK: receipt for {reference_id} written to {}", args.output.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_receipt_with_canonical_titles() {
        let dir = tempfile::tempdir().unwrap();
        let answers = dir.path().join("answers.json");
        std::fs::write(
            &answers,
            r#"{
                "fields": {"studentName": "Ada Reyes", "email": "ada@example.edu"},
                "finalAgreement": true,
                "sections": [{"number": "7", "title": "Privacy", "content": "..."}]
            }"#,
        )
        .unwrap();
        let output = dir.path().join("receipt.html");
        let args = ReceiptArgs {
            answers,
            reference_id: "ACK-LOYW3V28-7F0XQ1".into(),
            output: output.clone(),
        };

        assert_eq!(run_receipt(&args).unwrap(), 0);
        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains("ACK-LOYW3V28-7F0XQ1"));
        assert!(html.contains("Data Privacy and Consent"));
    }

    #[test]
    fn rejects_malformed_reference_id() {
        let dir = tempfile::tempdir().unwrap();
        let args = ReceiptArgs {
            answers: dir.path().join("answers.json"),
            reference_id: "not an id".into(),
            output: dir.path().join("receipt.html"),
        };
        assert!(run_receipt(&args).is_err());
    }
}
