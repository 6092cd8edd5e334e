//! # Draft Subcommand
//!
//! Inspect and manage the single saved draft slot.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use pledge_core::collect;
use pledge_form::FormConfig;
use pledge_store::DraftStore;

/// Arguments for `pledge draft`.
#[derive(Args, Debug)]
pub struct DraftArgs {
    #[command(subcommand)]
    pub command: DraftCommand,
}

/// Draft subcommands.
#[derive(Subcommand, Debug)]
pub enum DraftCommand {
    /// Print the saved draft as JSON.
    Show,

    /// Save an answers file as the current draft.
    Save {
        /// JSON answers file describing the filled-in form.
        #[arg(long, value_name = "FILE")]
        answers: PathBuf,
    },

    /// Delete the saved draft.
    Clear,
}

/// Execute `pledge draft`.
pub fn run_draft(args: &DraftArgs, config: &FormConfig) -> Result<u8> {
    let mut drafts = DraftStore::new(crate::open_store(config)?);

    match &args.command {
        DraftCommand::Show => match drafts.try_load() {
            Ok(Some(record)) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(0)
            }
            Ok(None) => {
                println!("no draft saved");
                Ok(0)
            }
            Err(e) => {
                eprintln!("CORRUPT: {e}");
                Ok(1)
            }
        },

        DraftCommand::Save { answers } => {
            let form = crate::read_answers(answers)?;
            let record = collect(&form);
            drafts.save(&record).context("failed to save draft")?;
            println!(
                "OK: draft saved ({} sections, agreement={})",
                record.policy_sections.len(),
                record.final_agreement
            );
            Ok(0)
        }

        DraftCommand::Clear => {
            drafts.clear().context("failed to clear draft")?;
            println!("OK: draft cleared");
            Ok(0)
        }
    }
}
