//! # Describe and Reference-Id Subcommands
//!
//! Thin wrappers over the pure helpers in `pledge-core`.

use anyhow::{Context, Result};
use clap::Args;

use pledge_core::{describe, ReferenceId};
use pledge_form::validate_prefix;

/// Arguments for `pledge describe`.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// User-agent string to classify.
    #[arg(value_name = "USER_AGENT")]
    pub user_agent: String,

    /// Print the descriptor as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `pledge reference-id`.
#[derive(Args, Debug)]
pub struct ReferenceIdArgs {
    /// Prefix of the minted id. Defaults to the configured prefix.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Number of ids to mint.
    #[arg(long, default_value_t = 1)]
    pub count: usize,
}

/// Execute `pledge describe`.
pub fn run_describe(args: &DescribeArgs) -> Result<u8> {
    let device = describe(&args.user_agent);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&device)?);
    } else {
        println!("type:  {}", device.device_type);
        println!("model: {}", device.model);
    }
    Ok(0)
}

/// Execute `pledge reference-id`.
pub fn run_reference_id(args: &ReferenceIdArgs, configured_prefix: &str) -> Result<u8> {
    let prefix = args.prefix.as_deref().unwrap_or(configured_prefix);
    validate_prefix(prefix).context("invalid --prefix")?;
    for _ in 0..args.count {
        println!("{}", ReferenceId::generate(prefix));
    }
    Ok(0)
}
