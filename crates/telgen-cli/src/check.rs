//! # Check Subcommand
//!
//! Runs the whole pipeline without writing anything. With `--json` the
//! runtime definitions table is printed, which makes it easy to diff what
//! a definitions change does to required metadata.

use anyhow::{Context, Result};
use clap::Args;

use crate::input::InputArgs;

/// Arguments for the `telgen check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the runtime definitions table as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let config = args.input.load_config()?;
    let documents = args.input.load_documents()?;
    let unit = telgen_codegen::generate_documents(documents, &config)
        .context("definitions do not resolve")?;

    if args.json {
        let table = unit.runtime_table().map(|t| t.to_json()).unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!(
            "OK: {} metric(s), {} union(s)",
            unit.metrics.len(),
            unit.unions().count()
        );
    }
    Ok(0)
}
