//! # telgen CLI entry point
//!
//! Parses command-line arguments, sets up logging and dispatches to the
//! subcommand handlers in the library crate.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use telgen_cli::check::{run_check, CheckArgs};
use telgen_cli::generate::{run_generate, GenerateArgs};

/// Telemetry definition compiler.
///
/// Validates telemetry definitions documents, merges them with the bundled
/// common definitions and emits TypeScript types plus a runtime definitions
/// table.
#[derive(Parser, Debug)]
#[command(name = "telgen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile definitions into a TypeScript file.
    Generate(GenerateArgs),

    /// Validate and resolve definitions without writing output.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("telgen {} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8, json: bool) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "telgen",
            "generate",
            "--input",
            "a.json",
            "b.yaml",
            "--output",
            "out.ts",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(
                    args.input.inputs,
                    vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]
                );
                assert_eq!(args.output, PathBuf::from("out.ts"));
                assert!(args.input.config.is_none());
                assert!(!args.input.no_defaults);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parse_repeated_input_and_flags() {
        let cli = Cli::try_parse_from([
            "telgen",
            "-vv",
            "generate",
            "-i",
            "a.json",
            "-i",
            "b.json",
            "-o",
            "out.ts",
            "--config",
            "telgen.yaml",
            "--no-defaults",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.input.inputs.len(), 2);
            assert_eq!(args.input.config, Some(PathBuf::from("telgen.yaml")));
            assert!(args.input.no_defaults);
        }
    }

    #[test]
    fn cli_parse_check_json() {
        let cli = Cli::try_parse_from(["telgen", "check", "-i", "a.json", "--json"]).unwrap();
        if let Commands::Check(args) = cli.command {
            assert!(args.json);
        } else {
            panic!("expected check");
        }
    }

    #[test]
    fn cli_requires_input_and_output() {
        assert!(Cli::try_parse_from(["telgen", "generate", "-o", "out.ts"]).is_err());
        assert!(Cli::try_parse_from(["telgen", "generate", "-i", "a.json"]).is_err());
    }
}
