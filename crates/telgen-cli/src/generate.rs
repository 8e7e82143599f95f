//! # Generate Subcommand
//!
//! Compiles definitions documents into one TypeScript file.
//!
//! The output is written to a temporary file next to the destination and
//! renamed into place. A run that fails at any step leaves an existing
//! output untouched and never creates a partial one.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::input::InputArgs;

/// Arguments for the `telgen generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Destination of the generated TypeScript source.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: PathBuf,
}

/// Execute the generate subcommand.
///
/// Returns exit code 0 on success. Every failure is an error.
pub fn run_generate(args: &GenerateArgs) -> Result<u8> {
    let config = args.input.load_config()?;
    let documents = args.input.load_documents()?;
    let source = telgen_codegen::compile(documents, &config)
        .context("failed to generate type definitions")?;

    write_atomic(&args.output, source.as_bytes())?;
    tracing::info!(
        output = %args.output.display(),
        bytes = source.len(),
        "wrote type definitions"
    );
    Ok(0)
}

/// Write `contents` to `path` through a sibling temporary file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create a temporary file in {}", dir.display()))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.flush())
        .with_context(|| format!("failed to write {}", tmp.path().display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to move output into place at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_atomic_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("telemetry.gen.ts");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_atomic_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.ts");
        assert!(write_atomic(&path, b"x").is_err());
        assert!(!path.exists());
    }
}
