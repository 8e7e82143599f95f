//! # Shared Input Handling
//!
//! Loading of definitions documents and the generator configuration, shared
//! by every subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use telgen_codegen::GeneratorConfig;
use telgen_schema::{InputValidator, MetricDefinitionRoot};

/// Input options common to `generate` and `check`.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Definitions documents (JSON, or YAML by extension). Earlier files
    /// take precedence over later ones.
    #[arg(long = "input", short = 'i', value_name = "FILE", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Generator configuration (YAML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not merge the bundled common definitions.
    #[arg(long)]
    pub no_defaults: bool,
}

impl InputArgs {
    /// Load the configuration, applying `--no-defaults`.
    pub fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?,
            None => GeneratorConfig::default(),
        };
        if self.no_defaults {
            config.include_defaults = false;
        }
        Ok(config)
    }

    /// Load and validate every input document, in command-line order.
    pub fn load_documents(&self) -> Result<Vec<MetricDefinitionRoot>> {
        let validator = InputValidator::new().context("failed to compile the definitions schema")?;
        self.inputs
            .iter()
            .map(|path| load_one(&validator, path))
            .collect()
    }
}

fn load_one(validator: &InputValidator, path: &Path) -> Result<MetricDefinitionRoot> {
    let doc = validator.load_document(path)?;
    tracing::info!(
        path = %path.display(),
        types = doc.types.len(),
        metrics = doc.metrics.len(),
        "loaded definitions"
    );
    Ok(doc)
}
