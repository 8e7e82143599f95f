//! # telgen-codegen — Type Synthesis and Emission
//!
//! Turns one merged [`MetricDefinitionRoot`] into TypeScript source.
//!
//! ## Pipeline
//!
//! 1. [`resolve`] maps metadata types to field types, registering each
//!    enumerated type's literal union once per run.
//! 2. [`synth`] resolves every metric into a [`ResolvedMetric`] and builds
//!    the declaration list: base type, metric types, unions, the runtime
//!    [`table`], the recorder types and the [`accessor`] base class.
//! 3. [`emit`] spells the declarations out as source text.
//!
//! ## Crate Policy
//!
//! - Declarations are data ([`decl`]); only [`emit`] knows target syntax.
//! - A metric's static type and its runtime record are projections of the
//!   same [`ResolvedMetric`], so `requiredMetadata` always lists exactly
//!   the non-optional fields the metric type declares.
//! - No state outlives a run. Each [`generate`] call owns its own union
//!   registry.

pub mod accessor;
pub mod config;
pub mod decl;
pub mod emit;
pub mod resolve;
pub mod synth;
pub mod table;

pub use accessor::{Accessor, AccessorTable};
pub use config::GeneratorConfig;
pub use decl::{Declaration, Field, Interface, TypeExpr, UnionAlias};
pub use resolve::{TypeResolver, UnionRegistry};
pub use synth::{synthesize, GeneratedUnit, ResolvedField, ResolvedMetric, Synthesizer};
pub use table::{RuntimeRecord, RuntimeTable};

use telgen_core::TelgenError;
use telgen_schema::{common_definitions, merge_documents, InputValidator, MetricDefinitionRoot};

/// Validate `config` and synthesize every declaration for `schema`.
pub fn generate(
    schema: &MetricDefinitionRoot,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, TelgenError> {
    config.validate()?;
    Ok(synthesize(schema, config)?)
}

/// Merge validated documents and generate the unit for them.
///
/// When `config.include_defaults` is set the bundled common definitions are
/// merged after `documents`, so any user definition of the same name wins.
pub fn generate_documents(
    documents: Vec<MetricDefinitionRoot>,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, TelgenError> {
    let mut documents = documents;
    if config.include_defaults {
        let validator = InputValidator::new()?;
        documents.push(common_definitions(&validator)?);
    }
    let merged = merge_documents(documents);
    tracing::debug!(
        types = merged.types.len(),
        metrics = merged.metrics.len(),
        "merged definition documents"
    );
    generate(&merged, config)
}

/// Merge, generate and render in one step.
pub fn compile(
    documents: Vec<MetricDefinitionRoot>,
    config: &GeneratorConfig,
) -> Result<String, TelgenError> {
    Ok(generate_documents(documents, config)?.render())
}
