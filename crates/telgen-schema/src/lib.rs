//! # telgen-schema — Telemetry Definition Documents
//!
//! Everything between a definitions file on disk and one merged, typed
//! [`MetricDefinitionRoot`]:
//!
//! - [`model`] — the in-memory schema (`MetadataType`, `Metric`, ...).
//! - [`validate`] — JSON/YAML parsing and JSON Schema validation against
//!   the embedded `telemetryDefinitions.schema.json`.
//! - [`defaults`] — the bundled common metadata definitions.
//! - [`merge`] — first-wins concatenation and name deduplication.
//!
//! ## Crate Policy
//!
//! - Depends only on `telgen-core` internally.
//! - Validation is a trust boundary: nothing downstream re-checks shapes,
//!   so a document that reaches the model has passed the schema.

pub mod defaults;
pub mod merge;
pub mod model;
pub mod validate;

pub use defaults::{common_definitions, COMMON_DEFINITIONS_SOURCE};
pub use merge::{dedupe_by_name, merge_documents};
pub use model::{MetadataType, Metric, MetricDefinitionRoot, MetricMetadataRef, Named};
pub use validate::{
    validate_input, InputValidationError, InputValidator, ValidationViolations, Violation,
};
