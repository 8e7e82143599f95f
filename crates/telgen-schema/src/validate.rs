//! # Input Validation
//!
//! Turns raw definitions documents into a typed [`MetricDefinitionRoot`].
//!
//! Every document passes through the bundled
//! `telemetryDefinitions.schema.json` (Draft 2020-12) before serde sees it,
//! so shape errors are reported as JSON Pointer paths into the offending
//! file rather than as serde's positional messages. The validator is
//! compiled once and reused for every input of a run.
//!
//! Name resolution (does every referenced type exist, is every `type` a
//! known kind) is deliberately not checked here. That happens lazily in the
//! codegen resolver, where the metric being resolved is known.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use telgen_core::TelgenError;
use thiserror::Error;

use crate::model::MetricDefinitionRoot;

/// The definitions schema, embedded at compile time.
pub const DEFINITIONS_SCHEMA: &str = include_str!("../schemas/telemetryDefinitions.schema.json");

/// Name reported for violations of the embedded schema.
pub const DEFINITIONS_SCHEMA_NAME: &str = "telemetryDefinitions.schema.json";

/// Error while loading or validating a definitions document.
#[derive(Error, Debug)]
pub enum InputValidationError {
    /// The document did not conform to the definitions schema.
    #[error("{path} failed validation against '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Path of the offending document.
        path: String,
        /// Name of the schema that was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The document passed the schema but could not be mapped onto the model.
    #[error("document '{path}' does not match the definitions model: {reason}")]
    ModelMismatch {
        /// Path to the document.
        path: String,
        /// serde's description of the mismatch.
        reason: String,
    },

    /// The embedded schema could not be compiled.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema name.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },
}

impl InputValidationError {
    /// Path of the document the error is about, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::ValidationFailed { path, .. }
            | Self::DocumentLoadError { path, .. }
            | Self::ModelMismatch { path, .. } => Some(path),
            Self::ValidatorBuildError { .. } => None,
        }
    }
}

impl From<InputValidationError> for TelgenError {
    fn from(err: InputValidationError) -> Self {
        let path = err.path().unwrap_or(DEFINITIONS_SCHEMA_NAME).to_string();
        TelgenError::InputValidation {
            path,
            reason: err.to_string(),
        }
    }
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Compiled validator for definitions documents.
pub struct InputValidator {
    validator: Validator,
}

impl fmt::Debug for InputValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputValidator")
            .field("schema", &DEFINITIONS_SCHEMA_NAME)
            .finish()
    }
}

impl InputValidator {
    /// Compile the embedded definitions schema.
    ///
    /// # Errors
    ///
    /// Returns [`InputValidationError::ValidatorBuildError`] if the embedded
    /// schema is not valid JSON or not a valid Draft 2020-12 schema.
    pub fn new() -> Result<Self, InputValidationError> {
        let schema: Value = serde_json::from_str(DEFINITIONS_SCHEMA).map_err(|e| {
            InputValidationError::ValidatorBuildError {
                schema_name: DEFINITIONS_SCHEMA_NAME.to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| InputValidationError::ValidatorBuildError {
                schema_name: DEFINITIONS_SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { validator })
    }

    /// Validate a parsed document and map it onto the model.
    ///
    /// `source` names the document in error messages.
    pub fn validate_value(
        &self,
        instance: &Value,
        source: &str,
    ) -> Result<MetricDefinitionRoot, InputValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if !violations.is_empty() {
            return Err(InputValidationError::ValidationFailed {
                path: source.to_string(),
                schema_name: DEFINITIONS_SCHEMA_NAME.to_string(),
                violations: ValidationViolations { violations },
            });
        }

        let root: MetricDefinitionRoot = serde_json::from_value(instance.clone()).map_err(|e| {
            InputValidationError::ModelMismatch {
                path: source.to_string(),
                reason: e.to_string(),
            }
        })?;

        tracing::debug!(
            source,
            types = root.types.len(),
            metrics = root.metrics.len(),
            "validated definitions document"
        );

        Ok(root)
    }

    /// Parse raw document text and validate it.
    ///
    /// The format is chosen from the extension of `source_path`:
    /// `.yaml`/`.yml` parse as YAML, anything else as JSON.
    pub fn validate_input(
        &self,
        raw_text: &str,
        source_path: &Path,
    ) -> Result<MetricDefinitionRoot, InputValidationError> {
        let value = parse_document(raw_text, source_path)?;
        self.validate_value(&value, &source_path.display().to_string())
    }

    /// Read a definitions file from disk and validate it.
    pub fn load_document(&self, path: &Path) -> Result<MetricDefinitionRoot, InputValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            InputValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        self.validate_input(&content, path)
    }
}

/// Validate one raw document with a freshly compiled validator.
///
/// Convenience for single-document callers; runs that load several files
/// should build one [`InputValidator`] and reuse it.
pub fn validate_input(
    raw_text: &str,
    source_path: &Path,
) -> Result<MetricDefinitionRoot, InputValidationError> {
    InputValidator::new()?.validate_input(raw_text, source_path)
}

fn parse_document(raw_text: &str, source_path: &Path) -> Result<Value, InputValidationError> {
    let ext = source_path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "yaml" | "yml" => serde_yaml::from_str(raw_text).map_err(|e| {
            InputValidationError::DocumentLoadError {
                path: source_path.display().to_string(),
                reason: format!("invalid YAML: {e}"),
            }
        }),
        _ => serde_json::from_str(raw_text).map_err(|e| InputValidationError::DocumentLoadError {
            path: source_path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> InputValidator {
        InputValidator::new().expect("embedded schema compiles")
    }

    #[test]
    fn accepts_minimal_document() {
        let doc = json!({
            "types": [{ "name": "result", "allowedValues": ["Succeeded", "Failed"] }],
            "metrics": [{
                "name": "lambda_invoke",
                "description": "x",
                "metadata": [{ "type": "result", "required": true, "description": "r" }]
            }]
        });
        let root = validator().validate_value(&doc, "inline.json").unwrap();
        assert_eq!(root.types.len(), 1);
        assert_eq!(root.metrics[0].metadata[0].type_name, "result");
    }

    #[test]
    fn rejects_missing_description_with_pointer() {
        let doc = json!({ "metrics": [{ "name": "lambda_invoke" }] });
        let err = validator().validate_value(&doc, "bad.json").unwrap_err();
        match &err {
            InputValidationError::ValidationFailed { path, violations, .. } => {
                assert_eq!(path, "bad.json");
                assert!(violations
                    .violations()
                    .iter()
                    .any(|v| v.instance_path == "/metrics/0"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn rejects_both_allowed_values_and_type() {
        let doc = json!({
            "types": [{ "name": "result", "allowedValues": ["A"], "type": "string" }]
        });
        assert!(matches!(
            validator().validate_value(&doc, "both.json"),
            Err(InputValidationError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn rejects_unknown_unit() {
        let doc = json!({
            "metrics": [{ "name": "file_save", "description": "x", "unit": "Parsecs" }]
        });
        match validator().validate_value(&doc, "unit.json") {
            Err(InputValidationError::ValidationFailed { violations, .. }) => {
                let v = &violations.violations()[0];
                assert_eq!(v.instance_path, "/metrics/0/unit");
                assert!(v.schema_path.ends_with("/enum"), "{}", v.schema_path);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_top_level_key() {
        let doc = json!({ "types": [], "metrics": [], "extra": true });
        assert!(validator().validate_value(&doc, "extra.json").is_err());
    }

    #[test]
    fn leaves_unknown_kinds_to_the_resolver() {
        let doc = json!({ "types": [{ "name": "size", "type": "float" }] });
        let root = validator().validate_value(&doc, "kind.json").unwrap();
        assert_eq!(root.types[0].kind.as_deref(), Some("float"));
    }

    #[test]
    fn parses_yaml_by_extension() {
        let yaml = "types:\n  - name: source\nmetrics:\n  - name: ide_open\n    description: Opened\n";
        let root = validator()
            .validate_input(yaml, Path::new("defs.yaml"))
            .unwrap();
        assert_eq!(root.metrics[0].name, "ide_open");
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        let err = validate_input("{ not json", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, InputValidationError::DocumentLoadError { .. }));
        assert_eq!(err.path(), Some("broken.json"));
    }

    #[test]
    fn converts_into_top_level_error() {
        let err = validate_input("[]", Path::new("array.json")).unwrap_err();
        let top: TelgenError = err.into();
        assert!(top.to_string().contains("array.json"));
    }
}
