//! # Generator Configuration
//!
//! Every field has a default, so an absent `--config` file and an empty one
//! mean the same thing. Unknown keys are rejected to catch typos.
//!
//! ```yaml
//! base_type_name: MetricBase
//! client_class_name: TelemetryBase
//! common_metadata: [awsAccount, awsRegion, duration, result]
//! overridable_metadata: [awsRegion]
//! include_defaults: true
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use telgen_core::{is_identifier, TelgenError};

use crate::decl::is_internal_field;

/// Metadata every generated metric inherits through the base type.
pub const DEFAULT_COMMON_METADATA: &[&str] = &[
    "awsAccount",
    "awsRegion",
    "duration",
    "httpStatusCode",
    "reason",
    "reasonDesc",
    "requestId",
    "requestServiceType",
    "result",
    "source",
];

/// Common metadata a caller may still pass explicitly when recording.
pub const DEFAULT_OVERRIDABLE_METADATA: &[&str] = &["awsRegion"];

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name of the interface every metric type extends.
    pub base_type_name: String,
    /// Name of the abstract class exposing one accessor per metric.
    pub client_class_name: String,
    /// Metadata type names carried by the base type.
    pub common_metadata: Vec<String>,
    /// Subset of `common_metadata` callers may override per record.
    pub overridable_metadata: Vec<String>,
    /// Merge the bundled common definitions after the user documents.
    pub include_defaults: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_type_name: "MetricBase".to_string(),
            client_class_name: "TelemetryBase".to_string(),
            common_metadata: DEFAULT_COMMON_METADATA.iter().map(|s| s.to_string()).collect(),
            overridable_metadata: DEFAULT_OVERRIDABLE_METADATA
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_defaults: true,
        }
    }
}

impl GeneratorConfig {
    /// Parse and validate a YAML configuration document.
    pub fn from_yaml_str(content: &str) -> Result<Self, TelgenError> {
        // An empty document deserializes as unit, not as an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| TelgenError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self, TelgenError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TelgenError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded generator configuration");
        Ok(config)
    }

    /// Check internal consistency.
    ///
    /// Type names must be identifiers, common metadata must be unique and
    /// must not shadow client-internal base fields, and every overridable
    /// name must be common.
    pub fn validate(&self) -> Result<(), TelgenError> {
        for (key, value) in [
            ("base_type_name", &self.base_type_name),
            ("client_class_name", &self.client_class_name),
        ] {
            if !is_identifier(value) {
                return Err(TelgenError::Config(format!(
                    "{key} \"{value}\" is not a valid type name"
                )));
            }
        }

        let mut seen = HashSet::new();
        for name in &self.common_metadata {
            if !seen.insert(name.as_str()) {
                return Err(TelgenError::Config(format!(
                    "common_metadata lists \"{name}\" more than once"
                )));
            }
            if is_internal_field(name) {
                return Err(TelgenError::Config(format!(
                    "common_metadata \"{name}\" collides with a client-internal base field"
                )));
            }
        }

        for name in &self.overridable_metadata {
            if !seen.contains(name.as_str()) {
                return Err(TelgenError::Config(format!(
                    "overridable_metadata \"{name}\" is not in common_metadata"
                )));
            }
        }

        Ok(())
    }

    /// True if `name` is carried by the base type.
    pub fn is_common(&self, name: &str) -> bool {
        self.common_metadata.iter().any(|c| c == name)
    }
}
