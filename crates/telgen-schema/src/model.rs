//! # Schema Model
//!
//! In-memory representation of a validated definitions document. Field
//! names follow the document spelling (`allowedValues`, `trackPerformance`)
//! through serde renames.

use serde::{Deserialize, Serialize};
use telgen_core::pascal_case;

/// A named, reusable metadata field kind.
///
/// Either enumerated (`allowed_values`) or primitive (`kind`), never both.
/// Declaring neither means string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataType {
    /// Field name as it appears on generated metric types.
    pub name: String,
    /// Documentation carried onto every field of this type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Closed set of literal values, in declaration order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_values: Option<Vec<String>>,
    /// Primitive kind as written. Checked during resolution, not here.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MetadataType {
    /// A string-typed metadata declaration.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            allowed_values: None,
            kind: None,
        }
    }

    /// A primitive-typed metadata declaration.
    pub fn primitive(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::string(name)
        }
    }

    /// An enumerated metadata declaration.
    pub fn enumerated<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::string(name)
        }
    }

    /// Name of the union type synthesized for an enumerated declaration.
    pub fn union_name(&self) -> String {
        pascal_case(&self.name)
    }
}

/// A metric's reference to a metadata type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricMetadataRef {
    /// Name of the referenced [`MetadataType`].
    #[serde(rename = "type")]
    pub type_name: String,
    /// Explicit requiredness. Absent means required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Per-metric documentation for the field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MetricMetadataRef {
    /// A required reference.
    pub fn required(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            required: Some(true),
            description: None,
        }
    }

    /// An optional reference.
    pub fn optional(type_name: impl Into<String>) -> Self {
        Self {
            required: Some(false),
            ..Self::required(type_name)
        }
    }

    /// Requiredness with the metric-specific default applied.
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(true)
    }
}

/// A named telemetry event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// snake_case identifier, used as the runtime table key.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Unit of the metric's value (`None`, `Milliseconds`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Whether the event is emitted without direct user action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passive: Option<bool>,
    /// Whether the client should record performance data for the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_performance: Option<bool>,
    /// Metadata references, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetricMetadataRef>,
}

impl Metric {
    /// A metric with no unit, flags, or metadata.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            unit: None,
            passive: None,
            track_performance: None,
            metadata: Vec::new(),
        }
    }

    /// Builder-style helper appending a metadata reference.
    pub fn with_metadata(mut self, reference: MetricMetadataRef) -> Self {
        self.metadata.push(reference);
        self
    }

    /// PascalCase type name derived from the snake_case metric name.
    pub fn type_name(&self) -> String {
        pascal_case(&self.name)
    }
}

/// One definitions document, or the merge of several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinitionRoot {
    /// Metadata type declarations.
    #[serde(default)]
    pub types: Vec<MetadataType>,
    /// Metric declarations.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl MetricDefinitionRoot {
    /// Look up a metadata type by name.
    pub fn metadata_type(&self, name: &str) -> Option<&MetadataType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Look up a metric by name.
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// Entities deduplicated by name during merging.
pub trait Named {
    /// The deduplication key.
    fn name(&self) -> &str;
}

impl Named for MetadataType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Metric {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_document_spelling() {
        let doc: MetricDefinitionRoot = serde_json::from_value(json!({
            "types": [
                { "name": "result", "allowedValues": ["Succeeded", "Failed"] },
                { "name": "duration", "type": "double", "description": "ms" }
            ],
            "metrics": [{
                "name": "lambda_invoke",
                "description": "Invoke a Lambda",
                "unit": "Milliseconds",
                "trackPerformance": true,
                "metadata": [{ "type": "result" }, { "type": "duration", "required": false }]
            }]
        }))
        .unwrap();

        assert_eq!(
            doc.types[0].allowed_values.as_deref(),
            Some(&["Succeeded".to_string(), "Failed".to_string()][..])
        );
        assert_eq!(doc.types[1].kind.as_deref(), Some("double"));
        let metric = &doc.metrics[0];
        assert_eq!(metric.track_performance, Some(true));
        assert_eq!(metric.passive, None);
        assert!(metric.metadata[0].is_required());
        assert!(!metric.metadata[1].is_required());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let doc: MetricDefinitionRoot = serde_json::from_value(json!({})).unwrap();
        assert!(doc.types.is_empty());
        assert!(doc.metrics.is_empty());
    }

    #[test]
    fn derived_names() {
        let metric = Metric::new("lambda_invoke", "x");
        assert_eq!(metric.type_name(), "LambdaInvoke");
        assert_eq!(MetadataType::enumerated("result", ["A"]).union_name(), "Result");
    }

    #[test]
    fn lookups() {
        let doc = MetricDefinitionRoot {
            types: vec![MetadataType::string("source")],
            metrics: vec![Metric::new("ide_open", "Opened")],
        };
        assert!(doc.metadata_type("source").is_some());
        assert!(doc.metadata_type("result").is_none());
        assert!(doc.metric("ide_open").is_some());
    }
}
