//! # Accessor Table
//!
//! The generated client base class exposes one read-only accessor per
//! metric, each delegating to a single abstract `getMetric(name)`. That is a
//! dispatch table, so it is modeled as one: a list of (metric, type)
//! entries that the emitter walks once.

use crate::synth::ResolvedMetric;

/// One accessor of the client base class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    /// Metric name, used as the accessor name and the `getMetric` key.
    pub metric: String,
    /// Metric type the returned recorder is parametrized with.
    pub shape: String,
    /// Doc comment text.
    pub doc: String,
}

/// Every accessor of the client base class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorTable {
    /// Name of the abstract class.
    pub class_name: String,
    /// Accessors in metric order.
    pub accessors: Vec<Accessor>,
}

impl AccessorTable {
    /// Build the table for resolved metrics.
    pub fn from_metrics(class_name: &str, metrics: &[ResolvedMetric]) -> Self {
        Self {
            class_name: class_name.to_string(),
            accessors: metrics
                .iter()
                .map(|m| Accessor {
                    metric: m.name.clone(),
                    shape: m.type_name.clone(),
                    doc: m.description.clone(),
                })
                .collect(),
        }
    }

    /// Look up the accessor for a metric.
    pub fn get(&self, metric: &str) -> Option<&Accessor> {
        self.accessors.iter().find(|a| a.metric == metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, type_name: &str) -> ResolvedMetric {
        ResolvedMetric {
            name: name.to_string(),
            type_name: type_name.to_string(),
            description: format!("Emitted on {name}"),
            unit: None,
            passive: false,
            track_performance: false,
            fields: vec![],
        }
    }

    #[test]
    fn one_accessor_per_metric_in_order() {
        let table = AccessorTable::from_metrics(
            "TelemetryBase",
            &[metric("lambda_invoke", "LambdaInvoke"), metric("file_save", "FileSave")],
        );
        assert_eq!(table.class_name, "TelemetryBase");
        let metrics: Vec<&str> = table.accessors.iter().map(|a| a.metric.as_str()).collect();
        assert_eq!(metrics, ["lambda_invoke", "file_save"]);

        let accessor = table.get("file_save").unwrap();
        assert_eq!(accessor.shape, "FileSave");
        assert_eq!(accessor.doc, "Emitted on file_save");
    }

    #[test]
    fn unknown_metric_has_no_accessor() {
        let table = AccessorTable::from_metrics("TelemetryBase", &[]);
        assert!(table.accessors.is_empty());
        assert!(table.get("lambda_invoke").is_none());
    }
}
