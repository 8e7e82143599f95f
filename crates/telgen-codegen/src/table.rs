//! # Runtime Definitions Table
//!
//! One record per metric, derived from the same [`ResolvedMetric`] the
//! static interface is built from. `requiredMetadata` is therefore exactly
//! the set of non-optional fields the metric type declares on top of the
//! base type.

use serde::Serialize;

use crate::synth::ResolvedMetric;

/// Unit recorded for metrics that declare none.
pub const DEFAULT_UNIT: &str = "None";

/// Runtime view of one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeRecord {
    /// Declared unit, or [`DEFAULT_UNIT`].
    pub unit: String,
    /// Declared passive flag, or `false`.
    pub passive: bool,
    /// Declared performance-tracking flag, or `false`.
    pub track_performance: bool,
    /// Names of required metadata, in declaration order.
    pub required_metadata: Vec<String>,
}

impl From<&ResolvedMetric> for RuntimeRecord {
    fn from(metric: &ResolvedMetric) -> Self {
        Self {
            unit: metric.unit.clone().unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            passive: metric.passive,
            track_performance: metric.track_performance,
            required_metadata: metric.required_fields().map(str::to_string).collect(),
        }
    }
}

/// Records keyed by metric name, in metric order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeTable {
    entries: Vec<(String, RuntimeRecord)>,
}

impl RuntimeTable {
    /// Build the table for resolved metrics.
    pub fn from_metrics(metrics: &[ResolvedMetric]) -> Self {
        Self {
            entries: metrics
                .iter()
                .map(|m| (m.name.clone(), RuntimeRecord::from(m)))
                .collect(),
        }
    }

    /// Look up a metric's record.
    pub fn get(&self, name: &str) -> Option<&RuntimeRecord> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, record)| record)
    }

    /// Iterate `(metric name, record)` pairs in metric order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuntimeRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The table as a JSON object keyed by metric name.
    pub fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(name, record)| {
                (
                    name.clone(),
                    serde_json::to_value(record).unwrap_or(serde_json::Value::Null),
                )
            })
            .collect();
        serde_json::Value::Object(map)
    }
}
