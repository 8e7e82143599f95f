//! # Schema Merger
//!
//! Combines several validated documents into one. Documents are
//! concatenated in input order and then deduplicated by name, keeping the
//! first occurrence: an earlier document overrides a later one.
//!
//! The merger never validates shapes or references. Its inputs already
//! passed [`crate::validate`], and dangling references are reported by the
//! resolver with the metric that holds them.

use std::collections::HashSet;

use crate::model::{MetricDefinitionRoot, Named};

/// Merge documents with first-wins deduplication of types and metrics.
pub fn merge_documents<I>(documents: I) -> MetricDefinitionRoot
where
    I: IntoIterator<Item = MetricDefinitionRoot>,
{
    let mut types = Vec::new();
    let mut metrics = Vec::new();
    let mut count = 0usize;
    for doc in documents {
        types.extend(doc.types);
        metrics.extend(doc.metrics);
        count += 1;
    }

    let merged = MetricDefinitionRoot {
        types: dedupe_by_name(types, "type"),
        metrics: dedupe_by_name(metrics, "metric"),
    };

    tracing::debug!(
        documents = count,
        types = merged.types.len(),
        metrics = merged.metrics.len(),
        "merged definitions"
    );

    merged
}

/// Keep the first item for each name, preserving order.
pub fn dedupe_by_name<T: Named>(items: Vec<T>, what: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.name().to_string()) {
            kept.push(item);
        } else {
            tracing::debug!(kind = what, name = item.name(), "dropping shadowed definition");
        }
    }
    kept
}
