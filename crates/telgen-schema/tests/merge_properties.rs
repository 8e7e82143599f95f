//! Property tests for the first-wins document merger.

use proptest::prelude::*;
use telgen_schema::{
    merge_documents, MetadataType, Metric, MetricDefinitionRoot, MetricMetadataRef,
};

fn metadata_type() -> impl Strategy<Value = MetadataType> {
    let name = "[a-e]{1,2}";
    prop_oneof![
        name.prop_map(MetadataType::string),
        (name, prop_oneof![Just("int"), Just("double"), Just("boolean")])
            .prop_map(|(n, k)| MetadataType::primitive(n, k)),
        (name, prop::collection::vec("[A-Z][a-z]{1,5}", 1..4))
            .prop_map(|(n, values)| MetadataType::enumerated(n, values)),
    ]
}

fn metric() -> impl Strategy<Value = Metric> {
    (
        "[a-c]{1,2}_[a-c]{1,2}",
        "[a-z ]{0,12}",
        prop::collection::vec(("[a-e]{1,2}", any::<Option<bool>>()), 0..4),
    )
        .prop_map(|(name, description, refs)| {
            let mut m = Metric::new(name, description);
            for (type_name, required) in refs {
                m = m.with_metadata(MetricMetadataRef {
                    type_name,
                    required,
                    description: None,
                });
            }
            m
        })
}

fn document() -> impl Strategy<Value = MetricDefinitionRoot> {
    (
        prop::collection::vec(metadata_type(), 0..8),
        prop::collection::vec(metric(), 0..8),
    )
        .prop_map(|(types, metrics)| MetricDefinitionRoot { types, metrics })
}

fn unique<'a>(names: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = std::collections::HashSet::new();
    names.into_iter().all(|n| seen.insert(n))
}

proptest! {
    /// Every name is unique after merging.
    #[test]
    fn merged_names_are_unique(docs in prop::collection::vec(document(), 0..4)) {
        let merged = merge_documents(docs);
        prop_assert!(unique(merged.types.iter().map(|t| t.name.as_str())));
        prop_assert!(unique(merged.metrics.iter().map(|m| m.name.as_str())));
    }

    /// Merging a document with itself equals merging it once.
    #[test]
    fn merge_is_idempotent(doc in document()) {
        let once = merge_documents([doc.clone()]);
        let twice = merge_documents([doc.clone(), doc]);
        prop_assert_eq!(once, twice);
    }

    /// Re-merging a merged result changes nothing.
    #[test]
    fn merge_is_stable(docs in prop::collection::vec(document(), 0..4)) {
        let merged = merge_documents(docs);
        prop_assert_eq!(merge_documents([merged.clone()]), merged);
    }

    /// For a shared name, the earlier document's declaration survives.
    #[test]
    fn first_declaration_wins(a in document(), b in document()) {
        let merged = merge_documents([a.clone(), b.clone()]);
        for t in &merged.types {
            let expected = a.metadata_type(&t.name).or_else(|| b.metadata_type(&t.name));
            prop_assert_eq!(Some(t), expected);
        }
        for m in &merged.metrics {
            let expected = a.metric(&m.name).or_else(|| b.metric(&m.name));
            prop_assert_eq!(Some(m), expected);
        }
    }
}
