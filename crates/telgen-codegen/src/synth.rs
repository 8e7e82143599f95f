//! # Declaration Synthesizer
//!
//! Builds every declaration of the generated source from one merged schema.
//!
//! Each metric is resolved exactly once into a [`ResolvedMetric`]. Its
//! static interface and its runtime table record are both projections of
//! that value, so the two can never disagree about which fields a metric
//! requires.
//!
//! ## Field policy
//!
//! - Metric-specific references become fields of the metric interface,
//!   optional iff the reference says `required: false`.
//! - References to common metadata are already inherited (optional) from
//!   the base type. An optional one adds nothing; a required one is
//!   re-declared without `?`, narrowing the inherited field.
//! - A metric-specific reference named like a client-internal base field
//!   (`traceId`, `value`, ...) is rejected instead of shadowing it.

use std::collections::{HashMap, HashSet};

use telgen_core::{is_identifier, ResolutionError};
use telgen_schema::{Metric, MetricDefinitionRoot};

use crate::accessor::AccessorTable;
use crate::config::GeneratorConfig;
use crate::decl::{
    is_internal_field, Declaration, Field, Interface, TypeExpr, UnionAlias,
    DEFINITION_SHAPE_NAME, INTERNAL_FIELDS, METADATA_OVERRIDE_NAME, NAME_UNION_NAME,
    RECORDER_NAME, SHAPE_MAP_NAME, SPAN_NAME,
};
use crate::resolve::TypeResolver;
use crate::table::RuntimeTable;

/// One metadata reference of a metric, resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Field name (the metadata type name).
    pub name: String,
    /// Resolved field type.
    pub ty: TypeExpr,
    /// Requiredness with the metric-specific default applied.
    pub required: bool,
    /// The field is common metadata carried by the base type.
    pub inherited: bool,
    /// Doc comment text.
    pub doc: Option<String>,
}

impl ResolvedField {
    /// Whether the metric interface declares this field itself.
    pub fn is_declared(&self) -> bool {
        !self.inherited || self.required
    }

    fn to_field(&self) -> Field {
        Field {
            name: self.name.clone(),
            ty: self.ty.clone(),
            optional: !self.required,
            doc: self.doc.clone(),
            deprecated: false,
        }
    }
}

/// A metric with every reference resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMetric {
    /// snake_case metric name.
    pub name: String,
    /// PascalCase interface name.
    pub type_name: String,
    /// Metric description.
    pub description: String,
    /// Declared unit.
    pub unit: Option<String>,
    /// Passive flag with default applied.
    pub passive: bool,
    /// Performance-tracking flag with default applied.
    pub track_performance: bool,
    /// Resolved references, in declaration order, without duplicates.
    pub fields: Vec<ResolvedField>,
}

impl ResolvedMetric {
    /// Names of required fields, in declaration order.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }

    /// The metric interface, extending `base`.
    pub fn interface(&self, base: &str) -> Interface {
        Interface {
            name: self.type_name.clone(),
            doc: Some(self.description.clone()),
            extends: Some(base.to_string()),
            fields: self
                .fields
                .iter()
                .filter(|f| f.is_declared())
                .map(ResolvedField::to_field)
                .collect(),
        }
    }
}

/// Everything one run produces, in emission order.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// Resolved metrics, in merged order.
    pub metrics: Vec<ResolvedMetric>,
    /// Top-level declarations, in emission order.
    pub declarations: Vec<Declaration>,
}

impl GeneratedUnit {
    /// Look up an emitted interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::Interface(i) if i.name == name => Some(i),
            _ => None,
        })
    }

    /// Emitted literal unions.
    pub fn unions(&self) -> impl Iterator<Item = &UnionAlias> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Union(u) => Some(u),
            _ => None,
        })
    }

    /// The runtime definitions table.
    pub fn runtime_table(&self) -> Option<&RuntimeTable> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::DefinitionsTable(t) => Some(t),
            _ => None,
        })
    }

    /// The accessor table of the client base class.
    pub fn accessors(&self) -> Option<&AccessorTable> {
        self.declarations.iter().find_map(|d| match d {
            Declaration::AccessorBase(t) => Some(t),
            _ => None,
        })
    }

    /// Render the unit as source text.
    pub fn render(&self) -> String {
        crate::emit::render(&self.declarations)
    }
}

/// One synthesis run over a merged schema.
#[derive(Debug)]
pub struct Synthesizer<'a> {
    config: &'a GeneratorConfig,
    schema: &'a MetricDefinitionRoot,
    resolver: TypeResolver<'a>,
}

impl<'a> Synthesizer<'a> {
    /// Start a run. The config is assumed to have passed
    /// [`GeneratorConfig::validate`].
    pub fn new(schema: &'a MetricDefinitionRoot, config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            schema,
            resolver: TypeResolver::new(&schema.types),
        }
    }

    /// The base type: common metadata, then client-internal fields.
    pub fn base_type(&mut self) -> Result<Interface, ResolutionError> {
        let owner = self.config.base_type_name.as_str();
        let mut fields =
            Vec::with_capacity(self.config.common_metadata.len() + INTERNAL_FIELDS.len());

        for name in &self.config.common_metadata {
            let metadata = self.resolver.get_type_or_throw(name, owner)?;
            let ty = self.resolver.resolve(metadata, owner)?;
            fields.push(Field {
                name: name.clone(),
                ty,
                optional: true,
                doc: metadata.description.clone(),
                deprecated: false,
            });
        }
        fields.extend(INTERNAL_FIELDS.iter().map(|f| f.to_field()));

        Ok(Interface {
            name: self.config.base_type_name.clone(),
            doc: Some("Metadata shared by every metric".to_string()),
            extends: None,
            fields,
        })
    }

    /// Resolve every reference of one metric.
    pub fn resolve_metric(&mut self, metric: &Metric) -> Result<ResolvedMetric, ResolutionError> {
        let mut fields = Vec::with_capacity(metric.metadata.len());
        let mut seen = HashSet::new();

        for reference in &metric.metadata {
            let name = reference.type_name.as_str();
            if !seen.insert(name) {
                tracing::debug!(
                    metric = %metric.name,
                    field = name,
                    "ignoring repeated metadata reference"
                );
                continue;
            }
            if is_internal_field(name) {
                return Err(ResolutionError::ReservedFieldCollision {
                    metric: metric.name.clone(),
                    field: name.to_string(),
                });
            }

            let metadata = self.resolver.get_type_or_throw(name, &metric.name)?;
            let ty = self.resolver.resolve(metadata, &metric.name)?;
            let doc = reference
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .or_else(|| metadata.description.clone());

            fields.push(ResolvedField {
                name: name.to_string(),
                ty,
                required: reference.is_required(),
                inherited: self.config.is_common(name),
                doc,
            });
        }

        Ok(ResolvedMetric {
            name: metric.name.clone(),
            type_name: metric.type_name(),
            description: metric.description.clone(),
            unit: metric.unit.clone(),
            passive: metric.passive.unwrap_or(false),
            track_performance: metric.track_performance.unwrap_or(false),
            fields,
        })
    }

    /// Resolve the whole schema and assemble the declarations.
    pub fn run(mut self) -> Result<GeneratedUnit, ResolutionError> {
        // The base type is complete before any metric type is built on it.
        let base = self.base_type()?;
        let schema = self.schema;
        let metrics = schema
            .metrics
            .iter()
            .map(|m| self.resolve_metric(m))
            .collect::<Result<Vec<_>, _>>()?;
        let unions = self.resolver.into_registry().into_unions();

        check_type_names(self.config, &metrics, &unions)?;

        let base_name = self.config.base_type_name.clone();
        let mut declarations = Vec::with_capacity(metrics.len() + unions.len() + 10);
        declarations.push(Declaration::Interface(base));
        declarations.extend(
            metrics
                .iter()
                .map(|m| Declaration::Interface(m.interface(&base_name))),
        );
        declarations.extend(unions.iter().cloned().map(Declaration::Union));
        declarations.push(Declaration::DefinitionShape);
        declarations.push(Declaration::ShapeMap {
            entries: metrics
                .iter()
                .map(|m| (m.name.clone(), m.type_name.clone()))
                .collect(),
        });
        declarations.push(Declaration::NameUnion);
        declarations.push(Declaration::DefinitionsTable(RuntimeTable::from_metrics(&metrics)));
        declarations.push(Declaration::MetadataOverride {
            base: base_name.clone(),
            overridable: self.config.overridable_metadata.clone(),
        });
        declarations.push(Declaration::Span {
            base: base_name.clone(),
        });
        declarations.push(Declaration::Recorder { base: base_name });
        declarations.push(Declaration::AccessorBase(AccessorTable::from_metrics(
            &self.config.client_class_name,
            &metrics,
        )));

        tracing::info!(
            metrics = metrics.len(),
            unions = unions.len(),
            declarations = declarations.len(),
            "synthesized declarations"
        );

        Ok(GeneratedUnit {
            metrics,
            declarations,
        })
    }
}

/// Resolve `schema` into a [`GeneratedUnit`].
pub fn synthesize(
    schema: &MetricDefinitionRoot,
    config: &GeneratorConfig,
) -> Result<GeneratedUnit, ResolutionError> {
    Synthesizer::new(schema, config).run()
}

/// Every exported type name must have exactly one claimant.
fn check_type_names(
    config: &GeneratorConfig,
    metrics: &[ResolvedMetric],
    unions: &[UnionAlias],
) -> Result<(), ResolutionError> {
    let mut claims: HashMap<String, String> = HashMap::new();
    let mut claim = |name: &str, by: String| match claims.get(name) {
        Some(existing) => Err(ResolutionError::TypeNameCollision {
            name: name.to_string(),
            existing: existing.clone(),
            incoming: by,
        }),
        None => {
            claims.insert(name.to_string(), by);
            Ok(())
        }
    };

    claim(&config.base_type_name, "the base type".to_string())?;
    claim(&config.client_class_name, "the client base class".to_string())?;
    for (name, what) in [
        (DEFINITION_SHAPE_NAME, "the runtime definition shape"),
        (SHAPE_MAP_NAME, "the metric shape map"),
        (NAME_UNION_NAME, "the metric name union"),
        (METADATA_OVERRIDE_NAME, "the metadata override type"),
        (SPAN_NAME, "the span type"),
        (RECORDER_NAME, "the recorder type"),
    ] {
        claim(name, what.to_string())?;
    }
    for m in metrics {
        if !is_identifier(&m.type_name) {
            return Err(ResolutionError::InvalidTypeName {
                metric: m.name.clone(),
                name: m.type_name.clone(),
            });
        }
        claim(&m.type_name, format!("metric \"{}\"", m.name))?;
    }
    for u in unions {
        claim(&u.name, format!("the literal union \"{}\"", u.name))?;
    }
    Ok(())
}
