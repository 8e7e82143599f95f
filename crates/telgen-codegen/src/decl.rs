//! # Declaration Model
//!
//! Target-language declarations as plain data. The synthesizer builds a
//! list of [`Declaration`]s in emission order; the emitter is the only code
//! that knows how each one is spelled.

use std::fmt;

use telgen_core::MetadataKind;

use crate::accessor::AccessorTable;
use crate::table::RuntimeTable;

/// Fixed name of the runtime-definition shape interface.
pub const DEFINITION_SHAPE_NAME: &str = "MetricDefinition";
/// Fixed name of the metric name → metric type mapping interface.
pub const SHAPE_MAP_NAME: &str = "MetricShapes";
/// Fixed name of the metric-name union.
pub const NAME_UNION_NAME: &str = "MetricName";
/// Fixed name of the per-record metadata override type.
pub const METADATA_OVERRIDE_NAME: &str = "Metadata";
/// Fixed name of the span handle type.
pub const SPAN_NAME: &str = "Span";
/// Fixed name of the recorder type.
pub const RECORDER_NAME: &str = "Metric";
/// Fixed name of the runtime definitions constant.
pub const DEFINITIONS_CONST_NAME: &str = "definitions";

/// A type expression in a field position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// Text.
    String,
    /// Any numeric kind.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Reference to a declared type (a synthesized union).
    Named(String),
}

impl TypeExpr {
    /// Target type of a primitive metadata kind.
    pub fn from_kind(kind: MetadataKind) -> Self {
        match kind {
            MetadataKind::String => Self::String,
            MetadataKind::Int | MetadataKind::Double => Self::Number,
            MetadataKind::Boolean => Self::Boolean,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Boolean => f.write_str("boolean"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A read-only interface property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: TypeExpr,
    /// Emitted with `?`.
    pub optional: bool,
    /// Doc comment text.
    pub doc: Option<String>,
    /// Emitted with a `@deprecated` tag.
    pub deprecated: bool,
}

/// An exported interface, optionally extending one other interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Type name.
    pub name: String,
    /// Doc comment text.
    pub doc: Option<String>,
    /// Single supertype.
    pub extends: Option<String>,
    /// Properties in emission order.
    pub fields: Vec<Field>,
}

impl Interface {
    /// Look up a property by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A union of string literals: `type Result = 'Succeeded' | 'Failed'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionAlias {
    /// Type name.
    pub name: String,
    /// Literal members, in declaration order.
    pub literals: Vec<String>,
}

/// A base-type field owned by the telemetry client, not by any schema.
#[derive(Debug, Clone, Copy)]
pub struct InternalField {
    /// Property name.
    pub name: &'static str,
    /// Primitive type of the property.
    pub kind: MetadataKind,
    /// Doc comment text.
    pub doc: &'static str,
    /// Emitted with a `@deprecated` tag.
    pub deprecated: bool,
}

impl InternalField {
    /// The optional base-type property for this field.
    pub fn to_field(self) -> Field {
        Field {
            name: self.name.to_string(),
            ty: TypeExpr::from_kind(self.kind),
            optional: true,
            doc: Some(self.doc.to_string()),
            deprecated: self.deprecated,
        }
    }
}

/// Client-internal optional fields appended to the base type.
pub const INTERNAL_FIELDS: &[InternalField] = &[
    InternalField {
        name: "passive",
        kind: MetadataKind::Boolean,
        doc: "The metric was caused automatically rather than by a direct user action",
        deprecated: false,
    },
    InternalField {
        name: "trackPerformance",
        kind: MetadataKind::Boolean,
        doc: "The client records performance data alongside the metric",
        deprecated: false,
    },
    InternalField {
        name: "traceId",
        kind: MetadataKind::String,
        doc: "Identifier shared by every metric recorded within one traced operation",
        deprecated: false,
    },
    InternalField {
        name: "metricId",
        kind: MetadataKind::String,
        doc: "Unique identifier of this metric instance",
        deprecated: false,
    },
    InternalField {
        name: "parentId",
        kind: MetadataKind::String,
        doc: "Identifier of the enclosing metric, if any",
        deprecated: false,
    },
    InternalField {
        name: "value",
        kind: MetadataKind::Double,
        doc: "Arbitrary \"value\" of the metric",
        deprecated: true,
    },
];

/// True if `name` is a client-internal base field.
pub fn is_internal_field(name: &str) -> bool {
    INTERNAL_FIELDS.iter().any(|f| f.name == name)
}

/// One top-level item of the generated source, in emission order.
#[derive(Debug, Clone)]
pub enum Declaration {
    /// The base type or a per-metric type.
    Interface(Interface),
    /// A synthesized literal union.
    Union(UnionAlias),
    /// The fixed shape of one runtime table record.
    DefinitionShape,
    /// Metric name → metric type mapping.
    ShapeMap {
        /// `(metric name, type name)` pairs in metric order.
        entries: Vec<(String, String)>,
    },
    /// `keyof` the shape map.
    NameUnion,
    /// The runtime definitions constant.
    DefinitionsTable(RuntimeTable),
    /// Fields a caller may pass when recording an instance of `T`.
    MetadataOverride {
        /// Base type name.
        base: String,
        /// Common fields the caller may still set.
        overridable: Vec<String>,
    },
    /// Handle passed to instrumented callbacks.
    Span {
        /// Base type name, used as the parameter bound and default.
        base: String,
    },
    /// Per-metric recorder.
    Recorder {
        /// Base type name, used as the parameter bound and default.
        base: String,
    },
    /// Abstract class with one accessor per metric.
    AccessorBase(AccessorTable),
}

impl Declaration {
    /// The exported name this declaration introduces.
    pub fn name(&self) -> &str {
        match self {
            Self::Interface(i) => &i.name,
            Self::Union(u) => &u.name,
            Self::DefinitionShape => DEFINITION_SHAPE_NAME,
            Self::ShapeMap { .. } => SHAPE_MAP_NAME,
            Self::NameUnion => NAME_UNION_NAME,
            Self::DefinitionsTable(_) => DEFINITIONS_CONST_NAME,
            Self::MetadataOverride { .. } => METADATA_OVERRIDE_NAME,
            Self::Span { .. } => SPAN_NAME,
            Self::Recorder { .. } => RECORDER_NAME,
            Self::AccessorBase(table) => &table.class_name,
        }
    }
}
