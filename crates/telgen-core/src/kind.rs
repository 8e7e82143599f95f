//! # Metadata Kinds — Closed Variant Set
//!
//! A metadata type is either enumerated (it lists `allowedValues`) or it
//! declares one of the primitive kinds below. Definitions keep the raw
//! `type` string; it becomes a [`MetadataKind`] at resolution time, which is
//! where an unrecognized kind can be reported together with the metric that
//! needed it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A primitive metadata kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKind {
    /// Free-form text. Also the kind of a metadata type that declares nothing.
    String,
    /// Integral number.
    Int,
    /// Floating-point number.
    Double,
    /// `true` / `false`.
    Boolean,
}

impl MetadataKind {
    /// Return all kinds as a slice.
    pub fn all() -> &'static [MetadataKind] {
        &[Self::String, Self::Int, Self::Double, Self::Boolean]
    }

    /// Resolve an optional declared kind. An absent kind defaults to
    /// [`MetadataKind::String`]; an unrecognized one returns `None`.
    pub fn from_declared(declared: Option<&str>) -> Option<Self> {
        match declared {
            None => Some(Self::String),
            Some(raw) => raw.parse().ok(),
        }
    }

    /// The spelling used in definition documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Double => "double",
            Self::Boolean => "boolean",
        }
    }
}

impl FromStr for MetadataKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "int" => Ok(Self::Int),
            "double" => Ok(Self::Double),
            "boolean" => Ok(Self::Boolean),
            other => Err(format!("unknown metadata kind: {other}")),
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_kind_is_string() {
        assert_eq!(MetadataKind::from_declared(None), Some(MetadataKind::String));
    }

    #[test]
    fn unknown_kind_is_none() {
        assert_eq!(MetadataKind::from_declared(Some("float")), None);
        assert_eq!(MetadataKind::from_declared(Some("String")), None);
    }

    #[test]
    fn display_matches_parse() {
        for kind in MetadataKind::all() {
            assert_eq!(kind.to_string().parse::<MetadataKind>(), Ok(*kind));
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&MetadataKind::Boolean).unwrap();
        assert_eq!(json, "\"boolean\"");
        let back: MetadataKind = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(back, MetadataKind::Double);
    }
}
