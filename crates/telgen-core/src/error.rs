//! # Error Hierarchy
//!
//! Structured error types for telgen, built with `thiserror`.
//!
//! The generator is a build step: every error is fatal, surfaces to the
//! caller unchanged, and carries enough context (file, metric, field) to fix
//! the offending definition without guesswork.

use thiserror::Error;

/// Top-level error type for a generator run.
#[derive(Error, Debug)]
pub enum TelgenError {
    /// An input document was unreadable, malformed, or rejected by the
    /// definitions schema.
    #[error("input validation error in {path}: {reason}")]
    InputValidation {
        /// Path (or bundled resource name) of the offending document.
        path: String,
        /// Human-readable description of every violation.
        reason: String,
    },

    /// A metric could not be resolved against the merged type set.
    #[error("resolution error: {0}")]
    Resolution(#[from] ResolutionError),

    /// The generator configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while resolving metrics into declarations.
///
/// These are semantic failures of an otherwise well-formed schema: the
/// shapes are valid, but the names do not line up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A metric references a metadata type absent from the merged type set.
    #[error("metric \"{metric}\" references undeclared metadata type \"{name}\"")]
    UnknownMetadataType {
        /// The metric (or base type) holding the reference.
        metric: String,
        /// The missing metadata type name.
        name: String,
    },

    /// A metadata type declares a `type` outside the recognized kinds.
    #[error("unknown type \"{kind}\" in metadata \"{metadata}\" (used by \"{owner}\")")]
    UnknownKind {
        /// The metadata type carrying the bad kind.
        metadata: String,
        /// The kind as written in the definition.
        kind: String,
        /// The metric (or base type) being resolved when it was found.
        owner: String,
    },

    /// A metric-specific field would shadow a client-internal base field.
    #[error("metric \"{metric}\" declares field \"{field}\" which is reserved by the base type")]
    ReservedFieldCollision {
        /// The metric declaring the field.
        metric: String,
        /// The colliding field name.
        field: String,
    },

    /// Two declarations would be emitted under the same type name.
    #[error("generated type name \"{name}\" is produced by both {existing} and {incoming}")]
    TypeNameCollision {
        /// The contested type name.
        name: String,
        /// What claimed the name first.
        existing: String,
        /// What tried to claim it second.
        incoming: String,
    },

    /// A metric name does not case into a usable type name.
    #[error("metric \"{metric}\" produces type name \"{name}\", which is not an identifier")]
    InvalidTypeName {
        /// The metric whose name was cased.
        metric: String,
        /// The cased type name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_metadata_type_names_metric_and_type() {
        let err = ResolutionError::UnknownMetadataType {
            metric: "lambda_invoke".to_string(),
            name: "runtime".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("lambda_invoke"));
        assert!(msg.contains("runtime"));
    }

    #[test]
    fn unknown_kind_names_metadata_and_owner() {
        let err = ResolutionError::UnknownKind {
            metadata: "size".to_string(),
            kind: "float".to_string(),
            owner: "s3_upload".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("size"));
        assert!(msg.contains("float"));
        assert!(msg.contains("s3_upload"));
    }

    #[test]
    fn resolution_error_wraps_into_top_level() {
        let inner = ResolutionError::ReservedFieldCollision {
            metric: "session_start".to_string(),
            field: "traceId".to_string(),
        };
        let err = TelgenError::from(inner);
        let msg = format!("{err}");
        assert!(msg.starts_with("resolution error"));
        assert!(msg.contains("traceId"));
    }

    #[test]
    fn type_name_collision_names_both_claimants() {
        let err = ResolutionError::TypeNameCollision {
            name: "Metric".to_string(),
            existing: "the recorder type".to_string(),
            incoming: "metadata type \"metric\"".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("\"Metric\""));
        assert!(msg.contains("recorder"));
        assert!(msg.contains("metadata type"));
    }

    #[test]
    fn input_validation_display_includes_path() {
        let err = TelgenError::InputValidation {
            path: "defs/extra.json".to_string(),
            reason: "/metrics/0: \"name\" is a required property".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("defs/extra.json"));
        assert!(msg.contains("required property"));
    }

    #[test]
    fn config_error_display() {
        let err = TelgenError::Config("base_type_name must not be empty".to_string());
        assert!(format!("{err}").contains("base_type_name"));
    }
}
