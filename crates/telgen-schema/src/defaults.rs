//! # Bundled Common Definitions
//!
//! The metadata types every metric inherits through the base type ship with
//! the crate. They are merged after all user documents, so a user document
//! that redeclares one of them (for example `result` with a narrower value
//! set) takes precedence.

use crate::model::MetricDefinitionRoot;
use crate::validate::{InputValidationError, InputValidator};

/// Source text of the bundled definitions.
pub const COMMON_DEFINITIONS: &str = include_str!("../definitions/commonDefinitions.json");

/// Name under which the bundled definitions appear in logs and errors.
pub const COMMON_DEFINITIONS_SOURCE: &str = "<bundled>/commonDefinitions.json";

/// Load the bundled definitions through the same validator as user input.
pub fn common_definitions(
    validator: &InputValidator,
) -> Result<MetricDefinitionRoot, InputValidationError> {
    let value: serde_json::Value = serde_json::from_str(COMMON_DEFINITIONS).map_err(|e| {
        InputValidationError::DocumentLoadError {
            path: COMMON_DEFINITIONS_SOURCE.to_string(),
            reason: format!("invalid JSON: {e}"),
        }
    })?;
    validator.validate_value(&value, COMMON_DEFINITIONS_SOURCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_definitions_validate() {
        let validator = InputValidator::new().unwrap();
        let root = common_definitions(&validator).unwrap();
        assert!(root.metrics.is_empty());
        for name in [
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
        ] {
            assert!(root.metadata_type(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn bundled_result_is_enumerated() {
        let validator = InputValidator::new().unwrap();
        let root = common_definitions(&validator).unwrap();
        let result = root.metadata_type("result").unwrap();
        assert_eq!(
            result.allowed_values.as_deref().map(<[String]>::len),
            Some(3)
        );
        assert_eq!(root.metadata_type("duration").unwrap().kind.as_deref(), Some("double"));
    }
}
