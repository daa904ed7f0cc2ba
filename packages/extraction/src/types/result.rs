//! Engine outcomes and normalized extraction results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::EngineError;

/// Field name to extracted value; `None` when the selector matched nothing.
pub type FieldMap = BTreeMap<String, Option<String>>;

/// Whether a field set carries at least one non-null, non-empty value.
///
/// An all-null or empty field set counts as a failed extraction for
/// escalation purposes.
pub fn is_usable(fields: &FieldMap) -> bool {
    fields
        .values()
        .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()))
}

/// What a single engine reported for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOutcome {
    /// The engine produced a field set (content not validated)
    Succeeded { fields: FieldMap },

    /// The engine failed; the cause survives only as a diagnostic
    Failed { reason: String },
}

impl EngineOutcome {
    /// Convert an engine's internal result into an outcome.
    pub fn from_result(result: Result<FieldMap, EngineError>) -> Self {
        match result {
            Ok(fields) => Self::Succeeded { fields },
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }

    /// Create a failure outcome.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Which stage produced an [`ExtractionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineTag {
    Primary,
    PrimaryError,
    Fallback,
    FallbackError,
}

impl EngineTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::PrimaryError => "primary_error",
            Self::Fallback => "fallback",
            Self::FallbackError => "fallback_error",
        }
    }

    /// Whether the tag names the fallback stage (success or error).
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback | Self::FallbackError)
    }
}

impl std::fmt::Display for EngineTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized outcome of one orchestrated extraction.
///
/// `succeeded == true` implies `error` is `None`. When `succeeded` is false
/// the field set is empty and must not be treated as authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub succeeded: bool,
    #[serde(default)]
    pub fields: FieldMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub engine: EngineTag,
}

impl ExtractionResult {
    /// A successful result from the given stage.
    pub fn accepted(fields: FieldMap, engine: EngineTag) -> Self {
        Self {
            succeeded: true,
            fields,
            error: None,
            engine,
        }
    }

    /// A failed result carrying a diagnostic.
    pub fn failed(error: impl Into<String>, engine: EngineTag) -> Self {
        Self {
            succeeded: false,
            fields: FieldMap::new(),
            error: Some(error.into()),
            engine,
        }
    }

    /// Map a fallback engine's outcome verbatim onto a result.
    pub fn from_fallback(outcome: EngineOutcome) -> Self {
        match outcome {
            EngineOutcome::Succeeded { fields } => Self::accepted(fields, EngineTag::Fallback),
            EngineOutcome::Failed { reason } => Self::failed(reason, EngineTag::FallbackError),
        }
    }
}

/// Response body of the fast extraction backend (`POST /scrape`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastEngineResponse {
    pub success: bool,
    #[serde(default)]
    pub data: FieldMap,
    #[serde(default)]
    pub error: Option<String>,
}

impl FastEngineResponse {
    pub fn ok(data: FieldMap) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: FieldMap::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, Option<&str>)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_is_usable() {
        assert!(!is_usable(&FieldMap::new()));
        assert!(!is_usable(&fields(&[("title", None), ("price", None)])));
        assert!(!is_usable(&fields(&[("title", Some("")), ("price", None)])));
        assert!(is_usable(&fields(&[("title", Some("Product A")), ("price", None)])));
    }

    #[test]
    fn test_failed_result_has_no_fields() {
        let result = ExtractionResult::failed("boom", EngineTag::FallbackError);
        assert!(!result.succeeded);
        assert!(result.fields.is_empty());
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_from_fallback_keeps_nulls() {
        let result = ExtractionResult::from_fallback(EngineOutcome::Succeeded {
            fields: fields(&[("title", Some("Product A")), ("price", None)]),
        });
        assert!(result.succeeded);
        assert_eq!(result.engine, EngineTag::Fallback);
        assert_eq!(result.fields.get("price"), Some(&None));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_result_json_shape() {
        let result = ExtractionResult::accepted(
            fields(&[("title", Some("Product A")), ("price", None)]),
            EngineTag::Primary,
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["succeeded"], true);
        assert_eq!(json["engine"], "primary");
        assert!(json["fields"]["price"].is_null());
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_fast_response_tolerates_missing_fields() {
        let parsed: FastEngineResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!parsed.success);
        assert!(parsed.data.is_empty());
        assert!(parsed.error.is_none());
    }
}
