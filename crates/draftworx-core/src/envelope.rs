// crates/draftworx-core/src/envelope.rs
// ============================================================================
// Module: Response Envelope
// Description: Uniform result shape returned for every tool invocation.
// Purpose: Wrap summaries, echoes, and failures for the host transport.
// Dependencies: serde, serde_json, crate::error
// ============================================================================

//! ## Overview
//! [`CallResult`] carries an error flag, a human-readable text, and a
//! structured echo that is present only on success.

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::ToolCallError;

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    /// True when the call failed.
    pub is_error: bool,
    /// Summary on success, error message on failure.
    pub text: String,
    /// Validated fields echoed back; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured: Option<Map<String, Value>>,
}

impl CallResult {
    /// Builds a success envelope.
    #[must_use]
    pub fn success(summary: impl Into<String>, structured: Map<String, Value>) -> Self {
        Self {
            is_error: false,
            text: summary.into(),
            structured: Some(structured),
        }
    }

    /// Builds an error envelope.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: true,
            text: message.into(),
            structured: None,
        }
    }

    /// Builds the error envelope for a call failure.
    #[must_use]
    pub fn from_error(err: &ToolCallError) -> Self {
        Self::error(err.to_string())
    }
}

impl From<ToolCallError> for CallResult {
    fn from(err: ToolCallError) -> Self {
        Self::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Map;
    use serde_json::json;

    use super::CallResult;
    use crate::error::ToolCallError;

    #[test]
    fn error_envelope_omits_structured_payload() {
        let result = CallResult::from_error(&ToolCallError::UnknownTool("x".to_string()));
        assert_eq!(
            serde_json::to_value(&result).ok(),
            Some(json!({"isError": true, "text": "Unknown tool: x"}))
        );
    }

    #[test]
    fn success_envelope_carries_payload() {
        let result = CallResult::success("done", Map::new());
        assert!(!result.is_error);
        assert_eq!(result.structured, Some(Map::new()));
    }
}
