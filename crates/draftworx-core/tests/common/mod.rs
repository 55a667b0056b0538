// crates/draftworx-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Helpers
// Description: Canonical well-formed arguments for each Draftworx tool.
// ============================================================================

#![allow(dead_code, reason = "Helpers are shared across test binaries.")]

use draftworx_core::ToolName;
use serde_json::Value;
use serde_json::json;

/// Returns a complete, well-formed argument object for `tool`.
pub fn valid_args(tool: ToolName) -> Value {
    match tool {
        ToolName::CollectContext => json!({
            "entityType": "company",
            "jurisdiction": "ZA",
            "yearEnd": "2024 02 29",
            "framework": "IFRS"
        }),
        ToolName::UploadTrialBalance => json!({
            "clientId": "client-42",
            "fileId": "file-7",
            "fileType": "xlsx"
        }),
        ToolName::MapAccounts => json!({
            "tbId": "tb-001",
            "confidenceThreshold": 0.85
        }),
        ToolName::RecommendTemplate => json!({
            "jurisdiction": "UK",
            "entityType": "trust",
            "framework": "UK_GAAP"
        }),
        ToolName::CreateDraft => json!({
            "clientId": "client-42",
            "tbId": "tb-001",
            "templateId": "tpl-ifrs-smes"
        }),
    }
}

/// Returns the expected summary for [`valid_args`].
pub fn expected_summary(tool: ToolName) -> &'static str {
    match tool {
        ToolName::CollectContext => "Collected context for company in ZA (IFRS).",
        ToolName::UploadTrialBalance => "Uploaded xlsx file for client client-42.",
        ToolName::MapAccounts => "Mapping accounts for tb-001 with threshold 0.85.",
        ToolName::RecommendTemplate => "Recommended template for trust in UK (UK_GAAP).",
        ToolName::CreateDraft => "Created draft for client client-42 using template tpl-ifrs-smes.",
    }
}

/// Returns `value` with `key` set to `field`.
pub fn with_field(value: &Value, key: &str, field: Value) -> Value {
    let mut object = value.as_object().cloned().unwrap_or_default();
    object.insert(key.to_string(), field);
    Value::Object(object)
}

/// Returns `value` without `key`.
pub fn without_field(value: &Value, key: &str) -> Value {
    let mut object = value.as_object().cloned().unwrap_or_default();
    object.remove(key);
    Value::Object(object)
}
