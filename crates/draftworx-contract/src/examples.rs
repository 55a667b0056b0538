// crates/draftworx-contract/src/examples.rs
// ============================================================================
// Module: Tool Examples
// Description: Canonical valid arguments for each Draftworx tool.
// Purpose: Shared fixtures for docs, CLI smoke calls, and contract tests.
// Dependencies: draftworx-core, serde_json
// ============================================================================

//! ## Overview
//! One well-formed argument object per tool. The contract tests mutate these
//! to check that the JSON Schema and the validator agree.

use draftworx_core::ToolName;
use serde_json::Value;
use serde_json::json;

/// Returns a canonical well-formed argument object for `tool`.
#[must_use]
pub fn tool_example(tool: ToolName) -> Value {
    match tool {
        ToolName::CollectContext => json!({
            "entityType": "company",
            "jurisdiction": "ZA",
            "yearEnd": "2024 02 29",
            "framework": "IFRS"
        }),
        ToolName::UploadTrialBalance => json!({
            "clientId": "client-001",
            "fileId": "tb-upload-2024",
            "fileType": "xlsx"
        }),
        ToolName::MapAccounts => json!({
            "tbId": "tb-2024-02",
            "confidenceThreshold": 0.8
        }),
        ToolName::RecommendTemplate => json!({
            "jurisdiction": "ZA",
            "entityType": "company",
            "framework": "IFRS_SMEs"
        }),
        ToolName::CreateDraft => json!({
            "clientId": "client-001",
            "tbId": "tb-2024-02",
            "templateId": "za-ifrs-smes-company"
        }),
    }
}
