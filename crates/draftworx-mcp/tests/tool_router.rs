// crates/draftworx-mcp/tests/tool_router.rs
// ============================================================================
// Module: Tool Router Tests
// Description: Tool routing, result shapes, and engine isolation.
// Purpose: Ensure every tool call resolves to a well-formed MCP result.
// Dependencies: draftworx-core, draftworx-mcp
// ============================================================================

//! ## Overview
//! Exercises [`ToolRouter`] directly: listing, success and error result
//! shapes, argument defaulting, and independence of separate routers.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use draftworx_core::ToolName;
use draftworx_mcp::ToolContent;
use draftworx_mcp::ToolRouter;
use serde_json::Value;
use serde_json::json;

fn text_of(content: &[ToolContent]) -> &str {
    match content {
        [ToolContent::Text { text }] => text,
        other => panic!("expected one text block, got {} blocks", other.len()),
    }
}

#[test]
fn list_tools_matches_tool_name_order() {
    let router = ToolRouter::new();
    let listed: Vec<ToolName> = router.list_tools().iter().map(|tool| tool.name).collect();
    assert_eq!(listed, ToolName::all().to_vec());
    assert_eq!(router.tool_names(), ToolName::all().to_vec());
}

#[test]
fn successful_call_carries_structured_content_and_meta() {
    let router = ToolRouter::new();
    let result = router.handle_tool_call(
        "draftworx.map_accounts",
        Some(json!({"tbId": "tb-9", "confidenceThreshold": 1})),
    );
    assert!(!result.is_error);
    assert_eq!(text_of(&result.content), "Mapping accounts for tb-9 with threshold 1.0.");
    let structured = Value::Object(result.structured_content.clone().unwrap());
    assert_eq!(structured, json!({"tbId": "tb-9", "confidenceThreshold": 1}));
    assert!(result.meta.is_some());

    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["content"][0]["type"], "text");
    assert_eq!(wire["isError"], false);
    assert!(wire.get("_meta").is_some());
}

#[test]
fn validation_failure_is_error_result_without_structured_content() {
    let router = ToolRouter::new();
    let result = router.handle_tool_call("draftworx.create_draft", Some(json!({"clientId": "c"})));
    assert!(result.is_error);
    let text = text_of(&result.content);
    assert!(text.starts_with("Validation error: "));
    assert!(text.contains("tbId: field required"));
    assert!(text.contains("templateId: field required"));

    let wire = serde_json::to_value(&result).unwrap();
    assert!(wire.get("structuredContent").is_none());
    assert!(wire.get("_meta").is_none());
}

#[test]
fn unknown_tool_is_error_result() {
    let router = ToolRouter::new();
    let result = router.handle_tool_call("collect_context", Some(json!({})));
    assert!(result.is_error);
    assert_eq!(text_of(&result.content), "Unknown tool: collect_context");
}

#[test]
fn missing_and_null_arguments_behave_like_empty_object() {
    let router = ToolRouter::new();
    let empty = router.handle_tool_call("draftworx.recommend_template", Some(json!({})));
    let missing = router.handle_tool_call("draftworx.recommend_template", None);
    let null = router.handle_tool_call("draftworx.recommend_template", Some(Value::Null));
    assert!(empty.is_error);
    assert_eq!(missing, empty);
    assert_eq!(null, empty);
}

#[test]
fn separate_routers_answer_identically() {
    let first = ToolRouter::new();
    let second = ToolRouter::new();
    let arguments = json!({
        "entityType": "company",
        "jurisdiction": "ZA",
        "yearEnd": "2025-06-30",
        "framework": "IFRS"
    });
    let a = first.handle_tool_call("draftworx.collect_context", Some(arguments.clone()));
    let b = second.handle_tool_call("draftworx.collect_context", Some(arguments));
    assert_eq!(a, b);
    assert_eq!(first.engine(), second.engine());
}
