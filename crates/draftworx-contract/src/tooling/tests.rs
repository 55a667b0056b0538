// crates/draftworx-contract/src/tooling/tests.rs
// ============================================================================
// Module: Tooling Schema Unit Tests
// Description: Validates generated JSON Schemas against the core validator.
// Purpose: Keep the advertised and the enforced contract in agreement.
// Dependencies: draftworx-contract, draftworx-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! Compiles every generated input schema and checks that `jsonschema` and the
//! core validator accept and reject the same payloads: the canonical examples
//! and single-field mutations of them.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only validation helpers use panic-based assertions for clarity."
)]

use draftworx_core::FieldKind;
use draftworx_core::ToolEngine;
use draftworx_core::ToolName;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use serde_json::json;

use super::input_schema;
use super::result_meta;
use super::tool_definitions;
use crate::examples::tool_example;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn compile_schema(schema: &Value) -> Validator {
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .expect("schema compilation failed")
}

fn mutate(example: &Value, edit: impl FnOnce(&mut serde_json::Map<String, Value>)) -> Value {
    let mut object = example.as_object().cloned().unwrap();
    edit(&mut object);
    Value::Object(object)
}

/// Single-field mutations of a canonical example.
fn mutations(tool: ToolName, engine: &ToolEngine) -> Vec<Value> {
    let example = tool_example(tool);
    let schema = engine.catalog().schema(tool).unwrap();
    let mut out = vec![mutate(&example, |map| {
        map.insert("unexpected".to_string(), json!("x"));
    })];
    for field in &schema.fields {
        out.push(mutate(&example, |map| {
            map.remove(field.name);
        }));
        let wrong = match field.kind {
            FieldKind::String => json!(7),
            FieldKind::Number => json!("0.5"),
        };
        out.push(mutate(&example, |map| {
            map.insert(field.name.to_string(), wrong);
        }));
        if field.allowed.is_some() {
            out.push(mutate(&example, |map| {
                map.insert(field.name.to_string(), json!("not-a-member"));
            }));
        }
        if let Some(bounds) = field.bounds {
            for value in [bounds.min - 0.1, bounds.max + 0.1, bounds.min, bounds.max] {
                out.push(mutate(&example, |map| {
                    map.insert(field.name.to_string(), json!(value));
                }));
            }
        }
    }
    out
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn canonical_examples_satisfy_generated_schemas() {
    let engine = ToolEngine::new();
    for tool in ToolName::all() {
        let schema = input_schema(engine.catalog().schema(*tool).unwrap());
        let validator = compile_schema(&schema);
        let example = tool_example(*tool);
        assert!(validator.is_valid(&example), "{tool} example rejected by schema");
        assert!(!engine.call(tool.as_str(), &example).is_error, "{tool} example rejected");
    }
}

#[test]
fn schema_and_validator_agree_on_mutations() {
    let engine = ToolEngine::new();
    for tool in ToolName::all() {
        let validator = compile_schema(&input_schema(engine.catalog().schema(*tool).unwrap()));
        for payload in mutations(*tool, &engine) {
            let schema_ok = validator.is_valid(&payload);
            let core_ok = !engine.call(tool.as_str(), &payload).is_error;
            assert_eq!(schema_ok, core_ok, "{tool} disagreement on {payload}");
        }
    }
}

#[test]
fn map_accounts_schema_declares_inclusive_bounds() {
    let engine = ToolEngine::new();
    let schema = input_schema(engine.catalog().schema(ToolName::MapAccounts).unwrap());
    assert_eq!(
        schema["properties"]["confidenceThreshold"],
        json!({
            "type": "number",
            "minimum": 0.0,
            "maximum": 1.0,
            "description": "Confidence threshold between 0 and 1 for auto-mapping suggestions."
        })
    );
    assert_eq!(schema["required"], json!(["tbId", "confidenceThreshold"]));
    assert_eq!(schema["additionalProperties"], json!(false));
}

#[test]
fn definitions_carry_annotations_and_meta() {
    let engine = ToolEngine::new();
    let definitions = tool_definitions(engine.catalog());
    let read_only: Vec<bool> =
        definitions.iter().map(|definition| definition.annotations.read_only_hint).collect();
    assert_eq!(read_only, vec![true, false, false, true, false]);
    for definition in &definitions {
        assert!(!definition.annotations.destructive_hint);
        assert!(!definition.annotations.open_world_hint);
        assert_eq!(definition.meta, result_meta());
    }
    let encoded = serde_json::to_value(&definitions[0]).unwrap();
    assert_eq!(encoded["name"], json!("draftworx.collect_context"));
    assert_eq!(encoded["title"], json!("Collect Entity Context"));
    assert_eq!(encoded["annotations"]["readOnlyHint"], json!(true));
    assert_eq!(encoded["_meta"]["openai/toolInvocation/invoking"], json!("Processing Draftworx task..."));
    assert!(encoded.get("inputSchema").is_some());
}
