// crates/draftworx-contract/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Tool listings and JSON Schemas derived from the core tables.
// Purpose: Drive `tools/list` responses from the same data the validator uses.
// Dependencies: draftworx-core, serde_json, crate::types
// ============================================================================

//! ## Overview
//! Input schemas are rendered from [`ToolSchema`] so the advertised contract
//! and the enforced contract cannot drift. Listing order follows the catalog,
//! which follows [`draftworx_core::ToolName::all`].

use draftworx_core::FieldKind;
use draftworx_core::FieldSpec;
use draftworx_core::ToolCatalog;
use draftworx_core::ToolSchema;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::types::ToolAnnotations;
use crate::types::ToolDefinition;

// ============================================================================
// SECTION: Invocation Metadata
// ============================================================================

/// Status text shown while a tool runs.
pub const INVOKING_STATUS: &str = "Processing Draftworx task...";
/// Status text shown after a tool finishes.
pub const INVOKED_STATUS: &str = "Draftworx task completed";

/// Returns the invocation metadata attached to listings and results.
#[must_use]
pub fn result_meta() -> Value {
    json!({
        "openai/toolInvocation/invoking": INVOKING_STATUS,
        "openai/toolInvocation/invoked": INVOKED_STATUS,
        "openai/resultCanProduceWidget": false
    })
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Returns the MCP tool definitions in catalog order.
#[must_use]
pub fn tool_definitions(catalog: &ToolCatalog) -> Vec<ToolDefinition> {
    catalog
        .list()
        .iter()
        .filter_map(|descriptor| {
            let schema = catalog.schema(descriptor.name)?;
            Some(ToolDefinition {
                name: descriptor.name,
                title: descriptor.title.to_string(),
                description: descriptor.description.to_string(),
                input_schema: input_schema(schema),
                annotations: ToolAnnotations {
                    read_only_hint: descriptor.read_only,
                    destructive_hint: false,
                    open_world_hint: false,
                },
                meta: result_meta(),
            })
        })
        .collect()
}

// ============================================================================
// SECTION: Schemas
// ============================================================================

/// Renders a tool schema as a JSON Schema object.
#[must_use]
pub fn input_schema(schema: &ToolSchema) -> Value {
    let properties: Map<String, Value> =
        schema.fields.iter().map(|field| (field.name.to_string(), field_schema(field))).collect();
    let mut object = json!({
        "type": "object",
        "properties": properties,
        "required": schema.required,
    });
    if schema.closed
        && let Value::Object(map) = &mut object
    {
        map.insert("additionalProperties".to_string(), Value::Bool(false));
    }
    object
}

/// Renders a single field constraint.
fn field_schema(field: &FieldSpec) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(field.kind.as_str().to_string()));
    if let Some(allowed) = field.allowed {
        map.insert("enum".to_string(), json!(allowed));
    }
    if let Some(bounds) = field.bounds.filter(|_| field.kind == FieldKind::Number) {
        map.insert("minimum".to_string(), json!(bounds.min));
        map.insert("maximum".to_string(), json!(bounds.max));
    }
    map.insert("description".to_string(), Value::String(field.description.to_string()));
    Value::Object(map)
}

#[cfg(test)]
mod tests;
