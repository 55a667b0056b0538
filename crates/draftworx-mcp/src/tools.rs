// crates/draftworx-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool routing for the Draftworx MCP server.
// Purpose: The single path from JSON-RPC transports to the core engine.
// Dependencies: draftworx-contract, draftworx-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The router owns one [`ToolEngine`] and the tool definitions rendered from
//! its catalog. Tool calls never fail at the protocol level: unknown tools and
//! validation failures come back as `isError` results.
//!
//! ## Invariants
//! - Each router owns an independent engine; clones share read-only data only.
//! - Responses are deterministic for identical inputs.

use std::sync::Arc;

use draftworx_contract::result_meta;
use draftworx_contract::tool_definitions;
pub use draftworx_contract::ToolDefinition;
use draftworx_core::CallResult;
use draftworx_core::ToolEngine;
use draftworx_core::ToolName;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Result Shapes
// ============================================================================

/// Tool list response payload.
#[derive(Debug, Clone, Serialize)]
pub struct ToolListResult {
    /// Registered tool definitions.
    pub tools: Vec<ToolDefinition>,
}

/// Tool output content block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Plain text output.
    Text {
        /// Text payload.
        text: String,
    },
}

/// MCP `CallToolResult` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Human-readable content blocks.
    pub content: Vec<ToolContent>,
    /// True when the tool call failed.
    pub is_error: bool,
    /// Validated arguments echoed back on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Map<String, Value>>,
    /// Invocation metadata on success.
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl ToolCallResult {
    /// Wraps a core envelope in the MCP result shape.
    #[must_use]
    pub fn from_call(result: CallResult) -> Self {
        let meta = (!result.is_error).then(result_meta);
        Self {
            content: vec![ToolContent::Text {
                text: result.text,
            }],
            is_error: result.is_error,
            structured_content: result.structured,
            meta,
        }
    }
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Routes MCP tool requests to an owned engine.
#[derive(Debug, Clone)]
pub struct ToolRouter {
    /// Engine performing validation and dispatch.
    engine: ToolEngine,
    /// Tool definitions rendered once from the engine catalog.
    definitions: Arc<[ToolDefinition]>,
}

impl ToolRouter {
    /// Builds a router around a fresh engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(ToolEngine::new())
    }

    /// Builds a router around an existing engine.
    #[must_use]
    pub fn with_engine(engine: ToolEngine) -> Self {
        let definitions = tool_definitions(engine.catalog()).into();
        Self {
            engine,
            definitions,
        }
    }

    /// Returns tool definitions in catalog order.
    #[must_use]
    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Returns tool names in catalog order.
    #[must_use]
    pub fn tool_names(&self) -> Vec<ToolName> {
        self.engine.list().iter().map(|descriptor| descriptor.name).collect()
    }

    /// Handles a tool call; missing arguments are treated as an empty object.
    #[must_use]
    pub fn handle_tool_call(&self, name: &str, arguments: Option<Value>) -> ToolCallResult {
        let arguments = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value,
        };
        ToolCallResult::from_call(self.engine.call(name, &arguments))
    }

    /// Returns the engine behind this router.
    #[must_use]
    pub const fn engine(&self) -> &ToolEngine {
        &self.engine
    }
}

impl Default for ToolRouter {
    fn default() -> Self {
        Self::new()
    }
}
