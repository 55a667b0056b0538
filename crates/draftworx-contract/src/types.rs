// crates/draftworx-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Serialized shapes for MCP tool listings.
// Purpose: Canonical `tools/list` entry shape shared by every transport.
// Dependencies: draftworx-core, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ToolDefinition`] is the entry shape returned by `tools/list`. It carries
//! the tool name, title, description, input schema, and annotations.

use draftworx_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Behavioral hints attached to a tool listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    /// Tool changes no external state.
    pub read_only_hint: bool,
    /// Tool may destroy data.
    pub destructive_hint: bool,
    /// Tool reaches systems outside the server.
    pub open_world_hint: bool,
}

/// Tool definition used by MCP tool listing.
///
/// # Invariants
/// - `name` is a stable MCP tool identifier.
/// - `input_schema` is a closed JSON Schema object for the tool arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Display title.
    pub title: String,
    /// Usage hint for clients.
    pub description: String,
    /// JSON Schema for tool input.
    pub input_schema: Value,
    /// Behavioral hints.
    pub annotations: ToolAnnotations,
    /// Client invocation metadata.
    #[serde(rename = "_meta")]
    pub meta: Value,
}
