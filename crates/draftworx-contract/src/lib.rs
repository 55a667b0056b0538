// crates/draftworx-contract/src/lib.rs
// ============================================================================
// Module: Draftworx Contract
// Description: Wire contract for the Draftworx MCP tool surface.
// Purpose: Render core schemas and catalog entries into MCP tool listings.
// Dependencies: draftworx-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The core owns the constraint tables; this crate turns them into the shapes
//! MCP clients consume: JSON Schema input schemas, `tools/list` entries with
//! annotations and invocation metadata, and canonical example arguments.

pub mod examples;
pub mod tooling;
pub mod types;

pub use draftworx_core::ToolName;
pub use examples::tool_example;
pub use tooling::input_schema;
pub use tooling::result_meta;
pub use tooling::tool_definitions;
pub use types::ToolAnnotations;
pub use types::ToolDefinition;
