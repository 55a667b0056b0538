// crates/draftworx-core/src/error.rs
// ============================================================================
// Module: Tool Call Errors
// Description: Per-call failure taxonomy for Draftworx tool invocations.
// Purpose: Keep unknown-tool and validation failures distinct until rendered.
// Dependencies: thiserror, crate::validation
// ============================================================================

//! ## Overview
//! Every failure is handled at the call boundary and converted into an
//! error-flagged [`crate::CallResult`]; none of these errors is fatal.

use thiserror::Error;

use crate::validation::ValidationFailure;

/// Failure raised while handling a single tool call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolCallError {
    /// Tool name not present in the schema registry.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    /// Arguments broke the tool schema.
    #[error("Validation error: {0}")]
    Validation(ValidationFailure),
}
