// crates/draftworx-mcp/src/config.rs
// ============================================================================
// Module: MCP Configuration (Re-export)
// Description: Re-export canonical Draftworx config types.
// Purpose: Keep host callers on one config model.
// Dependencies: draftworx-config
// ============================================================================

//! ## Overview
//! This module re-exports the configuration model from `draftworx-config` so
//! transport and gateway code share one source of truth.

/// Re-export canonical config types and helpers.
pub use draftworx_config::*;
