// crates/draftworx-config/src/lib.rs
// ============================================================================
// Module: Draftworx Config Library
// Description: Canonical config model and fail-closed validation.
// Purpose: Single source of truth for draftworx.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `draftworx-config` defines the configuration shared by the MCP server and
//! the aggregating gateway. Loading is strict: unknown keys, oversized files,
//! and inconsistent routes are rejected before any listener starts.

pub mod config;

pub use config::*;
