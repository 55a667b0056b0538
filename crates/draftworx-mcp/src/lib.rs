// crates/draftworx-mcp/src/lib.rs
// ============================================================================
// Module: Draftworx MCP
// Description: MCP server and gateway hosting the Draftworx tool engine.
// Purpose: Expose the Draftworx tools over JSON-RPC transports.
// Dependencies: draftworx-core, draftworx-contract, draftworx-config, axum, tokio
// ============================================================================

//! ## Overview
//! Draftworx MCP hosts the core tool engine behind MCP JSON-RPC over HTTP,
//! SSE, and stdio, and composes several independent services into one
//! gateway. All tool calls pass through [`ToolRouter`] into
//! [`draftworx_core::ToolEngine`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod gateway;
pub mod server;
pub mod telemetry;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::GatewayAuditEvent;
pub use audit::McpAuditEvent;
pub use audit::McpAuditSink;
pub use audit::McpFileAuditSink;
pub use audit::McpNoopAuditSink;
pub use audit::McpStderrAuditSink;
pub use config::DraftworxConfig;
pub use gateway::Gateway;
pub use gateway::GatewayError;
pub use gateway::MountEntry;
pub use gateway::MountTable;
pub use server::McpApp;
pub use server::McpAppConfig;
pub use server::McpServer;
pub use server::McpServerError;
pub use telemetry::McpMethod;
pub use telemetry::McpMetricEvent;
pub use telemetry::McpMetrics;
pub use telemetry::McpOutcome;
pub use telemetry::NoopMetrics;
pub use tools::ToolCallResult;
pub use tools::ToolContent;
pub use tools::ToolListResult;
pub use tools::ToolRouter;
