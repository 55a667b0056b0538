// crates/draftworx-mcp/src/audit.rs
// ============================================================================
// Module: MCP Audit Logging
// Description: Structured audit events for MCP request handling.
// Purpose: Emit JSON-lines audit logs without a logging framework dependency.
// Dependencies: draftworx-core, serde, serde_json, crate::{config, telemetry}
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Events record
//! request metadata only; tool arguments and results are never logged.
//! Sinks are chosen from [`ServerAuditConfig`]: a file when a path is set,
//! stderr otherwise, or nothing when auditing is disabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use draftworx_core::ToolName;
use serde::Serialize;

use crate::config::ServerAuditConfig;
use crate::config::ServerTransport;
use crate::telemetry::McpMethod;
use crate::telemetry::McpOutcome;

// ============================================================================
// SECTION: Types
// ============================================================================

/// MCP audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct McpAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Mounted service name.
    pub service: String,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Transport used for the request.
    pub transport: ServerTransport,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: McpMethod,
    /// Tool name when available (tools/call).
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// True when a tool call returned an error result.
    pub is_error: bool,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

/// Inputs for building an [`McpAuditEvent`].
#[derive(Debug, Clone)]
pub struct McpAuditEventParams {
    /// Mounted service name.
    pub service: String,
    /// Request identifier when provided.
    pub request_id: Option<String>,
    /// Transport used for the request.
    pub transport: ServerTransport,
    /// Peer IP address when available.
    pub peer_ip: Option<String>,
    /// JSON-RPC method classification.
    pub method: McpMethod,
    /// Tool name when available.
    pub tool: Option<ToolName>,
    /// Request outcome.
    pub outcome: McpOutcome,
    /// True when a tool call returned an error result.
    pub is_error: bool,
    /// JSON-RPC error code when present.
    pub error_code: Option<i64>,
    /// Request body size in bytes.
    pub request_bytes: usize,
    /// Response body size in bytes.
    pub response_bytes: usize,
}

impl McpAuditEvent {
    /// Builds an audit event stamped with the current time.
    #[must_use]
    pub fn new(params: McpAuditEventParams) -> Self {
        Self {
            event: "mcp_request",
            timestamp_ms: now_ms(),
            service: params.service,
            request_id: params.request_id,
            transport: params.transport,
            peer_ip: params.peer_ip,
            method: params.method,
            tool: params.tool,
            outcome: params.outcome,
            is_error: params.is_error,
            error_code: params.error_code,
            request_bytes: params.request_bytes,
            response_bytes: params.response_bytes,
        }
    }
}

/// Gateway lifecycle event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayAuditEvent {
    /// Event identifier (`gateway_started`, `gateway_warning`).
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Human-readable detail.
    pub message: String,
}

impl GatewayAuditEvent {
    /// Builds a gateway event stamped with the current time.
    #[must_use]
    pub fn new(event: &'static str, message: impl Into<String>) -> Self {
        Self {
            event,
            timestamp_ms: now_ms(),
            message: message.into(),
        }
    }
}

/// Returns milliseconds since the Unix epoch, or zero if the clock is skewed.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |elapsed| elapsed.as_millis())
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for MCP request events.
pub trait McpAuditSink: Send + Sync {
    /// Record a request audit event.
    fn record(&self, event: &McpAuditEvent);

    /// Record a gateway lifecycle event.
    fn record_gateway(&self, _event: &GatewayAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct McpStderrAuditSink;

impl McpStderrAuditSink {
    /// Writes one serialized line to stderr.
    fn write_line(payload: &impl Serialize) {
        if let Ok(line) = serde_json::to_string(payload) {
            let _ = writeln!(io::stderr(), "{line}");
        }
    }
}

impl McpAuditSink for McpStderrAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        Self::write_line(event);
    }

    fn record_gateway(&self, event: &GatewayAuditEvent) {
        Self::write_line(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct McpFileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl McpFileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized line and flushes it.
    fn write_line(&self, payload: &impl Serialize) {
        if let Ok(line) = serde_json::to_string(payload)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{line}");
            let _ = file.flush();
        }
    }
}

impl McpAuditSink for McpFileAuditSink {
    fn record(&self, event: &McpAuditEvent) {
        self.write_line(event);
    }

    fn record_gateway(&self, event: &GatewayAuditEvent) {
        self.write_line(event);
    }
}

/// No-op audit sink.
pub struct McpNoopAuditSink;

impl McpAuditSink for McpNoopAuditSink {
    fn record(&self, _event: &McpAuditEvent) {}
}

// ============================================================================
// SECTION: Construction
// ============================================================================

/// Builds the audit sink selected by configuration.
///
/// # Errors
///
/// Returns an error when the configured audit file cannot be opened.
pub fn audit_sink_from_config(config: &ServerAuditConfig) -> io::Result<Arc<dyn McpAuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(McpNoopAuditSink));
    }
    match &config.path {
        Some(path) => Ok(Arc::new(McpFileAuditSink::new(Path::new(path.trim()))?)),
        None => Ok(Arc::new(McpStderrAuditSink)),
    }
}
