// crates/draftworx-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared helpers for MCP server and gateway tests.
// Purpose: Drive axum routers in-process without binding sockets.
// Dependencies: draftworx-mcp, axum, tower
// ============================================================================

//! ## Overview
//! Routers are exercised with `tower::ServiceExt::oneshot`; bodies are
//! collected with `axum::body::to_bytes` and decoded as JSON where applicable.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::HeaderMap;
use axum::http::Request;
use axum::http::StatusCode;
use draftworx_mcp::McpApp;
use draftworx_mcp::McpAppConfig;
use draftworx_mcp::McpNoopAuditSink;
use draftworx_mcp::NoopMetrics;
use draftworx_mcp::ToolRouter;
use draftworx_mcp::config::DraftworxConfig;
use draftworx_mcp::config::MountConfig;
use serde_json::Value;
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds an app with silent audit and metrics sinks.
#[must_use]
pub fn test_app(service: &str, max_body_bytes: usize) -> McpApp {
    McpApp::new(
        ToolRouter::new(),
        McpAppConfig {
            service: service.to_string(),
            mcp_path: "/mcp".to_string(),
            max_body_bytes,
            audit: Arc::new(McpNoopAuditSink),
            metrics: Arc::new(NoopMetrics),
        },
    )
}

/// Builds a gateway config with auditing disabled.
#[must_use]
pub fn gateway_config(mounts: &[(&str, &str)], assets_dir: Option<String>) -> DraftworxConfig {
    let mut config = DraftworxConfig::default();
    config.server.audit.enabled = false;
    config.gateway.assets_dir = assets_dir;
    config.gateway.mounts = mounts
        .iter()
        .map(|(prefix, service)| MountConfig {
            prefix: (*prefix).to_string(),
            service: (*service).to_string(),
        })
        .collect();
    config
}

/// Builds a JSON-RPC request body.
#[must_use]
pub fn rpc(id: u64, method: &str, params: Value) -> Value {
    json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params})
}

/// Builds a `tools/call` request body.
#[must_use]
pub fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    rpc(id, "tools/call", json!({"name": name, "arguments": arguments}))
}

// ============================================================================
// SECTION: Transport Helpers
// ============================================================================

/// Raw response parts.
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Collected body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Decodes the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("json body")
    }

    /// Decodes the body as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf-8 body")
    }
}

/// Sends a request through the router.
pub async fn send(router: Router, request: Request<Body>) -> RawResponse {
    let response = router.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body =
        axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body").to_vec();
    RawResponse {
        status,
        headers,
        body,
    }
}

/// Posts raw bytes as JSON.
pub async fn post_bytes(router: Router, path: &str, body: Vec<u8>) -> RawResponse {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request");
    send(router, request).await
}

/// Posts a JSON value.
pub async fn post_json(router: Router, path: &str, body: &Value) -> RawResponse {
    post_bytes(router, path, serde_json::to_vec(body).expect("serialize")).await
}

/// Issues a GET request.
pub async fn get(router: Router, path: &str) -> RawResponse {
    let request = Request::builder().method("GET").uri(path).body(Body::empty()).expect("request");
    send(router, request).await
}
