// crates/draftworx-mcp/src/server.rs
// ============================================================================
// Module: MCP Server
// Description: MCP server implementations for stdio, HTTP, and SSE transports.
// Purpose: Expose Draftworx tools via JSON-RPC 2.0.
// Dependencies: draftworx-core, axum, tokio, tower-http
// ============================================================================

//! ## Overview
//! An [`McpApp`] is one mounted MCP service: a [`ToolRouter`], the route it
//! answers on, request limits, and audit and metrics sinks. It renders into
//! an axum [`Router`] for HTTP or SSE, or runs a newline-delimited JSON loop
//! over stdio. [`McpServer`] wires a single app to the configured transport.
//!
//! Tool failures are results, not protocol errors: JSON-RPC errors are only
//! produced for malformed requests, unknown methods, bad `tools/call` params,
//! and oversized bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::convert::Infallible;
use std::net::IpAddr;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::ConnectInfo;
use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_LENGTH;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::response::Sse;
use axum::response::sse::Event;
use axum::routing::post;
use draftworx_core::ToolName;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use tokio::io::AsyncBufRead;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

use crate::audit::GatewayAuditEvent;
use crate::audit::McpAuditEvent;
use crate::audit::McpAuditEventParams;
use crate::audit::McpAuditSink;
use crate::audit::McpStderrAuditSink;
use crate::audit::audit_sink_from_config;
use crate::config::DraftworxConfig;
use crate::config::ServerConfig;
use crate::config::ServerTransport;
use crate::telemetry::McpMethod;
use crate::telemetry::McpMetricEvent;
use crate::telemetry::McpMetrics;
use crate::telemetry::McpOutcome;
use crate::telemetry::NoopMetrics;
use crate::tools::ToolListResult;
use crate::tools::ToolRouter;

// ============================================================================
// SECTION: Protocol Constants
// ============================================================================

/// MCP protocol versions this server speaks, newest first.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2025-06-18", "2025-03-26", "2024-11-05"];
/// JSON-RPC parse error.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC invalid request.
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC method not found.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC invalid params.
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC internal error.
pub const INTERNAL_ERROR: i64 = -32603;
/// Request body exceeded `max_body_bytes`.
pub const BODY_TOO_LARGE: i64 = -32000;

// ============================================================================
// SECTION: MCP App
// ============================================================================

/// Inputs for building an [`McpApp`].
pub struct McpAppConfig {
    /// Service name reported by `initialize` and in audit events.
    pub service: String,
    /// Route serving JSON-RPC requests.
    pub mcp_path: String,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
    /// Audit sink for request events.
    pub audit: Arc<dyn McpAuditSink>,
    /// Metrics sink for request events.
    pub metrics: Arc<dyn McpMetrics>,
}

/// One MCP service with its own tool router.
#[derive(Clone)]
pub struct McpApp {
    /// Shared read-only app state.
    state: Arc<AppState>,
}

/// State shared by every request handled by an [`McpApp`].
struct AppState {
    /// Service name.
    service: String,
    /// Tool router owning this service's engine.
    router: ToolRouter,
    /// Route serving JSON-RPC requests.
    mcp_path: String,
    /// Maximum request body size in bytes.
    max_body_bytes: usize,
    /// Audit sink.
    audit: Arc<dyn McpAuditSink>,
    /// Metrics sink.
    metrics: Arc<dyn McpMetrics>,
}

impl McpApp {
    /// Builds an app around `router`.
    #[must_use]
    pub fn new(router: ToolRouter, config: McpAppConfig) -> Self {
        Self {
            state: Arc::new(AppState {
                service: config.service,
                router,
                mcp_path: config.mcp_path,
                max_body_bytes: config.max_body_bytes,
                audit: config.audit,
                metrics: config.metrics,
            }),
        }
    }

    /// Builds an app with a fresh engine from server settings.
    #[must_use]
    pub fn from_server_config(
        service: impl Into<String>,
        server: &ServerConfig,
        audit: Arc<dyn McpAuditSink>,
    ) -> Self {
        Self::new(
            ToolRouter::new(),
            McpAppConfig {
                service: service.into(),
                mcp_path: server.mcp_path.clone(),
                max_body_bytes: server.max_body_bytes,
                audit,
                metrics: Arc::new(NoopMetrics),
            },
        )
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.state.service
    }

    /// Returns the JSON-RPC route.
    #[must_use]
    pub fn mcp_path(&self) -> &str {
        &self.state.mcp_path
    }

    /// Returns the tool router.
    #[must_use]
    pub fn router(&self) -> &ToolRouter {
        &self.state.router
    }

    /// Renders the app as an axum router for HTTP or SSE delivery.
    ///
    /// Stdio has no HTTP surface and is served as plain HTTP here.
    #[must_use]
    pub fn http_router(&self, transport: ServerTransport) -> Router {
        let handler = match transport {
            ServerTransport::Sse => post(handle_sse),
            ServerTransport::Http | ServerTransport::Stdio => post(handle_http),
        };
        Router::new().route(&self.state.mcp_path, handler).with_state(self.clone())
    }

    /// Reads an HTTP request body and handles the JSON-RPC payload.
    async fn receive(&self, transport: ServerTransport, request: Request) -> RpcReply {
        let started = Instant::now();
        let peer_ip = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let declared_len = request
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<usize>().ok());
        let meta = RequestMeta {
            transport,
            peer_ip,
            request_bytes: declared_len.unwrap_or_default(),
            started,
        };
        match axum::body::to_bytes(request.into_body(), self.state.max_body_bytes).await {
            Ok(bytes) => self.handle_payload(
                RequestMeta {
                    request_bytes: bytes.len(),
                    ..meta
                },
                &bytes,
            ),
            Err(_) => self.finish(&meta, oversized_exchange()),
        }
    }

    /// Handles a raw JSON-RPC payload and records audit and metrics events.
    pub(crate) fn handle_payload(&self, meta: RequestMeta, bytes: &[u8]) -> RpcReply {
        let exchange = if bytes.len() > self.state.max_body_bytes {
            oversized_exchange()
        } else {
            self.dispatch(bytes)
        };
        self.finish(&meta, exchange)
    }

    /// Parses and routes a payload that is within limits.
    fn dispatch(&self, bytes: &[u8]) -> Exchange {
        let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
            return Exchange::failure(Value::Null, McpMethod::Invalid, PARSE_ERROR, "parse error");
        };
        let Value::Object(object) = value else {
            return Exchange::failure(
                Value::Null,
                McpMethod::Invalid,
                INVALID_REQUEST,
                "invalid json-rpc request",
            );
        };
        let id = object.get("id").cloned();
        if let Some(id) = &id
            && !(id.is_string() || id.is_number() || id.is_null())
        {
            return Exchange::failure(
                Value::Null,
                McpMethod::Invalid,
                INVALID_REQUEST,
                "invalid json-rpc id",
            );
        }
        let Ok(request) = serde_json::from_value::<JsonRpcRequest>(Value::Object(object)) else {
            return Exchange::failure(
                id.unwrap_or(Value::Null),
                McpMethod::Invalid,
                INVALID_REQUEST,
                "invalid json-rpc request",
            );
        };
        let method = McpMethod::classify(&request.method);
        if request.jsonrpc != "2.0" {
            return Exchange::failure(
                id.unwrap_or(Value::Null),
                method,
                INVALID_REQUEST,
                "invalid json-rpc version",
            );
        }
        let Some(id) = id else {
            return Exchange::notification(method);
        };
        match method {
            McpMethod::Initialize => {
                Exchange::success(id, method, self.initialize_result(request.params.as_ref()))
            }
            McpMethod::Ping => Exchange::success(id, method, json!({})),
            McpMethod::ToolsList => {
                let listing = ToolListResult {
                    tools: self.state.router.list_tools().to_vec(),
                };
                match serde_json::to_value(listing) {
                    Ok(value) => Exchange::success(id, method, value),
                    Err(_) => Exchange::failure(id, method, INTERNAL_ERROR, "serialization failed"),
                }
            }
            McpMethod::ToolsCall => self.call_tool(id, request.params),
            McpMethod::Notification | McpMethod::Invalid | McpMethod::Other => {
                Exchange::failure(id, method, METHOD_NOT_FOUND, "method not found")
            }
        }
    }

    /// Handles `tools/call`.
    fn call_tool(&self, id: Value, params: Option<Value>) -> Exchange {
        let method = McpMethod::ToolsCall;
        let Ok(call) = serde_json::from_value::<ToolCallParams>(params.unwrap_or(Value::Null))
        else {
            return Exchange::failure(id, method, INVALID_PARAMS, "invalid tool params");
        };
        let result = self.state.router.handle_tool_call(&call.name, call.arguments);
        let is_error = result.is_error;
        match serde_json::to_value(result) {
            Ok(value) => Exchange {
                tool: ToolName::parse(&call.name),
                is_error,
                ..Exchange::success(id, method, value)
            },
            Err(_) => Exchange::failure(id, method, INTERNAL_ERROR, "serialization failed"),
        }
    }

    /// Builds the `initialize` result, echoing a supported protocol version.
    fn initialize_result(&self, params: Option<&Value>) -> Value {
        let requested = params
            .and_then(|params| params.get("protocolVersion"))
            .and_then(Value::as_str)
            .filter(|version| SUPPORTED_PROTOCOL_VERSIONS.contains(version));
        json!({
            "protocolVersion": requested.unwrap_or(SUPPORTED_PROTOCOL_VERSIONS[0]),
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.state.service,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    /// Serializes the response and records audit and metrics events.
    fn finish(&self, meta: &RequestMeta, exchange: Exchange) -> RpcReply {
        let body = exchange.response.as_ref().map(|response| {
            serde_json::to_vec(response).unwrap_or_else(|_| FALLBACK_ERROR_BODY.to_vec())
        });
        let response_bytes = body.as_ref().map_or(0, Vec::len);
        let error_code = exchange.response.as_ref().and_then(|response| {
            response.error.as_ref().map(|error| error.code)
        });
        let outcome = if error_code.is_some() { McpOutcome::Error } else { McpOutcome::Ok };
        self.state.audit.record(&McpAuditEvent::new(McpAuditEventParams {
            service: self.state.service.clone(),
            request_id: exchange.request_id,
            transport: meta.transport,
            peer_ip: meta.peer_ip.map(|ip| ip.to_string()),
            method: exchange.method,
            tool: exchange.tool,
            outcome,
            is_error: exchange.is_error,
            error_code,
            request_bytes: meta.request_bytes,
            response_bytes,
        }));
        let metric = McpMetricEvent {
            service: self.state.service.clone(),
            transport: meta.transport,
            method: exchange.method,
            tool: exchange.tool,
            outcome,
            is_error: exchange.is_error,
            error_code,
            request_bytes: meta.request_bytes,
            response_bytes,
        };
        self.state.metrics.record_request(metric.clone());
        self.state.metrics.record_latency(metric, meta.started.elapsed());
        RpcReply {
            status: exchange.status,
            body,
        }
    }
}

/// Serialized error used if a response cannot be encoded.
const FALLBACK_ERROR_BODY: &[u8] =
    br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32603,"message":"serialization failed"}}"#;

/// Builds the exchange for a body over the size limit.
fn oversized_exchange() -> Exchange {
    Exchange {
        status: StatusCode::PAYLOAD_TOO_LARGE,
        ..Exchange::failure(Value::Null, McpMethod::Invalid, BODY_TOO_LARGE, "request body too large")
    }
}

/// Returns an allow-all CORS layer (no credentials).
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
}

// ============================================================================
// SECTION: MCP Server
// ============================================================================

/// MCP server instance serving a single app.
pub struct McpServer {
    /// Server configuration.
    config: DraftworxConfig,
    /// App serving every request.
    app: McpApp,
}

impl McpServer {
    /// Builds a new MCP server from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when initialization fails.
    pub fn from_config(config: DraftworxConfig) -> Result<Self, McpServerError> {
        config.validate().map_err(|err| McpServerError::Config(err.to_string()))?;
        let audit = audit_sink_from_config(&config.server.audit)
            .map_err(|err| McpServerError::Init(format!("audit log: {err}")))?;
        let app = McpApp::from_server_config(config.server.name.clone(), &config.server, audit);
        Ok(Self {
            config,
            app,
        })
    }

    /// Returns the served app.
    #[must_use]
    pub const fn app(&self) -> &McpApp {
        &self.app
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`McpServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), McpServerError> {
        let server = &self.config.server;
        match server.transport {
            ServerTransport::Stdio => serve_stdio(&self.app).await,
            transport @ (ServerTransport::Http | ServerTransport::Sse) => {
                let addr =
                    server.bind_addr().map_err(|err| McpServerError::Config(err.to_string()))?;
                if !addr.ip().is_loopback() {
                    emit_lifecycle(
                        "mcp_warning",
                        format!("{} listening on non-loopback address {addr}", server.name),
                    );
                }
                let mut router = self.app.http_router(transport);
                if server.cors.enabled {
                    router = router.layer(cors_layer());
                }
                serve_router(addr, router, transport.as_str()).await
            }
        }
    }
}

/// Binds `addr` and serves `router` with peer addresses attached.
pub(crate) async fn serve_router(
    addr: SocketAddr,
    router: Router,
    label: &str,
) -> Result<(), McpServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| McpServerError::Transport(format!("{label} bind failed: {err}")))?;
    axum::serve(listener, router.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .map_err(|err| McpServerError::Transport(format!("{label} server failed: {err}")))
}

/// Writes a lifecycle event line to stderr.
pub(crate) fn emit_lifecycle(event: &'static str, message: String) {
    McpStderrAuditSink.record_gateway(&GatewayAuditEvent::new(event, message));
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Handles HTTP JSON-RPC requests.
async fn handle_http(State(app): State<McpApp>, request: Request) -> Response {
    app.receive(ServerTransport::Http, request).await.into_json_response()
}

/// Handles SSE JSON-RPC requests.
///
/// Successful exchanges are delivered as one `message` event; notifications
/// and HTTP-level failures keep their plain status and JSON body.
async fn handle_sse(State(app): State<McpApp>, request: Request) -> Response {
    let reply = app.receive(ServerTransport::Sse, request).await;
    match (reply.status, reply.body) {
        (status, Some(body)) if status == StatusCode::OK => {
            let payload = String::from_utf8_lossy(&body).into_owned();
            let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(1);
            let _ = tx.send(Ok(Event::default().event("message").data(payload))).await;
            Sse::new(ReceiverStream::new(rx)).into_response()
        }
        (status, body) => RpcReply {
            status,
            body,
        }
        .into_json_response(),
    }
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// One newline-delimited stdio frame.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum StdioFrame {
    /// A complete line without its terminator.
    Line(Vec<u8>),
    /// A line longer than the body limit; its bytes were discarded.
    Oversized(usize),
}

/// Serves newline-delimited JSON-RPC over stdin/stdout until stdin closes.
async fn serve_stdio(app: &McpApp) -> Result<(), McpServerError> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut writer = tokio::io::stdout();
    while let Some(frame) = read_frame(&mut reader, app.state.max_body_bytes).await? {
        let meta = |request_bytes| RequestMeta {
            transport: ServerTransport::Stdio,
            peer_ip: None,
            request_bytes,
            started: Instant::now(),
        };
        let reply = match frame {
            StdioFrame::Line(line) if line.iter().all(u8::is_ascii_whitespace) => continue,
            StdioFrame::Line(line) => app.handle_payload(meta(line.len()), &line),
            StdioFrame::Oversized(len) => app.finish(&meta(len), oversized_exchange()),
        };
        if let Some(body) = reply.body {
            write_line(&mut writer, &body).await?;
        }
    }
    Ok(())
}

/// Reads one newline-terminated frame, discarding lines over `max_bytes`.
pub(crate) async fn read_frame<R>(
    reader: &mut R,
    max_bytes: usize,
) -> Result<Option<StdioFrame>, McpServerError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    let mut seen = 0usize;
    let mut oversized = false;
    loop {
        let available = reader
            .fill_buf()
            .await
            .map_err(|_| McpServerError::Transport("stdio read failed".to_string()))?;
        if available.is_empty() {
            if seen == 0 {
                return Ok(None);
            }
            break;
        }
        let newline = available.iter().position(|byte| *byte == b'\n');
        let take = newline.unwrap_or(available.len());
        seen = seen.saturating_add(take);
        if !oversized {
            if seen > max_bytes {
                oversized = true;
                line.clear();
            } else {
                line.extend_from_slice(&available[..take]);
            }
        }
        let consumed = newline.map_or(take, |index| index + 1);
        reader.consume(consumed);
        if newline.is_some() {
            break;
        }
    }
    if oversized {
        return Ok(Some(StdioFrame::Oversized(seen)));
    }
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(Some(StdioFrame::Line(line)))
}

/// Writes one payload followed by a newline and flushes.
async fn write_line<W>(writer: &mut W, payload: &[u8]) -> Result<(), McpServerError>
where
    W: tokio::io::AsyncWrite + Unpin,
{
    let failed = |_| McpServerError::Transport("stdio write failed".to_string());
    writer.write_all(payload).await.map_err(failed)?;
    writer.write_all(b"\n").await.map_err(failed)?;
    writer.flush().await.map_err(failed)
}

// ============================================================================
// SECTION: JSON-RPC Types
// ============================================================================

/// Incoming JSON-RPC request payload (the id is read separately).
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    #[serde(default)]
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments; absent or null means an empty object.
    #[serde(default)]
    arguments: Option<Value>,
}

/// Transport metadata for one request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestMeta {
    /// Transport that delivered the request.
    pub(crate) transport: ServerTransport,
    /// Peer address when known.
    pub(crate) peer_ip: Option<IpAddr>,
    /// Request body size in bytes.
    pub(crate) request_bytes: usize,
    /// Time the request was received.
    pub(crate) started: Instant,
}

/// Routed request before serialization.
struct Exchange {
    /// HTTP status for the reply.
    status: StatusCode,
    /// Response envelope; `None` for notifications.
    response: Option<JsonRpcResponse>,
    /// Method classification.
    method: McpMethod,
    /// Tool addressed by `tools/call`, when known.
    tool: Option<ToolName>,
    /// Request identifier rendered for audit.
    request_id: Option<String>,
    /// True when a tool returned an error result.
    is_error: bool,
}

impl Exchange {
    /// Builds a successful exchange.
    fn success(id: Value, method: McpMethod, result: Value) -> Self {
        Self {
            status: StatusCode::OK,
            request_id: render_id(&id),
            response: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: Some(result),
                error: None,
            }),
            method,
            tool: None,
            is_error: false,
        }
    }

    /// Builds a JSON-RPC error exchange.
    fn failure(id: Value, method: McpMethod, code: i64, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            request_id: render_id(&id),
            response: Some(JsonRpcResponse {
                jsonrpc: "2.0",
                id,
                result: None,
                error: Some(JsonRpcError {
                    code,
                    message: message.to_string(),
                }),
            }),
            method,
            tool: None,
            is_error: false,
        }
    }

    /// Builds the acknowledgement for a notification.
    const fn notification(method: McpMethod) -> Self {
        Self {
            status: StatusCode::ACCEPTED,
            response: None,
            method,
            tool: None,
            request_id: None,
            is_error: false,
        }
    }
}

/// Renders a request id for audit events; string ids are kept unquoted.
fn render_id(id: &Value) -> Option<String> {
    match id {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Serialized reply ready for a transport.
#[derive(Debug)]
pub(crate) struct RpcReply {
    /// HTTP status for the reply.
    pub(crate) status: StatusCode,
    /// Serialized JSON body; `None` for notifications.
    pub(crate) body: Option<Vec<u8>>,
}

impl RpcReply {
    /// Converts the reply into a JSON HTTP response.
    fn into_json_response(self) -> Response {
        match self.body {
            Some(body) => (
                self.status,
                [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
                body,
            )
                .into_response(),
            None => self.status.into_response(),
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// MCP server errors.
#[derive(Debug, thiserror::Error)]
pub enum McpServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
