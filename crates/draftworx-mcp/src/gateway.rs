// crates/draftworx-mcp/src/gateway.rs
// ============================================================================
// Module: MCP Gateway
// Description: Aggregating HTTP process for several mounted MCP services.
// Purpose: Serve health, index, static assets, and prefixed MCP apps.
// Dependencies: axum, tower-http, serde_json, crate::server
// ============================================================================

//! ## Overview
//! The gateway is assembled once from configuration into an ordered
//! [`MountTable`]. Every mount owns an [`McpApp`] with its own engine, so no
//! core state is shared between services. Requests under a mount prefix are
//! forwarded with the prefix stripped; `/health` and `/` are answered from
//! an index rendered at startup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use tower_http::services::ServeDir;

use crate::audit::audit_sink_from_config;
use crate::config::ASSETS_PATH;
use crate::config::DraftworxConfig;
use crate::config::HEALTH_PATH;
use crate::config::ServerTransport;
use crate::server::McpApp;
use crate::server::cors_layer;
use crate::server::emit_lifecycle;
use crate::server::serve_router;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Service name reported by the gateway index.
pub const GATEWAY_SERVICE_NAME: &str = "Draftworx Unified MCP Server";
/// Service label reported for the static asset mount.
pub const STATIC_ASSETS_SERVICE: &str = "static-assets";

// ============================================================================
// SECTION: Mount Table
// ============================================================================

/// One mounted MCP service.
#[derive(Clone)]
pub struct MountEntry {
    /// Path prefix stripped before forwarding.
    pub prefix: String,
    /// App serving requests under the prefix.
    pub app: McpApp,
}

impl MountEntry {
    /// Returns the full JSON-RPC endpoint for this mount.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.prefix, self.app.mcp_path())
    }
}

/// Ordered set of mounted services.
#[derive(Clone, Default)]
pub struct MountTable {
    /// Entries in configuration order.
    entries: Vec<MountEntry>,
}

impl MountTable {
    /// Adds a mount at the end of the table.
    pub fn push(&mut self, prefix: impl Into<String>, app: McpApp) {
        self.entries.push(MountEntry {
            prefix: prefix.into(),
            app,
        });
    }

    /// Returns entries in routing order.
    #[must_use]
    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    /// Returns mounted service names in routing order.
    #[must_use]
    pub fn services(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.app.service()).collect()
    }
}

// ============================================================================
// SECTION: Gateway
// ============================================================================

/// Aggregating gateway over a [`MountTable`].
pub struct Gateway {
    /// Validated configuration.
    config: DraftworxConfig,
    /// Mounted services.
    mounts: MountTable,
    /// Static asset directory when present on disk.
    assets_dir: Option<PathBuf>,
}

impl Gateway {
    /// Builds the gateway from configuration.
    ///
    /// A configured asset directory that does not exist is skipped with a
    /// warning line on stderr.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when configuration is invalid or the audit
    /// sink cannot be opened.
    pub fn from_config(config: DraftworxConfig) -> Result<Self, GatewayError> {
        config.validate().map_err(|err| GatewayError::Config(err.to_string()))?;
        let audit = audit_sink_from_config(&config.server.audit)
            .map_err(|err| GatewayError::Init(format!("audit log: {err}")))?;
        let mut mounts = MountTable::default();
        for mount in &config.gateway.mounts {
            let app =
                McpApp::from_server_config(mount.service.clone(), &config.server, Arc::clone(&audit));
            mounts.push(mount.prefix.clone(), app);
        }
        let assets_dir = config.gateway.assets_dir.as_deref().and_then(|dir| {
            let path = Path::new(dir);
            if path.is_dir() {
                Some(path.to_path_buf())
            } else {
                emit_lifecycle(
                    "gateway_warning",
                    format!("assets directory {dir} not found; {ASSETS_PATH} is not mounted"),
                );
                None
            }
        });
        Ok(Self {
            config,
            mounts,
            assets_dir,
        })
    }

    /// Returns the mount table.
    #[must_use]
    pub const fn mounts(&self) -> &MountTable {
        &self.mounts
    }

    /// Returns the mounted asset directory, if any.
    #[must_use]
    pub fn assets_dir(&self) -> Option<&Path> {
        self.assets_dir.as_deref()
    }

    /// Renders the `/health` payload.
    #[must_use]
    pub fn health(&self) -> Value {
        let mut services: Vec<Value> =
            self.mounts.services().into_iter().map(Value::from).collect();
        if self.assets_dir.is_some() {
            services.push(Value::from(STATIC_ASSETS_SERVICE));
        }
        json!({
            "status": "healthy",
            "services": services,
            "endpoints": self.endpoints(),
        })
    }

    /// Renders the `/` index payload.
    #[must_use]
    pub fn index(&self) -> Value {
        let tools: Map<String, Value> = self
            .mounts
            .entries()
            .iter()
            .map(|entry| {
                let names: Vec<Value> = entry
                    .app
                    .router()
                    .tool_names()
                    .into_iter()
                    .map(|name| Value::from(name.as_str()))
                    .collect();
                (entry.app.service().to_string(), Value::Array(names))
            })
            .collect();
        json!({
            "service": GATEWAY_SERVICE_NAME,
            "endpoints": self.endpoints(),
            "tools": tools,
        })
    }

    /// Builds the endpoint map shared by `/health` and `/`.
    fn endpoints(&self) -> Map<String, Value> {
        let mut endpoints: Map<String, Value> = self
            .mounts
            .entries()
            .iter()
            .map(|entry| (entry.app.service().to_string(), Value::from(entry.endpoint())))
            .collect();
        endpoints.insert("health".to_string(), Value::from(HEALTH_PATH));
        if self.assets_dir.is_some() {
            endpoints.insert("assets".to_string(), Value::from(format!("{ASSETS_PATH}/")));
        }
        endpoints
    }

    /// Builds the gateway router.
    #[must_use]
    pub fn router(&self) -> Router {
        let index = Arc::new(GatewayIndex {
            health: self.health(),
            root: self.index(),
        });
        let transport = match self.config.server.transport {
            ServerTransport::Sse => ServerTransport::Sse,
            ServerTransport::Http | ServerTransport::Stdio => ServerTransport::Http,
        };
        let mut router = Router::new()
            .route(HEALTH_PATH, get(handle_health))
            .route("/", get(handle_index))
            .with_state(index);
        for entry in self.mounts.entries() {
            router = router.nest(&entry.prefix, entry.app.http_router(transport));
        }
        if let Some(dir) = &self.assets_dir {
            router = router.nest_service(ASSETS_PATH, ServeDir::new(dir));
        }
        if self.config.server.cors.enabled {
            router = router.layer(cors_layer());
        }
        router
    }

    /// Serves the gateway until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when binding or serving fails.
    pub async fn serve(self) -> Result<(), GatewayError> {
        let addr = self
            .config
            .gateway
            .bind_addr()
            .map_err(|err| GatewayError::Config(err.to_string()))?;
        if !addr.ip().is_loopback() {
            emit_lifecycle(
                "gateway_warning",
                format!("gateway listening on non-loopback address {addr}"),
            );
        }
        emit_lifecycle(
            "gateway_started",
            format!(
                "gateway listening on {addr} with services {}",
                self.mounts.services().join(", ")
            ),
        );
        serve_router(addr, self.router(), "gateway")
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))
    }
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Payloads rendered once at startup.
struct GatewayIndex {
    /// `/health` payload.
    health: Value,
    /// `/` payload.
    root: Value,
}

/// Handles `GET /health`.
async fn handle_health(State(index): State<Arc<GatewayIndex>>) -> Json<Value> {
    Json(index.health.clone())
}

/// Handles `GET /`.
async fn handle_index(State(index): State<Arc<GatewayIndex>>) -> Json<Value> {
    Json(index.root.clone())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
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
