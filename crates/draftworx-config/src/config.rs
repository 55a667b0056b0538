// crates/draftworx-config/src/config.rs
// ============================================================================
// Module: Draftworx Configuration
// Description: Configuration loading and validation for Draftworx MCP.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `DRAFTWORX_CONFIG`, then
//! `draftworx.toml` in the working directory. Only the last of these may be
//! absent, in which case built-in defaults apply.
//!
//! Route paths (`mcp_path`, mount prefixes) are validated here so the HTTP
//! router never sees a path it would refuse to register.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "draftworx.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "DRAFTWORX_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a route path.
const MAX_ROUTE_PATH_LENGTH: usize = 256;
/// Maximum number of gateway mounts.
const MAX_GATEWAY_MOUNTS: usize = 32;
/// Maximum length of a mounted service name.
const MAX_SERVICE_NAME_LENGTH: usize = 64;
/// Gateway health route.
pub const HEALTH_PATH: &str = "/health";
/// Gateway static asset route.
pub const ASSETS_PATH: &str = "/assets";
/// Endpoint keys the gateway reserves for its own routes.
const RESERVED_SERVICE_NAMES: [&str; 2] = ["health", "assets"];
/// Characters that carry routing meaning and are rejected in route paths.
const ROUTE_META_CHARS: [char; 6] = ['*', '{', '}', ':', '?', '#'];

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root configuration for Draftworx processes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DraftworxConfig {
    /// MCP server settings shared by every mounted service.
    #[serde(default)]
    pub server: ServerConfig,
    /// Aggregating gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl DraftworxConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not a valid config.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.gateway.validate()?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Server Config
// ============================================================================

/// Server configuration for MCP transports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Transport type for MCP.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address for HTTP or SSE transports.
    #[serde(default = "default_bind")]
    pub bind: Option<String>,
    /// Route serving JSON-RPC requests.
    #[serde(default = "default_mcp_path")]
    pub mcp_path: String,
    /// Maximum request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Server name reported by `initialize`.
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: ServerAuditConfig,
    /// Cross-origin policy for HTTP transports.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::default(),
            bind: default_bind(),
            mcp_path: default_mcp_path(),
            max_body_bytes: default_max_body_bytes(),
            name: default_server_name(),
            audit: ServerAuditConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Validates server transport configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        validate_service_name("server.name", &self.name)?;
        validate_route_path("server.mcp_path", &self.mcp_path)?;
        self.audit.validate()?;
        match self.transport {
            ServerTransport::Http | ServerTransport::Sse => {
                self.bind_addr()?;
            }
            ServerTransport::Stdio => {}
        }
        Ok(())
    }

    /// Returns the parsed bind address for HTTP or SSE transports.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind is missing or malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("server.bind", self.bind.as_deref().unwrap_or_default())
    }
}

/// Supported MCP transport types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// Use stdin/stdout transport.
    Stdio,
    /// Use HTTP JSON-RPC transport.
    #[default]
    Http,
    /// Use SSE transport for responses.
    Sse,
}

impl ServerTransport {
    /// Returns the transport label used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Sse => "sse",
        }
    }
}

/// Audit logging configuration for MCP server requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerAuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when absent.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for ServerAuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl ServerAuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

/// Cross-origin configuration for HTTP transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allow any origin, method, and header (no credentials).
    #[serde(default = "default_cors_enabled")]
    pub enabled: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_cors_enabled(),
        }
    }
}

// ============================================================================
// SECTION: Gateway Config
// ============================================================================

/// Aggregating gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Bind address for the gateway listener.
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
    /// Optional static asset directory served under `/assets`.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: Option<String>,
    /// Mounted MCP services in routing order.
    #[serde(default = "default_mounts")]
    pub mounts: Vec<MountConfig>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_gateway_bind(),
            assets_dir: default_assets_dir(),
            mounts: default_mounts(),
        }
    }
}

impl GatewayConfig {
    /// Validates gateway routing configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if let Some(dir) = &self.assets_dir {
            validate_path_string("gateway.assets_dir", dir)?;
        }
        if self.mounts.is_empty() {
            return Err(ConfigError::Invalid("gateway.mounts must not be empty".to_string()));
        }
        if self.mounts.len() > MAX_GATEWAY_MOUNTS {
            return Err(ConfigError::Invalid(format!(
                "gateway.mounts exceeds max of {MAX_GATEWAY_MOUNTS}"
            )));
        }
        let mut services = BTreeSet::new();
        for (index, mount) in self.mounts.iter().enumerate() {
            mount.validate()?;
            if !services.insert(mount.service.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "gateway.mounts service {} is duplicated",
                    mount.service
                )));
            }
            for earlier in &self.mounts[.. index] {
                if routes_overlap(&earlier.prefix, &mount.prefix) {
                    return Err(ConfigError::Invalid(format!(
                        "gateway.mounts prefix {} overlaps {}",
                        mount.prefix, earlier.prefix
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns the parsed gateway bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the bind is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_bind("gateway.bind", &self.bind)
    }
}

/// Single gateway mount: a path prefix routed to one MCP service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MountConfig {
    /// Path prefix stripped before forwarding.
    pub prefix: String,
    /// Service name reported in health and root listings.
    pub service: String,
}

impl MountConfig {
    /// Validates a single mount entry.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_route_path("gateway.mounts.prefix", &self.prefix)?;
        validate_service_name("gateway.mounts.service", &self.service)?;
        for reserved in [HEALTH_PATH, ASSETS_PATH] {
            if routes_overlap(reserved, &self.prefix) {
                return Err(ConfigError::Invalid(format!(
                    "gateway.mounts prefix {} collides with {reserved}",
                    self.prefix
                )));
            }
        }
        if RESERVED_SERVICE_NAMES.contains(&self.service.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "gateway.mounts service {} is reserved",
                self.service
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
///
/// The flag reports whether the path was requested explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a filesystem path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigError::Invalid(format!("{field} exceeds path limits")))
}

/// Validates an HTTP route path such as `/mcp` or `/draftworx`.
fn validate_route_path(field: &str, value: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Invalid(format!("{field} must start with /")));
    }
    if value == "/" {
        return Err(ConfigError::Invalid(format!("{field} must not be the root path")));
    }
    if value.ends_with('/') {
        return Err(ConfigError::Invalid(format!("{field} must not end with /")));
    }
    if value.len() > MAX_ROUTE_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    if value.contains("//") {
        return Err(ConfigError::Invalid(format!("{field} must not contain empty segments")));
    }
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control() || ROUTE_META_CHARS.contains(&ch))
    {
        return Err(ConfigError::Invalid(format!("{field} contains reserved characters")));
    }
    Ok(())
}

/// Validates a service name used as a listing key.
fn validate_service_name(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if value.len() > MAX_SERVICE_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}

/// Parses a socket address for a listener.
fn parse_bind(field: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} requires a bind address")));
    }
    trimmed.parse().map_err(|_| ConfigError::Invalid(format!("{field} is not a valid address")))
}

/// Returns true when one route is a segment-aligned prefix of the other.
fn routes_overlap(left: &str, right: &str) -> bool {
    let covers = |outer: &str, inner: &str| {
        inner == outer || inner.strip_prefix(outer).is_some_and(|rest| rest.starts_with('/'))
    };
    covers(left, right) || covers(right, left)
}

/// Default HTTP bind address.
fn default_bind() -> Option<String> {
    Some("127.0.0.1:8000".to_string())
}

/// Default JSON-RPC route.
fn default_mcp_path() -> String {
    "/mcp".to_string()
}

/// Default maximum request body size in bytes.
const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

/// Default server name.
fn default_server_name() -> String {
    "draftworx-mcp".to_string()
}

/// Default audit toggle.
const fn default_audit_enabled() -> bool {
    true
}

/// Default CORS toggle.
const fn default_cors_enabled() -> bool {
    true
}

/// Default gateway bind address.
fn default_gateway_bind() -> String {
    "127.0.0.1:8000".to_string()
}

/// Default static asset directory.
fn default_assets_dir() -> Option<String> {
    Some("assets".to_string())
}

/// Default gateway mounts.
fn default_mounts() -> Vec<MountConfig> {
    vec![MountConfig {
        prefix: "/draftworx".to_string(),
        service: "draftworx-mcp".to_string(),
    }]
}

// ============================================================================
// SECTION: Tests
// ============================================================================
