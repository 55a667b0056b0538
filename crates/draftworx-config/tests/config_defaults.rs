// crates/draftworx-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults Tests
// Description: Default values and TOML parsing behavior.
// Purpose: Pin the out-of-the-box server and gateway layout.
// =============================================================================

//! Default and parsing tests for draftworx-config.

use draftworx_config::ConfigError;
use draftworx_config::DraftworxConfig;
use draftworx_config::ServerTransport;

mod common;

type TestResult = Result<(), String>;

#[test]
fn empty_file_yields_validated_defaults() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config != DraftworxConfig::default() {
        return Err("empty TOML should equal Default".to_string());
    }
    if config.server.transport != ServerTransport::Http {
        return Err("default transport should be http".to_string());
    }
    if config.server.mcp_path != "/mcp" || config.server.max_body_bytes != 1024 * 1024 {
        return Err("unexpected server defaults".to_string());
    }
    if config.gateway.mounts != vec![common::mount("/draftworx", "draftworx-mcp")] {
        return Err("unexpected default mounts".to_string());
    }
    if config.gateway.assets_dir.as_deref() != Some("assets") {
        return Err("unexpected default assets dir".to_string());
    }
    Ok(())
}

#[test]
fn full_example_parses() -> TestResult {
    let config = common::config_from_toml(
        r#"
[server]
transport = "sse"
bind = "127.0.0.1:9000"
mcp_path = "/rpc"
max_body_bytes = 4096
name = "drafts"

[server.audit]
enabled = false
path = "audit.jsonl"

[server.cors]
enabled = false

[gateway]
bind = "0.0.0.0:8080"

[[gateway.mounts]]
prefix = "/draftworx"
service = "draftworx-mcp"

[[gateway.mounts]]
prefix = "/staging/draftworx"
service = "draftworx-staging"
"#,
    )
    .map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.server.transport != ServerTransport::Sse || config.server.cors.enabled {
        return Err("server section not applied".to_string());
    }
    if config.gateway.mounts.len() != 2 || config.gateway.assets_dir.is_none() {
        return Err("gateway section not applied".to_string());
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> TestResult {
    match common::config_from_toml("[server]\nport = 8000\n") {
        Err(ConfigError::Parse(message)) if message.contains("port") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("unknown key accepted".to_string()),
    }
}

#[test]
fn rendered_toml_round_trips() -> TestResult {
    let config = DraftworxConfig::default();
    let rendered = config.to_toml_string().map_err(|err| err.to_string())?;
    let parsed = common::config_from_toml(&rendered).map_err(|err| err.to_string())?;
    if parsed == config { Ok(()) } else { Err(format!("round trip drifted:\n{rendered}")) }
}
