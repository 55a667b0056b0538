// crates/draftworx-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Tests
// Description: File loading limits and path resolution.
// Purpose: Ensure loading fails closed on bad files and explicit missing paths.
// =============================================================================

//! Load-path tests for draftworx-config.

use std::fs;

use draftworx_config::ConfigError;
use draftworx_config::DraftworxConfig;
use draftworx_config::MAX_CONFIG_FILE_SIZE;

type TestResult = Result<(), String>;

#[test]
fn explicit_missing_path_is_an_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    match DraftworxConfig::load(Some(&path)) {
        Err(ConfigError::Io(_)) => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("missing explicit config accepted".to_string()),
    }
}

#[test]
fn loads_and_validates_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("draftworx.toml");
    fs::write(&path, "[server]\nmcp_path = \"/rpc\"\n").map_err(|err| err.to_string())?;
    let config = DraftworxConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config.server.mcp_path == "/rpc" { Ok(()) } else { Err("mcp_path not loaded".to_string()) }
}

#[test]
fn invalid_file_fails_validation() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("draftworx.toml");
    fs::write(&path, "[server]\nmax_body_bytes = 0\n").map_err(|err| err.to_string())?;
    match DraftworxConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("max_body_bytes") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("invalid config accepted".to_string()),
    }
}

#[test]
fn oversized_file_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("draftworx.toml");
    let padding = format!("# {}\n", "x".repeat(MAX_CONFIG_FILE_SIZE));
    fs::write(&path, padding).map_err(|err| err.to_string())?;
    match DraftworxConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("size limit") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("oversized config accepted".to_string()),
    }
}

#[test]
fn non_utf8_file_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("draftworx.toml");
    fs::write(&path, [0xff, 0xfe, 0x00]).map_err(|err| err.to_string())?;
    match DraftworxConfig::load(Some(&path)) {
        Err(ConfigError::Invalid(message)) if message.contains("utf-8") => Ok(()),
        Err(err) => Err(format!("unexpected error: {err}")),
        Ok(_) => Err("binary config accepted".to_string()),
    }
}
