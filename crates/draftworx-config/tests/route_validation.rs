// crates/draftworx-config/tests/route_validation.rs
// =============================================================================
// Module: Route Validation Tests
// Description: Fail-closed checks for server and gateway routing config.
// Purpose: Reject configurations the HTTP router cannot serve.
// =============================================================================

//! Route and listener validation tests for draftworx-config.

use draftworx_config::ServerTransport;

mod common;

type TestResult = Result<(), String>;

#[test]
fn zero_body_limit_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = 0;
    common::assert_invalid(config.validate(), "max_body_bytes must be greater than zero")
}

#[test]
fn malformed_bind_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = Some("localhost".to_string());
    common::assert_invalid(config.validate(), "server.bind is not a valid address")
}

#[test]
fn missing_bind_rejected_for_http() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = None;
    common::assert_invalid(config.validate(), "server.bind requires a bind address")
}

#[test]
fn stdio_ignores_bind() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.transport = ServerTransport::Stdio;
    config.server.bind = None;
    config.validate().map_err(|err| err.to_string())
}

#[test]
fn malformed_gateway_bind_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.bind = "8000".to_string();
    common::assert_invalid(config.validate(), "gateway.bind is not a valid address")
}

#[test]
fn mcp_path_rules_enforced() -> TestResult {
    for (path, needle) in [
        ("mcp", "must start with /"),
        ("/", "must not be the root path"),
        ("/mcp/", "must not end with /"),
        ("/{*rest}", "reserved characters"),
    ] {
        let mut config = common::minimal_config().map_err(|err| err.to_string())?;
        config.server.mcp_path = path.to_string();
        common::assert_invalid(config.validate(), needle)?;
    }
    Ok(())
}

#[test]
fn duplicate_prefixes_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.mounts =
        vec![common::mount("/draftworx", "first"), common::mount("/draftworx", "second")];
    common::assert_invalid(config.validate(), "overlaps")
}

#[test]
fn nested_prefixes_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.mounts =
        vec![common::mount("/draftworx", "first"), common::mount("/draftworx/v2", "second")];
    common::assert_invalid(config.validate(), "overlaps")
}

#[test]
fn reserved_prefixes_rejected() -> TestResult {
    for prefix in ["/health", "/assets", "/assets/extra"] {
        let mut config = common::minimal_config().map_err(|err| err.to_string())?;
        config.gateway.mounts = vec![common::mount(prefix, "svc")];
        common::assert_invalid(config.validate(), "collides with")?;
    }
    Ok(())
}

#[test]
fn root_prefix_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.mounts = vec![common::mount("/", "svc")];
    common::assert_invalid(config.validate(), "must not be the root path")
}

#[test]
fn duplicate_and_reserved_service_names_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.mounts = vec![common::mount("/a", "svc"), common::mount("/b", "svc")];
    common::assert_invalid(config.validate(), "is duplicated")?;
    config.gateway.mounts = vec![common::mount("/a", "health")];
    common::assert_invalid(config.validate(), "is reserved")?;
    config.gateway.mounts = vec![common::mount("/a", " ")];
    common::assert_invalid(config.validate(), "must be non-empty")
}

#[test]
fn empty_mount_list_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.gateway.mounts.clear();
    common::assert_invalid(config.validate(), "gateway.mounts must not be empty")
}

#[test]
fn empty_audit_path_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.audit.path = Some("  ".to_string());
    common::assert_invalid(config.validate(), "audit.path must be non-empty")
}
