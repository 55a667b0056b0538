// crates/draftworx-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for draftworx-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use draftworx_config::ConfigError;
use draftworx_config::DraftworxConfig;
use draftworx_config::MountConfig;

/// Parses a TOML string into a `DraftworxConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<DraftworxConfig, ConfigError> {
    DraftworxConfig::from_toml_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<DraftworxConfig, ConfigError> {
    config_from_toml("")
}

/// Builds a mount entry.
pub fn mount(prefix: &str, service: &str) -> MountConfig {
    MountConfig {
        prefix: prefix.to_string(),
        service: service.to_string(),
    }
}

/// Asserts that a validation result is an error containing a specific substring.
pub fn assert_invalid(result: Result<(), ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(()) => Err("expected invalid config".to_string()),
    }
}
