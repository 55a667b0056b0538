// crates/draftworx-core/src/engine.rs
// ============================================================================
// Module: Tool Engine
// Description: Facade running validate, dispatch, and envelope for one call.
// Purpose: Single entry point used by every host transport.
// Dependencies: serde_json, crate::{catalog, dispatch, envelope, validation}
// ============================================================================

//! ## Overview
//! A [`ToolEngine`] owns its own [`ToolCatalog`] and schema registry.
//! Separate engines never share state, so mounting several services in one
//! process needs no coordination. Calls are synchronous and stateless.

use serde_json::Value;

use crate::catalog::ToolCatalog;
use crate::catalog::ToolDescriptor;
use crate::dispatch::dispatch;
use crate::envelope::CallResult;
use crate::error::ToolCallError;
use crate::validation::ValidatedInput;
use crate::validation::Validator;

/// Stateless tool engine over an owned catalog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolEngine {
    /// Catalog and schemas owned by this engine.
    catalog: ToolCatalog,
}

impl ToolEngine {
    /// Builds an engine with a fresh copy of the builtin catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: ToolCatalog::builtin(),
        }
    }

    /// Returns the catalog descriptors in declaration order.
    #[must_use]
    pub fn list(&self) -> &[ToolDescriptor] {
        self.catalog.list()
    }

    /// Returns the owned catalog.
    #[must_use]
    pub const fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Validates raw arguments without dispatching.
    ///
    /// # Errors
    ///
    /// Returns [`ToolCallError`] for unknown tools or schema violations.
    pub fn validate(&self, name: &str, args: &Value) -> Result<ValidatedInput, ToolCallError> {
        Validator::new(self.catalog.registry()).validate(name, args)
    }

    /// Runs a tool call end to end and returns its envelope.
    #[must_use]
    pub fn call(&self, name: &str, args: &Value) -> CallResult {
        match self.validate(name, args) {
            Ok(validated) => dispatch(validated),
            Err(err) => CallResult::from_error(&err),
        }
    }
}
