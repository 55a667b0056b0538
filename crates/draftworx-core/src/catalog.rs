// crates/draftworx-core/src/catalog.rs
// ============================================================================
// Module: Tool Catalog
// Description: Display metadata for each Draftworx tool.
// Purpose: Give callers a deterministic, enumerable menu of tools.
// Dependencies: serde, crate::{schema, tooling}
// ============================================================================

//! ## Overview
//! The catalog pairs every [`ToolName`] with a title, a usage hint, and a
//! read-only flag, and binds it one-to-one to its [`ToolSchema`]. Built once
//! and never mutated; enumeration order is [`ToolName::all`] order.

use serde::Serialize;

use crate::schema::SchemaRegistry;
use crate::schema::ToolSchema;
use crate::tooling::ToolName;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Display metadata for a single tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Canonical tool name.
    pub name: ToolName,
    /// Human-facing title.
    pub title: &'static str,
    /// Usage hint shown to calling agents.
    pub description: &'static str,
    /// True when invoking the tool changes no external state.
    pub read_only: bool,
}

/// Returns the static descriptor for a tool.
const fn descriptor_for(tool: ToolName) -> ToolDescriptor {
    match tool {
        ToolName::CollectContext => ToolDescriptor {
            name: tool,
            title: "Collect Entity Context",
            description: "Use this when the user needs to specify or confirm entity details like \
                          jurisdiction, entity type, year end, and framework before client \
                          creation or upload.",
            read_only: true,
        },
        ToolName::UploadTrialBalance => ToolDescriptor {
            name: tool,
            title: "Upload Trial Balance",
            description: "Use this when the user wants to upload a trial balance file and begin \
                          mapping. Do not use for invoice or bank export files.",
            read_only: false,
        },
        ToolName::MapAccounts => ToolDescriptor {
            name: tool,
            title: "Map Accounts",
            description: "Use this when a trial balance has been imported and mappings must be \
                          reviewed. Presents low confidence accounts for confirmation or \
                          correction.",
            read_only: false,
        },
        ToolName::RecommendTemplate => ToolDescriptor {
            name: tool,
            title: "Recommend Template",
            description: "Use this when the user needs the correct template based on entity and \
                          jurisdiction. Do not use after a template has already been confirmed.",
            read_only: true,
        },
        ToolName::CreateDraft => ToolDescriptor {
            name: tool,
            title: "Create Draft",
            description: "Use this when context, mapping, and template are set and a Draftworx \
                          file should be created.",
            read_only: false,
        },
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Read-only catalog of tool descriptors bound to their schemas.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCatalog {
    /// Descriptors in canonical order.
    descriptors: Vec<ToolDescriptor>,
    /// Schemas backing the descriptors.
    registry: SchemaRegistry,
}

impl ToolCatalog {
    /// Builds the catalog and its schema registry from static tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            descriptors: ToolName::all().iter().map(|tool| descriptor_for(*tool)).collect(),
            registry: SchemaRegistry::builtin(),
        }
    }

    /// Returns every descriptor in declaration order.
    #[must_use]
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    /// Returns the descriptor for a canonical tool name string.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        let tool = ToolName::parse(name)?;
        self.descriptors.iter().find(|descriptor| descriptor.name == tool)
    }

    /// Returns the schema bound to a descriptor.
    #[must_use]
    pub fn schema(&self, tool: ToolName) -> Option<&ToolSchema> {
        self.registry.get(tool)
    }

    /// Returns the schema registry backing the catalog.
    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }
}

impl Default for ToolCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
