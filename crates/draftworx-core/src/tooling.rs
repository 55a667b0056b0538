// crates/draftworx-core/src/tooling.rs
// ============================================================================
// Module: Tooling Identifiers
// Description: Canonical MCP tool identifiers for Draftworx.
// Purpose: Shared tool naming across the registry, catalog, and contracts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Canonical tool identifiers used by the Draftworx MCP surface.
//! These names are part of the external contract surface; callers address
//! tools by the prefixed form (`draftworx.collect_context`).

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Namespace prefix shared by every Draftworx tool name.
pub const TOOL_NAMESPACE: &str = "draftworx";

/// Canonical tool names for Draftworx MCP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolName {
    /// Collect or confirm entity context before client creation.
    #[serde(rename = "draftworx.collect_context")]
    CollectContext,
    /// Register an uploaded trial balance file.
    #[serde(rename = "draftworx.upload_trial_balance")]
    UploadTrialBalance,
    /// Review account mappings for an imported trial balance.
    #[serde(rename = "draftworx.map_accounts")]
    MapAccounts,
    /// Recommend a reporting template.
    #[serde(rename = "draftworx.recommend_template")]
    RecommendTemplate,
    /// Create a draft from client, trial balance, and template.
    #[serde(rename = "draftworx.create_draft")]
    CreateDraft,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CollectContext => "draftworx.collect_context",
            Self::UploadTrialBalance => "draftworx.upload_trial_balance",
            Self::MapAccounts => "draftworx.map_accounts",
            Self::RecommendTemplate => "draftworx.recommend_template",
            Self::CreateDraft => "draftworx.create_draft",
        }
    }

    /// Returns the tool name without the namespace prefix.
    #[must_use]
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::CollectContext => "collect_context",
            Self::UploadTrialBalance => "upload_trial_balance",
            Self::MapAccounts => "map_accounts",
            Self::RecommendTemplate => "recommend_template",
            Self::CreateDraft => "create_draft",
        }
    }

    /// Returns all Draftworx tool names in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CollectContext,
            Self::UploadTrialBalance,
            Self::MapAccounts,
            Self::RecommendTemplate,
            Self::CreateDraft,
        ]
    }

    /// Parses a tool name from its canonical string representation.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "draftworx.collect_context" => Some(Self::CollectContext),
            "draftworx.upload_trial_balance" => Some(Self::UploadTrialBalance),
            "draftworx.map_accounts" => Some(Self::MapAccounts),
            "draftworx.recommend_template" => Some(Self::RecommendTemplate),
            "draftworx.create_draft" => Some(Self::CreateDraft),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
