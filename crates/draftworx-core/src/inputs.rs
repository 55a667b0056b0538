// crates/draftworx-core/src/inputs.rs
// ============================================================================
// Module: Typed Tool Inputs
// Description: Typed records produced by validation for each Draftworx tool.
// Purpose: Give the dispatcher closed, typed views over validated arguments.
// Dependencies: serde, crate::tooling
// ============================================================================

//! ## Overview
//! One record per tool plus the closed value sets used by enumerated fields.
//! Records are only ever built from argument maps that already passed the
//! schema validator, so field names follow the wire casing (`entityType`).

use serde::Deserialize;
use serde::Serialize;

use crate::tooling::ToolName;

// ============================================================================
// SECTION: Enumerated Values
// ============================================================================

/// Declares a closed string enum with a stable wire spelling per variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Returns the wire spelling of the value.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }

            /// Returns every value in declaration order.
            #[must_use]
            pub const fn all() -> &'static [Self] {
                &[ $( Self::$variant ),+ ]
            }

            /// Returns every accepted wire spelling in declaration order.
            #[must_use]
            pub const fn wire_values() -> &'static [&'static str] {
                &[ $( $wire ),+ ]
            }

            /// Parses a value from its wire spelling.
            #[must_use]
            pub fn parse(value: &str) -> Option<Self> {
                match value {
                    $( $wire => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Legal form of the reporting entity.
    EntityType {
        /// Incorporated company.
        Company => "company",
        /// Partnership.
        Partnership => "partnership",
        /// Sole proprietorship.
        SoleProp => "sole_prop",
        /// Non-governmental organisation.
        Ngo => "ngo",
        /// Trust.
        Trust => "trust",
    }
}

wire_enum! {
    /// Jurisdiction the entity reports in.
    Jurisdiction {
        /// South Africa.
        Za => "ZA",
        /// United Kingdom.
        Uk => "UK",
        /// United States.
        Us => "US",
        /// Australia.
        Au => "AU",
        /// Canada.
        Ca => "CA",
        /// European Union.
        Eu => "EU",
        /// Any other jurisdiction.
        Other => "other",
    }
}

wire_enum! {
    /// Financial reporting framework.
    Framework {
        /// Full IFRS.
        Ifrs => "IFRS",
        /// IFRS for SMEs.
        IfrsSmes => "IFRS_SMEs",
        /// US GAAP.
        UsGaap => "US_GAAP",
        /// UK GAAP.
        UkGaap => "UK_GAAP",
        /// Any other framework.
        Other => "other",
    }
}

wire_enum! {
    /// File format of an uploaded trial balance.
    FileType {
        /// Excel workbook.
        Xlsx => "xlsx",
        /// Comma-separated values.
        Csv => "csv",
        /// Zip archive.
        Zip => "zip",
    }
}

// ============================================================================
// SECTION: Tool Records
// ============================================================================

/// Validated input for `draftworx.collect_context`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollectContextInput {
    /// Entity type.
    pub entity_type: EntityType,
    /// Jurisdiction code.
    pub jurisdiction: Jurisdiction,
    /// Year end, free-form `YYYY MM DD`.
    pub year_end: String,
    /// Reporting framework.
    pub framework: Framework,
}

/// Validated input for `draftworx.upload_trial_balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadTrialBalanceInput {
    /// Draftworx client identifier.
    pub client_id: String,
    /// Uploaded file identifier.
    pub file_id: String,
    /// Uploaded file format.
    pub file_type: FileType,
}

/// Validated input for `draftworx.map_accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MapAccountsInput {
    /// Imported trial balance identifier.
    pub tb_id: String,
    /// Auto-mapping confidence threshold in `[0, 1]`.
    pub confidence_threshold: f64,
}

/// Validated input for `draftworx.recommend_template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecommendTemplateInput {
    /// Jurisdiction code.
    pub jurisdiction: Jurisdiction,
    /// Entity type.
    pub entity_type: EntityType,
    /// Reporting framework.
    pub framework: Framework,
}

/// Validated input for `draftworx.create_draft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDraftInput {
    /// Draftworx client identifier.
    pub client_id: String,
    /// Trial balance identifier.
    pub tb_id: String,
    /// Template identifier.
    pub template_id: String,
}

/// Typed arguments for one of the known tools.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolArgs {
    /// `draftworx.collect_context` arguments.
    CollectContext(CollectContextInput),
    /// `draftworx.upload_trial_balance` arguments.
    UploadTrialBalance(UploadTrialBalanceInput),
    /// `draftworx.map_accounts` arguments.
    MapAccounts(MapAccountsInput),
    /// `draftworx.recommend_template` arguments.
    RecommendTemplate(RecommendTemplateInput),
    /// `draftworx.create_draft` arguments.
    CreateDraft(CreateDraftInput),
}

impl ToolArgs {
    /// Returns the tool these arguments belong to.
    #[must_use]
    pub const fn tool(&self) -> ToolName {
        match self {
            Self::CollectContext(_) => ToolName::CollectContext,
            Self::UploadTrialBalance(_) => ToolName::UploadTrialBalance,
            Self::MapAccounts(_) => ToolName::MapAccounts,
            Self::RecommendTemplate(_) => ToolName::RecommendTemplate,
            Self::CreateDraft(_) => ToolName::CreateDraft,
        }
    }
}
