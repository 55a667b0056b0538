// crates/draftworx-core/src/schema.rs
// ============================================================================
// Module: Schema Registry
// Description: Declarative input shapes for every Draftworx tool.
// Purpose: Provide the static constraint table consulted by the validator.
// Dependencies: serde, crate::{inputs, tooling}
// ============================================================================

//! ## Overview
//! Each tool has one [`ToolSchema`]: an ordered list of [`FieldSpec`]s, the
//! set of required fields, and a closed-field policy. The registry is built
//! once from static tables and exposes no mutation.
//!
//! ## Invariants
//! - Every required field name exists in the schema's field list.
//! - Every schema in this system is closed and marks all fields required.
//! - Registry order equals [`ToolName::all`] order.

use std::fmt;

use serde::Serialize;

use crate::inputs::EntityType;
use crate::inputs::FileType;
use crate::inputs::Framework;
use crate::inputs::Jurisdiction;
use crate::tooling::ToolName;

// ============================================================================
// SECTION: Field Specs
// ============================================================================

/// Primitive JSON type accepted by a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// JSON string.
    String,
    /// JSON number (integer or float).
    Number,
}

impl FieldKind {
    /// Returns the JSON Schema type label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Inclusive numeric bounds for a number field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericBounds {
    /// Smallest accepted value.
    pub min: f64,
    /// Largest accepted value.
    pub max: f64,
}

impl NumericBounds {
    /// Returns true when `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Constraint record for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Wire name of the field.
    pub name: &'static str,
    /// Accepted primitive type.
    pub kind: FieldKind,
    /// Human-readable description surfaced in the tool schema.
    pub description: &'static str,
    /// Allowed values for enumerated string fields.
    pub allowed: Option<&'static [&'static str]>,
    /// Inclusive bounds for numeric fields.
    pub bounds: Option<NumericBounds>,
}

impl FieldSpec {
    /// Builds a plain string field.
    const fn string(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            description,
            allowed: None,
            bounds: None,
        }
    }

    /// Builds a string field restricted to `allowed`.
    const fn one_of(
        name: &'static str,
        description: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            description,
            allowed: Some(allowed),
            bounds: None,
        }
    }

    /// Builds a number field bounded to `[min, max]`.
    const fn bounded(name: &'static str, description: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            kind: FieldKind::Number,
            description,
            allowed: None,
            bounds: Some(NumericBounds {
                min,
                max,
            }),
        }
    }
}

// ============================================================================
// SECTION: Tool Schemas
// ============================================================================

/// Declared input shape for a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolSchema {
    /// Tool this schema belongs to.
    pub tool: ToolName,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
    /// Required field names in declaration order.
    pub required: Vec<&'static str>,
    /// Rejects argument keys not declared in `fields`.
    pub closed: bool,
}

impl ToolSchema {
    /// Builds a closed schema where every declared field is required.
    fn closed_all_required(tool: ToolName, fields: &[FieldSpec]) -> Self {
        Self {
            tool,
            fields: fields.to_vec(),
            required: fields.iter().map(|field| field.name).collect(),
            closed: true,
        }
    }

    /// Returns the field spec for `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns true when `name` is a required field.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(&name)
    }

    /// Checks structural invariants of the schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError`] when a required field is undeclared or a field
    /// name is declared twice.
    pub fn check(&self) -> Result<(), SchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[.. index].iter().any(|earlier| earlier.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    tool: self.tool,
                    field: field.name,
                });
            }
        }
        for &name in &self.required {
            if self.field(name).is_none() {
                return Err(SchemaError::UndeclaredRequired {
                    tool: self.tool,
                    field: name,
                });
            }
        }
        Ok(())
    }
}

/// Structural schema errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Required field missing from the field list.
    #[error("{tool}: required field {field} is not declared")]
    UndeclaredRequired {
        /// Tool owning the schema.
        tool: ToolName,
        /// Offending field name.
        field: &'static str,
    },
    /// Field declared more than once.
    #[error("{tool}: field {field} is declared twice")]
    DuplicateField {
        /// Tool owning the schema.
        tool: ToolName,
        /// Offending field name.
        field: &'static str,
    },
}

// ============================================================================
// SECTION: Static Tables
// ============================================================================

/// Field description for `entityType`.
const ENTITY_TYPE_DESCRIPTION: &str =
    "Entity type such as company, partnership, sole_prop, ngo, or trust.";
/// Field description for `jurisdiction`.
const JURISDICTION_DESCRIPTION: &str =
    "Jurisdiction code such as ZA, UK, US, AU, CA, EU, or other.";
/// Field description for `framework`.
const FRAMEWORK_DESCRIPTION: &str =
    "Reporting framework such as IFRS, IFRS_SMEs, US_GAAP, UK_GAAP, or other.";

/// Fields for `draftworx.collect_context`.
const COLLECT_CONTEXT_FIELDS: &[FieldSpec] = &[
    FieldSpec::one_of("entityType", ENTITY_TYPE_DESCRIPTION, EntityType::wire_values()),
    FieldSpec::one_of("jurisdiction", JURISDICTION_DESCRIPTION, Jurisdiction::wire_values()),
    FieldSpec::string("yearEnd", "Year end in format YYYY MM DD."),
    FieldSpec::one_of("framework", FRAMEWORK_DESCRIPTION, Framework::wire_values()),
];

/// Fields for `draftworx.upload_trial_balance`.
const UPLOAD_TRIAL_BALANCE_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("clientId", "Unique identifier of the Draftworx client."),
    FieldSpec::string("fileId", "Identifier of the uploaded trial balance file."),
    FieldSpec::one_of(
        "fileType",
        "File type of the uploaded trial balance (xlsx, csv, or zip).",
        FileType::wire_values(),
    ),
];

/// Fields for `draftworx.map_accounts`.
const MAP_ACCOUNTS_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("tbId", "Identifier of the imported trial balance to be mapped."),
    FieldSpec::bounded(
        "confidenceThreshold",
        "Confidence threshold between 0 and 1 for auto-mapping suggestions.",
        0.0,
        1.0,
    ),
];

/// Fields for `draftworx.recommend_template`.
const RECOMMEND_TEMPLATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::one_of(
        "jurisdiction",
        "Jurisdiction code for the entity (ZA, UK, US, etc.).",
        Jurisdiction::wire_values(),
    ),
    FieldSpec::one_of(
        "entityType",
        "Entity type such as company, partnership, ngo, trust.",
        EntityType::wire_values(),
    ),
    FieldSpec::one_of("framework", FRAMEWORK_DESCRIPTION, Framework::wire_values()),
];

/// Fields for `draftworx.create_draft`.
const CREATE_DRAFT_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("clientId", "Unique identifier for the Draftworx client."),
    FieldSpec::string("tbId", "Trial balance identifier used for the draft."),
    FieldSpec::string("templateId", "Identifier for the chosen template to apply."),
];

/// Returns the static field table for a tool.
const fn fields_for(tool: ToolName) -> &'static [FieldSpec] {
    match tool {
        ToolName::CollectContext => COLLECT_CONTEXT_FIELDS,
        ToolName::UploadTrialBalance => UPLOAD_TRIAL_BALANCE_FIELDS,
        ToolName::MapAccounts => MAP_ACCOUNTS_FIELDS,
        ToolName::RecommendTemplate => RECOMMEND_TEMPLATE_FIELDS,
        ToolName::CreateDraft => CREATE_DRAFT_FIELDS,
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Read-only registry of tool schemas keyed by tool name.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    /// Schemas in canonical tool order.
    schemas: Vec<ToolSchema>,
}

impl SchemaRegistry {
    /// Builds the registry from the static tool tables.
    #[must_use]
    pub fn builtin() -> Self {
        let schemas = ToolName::all()
            .iter()
            .map(|tool| ToolSchema::closed_all_required(*tool, fields_for(*tool)))
            .collect();
        Self {
            schemas,
        }
    }

    /// Looks up a schema by tool name string.
    ///
    /// Accepts the canonical prefixed name or the short registry key.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ToolSchema> {
        self.schemas
            .iter()
            .find(|schema| schema.tool.as_str() == name || schema.tool.short_name() == name)
    }

    /// Returns the schema for a known tool.
    #[must_use]
    pub fn get(&self, tool: ToolName) -> Option<&ToolSchema> {
        self.schemas.iter().find(|schema| schema.tool == tool)
    }

    /// Returns all schemas in canonical order.
    #[must_use]
    pub fn schemas(&self) -> &[ToolSchema] {
        &self.schemas
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
