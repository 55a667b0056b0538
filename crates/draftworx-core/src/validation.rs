// crates/draftworx-core/src/validation.rs
// ============================================================================
// Module: Validator
// Description: Generic schema-driven validation of raw tool arguments.
// Purpose: Turn untrusted argument objects into typed tool inputs.
// Dependencies: serde_json, crate::{error, inputs, schema, tooling}
// ============================================================================

//! ## Overview
//! A single routine walks a [`ToolSchema`] table and checks the raw argument
//! object against it. All violations are collected before failing so callers
//! see the complete list in one response.
//!
//! ## Reporting order
//! 1. A non-object payload yields a single `arguments` violation.
//! 2. Unexpected keys, in argument map order.
//! 3. Declared fields, in schema order, at most one violation per field.
//!
//! Accepted values are copied verbatim; nothing is coerced or defaulted.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Map;
use serde_json::Value;

use crate::error::ToolCallError;
use crate::inputs::CollectContextInput;
use crate::inputs::CreateDraftInput;
use crate::inputs::MapAccountsInput;
use crate::inputs::RecommendTemplateInput;
use crate::inputs::ToolArgs;
use crate::inputs::UploadTrialBalanceInput;
use crate::schema::FieldKind;
use crate::schema::FieldSpec;
use crate::schema::NumericBounds;
use crate::schema::SchemaRegistry;
use crate::schema::ToolSchema;
use crate::tooling::ToolName;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Field name used for whole-payload violations.
pub const ARGUMENTS_FIELD: &str = "arguments";

/// Reason a single field failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    /// Argument payload was not a JSON object.
    NotAnObject {
        /// JSON type actually supplied.
        found: &'static str,
    },
    /// Key not declared by a closed schema.
    Unexpected,
    /// Required field absent.
    Missing,
    /// Value has the wrong primitive type.
    WrongType {
        /// Declared type.
        expected: FieldKind,
        /// JSON type actually supplied.
        found: &'static str,
    },
    /// String outside the enumerated value set.
    NotAllowed {
        /// Accepted values.
        allowed: &'static [&'static str],
    },
    /// Number outside inclusive bounds.
    OutOfRange {
        /// Accepted bounds.
        bounds: NumericBounds,
    },
    /// Checked map did not decode into the typed record.
    Malformed {
        /// Decoder message.
        detail: String,
    },
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject {
                found,
            } => write!(formatter, "expected object, found {found}"),
            Self::Unexpected => formatter.write_str("unexpected field"),
            Self::Missing => formatter.write_str("field required"),
            Self::WrongType {
                expected,
                found,
            } => write!(formatter, "expected {expected}, found {found}"),
            Self::NotAllowed {
                allowed,
            } => write!(formatter, "must be one of {}", allowed.join(", ")),
            Self::OutOfRange {
                bounds,
            } => write!(formatter, "must be between {} and {} inclusive", bounds.min, bounds.max),
            Self::Malformed {
                detail,
            } => formatter.write_str(detail),
        }
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Offending field name.
    pub field: String,
    /// Failure reason.
    pub kind: ViolationKind,
}

impl Violation {
    /// Builds a violation for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ViolationKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.kind)
    }
}

/// All violations found for one call, in reporting order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationFailure {
    /// Tool whose schema was applied.
    pub tool: ToolName,
    /// Ordered violations; never empty.
    pub violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Returns true when any violation names `field`.
    #[must_use]
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|violation| violation.field == field)
    }
}

/// Joins violations with `"; "`.
fn render_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

// ============================================================================
// SECTION: Validated Input
// ============================================================================

/// Arguments that satisfied their tool schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    /// Typed view used for summary rendering.
    pub args: ToolArgs,
    /// Verbatim field map used for the structured echo.
    pub fields: Map<String, Value>,
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Schema-driven validator over a borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    /// Registry consulted for tool schemas.
    registry: &'a SchemaRegistry,
}

impl<'a> Validator<'a> {
    /// Creates a validator backed by `registry`.
    #[must_use]
    pub const fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
        }
    }

    /// Validates raw arguments for the tool named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolCallError::UnknownTool`] when `name` has no schema and
    /// [`ToolCallError::Validation`] when the arguments break the schema.
    pub fn validate(&self, name: &str, raw: &Value) -> Result<ValidatedInput, ToolCallError> {
        let schema = ToolName::parse(name)
            .and_then(|tool| self.registry.get(tool))
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;
        validate_against(schema, raw).map_err(ToolCallError::Validation)
    }
}

/// Validates `raw` against a single schema.
///
/// # Errors
///
/// Returns [`ValidationFailure`] listing every violation found.
pub fn validate_against(
    schema: &ToolSchema,
    raw: &Value,
) -> Result<ValidatedInput, ValidationFailure> {
    let fail = |violations| ValidationFailure {
        tool: schema.tool,
        violations,
    };
    let Value::Object(args) = raw else {
        return Err(fail(vec![Violation::new(
            ARGUMENTS_FIELD,
            ViolationKind::NotAnObject {
                found: json_type(raw),
            },
        )]));
    };

    let mut violations = Vec::new();
    if schema.closed {
        for key in args.keys() {
            if schema.field(key).is_none() {
                violations.push(Violation::new(key.as_str(), ViolationKind::Unexpected));
            }
        }
    }
    for field in &schema.fields {
        match args.get(field.name) {
            None if schema.is_required(field.name) => {
                violations.push(Violation::new(field.name, ViolationKind::Missing));
            }
            None => {}
            Some(value) => {
                if let Some(kind) = check_field(field, value) {
                    violations.push(Violation::new(field.name, kind));
                }
            }
        }
    }
    if !violations.is_empty() {
        return Err(fail(violations));
    }

    let typed = build_args(schema.tool, args).map_err(|detail| {
        fail(vec![Violation::new(
            ARGUMENTS_FIELD,
            ViolationKind::Malformed {
                detail,
            },
        )])
    })?;
    Ok(ValidatedInput {
        args: typed,
        fields: args.clone(),
    })
}

/// Returns the first violation for a present field value.
fn check_field(field: &FieldSpec, value: &Value) -> Option<ViolationKind> {
    let wrong_type = || ViolationKind::WrongType {
        expected: field.kind,
        found: json_type(value),
    };
    match field.kind {
        FieldKind::String => {
            let Some(text) = value.as_str() else {
                return Some(wrong_type());
            };
            match field.allowed {
                Some(allowed) if !allowed.contains(&text) => Some(ViolationKind::NotAllowed {
                    allowed,
                }),
                _ => None,
            }
        }
        FieldKind::Number => {
            let Some(number) = value.as_f64() else {
                return Some(wrong_type());
            };
            match field.bounds {
                Some(bounds) if !bounds.contains(number) => Some(ViolationKind::OutOfRange {
                    bounds,
                }),
                _ => None,
            }
        }
    }
}

/// Decodes a checked argument map into the tool's typed record.
fn build_args(tool: ToolName, args: &Map<String, Value>) -> Result<ToolArgs, String> {
    Ok(match tool {
        ToolName::CollectContext => ToolArgs::CollectContext(decode::<CollectContextInput>(args)?),
        ToolName::UploadTrialBalance => {
            ToolArgs::UploadTrialBalance(decode::<UploadTrialBalanceInput>(args)?)
        }
        ToolName::MapAccounts => ToolArgs::MapAccounts(decode::<MapAccountsInput>(args)?),
        ToolName::RecommendTemplate => {
            ToolArgs::RecommendTemplate(decode::<RecommendTemplateInput>(args)?)
        }
        ToolName::CreateDraft => ToolArgs::CreateDraft(decode::<CreateDraftInput>(args)?),
    })
}

/// Decodes a record from a field map.
fn decode<T: DeserializeOwned>(args: &Map<String, Value>) -> Result<T, String> {
    serde_json::from_value(Value::Object(args.clone())).map_err(|err| err.to_string())
}

/// Returns the JSON type label of a value.
#[must_use]
pub const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        reason = "Test-only assertions."
    )]

    use serde_json::json;

    use super::ARGUMENTS_FIELD;
    use super::Validator;
    use super::ViolationKind;
    use crate::error::ToolCallError;
    use crate::inputs::Framework;
    use crate::inputs::ToolArgs;
    use crate::schema::SchemaRegistry;
    use crate::tooling::ToolName;

    fn failure(name: &str, raw: &serde_json::Value) -> super::ValidationFailure {
        let registry = SchemaRegistry::builtin();
        match Validator::new(&registry).validate(name, raw) {
            Err(ToolCallError::Validation(failure)) => failure,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_context() {
        let registry = SchemaRegistry::builtin();
        let raw = json!({
            "entityType": "company",
            "jurisdiction": "ZA",
            "yearEnd": "2024 02 29",
            "framework": "IFRS_SMEs"
        });
        let validator = Validator::new(&registry);
        let validated = validator.validate("draftworx.collect_context", &raw).unwrap();
        let ToolArgs::CollectContext(input) = &validated.args else {
            panic!("wrong variant");
        };
        assert_eq!(input.framework, Framework::IfrsSmes);
        assert_eq!(validated.args.tool(), ToolName::CollectContext);
        assert_eq!(serde_json::Value::Object(validated.fields), raw);
    }

    #[test]
    fn unknown_name_is_distinct_from_validation_failure() {
        let registry = SchemaRegistry::builtin();
        let err = Validator::new(&registry).validate("draftworx.nope", &json!({})).unwrap_err();
        assert_eq!(err, ToolCallError::UnknownTool("draftworx.nope".to_string()));
    }

    #[test]
    fn non_object_payload_reports_single_violation() {
        let failure = failure("draftworx.create_draft", &json!(["a"]));
        assert_eq!(failure.violations.len(), 1);
        assert_eq!(failure.violations[0].field, ARGUMENTS_FIELD);
        assert_eq!(failure.to_string(), "arguments: expected object, found array");
    }

    #[test]
    fn aggregates_unexpected_then_declared_fields() {
        let failure = failure(
            "draftworx.map_accounts",
            &json!({"alpha": true, "confidenceThreshold": "high", "zeta": 1}),
        );
        let fields: Vec<&str> = failure.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["alpha", "zeta", "tbId", "confidenceThreshold"]);
        assert_eq!(
            failure.to_string(),
            "alpha: unexpected field; zeta: unexpected field; tbId: field required; \
             confidenceThreshold: expected number, found string"
        );
    }

    #[test]
    fn every_missing_field_is_reported() {
        let failure = failure("draftworx.create_draft", &json!({"tbId": "tb"}));
        assert_eq!(failure.tool, ToolName::CreateDraft);
        assert!(failure.mentions("clientId"));
        assert!(failure.mentions("templateId"));
        assert!(!failure.mentions("tbId"));
    }

    #[test]
    fn number_fields_reject_booleans_and_numeric_strings() {
        for value in [json!(true), json!("0.5"), json!(null)] {
            let raw = json!({"tbId": "tb", "confidenceThreshold": value});
            let failure = failure("draftworx.map_accounts", &raw);
            assert!(matches!(failure.violations[0].kind, ViolationKind::WrongType { .. }));
        }
    }

    #[test]
    fn bounds_message_names_inclusive_range() {
        let raw = json!({"tbId": "tb", "confidenceThreshold": 1.1});
        let failure = failure("draftworx.map_accounts", &raw);
        assert_eq!(failure.to_string(), "confidenceThreshold: must be between 0 and 1 inclusive");
    }

    #[test]
    fn enum_message_lists_allowed_values() {
        let failure = failure(
            "draftworx.upload_trial_balance",
            &json!({"clientId": "c", "fileId": "f", "fileType": "pdf"}),
        );
        assert_eq!(failure.to_string(), "fileType: must be one of xlsx, csv, zip");
    }

    #[test]
    fn empty_strings_are_accepted() {
        let registry = SchemaRegistry::builtin();
        let raw = json!({"clientId": "", "tbId": "", "templateId": ""});
        assert!(Validator::new(&registry).validate("draftworx.create_draft", &raw).is_ok());
    }
}
