// crates/draftworx-core/src/dispatch.rs
// ============================================================================
// Module: Dispatcher
// Description: Deterministic summaries for validated tool inputs.
// Purpose: Map each known tool to its summary template and structured echo.
// Dependencies: crate::{envelope, error, inputs, validation}
// ============================================================================

//! ## Overview
//! Dispatch is a single match over [`ToolArgs`]. Handlers are pure string
//! formatting: no I/O, no counters, no clocks. The structured payload is the
//! validated field map, unchanged.

use crate::envelope::CallResult;
use crate::error::ToolCallError;
use crate::inputs::ToolArgs;
use crate::validation::ValidatedInput;

/// Builds the success envelope for a validated input.
#[must_use]
pub fn dispatch(validated: ValidatedInput) -> CallResult {
    let summary = summarize(&validated.args);
    CallResult::success(summary, validated.fields)
}

/// Builds the error envelope for a tool name with no schema.
#[must_use]
pub fn dispatch_unknown(name: &str) -> CallResult {
    CallResult::from_error(&ToolCallError::UnknownTool(name.to_string()))
}

/// Renders the summary sentence for a tool call.
#[must_use]
pub fn summarize(args: &ToolArgs) -> String {
    match args {
        ToolArgs::CollectContext(input) => format!(
            "Collected context for {} in {} ({}).",
            input.entity_type, input.jurisdiction, input.framework
        ),
        ToolArgs::UploadTrialBalance(input) => {
            format!("Uploaded {} file for client {}.", input.file_type, input.client_id)
        }
        ToolArgs::MapAccounts(input) => format!(
            "Mapping accounts for {} with threshold {}.",
            input.tb_id,
            format_number(input.confidence_threshold)
        ),
        ToolArgs::RecommendTemplate(input) => format!(
            "Recommended template for {} in {} ({}).",
            input.entity_type, input.jurisdiction, input.framework
        ),
        ToolArgs::CreateDraft(input) => format!(
            "Created draft for client {} using template {}.",
            input.client_id, input.template_id
        ),
    }
}

/// Smallest decimal exponent rendered positionally.
const MIN_POSITIONAL_EXPONENT: i32 = -4;
/// First decimal exponent rendered in scientific notation.
const MAX_POSITIONAL_EXPONENT: i32 = 16;

/// Renders a number for summary text.
///
/// Uses the shortest digits that round-trip. Decimal exponents below -4 or
/// at least 16 use scientific notation with a signed two-digit exponent
/// (`1e-05`, `1.5e+16`). Integral positional values keep a trailing `.0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return format!("{value:.1}");
    }
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };
    if !(MIN_POSITIONAL_EXPONENT .. MAX_POSITIONAL_EXPONENT).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }
    if value.fract() == 0.0 { format!("{value:.1}") } else { format!("{value}") }
}

#[cfg(test)]
mod tests {
    use super::dispatch_unknown;
    use super::format_number;

    #[test]
    fn format_number_keeps_float_spelling() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(0.0), "0.0");
        assert_eq!(format_number(0.85), "0.85");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn format_number_switches_to_scientific_outside_positional_range() {
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(0.00001), "1e-05");
        assert_eq!(format_number(1e-7), "1e-07");
        assert_eq!(format_number(2.5e-5), "2.5e-05");
        assert_eq!(format_number(-0.00001), "-1e-05");
        assert_eq!(format_number(1e15), "1000000000000000.0");
        assert_eq!(format_number(1e16), "1e+16");
        assert_eq!(format_number(1.5e300), "1.5e+300");
    }

    #[test]
    fn unknown_tool_has_no_payload() {
        let result = dispatch_unknown("draftworx.create_client");
        assert!(result.is_error);
        assert_eq!(result.text, "Unknown tool: draftworx.create_client");
        assert!(result.structured.is_none());
    }
}
