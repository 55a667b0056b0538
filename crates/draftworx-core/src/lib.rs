// crates/draftworx-core/src/lib.rs
// ============================================================================
// Module: Draftworx Core
// Description: Schema-validated tool dispatch for the Draftworx MCP surface.
// Purpose: Pure, I/O-free core shared by every Draftworx host process.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The core maps a tool name and a raw argument object to a [`CallResult`]:
//! the [`Validator`] checks arguments against the [`SchemaRegistry`], the
//! dispatcher renders a summary and echoes the validated fields, and the
//! envelope builder wraps either outcome. [`ToolEngine`] ties these together.
//!
//! Nothing here performs I/O or keeps state between calls.

pub mod catalog;
pub mod dispatch;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod inputs;
pub mod schema;
pub mod tooling;
pub mod validation;

pub use catalog::ToolCatalog;
pub use catalog::ToolDescriptor;
pub use dispatch::dispatch;
pub use dispatch::dispatch_unknown;
pub use dispatch::format_number;
pub use engine::ToolEngine;
pub use envelope::CallResult;
pub use error::ToolCallError;
pub use inputs::EntityType;
pub use inputs::FileType;
pub use inputs::Framework;
pub use inputs::Jurisdiction;
pub use inputs::ToolArgs;
pub use schema::FieldKind;
pub use schema::FieldSpec;
pub use schema::SchemaRegistry;
pub use schema::ToolSchema;
pub use tooling::ToolName;
pub use validation::ValidatedInput;
pub use validation::ValidationFailure;
pub use validation::Validator;
pub use validation::Violation;
pub use validation::ViolationKind;
