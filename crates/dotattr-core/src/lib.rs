//! Typed DOT attribute values.
//!
//! Graphviz stores every attribute as a string. This crate turns those
//! strings into typed values for a given [`AttributeType`], reports problems
//! as [`Diagnostic`]s, and writes values back as canonical text.
//!
//! ```
//! use dotattr_core::{AttributeType, parse_attribute, serialize_attribute};
//!
//! let parsed = parse_attribute(AttributeType::Style, Some("dashed, bold")).unwrap();
//! assert!(!parsed.has_diagnostics());
//! let text = serialize_attribute(AttributeType::Style, parsed.value());
//! assert_eq!(text.as_deref(), Some("dashed,bold"));
//! ```

pub mod attributes;
pub mod codec;
pub mod diagnostic;
pub mod format;
pub mod grammar;
pub mod lint;
mod literal;
pub mod primitive;
pub mod registry;

pub use attributes::attribute_type;
pub use codec::{Codec, ElementKind, ParsedValue, ValidationContext};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use format::{FormatConfig, canonicalize_attribute, format_attributes};
pub use grammar::*;
pub use lint::{AttributeDiagnostic, lint_attributes};
pub use literal::Literal;
pub use primitive::{
    BoolCodec, ClusterMode, DirType, DoubleCodec, EnumCodec, IntCodec, Layout, OutputMode,
    PageDir, RankDir, Splines,
};
pub use registry::{AttributeCodec, AttributeType, AttributeValue, DispatchFault};

/// Parse a raw attribute value. `None` (attribute absent) yields `None`.
pub fn parse_attribute(ty: AttributeType, raw: Option<&str>) -> Option<ParsedValue<AttributeValue>> {
    registry::parse(ty, raw)
}

/// Canonical text for a value. `None` yields `None`.
///
/// # Panics
/// Panics if `value` does not belong to `ty`.
pub fn serialize_attribute(ty: AttributeType, value: Option<&AttributeValue>) -> Option<String> {
    registry::serialize(ty, value)
}

/// Semantic checks for a parsed value in its context.
///
/// # Panics
/// Panics if `value` does not belong to `ty`.
pub fn validate_attribute(
    ty: AttributeType,
    value: &AttributeValue,
    context: &ValidationContext,
) -> Vec<Diagnostic> {
    registry::validate(ty, value, context)
}
