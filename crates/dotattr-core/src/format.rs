//! Attribute formatting: parse, then re-emit canonical text.
//!
//! Values that do not parse cleanly are left exactly as written, so
//! formatting never loses information.

use crate::attributes::attribute_type;
use crate::codec::ElementKind;
use crate::diagnostic::Diagnostic;
use crate::registry::{self, AttributeType};

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for `format_attributes`.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Rewrite typed values to their canonical text. Default: **true**.
    pub canonicalize_values: bool,

    /// Keep only the last assignment of a repeated attribute, at the
    /// position of that last assignment. Default: **true**.
    pub drop_duplicates: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            canonicalize_values: true,
            drop_duplicates: true,
        }
    }
}

// ─── Pipeline ─────────────────────────────────────────────────────────────

/// Canonical text for one raw value.
///
/// # Errors
/// Returns the parse diagnostics if any of them is an error.
pub fn canonicalize_attribute(ty: AttributeType, raw: &str) -> Result<String, Vec<Diagnostic>> {
    let Some(parsed) = registry::parse(ty, Some(raw)) else {
        return Ok(raw.to_string());
    };
    if parsed.has_errors() {
        return Err(parsed.into_parts().1);
    }
    match parsed.into_value() {
        Some(value) => Ok(registry::serialize(ty, Some(&value)).unwrap_or_default()),
        None => Ok(raw.to_string()),
    }
}

/// Format the attribute list of one element.
///
/// The output is idempotent: formatting it again yields the same list.
#[must_use]
pub fn format_attributes(
    element: ElementKind,
    attrs: &[(&str, &str)],
    config: &FormatConfig,
) -> Vec<(String, String)> {
    let mut out = Vec::with_capacity(attrs.len());
    for (index, &(name, raw)) in attrs.iter().enumerate() {
        if config.drop_duplicates && attrs[index + 1..].iter().any(|(later, _)| *later == name) {
            continue;
        }
        let value = match attribute_type(name, element) {
            Some(ty) if config.canonicalize_values => {
                canonicalize_attribute(ty, raw).unwrap_or_else(|diags| {
                    log::debug!("keeping {name}={raw:?} as written: {} error(s)", diags.len());
                    raw.to_string()
                })
            }
            _ => raw.to_string(),
        };
        out.push((name.to_string(), value));
    }
    out
}

// ─── Tests ────────────────────────────────────────────────────────────────
