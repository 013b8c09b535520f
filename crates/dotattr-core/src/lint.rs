//! Lint diagnostics for the attributes of one graph element.
//!
//! Parses and validates every catalogued attribute of an element and tags
//! each finding with the attribute it came from. Results are meant for
//! problem markers in an editor; nothing is modified.

use crate::attributes::{COLOR_SCHEME_ATTRIBUTE, attribute_type};
use crate::codec::{ElementKind, ValidationContext};
use crate::diagnostic::Diagnostic;
use crate::grammar::ColorScheme;
use crate::registry;
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// A diagnostic tied to the attribute that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDiagnostic {
    /// Attribute name, e.g. `"rankdir"`.
    pub attribute: String,
    pub diagnostic: Diagnostic,
    /// Short rule identifier (e.g. "parse", "validate", "duplicate-attribute").
    pub rule: &'static str,
}

impl AttributeDiagnostic {
    fn new(attribute: &str, diagnostic: Diagnostic, rule: &'static str) -> Self {
        Self {
            attribute: attribute.to_string(),
            diagnostic,
            rule,
        }
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Check all attributes of one element and return the findings in
/// attribute order.
///
/// The element's own `colorscheme` attribute, if any, is the scheme used for
/// unqualified color names.
#[must_use]
pub fn lint_attributes(element: ElementKind, attrs: &[(&str, &str)]) -> Vec<AttributeDiagnostic> {
    let mut diags = Vec::new();
    let context = context_for(element, attrs, &mut diags);
    lint_duplicates(attrs, &mut diags);
    lint_values(element, attrs, &context, &mut diags);
    log::debug!(
        "linted {} attribute(s) on {element:?}: {} finding(s)",
        attrs.len(),
        diags.len()
    );
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

/// Build the validation context, reporting an unknown `colorscheme`.
fn context_for(
    element: ElementKind,
    attrs: &[(&str, &str)],
    diags: &mut Vec<AttributeDiagnostic>,
) -> ValidationContext {
    let mut context = ValidationContext::for_element(element);
    let scheme = attrs
        .iter()
        .rev()
        .find(|(name, _)| *name == COLOR_SCHEME_ATTRIBUTE)
        .map(|&(_, value)| value);
    if let Some(scheme) = scheme.filter(|s| !s.is_empty()) {
        if ColorScheme::lookup(scheme).is_some() {
            context = context.with_color_scheme(scheme);
        } else {
            diags.push(AttributeDiagnostic::new(
                COLOR_SCHEME_ATTRIBUTE,
                Diagnostic::semantic(scheme, format!("'{scheme}' is not a valid color scheme.")),
                "color-scheme",
            ));
        }
    }
    context
}

/// Warn when the same attribute is set more than once; the last one wins.
fn lint_duplicates(attrs: &[(&str, &str)], diags: &mut Vec<AttributeDiagnostic>) {
    let mut seen = HashSet::new();
    for &(name, value) in attrs {
        if !seen.insert(name) {
            diags.push(AttributeDiagnostic::new(
                name,
                Diagnostic::semantic_warning(
                    value,
                    format!("The attribute '{name}' is set more than once; only the last value is used."),
                ),
                "duplicate-attribute",
            ));
        }
    }
}

/// Parse every typed attribute; validate the ones that parsed cleanly.
fn lint_values(
    element: ElementKind,
    attrs: &[(&str, &str)],
    context: &ValidationContext,
    diags: &mut Vec<AttributeDiagnostic>,
) {
    for &(name, raw) in attrs {
        let Some(ty) = attribute_type(name, element) else {
            continue;
        };
        let Some(parsed) = registry::parse(ty, Some(raw)) else {
            continue;
        };
        let clean = !parsed.has_errors();
        let (value, parse_diags) = parsed.into_parts();
        diags.extend(
            parse_diags
                .into_iter()
                .map(|d| AttributeDiagnostic::new(name, d, "parse")),
        );
        if let Some(value) = value.filter(|_| clean) {
            diags.extend(
                registry::validate(ty, &value, context)
                    .into_iter()
                    .map(|d| AttributeDiagnostic::new(name, d, "validate")),
            );
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn clean_node_has_no_diags() {
        let diags = lint_attributes(
            ElementKind::Node,
            &[("shape", "box"), ("style", "filled,rounded"), ("color", "red"), ("label", "hi")],
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn parse_errors_are_tagged() {
        let diags = lint_attributes(ElementKind::Graph, &[("rankdir", "UP")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].attribute, "rankdir");
        assert_eq!(diags[0].rule, "parse");
        assert_eq!(diags[0].diagnostic.kind(), DiagnosticKind::UnrecognizedLiteral);
    }

    #[test]
    fn style_legality_uses_element() {
        let diags = lint_attributes(ElementKind::Edge, &[("style", "diagonals")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "validate");
        assert!(lint_attributes(ElementKind::Node, &[("style", "diagonals")]).is_empty());
    }

    #[test]
    fn colorscheme_applies_to_own_colors() {
        let attrs = [("colorscheme", "svg"), ("fillcolor", "fuchsia")];
        assert!(lint_attributes(ElementKind::Node, &attrs).is_empty());
        let diags = lint_attributes(ElementKind::Node, &[("fillcolor", "fuchsia")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].attribute, "fillcolor");
    }

    #[test]
    fn unknown_colorscheme_is_reported() {
        let diags = lint_attributes(ElementKind::Node, &[("colorscheme", "rainbow")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "color-scheme");
    }

    #[test]
    fn duplicates_warn() {
        let diags = lint_attributes(ElementKind::Graph, &[("rankdir", "LR"), ("rankdir", "TB")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "duplicate-attribute");
    }

    #[test]
    fn broken_values_are_not_validated() {
        let diags = lint_attributes(ElementKind::Edge, &[("arrowhead", "otee!")]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].rule, "parse");
    }
}
