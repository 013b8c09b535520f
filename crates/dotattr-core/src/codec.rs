//! The codec contract shared by every primitive codec and structured grammar.
//!
//! A codec turns a raw attribute string into a typed value (`parse`), turns
//! the value back into canonical text (`serialize`), and checks a parsed
//! value against its context (`validate`). Absence (`None`) is threaded
//! through [`Codec::parse_raw`] and [`Codec::serialize_opt`] so callers can
//! tell "attribute missing" apart from "attribute present but broken".

use crate::diagnostic::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};

// ─── Parse result ────────────────────────────────────────────────────────

/// Result of a parse: an optional value plus the diagnostics found on the way.
///
/// A result may hold a best-effort value *and* diagnostics, so that editors
/// can still render something while flagging the problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedValue<T> {
    value: Option<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> ParsedValue<T> {
    /// A clean parse.
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            diagnostics: Vec::new(),
        }
    }

    /// A failed parse with no usable value.
    pub fn failed(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            value: None,
            diagnostics,
        }
    }

    /// A parse that recovered a (possibly partial) value alongside diagnostics.
    pub fn partial(value: Option<T>, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Whether any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity() == Severity::Error)
    }

    /// A value is present and nothing was reported.
    pub fn is_ok(&self) -> bool {
        self.value.is_some() && self.diagnostics.is_empty()
    }

    pub fn into_parts(self) -> (Option<T>, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }

    /// Convert the value, keeping the diagnostics.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ParsedValue<U> {
        ParsedValue {
            value: self.value.map(f),
            diagnostics: self.diagnostics,
        }
    }
}

// ─── Validation context ──────────────────────────────────────────────────

/// The kind of graph element an attribute belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Graph,
    Cluster,
    Node,
    Edge,
}

/// Ambient information a validator may need.
///
/// Everything is optional: a validator skips the checks it cannot decide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationContext {
    /// Element kind the value is attached to (decides legal style keywords).
    pub element: Option<ElementKind>,
    /// Active `colorscheme` for unqualified color names. `None` means `x11`.
    pub color_scheme: Option<String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_element(element: ElementKind) -> Self {
        Self {
            element: Some(element),
            color_scheme: None,
        }
    }

    #[must_use]
    pub fn with_color_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.color_scheme = Some(scheme.into());
        self
    }
}

// ─── Codec trait ─────────────────────────────────────────────────────────

/// A parse/serialize/validate triple for one attribute value type.
///
/// Implementations are stateless and shared between threads.
pub trait Codec: Send + Sync {
    type Value;

    /// Parse a present raw value. Never panics on malformed input.
    fn parse(&self, raw: &str) -> ParsedValue<Self::Value>;

    /// Canonical text for a value.
    fn serialize(&self, value: &Self::Value) -> String;

    /// Semantic checks the syntax cannot express. Defaults to none.
    fn validate(&self, _value: &Self::Value, _context: &ValidationContext) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Parse an attribute that may be absent; absence yields `None`.
    fn parse_raw(&self, raw: Option<&str>) -> Option<ParsedValue<Self::Value>> {
        raw.map(|raw| self.parse(raw))
    }

    /// Serialize an attribute that may be absent; absence yields `None`.
    fn serialize_opt(&self, value: Option<&Self::Value>) -> Option<String> {
        value.map(|value| self.serialize(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;

    #[test]
    fn partial_result_keeps_both() {
        let diag = Diagnostic::syntax("x", 0, "bad");
        let parsed = ParsedValue::partial(Some(3), vec![diag.clone()]);
        assert_eq!(parsed.value(), Some(&3));
        assert!(parsed.has_diagnostics());
        assert!(parsed.has_errors());
        assert!(!parsed.is_ok());
        assert_eq!(parsed.into_parts(), (Some(3), vec![diag]));
    }

    #[test]
    fn warnings_are_not_errors() {
        let warn = Diagnostic::warning(DiagnosticKind::Semantic, "x", "meh");
        let parsed = ParsedValue::partial(Some(1), vec![warn]);
        assert!(parsed.has_diagnostics());
        assert!(!parsed.has_errors());
    }

    #[test]
    fn map_preserves_diagnostics() {
        let parsed = ParsedValue::partial(Some(2), vec![Diagnostic::syntax("x", 0, "bad")]);
        let mapped = parsed.map(|v| v * 10);
        assert_eq!(mapped.value(), Some(&20));
        assert_eq!(mapped.diagnostics().len(), 1);
    }

    #[test]
    fn context_builder() {
        let ctx = ValidationContext::for_element(ElementKind::Edge).with_color_scheme("svg");
        assert_eq!(ctx.element, Some(ElementKind::Edge));
        assert_eq!(ctx.color_scheme.as_deref(), Some("svg"));
        assert_eq!(ValidationContext::new(), ValidationContext::default());
    }
}
