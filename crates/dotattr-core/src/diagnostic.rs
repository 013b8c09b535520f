//! Diagnostics produced while parsing or validating attribute values.
//!
//! A [`Diagnostic`] is plain return data: codecs never panic or return
//! `Err` for malformed user input. The message helpers at the bottom are
//! shared by every codec so that literal lists and numeric errors read the
//! same everywhere.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// The value is unusable or violates a hard rule.
    Error,
    /// The value is usable but suspicious or deprecated.
    Warning,
}

/// What produced a diagnostic.
///
/// `InvalidLiteral`, `UnrecognizedLiteral` and `Syntax` are only ever
/// produced by `parse`; `Semantic` only by `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// A primitive (bool, int, double) literal could not be read.
    InvalidLiteral,
    /// An enumeration literal is not part of its domain.
    UnrecognizedLiteral,
    /// A structured value could not be tokenized or structured.
    Syntax,
    /// A well-formed value is invalid in its context.
    Semantic,
}

/// A single parse or validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    source_text: String,
    offset: Option<usize>,
    message: String,
}

impl Diagnostic {
    /// An error diagnostic.
    pub fn error(kind: DiagnosticKind, source_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            source_text: source_text.into(),
            offset: None,
            message: message.into(),
        }
    }

    /// A warning diagnostic.
    pub fn warning(kind: DiagnosticKind, source_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            source_text: source_text.into(),
            offset: None,
            message: message.into(),
        }
    }

    /// Syntax error at a byte offset of the raw value.
    pub fn syntax(source_text: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Syntax, source_text, message).at(offset)
    }

    /// Semantic error found by a validator.
    pub fn semantic(source_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::error(DiagnosticKind::Semantic, source_text, message)
    }

    /// Semantic warning found by a validator.
    pub fn semantic_warning(source_text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::warning(DiagnosticKind::Semantic, source_text, message)
    }

    /// Attach a byte offset into the raw value.
    #[must_use]
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// The offending text (the whole raw value for primitives).
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Byte offset into the raw value, `None` when unknown.
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        match self.offset {
            Some(offset) => write!(f, "{level} at {offset}: {}", self.message),
            None => write!(f, "{level}: {}", self.message),
        }
    }
}

// ─── Message helpers ─────────────────────────────────────────────────────

/// Format literals as `'a', 'b', 'c'.`: single-quoted, comma-separated,
/// terminated by a period.
pub fn format_literal_list<'a>(literals: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for literal in literals {
        if !out.is_empty() {
            out.push_str(", ");
        }
        out.push('\'');
        out.push_str(literal);
        out.push('\'');
    }
    out.push('.');
    out
}

/// Message for a literal that is not part of an enumeration domain.
pub fn unrecognized_literal_message<'a>(raw: &str, literals: impl IntoIterator<Item = &'a str>) -> String {
    format!(
        "The given value '{raw}' has to be one of {}",
        format_literal_list(literals)
    )
}

/// Message for a failed numeric conversion, built from the parser's own error.
pub fn numeric_error_message(raw: &str, error: &dyn fmt::Display) -> String {
    format!("For input string '{raw}': {error}")
}

// ─── Tests ────────────────────────────────────────────────────────────────
