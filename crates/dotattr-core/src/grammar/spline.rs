//! The `splineType` grammar used by edge `pos`.
//!
//! ```text
//! splineType := spline (';' spline)*
//! spline     := ('s,' point)? ('e,' point)? point+
//! ```
//!
//! The `s` and `e` markers may come in either order. A malformed point is
//! reported and skipped so the rest of the geometry is still recovered.

use super::lex::{is_space, next_chunk, skip_space};
use super::point::{Point, parse_point, serialize_point};
use super::syntax_error;
use crate::codec::{Codec, ParsedValue, ValidationContext};
use crate::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};

/// One cubic B-spline with optional arrowhead end points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spline {
    /// Tip of the arrowhead at the tail (`s,x,y`).
    pub start: Option<Point>,
    /// Tip of the arrowhead at the head (`e,x,y`).
    pub end: Option<Point>,
    pub control_points: Vec<Point>,
}

/// A parsed `splineType` value: one spline per edge segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplineType {
    pub splines: Vec<Spline>,
}

/// Codec for `splineType` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplineTypeGrammar;

impl Codec for SplineTypeGrammar {
    type Value = SplineType;

    fn parse(&self, raw: &str) -> ParsedValue<SplineType> {
        let mut input = raw;
        skip_space(&mut input);
        if input.is_empty() {
            return ParsedValue::failed(vec![syntax_error(raw, input, "a point")]);
        }

        let mut value = SplineType::default();
        let mut diagnostics = Vec::new();
        loop {
            let spline = parse_spline(raw, &mut input, &mut diagnostics);
            if spline == Spline::default() {
                diagnostics.push(syntax_error(raw, input, "a point"));
            }
            value.splines.push(spline);
            if input.starts_with(';') {
                input = &input[1..];
            } else {
                break;
            }
        }
        log::trace!("parsed {} spline(s) with {} diagnostic(s)", value.splines.len(), diagnostics.len());
        ParsedValue::partial(Some(value), diagnostics)
    }

    fn serialize(&self, value: &SplineType) -> String {
        value
            .splines
            .iter()
            .map(serialize_spline)
            .collect::<Vec<_>>()
            .join(";")
    }

    fn validate(&self, value: &SplineType, _context: &ValidationContext) -> Vec<Diagnostic> {
        if value.splines.is_empty() {
            return vec![Diagnostic::semantic("", "A spline type needs at least one spline.")];
        }
        let mut diags = Vec::new();
        for spline in &value.splines {
            let count = spline.control_points.len();
            if count == 0 {
                diags.push(Diagnostic::semantic(
                    serialize_spline(spline),
                    "A spline needs at least one control point.",
                ));
            } else if count % 3 != 1 {
                diags.push(Diagnostic::semantic(
                    serialize_spline(spline),
                    format!(
                        "A spline needs 3n+1 control points (1, 4, 7, ...), but has {count}."
                    ),
                ));
            }
        }
        diags
    }
}

/// Parse one spline up to `;` or the end, recovering from bad chunks.
fn parse_spline(raw: &str, input: &mut &str, diagnostics: &mut Vec<Diagnostic>) -> Spline {
    let mut spline = Spline::default();
    loop {
        skip_space(input);
        if input.is_empty() || input.starts_with(';') {
            return spline;
        }

        let leading = spline.control_points.is_empty();
        let result = if leading && spline.start.is_none() && input.starts_with("s,") {
            *input = &input[2..];
            parse_point(input).map(|p| spline.start = Some(p))
        } else if leading && spline.end.is_none() && input.starts_with("e,") {
            *input = &input[2..];
            parse_point(input).map(|p| spline.end = Some(p))
        } else {
            parse_point(input).map(|p| spline.control_points.push(p))
        };

        match result {
            Ok(()) if input.is_empty() || input.starts_with(|c: char| is_space(c) || c == ';') => {}
            Ok(()) => {
                diagnostics.push(syntax_error(raw, input, "whitespace or ';'"));
                skip_chunk(input);
            }
            Err(expected) => {
                diagnostics.push(syntax_error(raw, input, expected));
                if input.starts_with(|c: char| !is_space(c) && c != ';') {
                    skip_chunk(input);
                }
            }
        }
    }
}

/// Advance past the current chunk, stopping at whitespace or `;`.
fn skip_chunk(input: &mut &str) {
    let chunk = next_chunk(*input);
    let len = match chunk.find(';').unwrap_or(chunk.len()) {
        0 => input.chars().next().map_or(0, char::len_utf8),
        len => len,
    };
    *input = &input[len..];
}

fn serialize_spline(spline: &Spline) -> String {
    let mut parts = Vec::with_capacity(spline.control_points.len() + 2);
    if let Some(start) = &spline.start {
        parts.push(format!("s,{}", serialize_point(start)));
    }
    if let Some(end) = &spline.end {
        parts.push(format!("e,{}", serialize_point(end)));
    }
    parts.extend(spline.control_points.iter().map(serialize_point));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use pretty_assertions::assert_eq;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn parses_markers_in_either_order() {
        let parsed = SplineTypeGrammar.parse("e,9,9 s,0,0 1,1 2,2 3,3 4,4");
        assert!(parsed.is_ok(), "{:?}", parsed.diagnostics());
        let value = parsed.into_value().unwrap();
        let spline = &value.splines[0];
        assert_eq!(spline.start, Some(p(0.0, 0.0)));
        assert_eq!(spline.end, Some(p(9.0, 9.0)));
        assert_eq!(spline.control_points.len(), 4);
        assert_eq!(
            SplineTypeGrammar.serialize(&value),
            "s,0,0 e,9,9 1,1 2,2 3,3 4,4"
        );
    }

    #[test]
    fn multiple_splines() {
        let value = SplineTypeGrammar.parse("1,1;2,2  3,3 4,4 5,5").into_value().unwrap();
        assert_eq!(value.splines.len(), 2);
        assert_eq!(SplineTypeGrammar.serialize(&value), "1,1;2,2 3,3 4,4 5,5");
        assert!(SplineTypeGrammar.validate(&value, &ValidationContext::new()).is_empty());
    }

    #[test]
    fn zero_control_points_fails_validation() {
        let value = SplineTypeGrammar.parse("s,1,2").into_value().unwrap();
        let diags = SplineTypeGrammar.validate(&value, &ValidationContext::new());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), DiagnosticKind::Semantic);

        let empty = SplineType::default();
        assert_eq!(SplineTypeGrammar.validate(&empty, &ValidationContext::new()).len(), 1);
    }

    #[test]
    fn control_point_count_must_be_3n_plus_1() {
        let value = SplineTypeGrammar.parse("1,1 2,2 3,3").into_value().unwrap();
        let diags = SplineTypeGrammar.validate(&value, &ValidationContext::new());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message().contains("has 3"));
    }

    #[test]
    fn bad_point_is_skipped() {
        let parsed = SplineTypeGrammar.parse("1,1 x,y 2,2 3,3 4,4");
        assert_eq!(parsed.diagnostics().len(), 1);
        assert_eq!(parsed.diagnostics()[0].offset(), Some(4));
        let value = parsed.value().unwrap();
        assert_eq!(value.splines[0].control_points.len(), 4);
    }

    #[test]
    fn truncated_point_reports_end_of_input() {
        let parsed = SplineTypeGrammar.parse("1,1 2,");
        assert_eq!(parsed.diagnostics().len(), 1);
        assert!(parsed.diagnostics()[0].message().starts_with("unexpected end of input"));
        assert_eq!(parsed.value().unwrap().splines[0].control_points.len(), 1);
    }

    #[test]
    fn empty_segment_is_a_syntax_error() {
        let parsed = SplineTypeGrammar.parse("1,1;");
        assert_eq!(parsed.diagnostics().len(), 1);
        let diag = &parsed.diagnostics()[0];
        assert_eq!(diag.kind(), DiagnosticKind::Syntax);
        assert_eq!(diag.offset(), Some(4));
        assert_eq!(diag.message(), "unexpected end of input, expected a point");
        assert_eq!(parsed.value().unwrap().splines.len(), 2);

        let parsed = SplineTypeGrammar.parse(";");
        assert_eq!(parsed.diagnostics().len(), 2);
        assert_eq!(parsed.diagnostics()[0].offset(), Some(0));
        assert!(parsed.has_errors());
    }

    #[test]
    fn empty_input_is_a_syntax_error() {
        let parsed = SplineTypeGrammar.parse("  ");
        assert_eq!(parsed.value(), None);
        assert!(parsed.has_errors());
    }
}
