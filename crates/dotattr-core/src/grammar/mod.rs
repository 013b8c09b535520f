//! Structured attribute grammars.
//!
//! Each sub-language gets its own small parser built from the helpers in
//! [`lex`]. Grammar-level functions return `Err(expected)` with the input
//! left at the offending position; the codec turns that into a
//! [`Diagnostic`] with a byte offset.

pub mod arrow;
pub mod color;
pub mod color_scheme;
pub(crate) mod lex;
pub mod point;
pub mod shape;
pub mod spline;
pub mod style;

use crate::diagnostic::Diagnostic;

pub use arrow::{ArrowShape, ArrowShapeSpec, ArrowSide, ArrowType, ArrowTypeGrammar, DeprecatedArrowShape, PrimitiveArrowShape};
pub use color::{Color, ColorGrammar, HsvColor, NamedColor, RgbColor, SchemeQualifier, SolidColor, WeightedColor};
pub use color_scheme::ColorScheme;
pub use point::{Point, PointGrammar};
pub use shape::{PolygonShape, RecordShape, Shape, ShapeGrammar, ShapeKind, ShapeParams};
pub use spline::{Spline, SplineType, SplineTypeGrammar};
pub use style::{Style, StyleGrammar, StyleItem, StyleKeyword};

/// What a grammar expected when it stopped.
pub(crate) type Expected = &'static str;

/// A syntax diagnostic for the position where `rest` begins inside `raw`.
pub(crate) fn syntax_error(raw: &str, rest: &str, expected: Expected) -> Diagnostic {
    let offset = lex::offset_in(raw, rest);
    let chunk = lex::next_chunk(rest);
    if chunk.is_empty() {
        Diagnostic::syntax(raw, offset, format!("unexpected end of input, expected {expected}"))
    } else {
        Diagnostic::syntax(
            chunk,
            offset,
            format!("mismatched input '{chunk}', expected {expected}"),
        )
    }
}

/// Report anything left after a complete value.
pub(crate) fn trailing_input(raw: &str, rest: &str) -> Option<Diagnostic> {
    (!rest.is_empty()).then(|| {
        let offset = lex::offset_in(raw, rest);
        Diagnostic::syntax(rest, offset, format!("extraneous input '{rest}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_points_at_chunk() {
        let raw = "1,2 x,y";
        let d = syntax_error(raw, &raw[4..], "a point");
        assert_eq!(d.offset(), Some(4));
        assert_eq!(d.source_text(), "x,y");
        assert_eq!(d.message(), "mismatched input 'x,y', expected a point");
    }

    #[test]
    fn syntax_error_at_end() {
        let raw = "1,";
        let d = syntax_error(raw, "", "a number");
        assert_eq!(d.offset(), Some(2));
        assert_eq!(d.message(), "unexpected end of input, expected a number");
    }

    #[test]
    fn trailing_input_only_when_present() {
        assert!(trailing_input("abc", "").is_none());
        let d = trailing_input("ab!", "!").unwrap();
        assert_eq!(d.offset(), Some(2));
    }
}
