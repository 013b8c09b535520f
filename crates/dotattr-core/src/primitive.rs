//! Primitive codecs: `bool`, `int`, `double`, and the closed enumerations.

use crate::codec::{Codec, ParsedValue};
use crate::diagnostic::{
    Diagnostic, DiagnosticKind, numeric_error_message, unrecognized_literal_message,
};
use crate::literal::{Literal, literal_enum};
use std::marker::PhantomData;

// ─── Enumeration domains ─────────────────────────────────────────────────

literal_enum! {
    /// Edge arrow placement (`dir`).
    pub enum DirType {
        Forward => "forward",
        Back => "back",
        Both => "both",
        None => "none",
    }
}

literal_enum! {
    /// Layout engine (`layout`).
    pub enum Layout {
        Circo => "circo",
        Dot => "dot",
        Fdp => "fdp",
        Neato => "neato",
        Osage => "osage",
        Patchwork => "patchwork",
        Sfdp => "sfdp",
        Twopi => "twopi",
    }
}

literal_enum! {
    /// Cluster handling (`clusterrank`).
    pub enum ClusterMode {
        Local => "local",
        Global => "global",
        None => "none",
    }
}

literal_enum! {
    /// Drawing order (`outputorder`).
    pub enum OutputMode {
        BreadthFirst => "breadthfirst",
        NodesFirst => "nodesfirst",
        EdgesFirst => "edgesfirst",
    }
}

literal_enum! {
    /// Page traversal order (`pagedir`).
    pub enum PageDir {
        Bl => "BL",
        Br => "BR",
        Tl => "TL",
        Tr => "TR",
        Rb => "RB",
        Rt => "RT",
        Lb => "LB",
        Lt => "LT",
    }
}

literal_enum! {
    /// Rank direction (`rankdir`).
    pub enum RankDir {
        Tb => "TB",
        Lr => "LR",
        Bt => "BT",
        Rl => "RL",
    }
}

literal_enum! {
    /// Edge routing (`splines`).
    pub enum Splines {
        Compound => "compound",
        Curved => "curved",
        /// The empty string: no edges are drawn.
        Empty => "",
        False => "false",
        Line => "line",
        None => "none",
        Ortho => "ortho",
        Polyline => "polyline",
        Spline => "spline",
        True => "true",
    }
}

// ─── Bool ─────────────────────────────────────────────────────────────────

/// `true`/`yes`/`false`/`no` in any case, or an integer (`> 0` is true).
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec for BoolCodec {
    type Value = bool;

    fn parse(&self, raw: &str) -> ParsedValue<bool> {
        if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("yes") {
            return ParsedValue::ok(true);
        }
        if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("no") {
            return ParsedValue::ok(false);
        }
        match raw.parse::<i32>() {
            Ok(n) => ParsedValue::ok(n > 0),
            Err(_) => ParsedValue::failed(vec![Diagnostic::error(
                DiagnosticKind::InvalidLiteral,
                raw,
                format!(
                    "The given value '{raw}' does not (case-insensitively) equal 'true', 'yes', \
                     'false', or 'no' and is also not parsable as an integer value"
                ),
            )]),
        }
    }

    fn serialize(&self, value: &bool) -> String {
        value.to_string()
    }
}

// ─── Int / Double ─────────────────────────────────────────────────────────

/// A 32-bit signed integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl Codec for IntCodec {
    type Value = i32;

    fn parse(&self, raw: &str) -> ParsedValue<i32> {
        match raw.parse::<i32>() {
            Ok(n) => ParsedValue::ok(n),
            Err(err) => ParsedValue::failed(vec![Diagnostic::error(
                DiagnosticKind::InvalidLiteral,
                raw,
                numeric_error_message(raw, &err),
            )]),
        }
    }

    fn serialize(&self, value: &i32) -> String {
        value.to_string()
    }
}

/// A finite 64-bit float.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleCodec;

impl Codec for DoubleCodec {
    type Value = f64;

    fn parse(&self, raw: &str) -> ParsedValue<f64> {
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => ParsedValue::ok(n),
            Ok(_) => ParsedValue::failed(vec![Diagnostic::error(
                DiagnosticKind::InvalidLiteral,
                raw,
                numeric_error_message(raw, &"not a finite number"),
            )]),
            Err(err) => ParsedValue::failed(vec![Diagnostic::error(
                DiagnosticKind::InvalidLiteral,
                raw,
                numeric_error_message(raw, &err),
            )]),
        }
    }

    fn serialize(&self, value: &f64) -> String {
        value.to_string()
    }
}

// ─── Enumerations ────────────────────────────────────────────────────────

/// Codec for any closed [`Literal`] domain.
#[derive(Debug)]
pub struct EnumCodec<T>(PhantomData<fn() -> T>);

impl<T> EnumCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for EnumCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Literal> Codec for EnumCodec<T> {
    type Value = T;

    fn parse(&self, raw: &str) -> ParsedValue<T> {
        match T::from_literal(raw) {
            Some(value) => ParsedValue::ok(value),
            None => ParsedValue::failed(vec![Diagnostic::error(
                DiagnosticKind::UnrecognizedLiteral,
                raw,
                unrecognized_literal_message(raw, T::literals()),
            )]),
        }
    }

    fn serialize(&self, value: &T) -> String {
        value.literal().to_string()
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Severity;

    fn assert_bool(raw: &str, expected: bool) {
        let parsed = BoolCodec.parse(raw);
        assert!(parsed.is_ok(), "{raw:?} should parse cleanly");
        assert_eq!(parsed.value(), Some(&expected), "{raw:?}");
    }

    #[test]
    fn bool_coercion_table() {
        assert_bool("YES", true);
        assert_bool("No", false);
        assert_bool("true", true);
        assert_bool("FALSE", false);
        assert_bool("1", true);
        assert_bool("42", true);
        assert_bool("0", false);
        assert_bool("-5", false);
    }

    #[test]
    fn bool_rejects_words() {
        let parsed = BoolCodec.parse("maybe");
        assert_eq!(parsed.value(), None);
        assert_eq!(parsed.diagnostics().len(), 1);
        let diag = &parsed.diagnostics()[0];
        assert_eq!(diag.kind(), DiagnosticKind::InvalidLiteral);
        assert_eq!(diag.severity(), Severity::Error);
        assert_eq!(diag.source_text(), "maybe");
        assert_eq!(diag.offset(), None);
        for form in ["'true'", "'yes'", "'false'", "'no'", "integer"] {
            assert!(diag.message().contains(form), "missing {form}");
        }
    }

    #[test]
    fn bool_serializes_canonically() {
        assert_eq!(BoolCodec.serialize(&true), "true");
        assert_eq!(BoolCodec.serialize(&false), "false");
    }

    #[test]
    fn int_parses_and_reports_parser_message() {
        assert_eq!(IntCodec.parse("-17").value(), Some(&-17));
        let parsed = IntCodec.parse("4x");
        assert_eq!(parsed.value(), None);
        let expected = "4x".parse::<i32>().unwrap_err().to_string();
        assert!(parsed.diagnostics()[0].message().contains(&expected));
    }

    #[test]
    fn int_overflow_is_invalid() {
        let parsed = IntCodec.parse("99999999999");
        assert!(parsed.has_errors());
    }

    #[test]
    fn double_round_trips() {
        for raw in ["0.5", "1", "-2.25", "1e-7", "12345.678"] {
            let value = *DoubleCodec.parse(raw).value().unwrap();
            let text = DoubleCodec.serialize(&value);
            assert_eq!(DoubleCodec.parse(&text).value(), Some(&value));
        }
        assert!(DoubleCodec.parse("1,5").has_errors());
    }

    #[test]
    fn double_rejects_non_finite_values() {
        for raw in ["inf", "-infinity", "NaN", "1e400"] {
            let parsed = DoubleCodec.parse(raw);
            assert_eq!(parsed.value(), None, "{raw}");
            assert_eq!(parsed.diagnostics()[0].kind(), DiagnosticKind::InvalidLiteral);
            assert_eq!(
                parsed.diagnostics()[0].message(),
                format!("For input string '{raw}': not a finite number")
            );
        }
    }

    #[test]
    fn rankdir_domain_is_exact() {
        let codec = EnumCodec::<RankDir>::new();
        assert_eq!(codec.parse("LR").value(), Some(&RankDir::Lr));
        assert!(codec.parse("lr").has_errors());
        assert_eq!(RankDir::literals().collect::<Vec<_>>(), ["TB", "LR", "BT", "RL"]);
    }

    #[test]
    fn enum_rejection_lists_its_own_domain() {
        let parsed = EnumCodec::<Layout>::new().parse("not-a-real-value");
        assert_eq!(parsed.value(), None);
        assert_eq!(parsed.diagnostics().len(), 1);
        let diag = &parsed.diagnostics()[0];
        assert_eq!(diag.kind(), DiagnosticKind::UnrecognizedLiteral);
        assert!(diag.message().ends_with(
            "'circo', 'dot', 'fdp', 'neato', 'osage', 'patchwork', 'sfdp', 'twopi'."
        ));
        assert!(!diag.message().contains("'forward'"));
    }

    #[test]
    fn splines_accepts_empty_literal() {
        let codec = EnumCodec::<Splines>::new();
        assert_eq!(codec.parse("").value(), Some(&Splines::Empty));
        assert_eq!(codec.serialize(&Splines::Empty), "");
    }

    #[test]
    fn absent_raw_is_not_an_error() {
        assert!(BoolCodec.parse_raw(None).is_none());
        assert!(EnumCodec::<DirType>::new().parse_raw(None).is_none());
        assert!(IntCodec.serialize_opt(None).is_none());
        assert_eq!(IntCodec.serialize_opt(Some(&3)).as_deref(), Some("3"));
    }
}
