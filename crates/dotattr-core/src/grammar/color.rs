//! The `color` grammar.
//!
//! ```text
//! color      := weighted (':' weighted)*
//! weighted   := solid (';' number)?
//! solid      := '#' hex{6} hex{2}?              RGB / RGBA
//!             | number sep number sep number    HSV, sep = ',' and/or spaces
//!             | '/' scheme? '/' name            qualified name
//!             | name
//! ```
//!
//! A single solid color without weight is [`Color::Solid`]; anything with a
//! `:` or a weight is a [`Color::List`].

use super::color_scheme::{ColorScheme, DEFAULT_SCHEME};
use super::lex::{format_number, parse_identifier, parse_number, skip_space, symbol};
use super::{Expected, syntax_error, trailing_input};
use crate::codec::{Codec, ParsedValue, ValidationContext};
use crate::diagnostic::Diagnostic;
use serde::{Deserialize, Serialize};
use winnow::prelude::*;
use winnow::token::take_while;

// ─── Values ──────────────────────────────────────────────────────────────

/// `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

/// Hue, saturation and value, each nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

/// Where a color name is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemeQualifier {
    /// `red`: the element's `colorscheme`, falling back to X11.
    Inherited,
    /// `//red`: always the default scheme.
    Default,
    /// `/svg/red`.
    Explicit(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub scheme: SchemeQualifier,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SolidColor {
    Rgb(RgbColor),
    Hsv(HsvColor),
    Named(NamedColor),
}

/// One entry of a color list, e.g. `red;0.3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedColor {
    pub color: SolidColor,
    pub weight: Option<f64>,
}

/// A parsed `color` attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Color {
    Solid(SolidColor),
    List(Vec<WeightedColor>),
}

impl Color {
    /// An unqualified color name.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Solid(SolidColor::Named(NamedColor {
            scheme: SchemeQualifier::Inherited,
            name: name.into(),
        }))
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Solid(SolidColor::Rgb(RgbColor { r, g, b, a: None }))
    }

    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self::Solid(SolidColor::Hsv(HsvColor { h, s, v }))
    }
}

// ─── Grammar ─────────────────────────────────────────────────────────────

/// Codec for `color` and color-list values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorGrammar;

impl Codec for ColorGrammar {
    type Value = Color;

    fn parse(&self, raw: &str) -> ParsedValue<Color> {
        let mut input = raw;
        let mut entries = Vec::new();
        let mut diagnostics = Vec::new();
        let mut is_list = false;

        loop {
            skip_space(&mut input);
            match parse_weighted(&mut input) {
                Ok(entry) => {
                    is_list |= entry.weight.is_some();
                    entries.push(entry);
                }
                Err(expected) => {
                    diagnostics.push(syntax_error(raw, input, expected));
                    break;
                }
            }
            skip_space(&mut input);
            if input.starts_with(':') {
                input = &input[1..];
                is_list = true;
            } else {
                break;
            }
        }

        if diagnostics.is_empty() {
            diagnostics.extend(trailing_input(raw, input));
        }

        let value = match entries.len() {
            0 => None,
            1 if !is_list => entries.pop().map(|entry| Color::Solid(entry.color)),
            _ => Some(Color::List(entries)),
        };
        ParsedValue::partial(value, diagnostics)
    }

    fn serialize(&self, value: &Color) -> String {
        match value {
            Color::Solid(color) => serialize_solid(color),
            Color::List(entries) => entries
                .iter()
                .map(|entry| match entry.weight {
                    Some(weight) => {
                        format!("{};{}", serialize_solid(&entry.color), format_number(weight))
                    }
                    None => serialize_solid(&entry.color),
                })
                .collect::<Vec<_>>()
                .join(":"),
        }
    }

    fn validate(&self, value: &Color, context: &ValidationContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        match value {
            Color::Solid(color) => validate_solid(color, context, &mut diags),
            Color::List(entries) => {
                let mut total = 0.0;
                for entry in entries {
                    validate_solid(&entry.color, context, &mut diags);
                    if let Some(weight) = entry.weight {
                        total += weight;
                        if !(0.0..=1.0).contains(&weight) {
                            diags.push(Diagnostic::semantic(
                                format_number(weight),
                                format!(
                                    "The weight '{}' is not in the range [0.0, 1.0].",
                                    format_number(weight)
                                ),
                            ));
                        }
                    }
                }
                if total > 1.0 + 1e-9 {
                    diags.push(Diagnostic::semantic(
                        self.serialize(value),
                        format!(
                            "The weights of a color list must not sum to more than 1, but sum to {}.",
                            format_number(total)
                        ),
                    ));
                }
            }
        }
        diags
    }
}

// ─── Parsers ─────────────────────────────────────────────────────────────

fn parse_weighted(input: &mut &str) -> Result<WeightedColor, Expected> {
    let color = parse_solid(input)?;
    skip_space(input);
    let weight = if input.starts_with(';') {
        *input = &input[1..];
        skip_space(input);
        Some(parse_number(input).map_err(|_| "a weight")?)
    } else {
        None
    };
    Ok(WeightedColor { color, weight })
}

fn parse_solid(input: &mut &str) -> Result<SolidColor, Expected> {
    if input.starts_with('#') {
        return parse_rgb(input).map(SolidColor::Rgb);
    }
    if input.starts_with('/') {
        return parse_qualified(input).map(SolidColor::Named);
    }
    let checkpoint = *input;
    if let Ok(hsv) = parse_hsv(input) {
        return Ok(SolidColor::Hsv(hsv));
    }
    *input = checkpoint;
    let name = parse_identifier(input).map_err(|_| "a color")?;
    Ok(SolidColor::Named(NamedColor {
        scheme: SchemeQualifier::Inherited,
        name: name.to_string(),
    }))
}

fn hex_digits<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., |c: char| c.is_ascii_hexdigit()).parse_next(input)
}

fn parse_rgb(input: &mut &str) -> Result<RgbColor, Expected> {
    const EXPECTED: Expected = "6 or 8 hexadecimal digits";
    symbol(input, '#').map_err(|_| "'#'")?;
    let digits_start = *input;
    let digits = hex_digits(input).map_err(|_| EXPECTED)?;
    if digits.len() != 6 && digits.len() != 8 {
        *input = digits_start;
        return Err(EXPECTED);
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| EXPECTED);
    Ok(RgbColor {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
        a: if digits.len() == 8 { Some(channel(6)?) } else { None },
    })
}

fn parse_qualified(input: &mut &str) -> Result<NamedColor, Expected> {
    symbol(input, '/').map_err(|_| "'/'")?;
    let scheme = if input.starts_with('/') {
        SchemeQualifier::Default
    } else {
        let name = parse_identifier(input).map_err(|_| "a color scheme")?;
        SchemeQualifier::Explicit(name.to_string())
    };
    symbol(input, '/').map_err(|_| "'/'")?;
    let name = parse_identifier(input).map_err(|_| "a color name")?;
    Ok(NamedColor {
        scheme,
        name: name.to_string(),
    })
}

/// `,` with optional spaces, or at least one space.
fn hsv_separator(input: &mut &str) -> Result<(), Expected> {
    let before = *input;
    skip_space(input);
    if input.starts_with(',') {
        *input = &input[1..];
        skip_space(input);
        Ok(())
    } else if input.len() < before.len() {
        Ok(())
    } else {
        Err("',' or whitespace")
    }
}

fn parse_hsv(input: &mut &str) -> Result<HsvColor, Expected> {
    let h = parse_number(input).map_err(|_| "a hue")?;
    hsv_separator(input)?;
    let s = parse_number(input).map_err(|_| "a saturation")?;
    hsv_separator(input)?;
    let v = parse_number(input).map_err(|_| "a value")?;
    Ok(HsvColor { h, s, v })
}

// ─── Serialization ───────────────────────────────────────────────────────

fn serialize_solid(color: &SolidColor) -> String {
    match color {
        SolidColor::Rgb(RgbColor { r, g, b, a }) => match a {
            Some(a) => format!("#{r:02x}{g:02x}{b:02x}{a:02x}"),
            None => format!("#{r:02x}{g:02x}{b:02x}"),
        },
        SolidColor::Hsv(HsvColor { h, s, v }) => format!(
            "{},{},{}",
            format_number(*h),
            format_number(*s),
            format_number(*v)
        ),
        SolidColor::Named(NamedColor { scheme, name }) => match scheme {
            SchemeQualifier::Inherited => name.clone(),
            SchemeQualifier::Default => format!("//{name}"),
            SchemeQualifier::Explicit(scheme) => format!("/{scheme}/{name}"),
        },
    }
}

// ─── Validation ──────────────────────────────────────────────────────────

fn validate_solid(color: &SolidColor, context: &ValidationContext, diags: &mut Vec<Diagnostic>) {
    match color {
        SolidColor::Rgb(_) => {}
        SolidColor::Hsv(hsv) => {
            for (channel, value) in [("hue", hsv.h), ("saturation", hsv.s), ("value", hsv.v)] {
                if !(0.0..=1.0).contains(&value) {
                    diags.push(Diagnostic::semantic(
                        format_number(value),
                        format!(
                            "The {channel} '{}' is not in the range [0.0, 1.0].",
                            format_number(value)
                        ),
                    ));
                }
            }
        }
        SolidColor::Named(named) => validate_named(named, context, diags),
    }
}

fn validate_named(named: &NamedColor, context: &ValidationContext, diags: &mut Vec<Diagnostic>) {
    let scheme_name = match &named.scheme {
        SchemeQualifier::Explicit(scheme) => scheme.as_str(),
        SchemeQualifier::Default => DEFAULT_SCHEME,
        SchemeQualifier::Inherited => context.color_scheme.as_deref().unwrap_or(DEFAULT_SCHEME),
    };
    let Some(scheme) = ColorScheme::lookup(scheme_name) else {
        diags.push(Diagnostic::semantic(
            scheme_name,
            format!("'{scheme_name}' is not a valid color scheme."),
        ));
        return;
    };
    if scheme.contains(&named.name) {
        return;
    }
    // Unqualified names fall back to X11, as Graphviz does.
    if named.scheme == SchemeQualifier::Inherited && ColorScheme::X11.contains(&named.name) {
        return;
    }
    diags.push(Diagnostic::semantic(
        named.name.as_str(),
        format!(
            "The '{}' color is not valid within the '{}' color scheme.",
            named.name,
            scheme.name()
        ),
    ));
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use pretty_assertions::assert_eq;

    fn parse_ok(raw: &str) -> Color {
        let parsed = ColorGrammar.parse(raw);
        assert!(parsed.is_ok(), "{raw:?}: {:?}", parsed.diagnostics());
        parsed.into_value().unwrap()
    }

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(parse_ok("#FF0080"), Color::rgb(255, 0, 128));
        assert_eq!(
            parse_ok("#00000080"),
            Color::Solid(SolidColor::Rgb(RgbColor { r: 0, g: 0, b: 0, a: Some(128) }))
        );
    }

    #[test]
    fn rgb_serializes_lowercase() {
        assert_eq!(ColorGrammar.serialize(&parse_ok("#AbCdEf")), "#abcdef");
    }

    #[test]
    fn bad_hex_length_reports_offset() {
        let parsed = ColorGrammar.parse("#ff00");
        assert_eq!(parsed.value(), None);
        let diag = &parsed.diagnostics()[0];
        assert_eq!(diag.kind(), DiagnosticKind::Syntax);
        assert_eq!(diag.offset(), Some(1));
        assert!(diag.message().contains("hexadecimal"));
    }

    #[test]
    fn parses_hsv_with_either_separator() {
        assert_eq!(parse_ok("0.5,0.25,1"), Color::hsv(0.5, 0.25, 1.0));
        assert_eq!(parse_ok("0.5 0.25 1"), Color::hsv(0.5, 0.25, 1.0));
        assert_eq!(parse_ok("0.5, 0.25 ,1"), Color::hsv(0.5, 0.25, 1.0));
        assert_eq!(ColorGrammar.serialize(&Color::hsv(0.5, 0.25, 1.0)), "0.5,0.25,1");
    }

    #[test]
    fn parses_qualified_names() {
        assert_eq!(
            parse_ok("/svg/Fuchsia"),
            Color::Solid(SolidColor::Named(NamedColor {
                scheme: SchemeQualifier::Explicit("svg".into()),
                name: "Fuchsia".into(),
            }))
        );
        assert_eq!(ColorGrammar.serialize(&parse_ok("//red")), "//red");
        assert_eq!(ColorGrammar.serialize(&parse_ok("/blues9/3")), "/blues9/3");
    }

    #[test]
    fn digit_names_are_not_hsv() {
        assert_eq!(parse_ok("3"), Color::named("3"));
        assert_eq!(parse_ok("1:2"), Color::List(vec![
            WeightedColor { color: SolidColor::Named(NamedColor { scheme: SchemeQualifier::Inherited, name: "1".into() }), weight: None },
            WeightedColor { color: SolidColor::Named(NamedColor { scheme: SchemeQualifier::Inherited, name: "2".into() }), weight: None },
        ]));
    }

    #[test]
    fn weighted_list_round_trips() {
        let value = parse_ok("red;0.3 : #0000ff : 0.1 0.2 0.3;0.5");
        match &value {
            Color::List(entries) => {
                assert_eq!(entries.len(), 3);
                assert_eq!(entries[0].weight, Some(0.3));
                assert_eq!(entries[1].weight, None);
                assert_eq!(entries[2].weight, Some(0.5));
            }
            other => panic!("expected list, got {other:?}"),
        }
        let text = ColorGrammar.serialize(&value);
        assert_eq!(text, "red;0.3:#0000ff:0.1,0.2,0.3;0.5");
        assert_eq!(parse_ok(&text), value);
    }

    #[test]
    fn single_weighted_color_is_a_list() {
        assert!(matches!(parse_ok("red;1"), Color::List(ref e) if e.len() == 1));
    }

    #[test]
    fn trailing_colon_keeps_partial_list() {
        let parsed = ColorGrammar.parse("red:");
        assert!(parsed.has_errors());
        assert!(matches!(parsed.value(), Some(Color::List(e)) if e.len() == 1));
    }

    #[test]
    fn trailing_garbage_is_reported() {
        let parsed = ColorGrammar.parse("red blue");
        assert_eq!(parsed.value(), Some(&Color::named("red")));
        assert_eq!(parsed.diagnostics()[0].offset(), Some(4));
    }

    #[test]
    fn validates_names_against_scheme() {
        let ctx = ValidationContext::new();
        assert!(ColorGrammar.validate(&Color::named("red"), &ctx).is_empty());
        let diags = ColorGrammar.validate(&Color::named("fuchsia"), &ctx);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].kind(), DiagnosticKind::Semantic);
        assert!(diags[0].message().contains("'x11'"));

        let svg = ValidationContext::new().with_color_scheme("svg");
        assert!(ColorGrammar.validate(&Color::named("fuchsia"), &svg).is_empty());
    }

    #[test]
    fn inherited_names_fall_back_to_x11() {
        let ctx = ValidationContext::new().with_color_scheme("blues9");
        assert!(ColorGrammar.validate(&Color::named("3"), &ctx).is_empty());
        assert!(ColorGrammar.validate(&Color::named("red"), &ctx).is_empty());
        assert_eq!(ColorGrammar.validate(&Color::named("12"), &ctx).len(), 1);
        let explicit = parse_ok("/blues9/red");
        assert_eq!(ColorGrammar.validate(&explicit, &ctx).len(), 1);
    }

    #[test]
    fn unknown_scheme_is_reported() {
        let diags = ColorGrammar.validate(&parse_ok("/nope/red"), &ValidationContext::new());
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message().contains("'nope' is not a valid color scheme"));
    }

    #[test]
    fn hsv_channels_must_be_in_range() {
        let diags = ColorGrammar.validate(&Color::hsv(1.5, 0.5, -0.1), &ValidationContext::new());
        assert_eq!(diags.len(), 2);
        assert!(diags[0].message().contains("hue"));
        assert!(diags[1].message().contains("value"));
    }

    #[test]
    fn weights_must_be_in_range_and_sum_to_at_most_one() {
        let ctx = ValidationContext::new();
        let diags = ColorGrammar.validate(&parse_ok("red;0.7:blue;0.6"), &ctx);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message().contains("sum"));
        let diags = ColorGrammar.validate(&parse_ok("red;2"), &ctx);
        assert_eq!(diags.len(), 2);
    }
}
