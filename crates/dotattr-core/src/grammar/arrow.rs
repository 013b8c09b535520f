//! The `arrowType` grammar used by `arrowhead` and `arrowtail`.
//!
//! ```text
//! arrowType := shape+
//! shape     := deprecated | 'o'? ('l' | 'r')? primitive
//! ```
//!
//! Shapes are concatenated without separators, e.g. `lteeoldiamond`.
//! Deprecated names are tried first, longest first, since some of them
//! share a prefix with a modern spelling.

use super::syntax_error;
use crate::codec::{Codec, ParsedValue, ValidationContext};
use crate::diagnostic::Diagnostic;
use crate::literal::{Literal, literal_enum};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::LazyLock;

/// Most shapes a single arrow may chain.
pub const MAX_ARROW_SHAPES: usize = 4;

literal_enum! {
    pub enum PrimitiveArrowShape {
        Box => "box",
        Crow => "crow",
        Curve => "curve",
        ICurve => "icurve",
        Diamond => "diamond",
        Dot => "dot",
        Inv => "inv",
        None => "none",
        Normal => "normal",
        Tee => "tee",
        Vee => "vee",
    }
}

impl PrimitiveArrowShape {
    /// Whether the `o` (unfilled) modifier applies.
    pub fn accepts_open(self) -> bool {
        matches!(self, Self::Box | Self::Diamond | Self::Dot | Self::Inv | Self::Normal)
    }

    /// Whether the `l`/`r` (half) modifiers apply.
    pub fn accepts_side(self) -> bool {
        !matches!(self, Self::Dot | Self::None)
    }
}

literal_enum! {
    /// Which half of the shape is drawn.
    pub enum ArrowSide {
        Left => "l",
        Right => "r",
    }
}

literal_enum! {
    /// Names kept for backward compatibility.
    pub enum DeprecatedArrowShape {
        EDiamond => "ediamond",
        Open => "open",
        HalfOpen => "halfopen",
        Empty => "empty",
        InvEmpty => "invempty",
        InvDot => "invdot",
        InvODot => "invodot",
    }
}

impl DeprecatedArrowShape {
    /// The modern shapes drawing the same thing, in order.
    pub fn replacement(self) -> &'static [&'static str] {
        match self {
            Self::EDiamond => &["odiamond"],
            Self::Open => &["vee"],
            Self::HalfOpen => &["lvee"],
            Self::Empty => &["onormal"],
            Self::InvEmpty => &["oinv"],
            Self::InvDot => &["inv", "dot"],
            Self::InvODot => &["inv", "odot"],
        }
    }
}

/// Deprecated names sorted longest first for matching.
static DEPRECATED_BY_LENGTH: LazyLock<Vec<DeprecatedArrowShape>> = LazyLock::new(|| {
    let mut shapes = DeprecatedArrowShape::VALUES.to_vec();
    shapes.sort_by_key(|shape| std::cmp::Reverse(shape.literal().len()));
    shapes
});

/// A modern shape with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowShape {
    pub open: bool,
    pub side: Option<ArrowSide>,
    pub primitive: PrimitiveArrowShape,
}

impl ArrowShape {
    pub fn new(primitive: PrimitiveArrowShape) -> Self {
        Self {
            open: false,
            side: None,
            primitive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrowShapeSpec {
    Shape(ArrowShape),
    Deprecated(DeprecatedArrowShape),
}

impl ArrowShapeSpec {
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Shape(shape) => {
                if shape.open {
                    out.push('o');
                }
                if let Some(side) = shape.side {
                    out.push_str(side.literal());
                }
                out.push_str(shape.primitive.literal());
            }
            Self::Deprecated(shape) => out.push_str(shape.literal()),
        }
    }
}

/// A parsed `arrowType` value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrowType {
    pub shapes: SmallVec<[ArrowShapeSpec; MAX_ARROW_SHAPES]>,
}

// ─── Grammar ─────────────────────────────────────────────────────────────

/// Codec for `arrowType` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrowTypeGrammar;

impl Codec for ArrowTypeGrammar {
    type Value = ArrowType;

    fn parse(&self, raw: &str) -> ParsedValue<ArrowType> {
        let mut input = raw;
        let mut value = ArrowType::default();
        while !input.is_empty() {
            match parse_shape(&mut input) {
                Some(spec) => value.shapes.push(spec),
                None => break,
            }
        }

        let diagnostics = if value.shapes.is_empty() || !input.is_empty() {
            vec![syntax_error(raw, input, "an arrow shape")]
        } else {
            Vec::new()
        };
        let value = (!value.shapes.is_empty()).then_some(value);
        ParsedValue::partial(value, diagnostics)
    }

    fn serialize(&self, value: &ArrowType) -> String {
        let mut out = String::new();
        for spec in &value.shapes {
            spec.write_to(&mut out);
        }
        out
    }

    fn validate(&self, value: &ArrowType, _context: &ValidationContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        if value.shapes.len() > MAX_ARROW_SHAPES {
            diags.push(Diagnostic::semantic(
                self.serialize(value),
                format!(
                    "An arrow may chain at most {MAX_ARROW_SHAPES} shapes, but has {}.",
                    value.shapes.len()
                ),
            ));
        }
        for spec in &value.shapes {
            let mut text = String::new();
            spec.write_to(&mut text);
            match spec {
                ArrowShapeSpec::Shape(shape) => {
                    let primitive = shape.primitive;
                    if shape.open && !primitive.accepts_open() {
                        diags.push(Diagnostic::semantic(
                            text.as_str(),
                            format!("The modifier 'o' is not allowed on the arrow shape '{primitive}'."),
                        ));
                    }
                    if let Some(side) = shape.side.filter(|_| !primitive.accepts_side()) {
                        diags.push(Diagnostic::semantic(
                            text.as_str(),
                            format!("The modifier '{side}' is not allowed on the arrow shape '{primitive}'."),
                        ));
                    }
                }
                ArrowShapeSpec::Deprecated(shape) => {
                    let replacement = shape.replacement().join("' followed by '");
                    diags.push(Diagnostic::semantic_warning(
                        text.as_str(),
                        format!("The arrow shape '{shape}' is deprecated; use '{replacement}' instead."),
                    ));
                }
            }
        }
        diags
    }
}

/// Match one shape at the front of `input`, consuming it on success.
fn parse_shape(input: &mut &str) -> Option<ArrowShapeSpec> {
    if let Some(shape) = DEPRECATED_BY_LENGTH
        .iter()
        .copied()
        .find(|shape| input.starts_with(shape.literal()))
    {
        *input = &input[shape.literal().len()..];
        return Some(ArrowShapeSpec::Deprecated(shape));
    }

    let mut rest = *input;
    let open = rest.starts_with('o');
    if open {
        rest = &rest[1..];
    }
    let side = ArrowSide::VALUES
        .iter()
        .copied()
        .find(|side| rest.starts_with(side.literal()));
    if let Some(side) = side {
        rest = &rest[side.literal().len()..];
    }
    let primitive = PrimitiveArrowShape::VALUES
        .iter()
        .copied()
        .find(|primitive| rest.starts_with(primitive.literal()))?;
    *input = &rest[primitive.literal().len()..];
    Some(ArrowShapeSpec::Shape(ArrowShape {
        open,
        side,
        primitive,
    }))
}

// ─── Tests ────────────────────────────────────────────────────────────────
