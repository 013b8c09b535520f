//! The `shape` grammar: a node shape name with optional polygon parameters.
//!
//! ```text
//! shape  := name ('[' param (',' param)* ']')?
//! param  := 'sides' '=' int | 'peripheries' '=' int
//!         | 'orientation' '=' number | 'skew' '=' number
//!         | 'distortion' '=' number | 'regular' '=' bool
//! ```
//!
//! Names resolve to a polygon-based shape, a record shape, or a custom
//! (user-supplied) shape.

use super::lex::{format_number, parse_identifier, parse_integer, parse_number, skip_space, symbol};
use super::{Expected, syntax_error, trailing_input};
use crate::codec::{Codec, ParsedValue, ValidationContext};
use crate::diagnostic::Diagnostic;
use crate::literal::{Literal, literal_enum};
use crate::primitive::BoolCodec;
use serde::{Deserialize, Serialize};

literal_enum! {
    /// Shapes drawn as (generalized) polygons.
    pub enum PolygonShape {
        Box => "box",
        Polygon => "polygon",
        Ellipse => "ellipse",
        Oval => "oval",
        Circle => "circle",
        Point => "point",
        Egg => "egg",
        Triangle => "triangle",
        Plaintext => "plaintext",
        Plain => "plain",
        Diamond => "diamond",
        Trapezium => "trapezium",
        Parallelogram => "parallelogram",
        House => "house",
        Pentagon => "pentagon",
        Hexagon => "hexagon",
        Septagon => "septagon",
        Octagon => "octagon",
        DoubleCircle => "doublecircle",
        DoubleOctagon => "doubleoctagon",
        TripleOctagon => "tripleoctagon",
        InvTriangle => "invtriangle",
        InvTrapezium => "invtrapezium",
        InvHouse => "invhouse",
        MDiamond => "Mdiamond",
        MSquare => "Msquare",
        MCircle => "Mcircle",
        Rect => "rect",
        Rectangle => "rectangle",
        Square => "square",
        Star => "star",
        None => "none",
        Underline => "underline",
        Cylinder => "cylinder",
        Note => "note",
        Tab => "tab",
        Folder => "folder",
        Box3d => "box3d",
        Component => "component",
        Promoter => "promoter",
        Cds => "cds",
        Terminator => "terminator",
        Utr => "utr",
        PrimerSite => "primersite",
        RestrictionSite => "restrictionsite",
        FivePOverhang => "fivepoverhang",
        ThreePOverhang => "threepoverhang",
        NOverhang => "noverhang",
        Assembly => "assembly",
        Signature => "signature",
        Insulator => "insulator",
        RiboSite => "ribosite",
        RnaStab => "rnastab",
        ProteaseSite => "proteasesite",
        ProteinStab => "proteinstab",
        RPromoter => "rpromoter",
        RArrow => "rarrow",
        LArrow => "larrow",
        LPromoter => "lpromoter",
    }
}

impl PolygonShape {
    /// Side count drawn when `sides` is not given; `None` for curved outlines.
    pub fn default_sides(self) -> Option<i32> {
        match self {
            Self::Ellipse
            | Self::Oval
            | Self::Circle
            | Self::Point
            | Self::Egg
            | Self::DoubleCircle
            | Self::MCircle
            | Self::Star
            | Self::Cylinder => None,
            Self::Triangle | Self::InvTriangle => Some(3),
            Self::House | Self::InvHouse | Self::Pentagon => Some(5),
            Self::Hexagon => Some(6),
            Self::Septagon => Some(7),
            Self::Octagon | Self::DoubleOctagon | Self::TripleOctagon => Some(8),
            _ => Some(4),
        }
    }

    pub fn default_peripheries(self) -> i32 {
        match self {
            Self::DoubleCircle | Self::DoubleOctagon => 2,
            Self::TripleOctagon => 3,
            Self::Plaintext | Self::Plain | Self::None | Self::Underline => 0,
            _ => 1,
        }
    }
}

literal_enum! {
    /// Shapes whose label is a record structure.
    pub enum RecordShape {
        Record => "record",
        MRecord => "Mrecord",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Polygon(PolygonShape),
    Record(RecordShape),
    /// A name Graphviz resolves at render time (`custom`, image shapes, ...).
    Custom(String),
}

impl ShapeKind {
    pub fn from_name(name: &str) -> Self {
        if let Some(polygon) = PolygonShape::from_literal(name) {
            Self::Polygon(polygon)
        } else if let Some(record) = RecordShape::from_literal(name) {
            Self::Record(record)
        } else {
            Self::Custom(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Polygon(polygon) => polygon.literal(),
            Self::Record(record) => record.literal(),
            Self::Custom(name) => name,
        }
    }
}

/// Explicit polygon parameters. Unset fields fall back to the shape defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    pub sides: Option<i32>,
    pub peripheries: Option<i32>,
    pub orientation: Option<f64>,
    pub skew: Option<f64>,
    pub distortion: Option<f64>,
    pub regular: Option<bool>,
}

impl ShapeParams {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub params: ShapeParams,
}

impl Shape {
    pub fn named(name: &str) -> Self {
        Self {
            kind: ShapeKind::from_name(name),
            params: ShapeParams::default(),
        }
    }

    #[must_use]
    pub fn with_sides(mut self, sides: i32) -> Self {
        self.params.sides = Some(sides);
        self
    }

    /// Side count actually drawn. Only `polygon` honours an explicit `sides`.
    pub fn sides(&self) -> Option<i32> {
        match &self.kind {
            ShapeKind::Polygon(PolygonShape::Polygon) => {
                self.params.sides.or(PolygonShape::Polygon.default_sides())
            }
            ShapeKind::Polygon(polygon) => polygon.default_sides(),
            ShapeKind::Record(_) => Some(4),
            ShapeKind::Custom(_) => None,
        }
    }

    pub fn peripheries(&self) -> i32 {
        self.params.peripheries.unwrap_or(match &self.kind {
            ShapeKind::Polygon(polygon) => polygon.default_peripheries(),
            ShapeKind::Record(_) | ShapeKind::Custom(_) => 1,
        })
    }
}

// ─── Grammar ─────────────────────────────────────────────────────────────

/// Codec for `shape` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapeGrammar;

impl Codec for ShapeGrammar {
    type Value = Shape;

    fn parse(&self, raw: &str) -> ParsedValue<Shape> {
        let mut input = raw;
        skip_space(&mut input);
        let name = match parse_identifier(&mut input) {
            Ok(name) => name,
            Err(_) => return ParsedValue::failed(vec![syntax_error(raw, input, "a shape name")]),
        };
        let mut shape = Shape::named(name);

        skip_space(&mut input);
        if input.starts_with('[') {
            if let Err(expected) = parse_params(&mut input, &mut shape.params) {
                return ParsedValue::partial(Some(shape), vec![syntax_error(raw, input, expected)]);
            }
            skip_space(&mut input);
        }
        ParsedValue::partial(Some(shape), trailing_input(raw, input).into_iter().collect())
    }

    fn serialize(&self, value: &Shape) -> String {
        let mut out = value.kind.name().to_string();
        let p = &value.params;
        if p.is_empty() {
            return out;
        }
        let mut params = Vec::new();
        if let Some(sides) = p.sides {
            params.push(format!("sides={sides}"));
        }
        if let Some(peripheries) = p.peripheries {
            params.push(format!("peripheries={peripheries}"));
        }
        for (key, value) in [
            ("orientation", p.orientation),
            ("skew", p.skew),
            ("distortion", p.distortion),
        ] {
            if let Some(value) = value {
                params.push(format!("{key}={}", format_number(value)));
            }
        }
        if let Some(regular) = p.regular {
            params.push(format!("regular={regular}"));
        }
        out.push('[');
        out.push_str(&params.join(","));
        out.push(']');
        out
    }

    fn validate(&self, value: &Shape, _context: &ValidationContext) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let name = value.kind.name();

        if let ShapeKind::Custom(custom) = &value.kind {
            diags.push(Diagnostic::semantic_warning(
                custom.as_str(),
                format!("'{custom}' is not a built-in shape; it must be supplied as a custom shape."),
            ));
        }

        if matches!(value.kind, ShapeKind::Polygon(_)) {
            if let Some(sides) = value.sides().filter(|&sides| sides < 3) {
                diags.push(Diagnostic::semantic(
                    sides.to_string(),
                    format!("The shape '{name}' needs at least 3 sides, but has {sides}."),
                ));
            }
        }

        if value.params.sides.is_some() && value.kind != ShapeKind::Polygon(PolygonShape::Polygon) {
            diags.push(Diagnostic::semantic_warning(
                name,
                format!("The 'sides' parameter is ignored by the shape '{name}'."),
            ));
        }

        let peripheries = value.peripheries();
        if peripheries < 0 {
            diags.push(Diagnostic::semantic(
                peripheries.to_string(),
                format!("The number of peripheries must not be negative, but is {peripheries}."),
            ));
        }
        diags
    }
}

fn parse_params(input: &mut &str, params: &mut ShapeParams) -> Result<(), Expected> {
    symbol(input, '[').map_err(|_| "'['")?;
    loop {
        skip_space(input);
        let key_start = *input;
        let key = parse_identifier(input).map_err(|_| "a shape parameter")?;
        skip_space(input);
        symbol(input, '=').map_err(|_| "'='")?;
        skip_space(input);
        match key {
            "sides" => params.sides = Some(parse_integer(input).map_err(|_| "an integer")?),
            "peripheries" => {
                params.peripheries = Some(parse_integer(input).map_err(|_| "an integer")?);
            }
            "orientation" => params.orientation = Some(parse_number(input).map_err(|_| "a number")?),
            "skew" => params.skew = Some(parse_number(input).map_err(|_| "a number")?),
            "distortion" => params.distortion = Some(parse_number(input).map_err(|_| "a number")?),
            "regular" => {
                let checkpoint = *input;
                let word = parse_identifier(input).map_err(|_| "a boolean")?;
                match BoolCodec.parse(word).into_value() {
                    Some(regular) => params.regular = Some(regular),
                    None => {
                        *input = checkpoint;
                        return Err("a boolean");
                    }
                }
            }
            _ => {
                *input = key_start;
                return Err("one of 'sides', 'peripheries', 'orientation', 'skew', 'distortion', 'regular'");
            }
        }
        skip_space(input);
        if input.starts_with(',') {
            *input = &input[1..];
        } else {
            break;
        }
    }
    symbol(input, ']').map_err(|_| "',' or ']'")?;
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────
