//! The `point` grammar: `x,y`, `x,y,z`, each optionally followed by `!`
//! to pin the node at that position.

use super::lex::{format_number, parse_number, skip_space, symbol};
use super::{Expected, syntax_error, trailing_input};
use crate::codec::{Codec, ParsedValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    /// Trailing `!`: the position is fixed.
    pub pinned: bool,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            pinned: false,
        }
    }

    #[must_use]
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }
}

/// Codec for `point` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointGrammar;

impl Codec for PointGrammar {
    type Value = Point;

    fn parse(&self, raw: &str) -> ParsedValue<Point> {
        let mut input = raw;
        skip_space(&mut input);
        match parse_point(&mut input) {
            Ok(point) => {
                skip_space(&mut input);
                ParsedValue::partial(Some(point), trailing_input(raw, input).into_iter().collect())
            }
            Err(expected) => ParsedValue::failed(vec![syntax_error(raw, input, expected)]),
        }
    }

    fn serialize(&self, value: &Point) -> String {
        serialize_point(value)
    }
}

fn comma(input: &mut &str) -> Result<(), Expected> {
    skip_space(input);
    symbol(input, ',').map_err(|_| "','")?;
    skip_space(input);
    Ok(())
}

/// `x,y(,z)?(!)?`, shared with the spline grammar.
pub(crate) fn parse_point(input: &mut &str) -> Result<Point, Expected> {
    let x = parse_number(input).map_err(|_| "a number")?;
    comma(input)?;
    let y = parse_number(input).map_err(|_| "a number")?;

    let checkpoint = *input;
    skip_space(input);
    let z = if input.starts_with(',') {
        comma(input)?;
        Some(parse_number(input).map_err(|_| "a number")?)
    } else {
        *input = checkpoint;
        None
    };

    let pinned = input.starts_with('!');
    if pinned {
        *input = &input[1..];
    }
    Ok(Point { x, y, z, pinned })
}

pub(crate) fn serialize_point(point: &Point) -> String {
    let mut out = format!("{},{}", format_number(point.x), format_number(point.y));
    if let Some(z) = point.z {
        out.push(',');
        out.push_str(&format_number(z));
    }
    if point.pinned {
        out.push('!');
    }
    out
}
