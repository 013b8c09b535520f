//! Lexical helpers shared by the structured grammars.
//!
//! All helpers work on `&mut &str` so a grammar can tell how far it got by
//! comparing the remaining input with the raw value.

use winnow::ascii::multispace0;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Consume optional whitespace (concrete error type avoids inference issues).
pub(crate) fn skip_space(input: &mut &str) {
    let _: Result<&str, ErrMode<ContextError>> = multispace0.parse_next(input);
}

/// Whitespace as consumed by [`skip_space`].
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Byte offset of `rest` inside `raw`, where `rest` is a suffix of `raw`.
pub(crate) fn offset_in(raw: &str, rest: &str) -> usize {
    raw.len() - rest.len()
}

/// The next whitespace-delimited chunk of `rest`, for diagnostics.
pub(crate) fn next_chunk(rest: &str) -> &str {
    let end = rest.find(is_space).unwrap_or(rest.len());
    &rest[..end]
}

pub(crate) fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Consume one expected character.
pub(crate) fn symbol(input: &mut &str, mut c: char) -> ModalResult<char> {
    c.parse_next(input)
}

pub(crate) fn parse_identifier<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

fn digits<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)
}

fn sign(input: &mut &str) -> ModalResult<Option<char>> {
    if input.starts_with(['-', '+']) {
        one_of(['-', '+']).map(Some).parse_next(input)
    } else {
        Ok(None)
    }
}

/// A DOT numeral: `[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?`.
/// Numerals that overflow `f64` are rejected.
pub(crate) fn parse_number(input: &mut &str) -> ModalResult<f64> {
    let start = *input;
    let _ = sign(input)?;
    let int_part = digits(input)?;
    let mut frac_len = 0;
    if input.starts_with('.') {
        let _ = symbol(input, '.')?;
        frac_len = digits(input)?.len();
    }
    if int_part.is_empty() && frac_len == 0 {
        *input = start;
        return backtrack();
    }
    if input.starts_with(['e', 'E']) {
        let checkpoint = *input;
        let _ = one_of(['e', 'E']).parse_next(input)?;
        let _ = sign(input)?;
        if digits(input)?.is_empty() {
            *input = checkpoint;
        }
    }
    let matched = &start[..start.len() - input.len()];
    match matched.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => {
            *input = start;
            backtrack()
        }
    }
}

/// A signed decimal integer.
pub(crate) fn parse_integer(input: &mut &str) -> ModalResult<i32> {
    let start = *input;
    let _ = sign(input)?;
    if digits(input)?.is_empty() {
        *input = start;
        return backtrack();
    }
    let matched = &start[..start.len() - input.len()];
    match matched.parse::<i32>() {
        Ok(n) => Ok(n),
        Err(_) => {
            *input = start;
            backtrack()
        }
    }
}

/// Canonical text for a number: the shortest form that parses back exactly.
pub(crate) fn format_number(n: f64) -> String {
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        for (raw, expected, rest) in [
            ("12", 12.0, ""),
            ("-1.5,", -1.5, ","),
            (".25 x", 0.25, " x"),
            ("3.", 3.0, ""),
            ("1e3!", 1000.0, "!"),
            ("2e", 2.0, "e"),
        ] {
            let mut input = raw;
            assert_eq!(parse_number(&mut input).unwrap(), expected, "{raw}");
            assert_eq!(input, rest, "{raw}");
        }
    }

    #[test]
    fn number_rejects_bare_sign_and_dot() {
        for raw in ["-", ".", "x1", ""] {
            let mut input = raw;
            assert!(parse_number(&mut input).is_err(), "{raw}");
            assert_eq!(input, raw);
        }
    }

    #[test]
    fn number_rejects_overflow() {
        for raw in ["1e400", "-1e400,0", "9e999 "] {
            let mut input = raw;
            assert!(parse_number(&mut input).is_err(), "{raw}");
            assert_eq!(input, raw);
        }
        let mut input = "1.7e308";
        assert_eq!(parse_number(&mut input).unwrap(), 1.7e308);
    }

    #[test]
    fn integers() {
        let mut input = "-3]";
        assert_eq!(parse_integer(&mut input).unwrap(), -3);
        assert_eq!(input, "]");
        let mut input = "1.5";
        assert_eq!(parse_integer(&mut input).unwrap(), 1);
        assert_eq!(input, ".5");
    }

    #[test]
    fn formatting_round_trips() {
        for n in [0.0, 1.0, -2.5, 0.1, 1e-9, 123456.789] {
            assert_eq!(format_number(n).parse::<f64>().unwrap(), n);
        }
        assert_eq!(format_number(4.0), "4");
    }

    #[test]
    fn chunks_and_offsets() {
        let raw = "1,2 3,4";
        let rest = &raw[4..];
        assert_eq!(offset_in(raw, rest), 4);
        assert_eq!(next_chunk("abc def"), "abc");
    }
}
