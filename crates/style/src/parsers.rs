//! Low-level nom parser functions for CSS-like style values.
//!
//! These are strict: a caller that needs a best-effort value (the converters in
//! `crate::convert`) falls back on its own when a parser rejects the input.

use crate::dimension::Margins;
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, one_of, space1};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during strict style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

// --- Number & Unit Parsers ---

/// Parses a signed decimal number (`12`, `-1.5`, `.75`).
pub fn parse_number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("pt"), |_: &str| 1.0),
        map(tag_no_case("px"), |_: &str| 1.0), // Treat px as pt
        map(tag_no_case("in"), |_: &str| 72.0),
        map(tag_no_case("cm"), |_: &str| 28.35),
        map(tag_no_case("mm"), |_: &str| 2.835),
    ))
    .parse(input)
}

/// Parses a length value with optional unit (e.g., "12pt", "1in", "10mm"), in points.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    let (input, value) = parse_number(input)?;
    let (input, unit_multiplier) = opt(parse_unit).parse(input)?;
    Ok((input, value * unit_multiplier.unwrap_or(1.0)))
}

/// Parses CSS shorthand margins (1, 2, or 4 values).
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleParseError> {
    let parts_res = separated_list1(space1, parse_length).parse(input.trim());

    match parts_res {
        Ok(("", parts)) => match parts.len() {
            1 => Ok(Margins::all(parts[0])),
            2 => Ok(Margins {
                top: parts[0],
                right: parts[1],
                bottom: parts[0],
                left: parts[1],
            }),
            4 => Ok(Margins {
                top: parts[0],
                right: parts[1],
                bottom: parts[2],
                left: parts[3],
            }),
            _ => Err(StyleParseError::Parse(format!(
                "Invalid number of values for margin shorthand: got {}, expected 1, 2, or 4.",
                parts.len()
            ))),
        },
        _ => Err(StyleParseError::Parse(format!(
            "Failed to parse margins value: '{}'",
            input
        ))),
    }
}

/// Helper to run a nom parser over the whole input and convert its result to a
/// `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Fn(&'a str) -> IResult<&'a str, T>,
{
    match parser(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}
