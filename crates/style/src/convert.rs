//! Value converters: raw declaration values to canonical typed values.
//!
//! Every converter is total. Unparseable input degrades to a converter-specific
//! default instead of failing, so one bad declaration never stops the others.

use crate::parsers::{parse_length, parse_number, run_parser};
use crate::text::StyleToken;
use inkflow_types::Color;
use std::fmt;

/// A lower-cased keyword token, e.g. `center` or `pre-wrap`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol(String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_keyword(keyword: &'static str) -> Self {
        Symbol(keyword.to_string())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalizes a hex (`#fb1`, `#ffbb11`, `ffbb11`), functional (`rgb(...)`) or named
/// color. Falls back to black.
pub fn convert_color(raw: &str) -> Color {
    let value: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    if value.starts_with('#') {
        if let Ok(color) = Color::parse_hex(&value) {
            return color;
        }
    }
    if let Ok(parsed) = csscolorparser::parse(&value) {
        let [r, g, b, _] = parsed.to_rgba8();
        return Color::rgb(r, g, b);
    }
    Color::parse_hex(&value).unwrap_or_else(|_| {
        log::debug!("Unrecognized color '{}', using black", raw);
        Color::BLACK
    })
}

/// Converts a length with an optional unit suffix to points. An unknown unit keeps the
/// leading number; anything else yields `0`.
pub fn convert_size(raw: &str) -> f32 {
    let value: String = raw.split_whitespace().collect();
    if let Ok(points) = run_parser(parse_length, &value) {
        return points;
    }
    leading_number(&value)
}

/// Converts a bare decimal number; defaults to `0`.
pub fn convert_float(raw: &str) -> f32 {
    leading_number(raw.trim())
}

fn leading_number(value: &str) -> f32 {
    match parse_number(value) {
        Ok((_, number)) => number,
        Err(_) => {
            log::debug!("Unparseable number '{}', using 0", value);
            0.0
        }
    }
}

/// Lower-cases a keyword and keeps its first token. Blank input has no symbol.
pub fn convert_symbol(raw: &str) -> Option<Symbol> {
    raw.split_whitespace()
        .next()
        .map(|token| Symbol(token.to_ascii_lowercase()))
}

/// Strips one pair of matching surrounding quotes.
pub fn unquote(raw: &str) -> String {
    let value = raw.trim();
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}

pub fn copy_value(raw: &str) -> String {
    raw.to_string()
}

/// Maps a shorthand keyword to its canonical style token; unknown keywords are dropped.
pub fn normalize_style(raw: &str) -> Option<StyleToken> {
    let keyword = raw.trim().to_ascii_lowercase();
    StyleToken::from_shorthand(&keyword)
}
