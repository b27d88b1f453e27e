//! Text-node preparation: entity decoding and whitespace normalization.
use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use std::borrow::Cow;

/// Collapses markup whitespace unless `preserve` is set.
///
/// A leading or trailing whitespace run is removed only when it contains a newline, so a
/// plain space at the edge of an inline run still separates it from its neighbour.
/// Remaining newlines are deleted and runs of spaces squeezed to one.
pub fn normalize_whitespace(content: &str, preserve: bool) -> String {
    if preserve {
        return content.to_string();
    }

    let mut text = content;
    let leading = text.len() - text.trim_start().len();
    if text[..leading].contains('\n') {
        text = &text[leading..];
    }
    let trailing = text.trim_end().len();
    if text[trailing..].contains('\n') {
        text = &text[..trailing];
    }

    let mut normalized = String::with_capacity(text.len());
    for c in text.chars().filter(|c| *c != '\n') {
        if c == ' ' && normalized.ends_with(' ') {
            continue;
        }
        normalized.push(c);
    }
    normalized
}

/// Decodes character and entity references. Input that does not decode cleanly (an
/// unknown entity or a bare `&`) is returned unchanged.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    match unescape_with(text, resolve_entity) {
        Ok(decoded) => decoded,
        Err(err) => {
            log::debug!("Leaving undecodable text as is: {}", err);
            Cow::Borrowed(text)
        }
    }
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or_else(|| {
        Some(match name {
            "nbsp" => "\u{a0}",
            "copy" => "\u{a9}",
            "reg" => "\u{ae}",
            "trade" => "\u{2122}",
            "euro" => "\u{20ac}",
            "pound" => "\u{a3}",
            "yen" => "\u{a5}",
            "sect" => "\u{a7}",
            "deg" => "\u{b0}",
            "middot" => "\u{b7}",
            "bull" => "\u{2022}",
            "hellip" => "\u{2026}",
            "ndash" => "\u{2013}",
            "mdash" => "\u{2014}",
            "lsquo" => "\u{2018}",
            "rsquo" => "\u{2019}",
            "ldquo" => "\u{201c}",
            "rdquo" => "\u{201d}",
            "laquo" => "\u{ab}",
            "raquo" => "\u{bb}",
            "times" => "\u{d7}",
            _ => return None,
        })
    })
}
