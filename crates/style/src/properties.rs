//! The static tables behind style resolution.
//!
//! `PROPERTY_RULES` maps a declared property name to the canonical key and the
//! converter for its value. `KEYS` maps each canonical key to the moment it takes
//! effect (its category) and to how repeated values combine (its merge policy).
//! Resolution and the cascade consult these tables instead of branching on keys.

use crate::convert::{
    convert_color, convert_float, convert_size, convert_symbol, copy_value, normalize_style,
    unquote,
};
use crate::record::StyleValue;

/// When a style takes effect during flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleCategory {
    /// Stamped on every buffered text run.
    TextNode,
    /// Applied once when the element opens.
    TagOpen,
    /// Applied once when the element closes.
    TagClose,
    /// Read from the nearest block-establishing element at flush time.
    Block,
}

impl StyleCategory {
    /// Text and block styles cascade down to descendants; open/close spacing belongs to
    /// the element that declared it.
    pub fn is_inherited(self) -> bool {
        matches!(self, StyleCategory::TextNode | StyleCategory::Block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    Overwrite,
    /// Numeric values sum.
    Accumulate,
    /// Token lists append.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Background,
    Callback,
    Color,
    Font,
    Size,
    Styles,
    Link,
    CharacterSpacing,
    ListStyleType,
    WhiteSpace,
    BreakBefore,
    MarginTop,
    PaddingTop,
    BreakAfter,
    MarginBottom,
    PaddingBottom,
    Left,
    Leading,
    MarginLeft,
    PaddingLeft,
    Position,
    Align,
    Top,
}

#[derive(Debug)]
pub struct KeyEntry {
    pub key: StyleKey,
    pub name: &'static str,
    pub category: StyleCategory,
    pub merge: MergePolicy,
}

const fn entry(
    key: StyleKey,
    name: &'static str,
    category: StyleCategory,
    merge: MergePolicy,
) -> KeyEntry {
    KeyEntry { key, name, category, merge }
}

use MergePolicy::{Accumulate, Append, Overwrite};
use StyleCategory::{Block, TagClose, TagOpen, TextNode};

/// Indexed by `StyleKey` discriminant.
pub static KEYS: [KeyEntry; 23] = [
    entry(StyleKey::Background, "background", TextNode, Overwrite),
    entry(StyleKey::Callback, "callback", TextNode, Overwrite),
    entry(StyleKey::Color, "color", TextNode, Overwrite),
    entry(StyleKey::Font, "font", TextNode, Overwrite),
    entry(StyleKey::Size, "size", TextNode, Overwrite),
    entry(StyleKey::Styles, "styles", TextNode, Append),
    entry(StyleKey::Link, "link", TextNode, Overwrite),
    entry(StyleKey::CharacterSpacing, "character-spacing", TextNode, Overwrite),
    entry(StyleKey::ListStyleType, "list-style-type", TextNode, Overwrite),
    entry(StyleKey::WhiteSpace, "white-space", TextNode, Overwrite),
    entry(StyleKey::BreakBefore, "break-before", TagOpen, Overwrite),
    entry(StyleKey::MarginTop, "margin-top", TagOpen, Overwrite),
    entry(StyleKey::PaddingTop, "padding-top", TagOpen, Overwrite),
    entry(StyleKey::BreakAfter, "break-after", TagClose, Overwrite),
    entry(StyleKey::MarginBottom, "margin-bottom", TagClose, Overwrite),
    entry(StyleKey::PaddingBottom, "padding-bottom", TagClose, Overwrite),
    entry(StyleKey::Left, "left", Block, Overwrite),
    entry(StyleKey::Leading, "leading", Block, Overwrite),
    entry(StyleKey::MarginLeft, "margin-left", Block, Accumulate),
    entry(StyleKey::PaddingLeft, "padding-left", Block, Accumulate),
    entry(StyleKey::Position, "position", Block, Overwrite),
    entry(StyleKey::Align, "align", Block, Overwrite),
    entry(StyleKey::Top, "top", Block, Overwrite),
];

impl StyleKey {
    pub fn entry(self) -> &'static KeyEntry {
        &KEYS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn category(self) -> StyleCategory {
        self.entry().category
    }

    pub fn merge_policy(self) -> MergePolicy {
        self.entry().merge
    }

    pub fn all() -> impl Iterator<Item = StyleKey> {
        KEYS.iter().map(|entry| entry.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    Color,
    Size,
    Float,
    Symbol,
    Unquote,
    Copy,
    Style,
}

impl Converter {
    /// Converts a raw value. `None` means there is nothing to record (a blank keyword or
    /// an unrecognized style token).
    pub fn convert(self, raw: &str) -> Option<StyleValue> {
        match self {
            Converter::Color => Some(StyleValue::Color(convert_color(raw))),
            Converter::Size => Some(StyleValue::Number(convert_size(raw))),
            Converter::Float => Some(StyleValue::Number(convert_float(raw))),
            Converter::Symbol => convert_symbol(raw).map(StyleValue::Symbol),
            Converter::Unquote => Some(StyleValue::Text(unquote(raw))),
            Converter::Copy => Some(StyleValue::Text(copy_value(raw))),
            Converter::Style => normalize_style(raw).map(|token| StyleValue::Tokens(vec![token])),
        }
    }
}

#[derive(Debug)]
pub struct PropertyRule {
    pub property: &'static str,
    pub key: StyleKey,
    pub converter: Converter,
}

const fn rule(property: &'static str, key: StyleKey, converter: Converter) -> PropertyRule {
    PropertyRule { property, key, converter }
}

pub static PROPERTY_RULES: [PropertyRule; 26] = [
    // text node styles
    rule("background", StyleKey::Background, Converter::Color),
    rule("callback", StyleKey::Callback, Converter::Copy),
    rule("color", StyleKey::Color, Converter::Color),
    rule("font-family", StyleKey::Font, Converter::Unquote),
    rule("font-size", StyleKey::Size, Converter::Size),
    rule("font-style", StyleKey::Styles, Converter::Style),
    rule("font-weight", StyleKey::Styles, Converter::Style),
    rule("href", StyleKey::Link, Converter::Copy),
    rule("letter-spacing", StyleKey::CharacterSpacing, Converter::Float),
    rule("list-style-type", StyleKey::ListStyleType, Converter::Unquote),
    rule("text-decoration", StyleKey::Styles, Converter::Style),
    rule("vertical-align", StyleKey::Styles, Converter::Style),
    rule("white-space", StyleKey::WhiteSpace, Converter::Symbol),
    // tag opening styles
    rule("break-before", StyleKey::BreakBefore, Converter::Symbol),
    rule("margin-top", StyleKey::MarginTop, Converter::Size),
    rule("padding-top", StyleKey::PaddingTop, Converter::Size),
    // tag closing styles
    rule("break-after", StyleKey::BreakAfter, Converter::Symbol),
    rule("margin-bottom", StyleKey::MarginBottom, Converter::Size),
    rule("padding-bottom", StyleKey::PaddingBottom, Converter::Size),
    // block styles
    rule("left", StyleKey::Left, Converter::Size),
    rule("line-height", StyleKey::Leading, Converter::Size),
    rule("margin-left", StyleKey::MarginLeft, Converter::Size),
    rule("padding-left", StyleKey::PaddingLeft, Converter::Size),
    rule("position", StyleKey::Position, Converter::Symbol),
    rule("text-align", StyleKey::Align, Converter::Symbol),
    rule("top", StyleKey::Top, Converter::Size),
];

/// Looks up the rule for a declared property name (case-insensitive).
pub fn rule_for(property: &str) -> Option<&'static PropertyRule> {
    PROPERTY_RULES
        .iter()
        .find(|rule| rule.property.eq_ignore_ascii_case(property))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table_is_indexed_by_discriminant() {
        for (index, entry) in KEYS.iter().enumerate() {
            assert_eq!(entry.key as usize, index, "{} is out of place", entry.name);
        }
    }

    #[test]
    fn test_only_left_spacing_accumulates() {
        let accumulating: Vec<_> = StyleKey::all()
            .filter(|key| key.merge_policy() == MergePolicy::Accumulate)
            .collect();
        assert_eq!(accumulating, vec![StyleKey::MarginLeft, StyleKey::PaddingLeft]);
        assert_eq!(StyleKey::Styles.merge_policy(), MergePolicy::Append);
    }

    #[test]
    fn test_categories() {
        assert_eq!(StyleKey::MarginTop.category(), StyleCategory::TagOpen);
        assert_eq!(StyleKey::PaddingBottom.category(), StyleCategory::TagClose);
        assert_eq!(StyleKey::Align.category(), StyleCategory::Block);
        assert_eq!(StyleKey::Link.category(), StyleCategory::TextNode);
        assert!(!StyleCategory::TagOpen.is_inherited());
        assert!(StyleCategory::Block.is_inherited());
    }

    #[test]
    fn test_rule_lookup() {
        let rule = rule_for("Line-Height").unwrap();
        assert_eq!(rule.key, StyleKey::Leading);
        assert_eq!(rule.converter, Converter::Size);
        assert!(rule_for("border").is_none());
    }
}
