use crate::convert::Symbol;
use crate::declarations::{parse_declarations, resolve};
use crate::positioning::{PageBreak, Position};
use crate::properties::{MergePolicy, StyleKey};
use crate::text::{StyleToken, TextAlign, WhiteSpace};
use inkflow_types::Color;

/// A converted declaration value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Color(Color),
    Number(f32),
    Text(String),
    Symbol(Symbol),
    Tokens(Vec<StyleToken>),
}

/// The canonical style state of one element: one slot per `StyleKey`.
///
/// Unset slots are `None` (or an empty token list) so that a merge only carries over
/// what was actually declared somewhere up the chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRecord {
    pub background: Option<Color>,
    pub callback: Option<String>,
    pub color: Option<Color>,
    pub font: Option<String>,
    pub size: Option<f32>,
    pub styles: Vec<StyleToken>,
    pub link: Option<String>,
    pub character_spacing: Option<f32>,
    pub list_style_type: Option<String>,
    pub white_space: Option<Symbol>,
    pub break_before: Option<Symbol>,
    pub margin_top: Option<f32>,
    pub padding_top: Option<f32>,
    pub break_after: Option<Symbol>,
    pub margin_bottom: Option<f32>,
    pub padding_bottom: Option<f32>,
    pub left: Option<f32>,
    pub leading: Option<f32>,
    pub margin_left: Option<f32>,
    pub padding_left: Option<f32>,
    pub position: Option<Symbol>,
    pub align: Option<Symbol>,
    pub top: Option<f32>,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `text` as a declaration list and resolves it into this record.
    pub fn with_declarations(self, text: &str) -> Self {
        resolve(&parse_declarations(text), self)
    }

    /// Stores `value` under `key` following the key's merge policy. A value of the wrong
    /// shape for the key is ignored.
    pub fn apply(&mut self, key: StyleKey, value: StyleValue) {
        match (key.merge_policy(), value) {
            (MergePolicy::Accumulate, StyleValue::Number(amount)) => {
                if let Some(slot) = self.length_mut(key) {
                    *slot = Some(slot.unwrap_or(0.0) + amount);
                }
            }
            (MergePolicy::Append, StyleValue::Tokens(tokens)) => {
                for token in tokens {
                    if !self.styles.contains(&token) {
                        self.styles.push(token);
                    }
                }
            }
            (MergePolicy::Overwrite, value) => self.overwrite(key, value),
            (_, value) => {
                log::debug!("Ignoring {:?} for accumulating key '{}'", value, key.name());
            }
        }
    }

    fn overwrite(&mut self, key: StyleKey, value: StyleValue) {
        match (key, value) {
            (StyleKey::Background, StyleValue::Color(color)) => self.background = Some(color),
            (StyleKey::Color, StyleValue::Color(color)) => self.color = Some(color),
            (StyleKey::Callback, StyleValue::Text(name)) => self.callback = Some(name),
            (StyleKey::Font, StyleValue::Text(font)) => self.font = Some(font),
            (StyleKey::Link, StyleValue::Text(link)) => self.link = Some(link),
            (StyleKey::ListStyleType, StyleValue::Text(kind)) => self.list_style_type = Some(kind),
            (StyleKey::WhiteSpace, StyleValue::Symbol(symbol)) => self.white_space = Some(symbol),
            (StyleKey::BreakBefore, StyleValue::Symbol(symbol)) => self.break_before = Some(symbol),
            (StyleKey::BreakAfter, StyleValue::Symbol(symbol)) => self.break_after = Some(symbol),
            (StyleKey::Position, StyleValue::Symbol(symbol)) => self.position = Some(symbol),
            (StyleKey::Align, StyleValue::Symbol(symbol)) => self.align = Some(symbol),
            (key, StyleValue::Number(number)) => match self.length_mut(key) {
                Some(slot) => *slot = Some(number),
                None => log::debug!("Key '{}' does not hold a number", key.name()),
            },
            (key, value) => log::debug!("Key '{}' cannot hold {:?}", key.name(), value),
        }
    }

    fn length_mut(&mut self, key: StyleKey) -> Option<&mut Option<f32>> {
        let slot = match key {
            StyleKey::Size => &mut self.size,
            StyleKey::CharacterSpacing => &mut self.character_spacing,
            StyleKey::MarginTop => &mut self.margin_top,
            StyleKey::PaddingTop => &mut self.padding_top,
            StyleKey::MarginBottom => &mut self.margin_bottom,
            StyleKey::PaddingBottom => &mut self.padding_bottom,
            StyleKey::Left => &mut self.left,
            StyleKey::Leading => &mut self.leading,
            StyleKey::MarginLeft => &mut self.margin_left,
            StyleKey::PaddingLeft => &mut self.padding_left,
            StyleKey::Top => &mut self.top,
            _ => return None,
        };
        Some(slot)
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: StyleKey) -> Option<StyleValue> {
        let number = |value: Option<f32>| value.map(StyleValue::Number);
        let symbol = |value: &Option<Symbol>| value.clone().map(StyleValue::Symbol);
        let text = |value: &Option<String>| value.clone().map(StyleValue::Text);
        match key {
            StyleKey::Background => self.background.map(StyleValue::Color),
            StyleKey::Callback => text(&self.callback),
            StyleKey::Color => self.color.map(StyleValue::Color),
            StyleKey::Font => text(&self.font),
            StyleKey::Size => number(self.size),
            StyleKey::Styles if self.styles.is_empty() => None,
            StyleKey::Styles => Some(StyleValue::Tokens(self.styles.clone())),
            StyleKey::Link => text(&self.link),
            StyleKey::CharacterSpacing => number(self.character_spacing),
            StyleKey::ListStyleType => text(&self.list_style_type),
            StyleKey::WhiteSpace => symbol(&self.white_space),
            StyleKey::BreakBefore => symbol(&self.break_before),
            StyleKey::MarginTop => number(self.margin_top),
            StyleKey::PaddingTop => number(self.padding_top),
            StyleKey::BreakAfter => symbol(&self.break_after),
            StyleKey::MarginBottom => number(self.margin_bottom),
            StyleKey::PaddingBottom => number(self.padding_bottom),
            StyleKey::Left => number(self.left),
            StyleKey::Leading => number(self.leading),
            StyleKey::MarginLeft => number(self.margin_left),
            StyleKey::PaddingLeft => number(self.padding_left),
            StyleKey::Position => symbol(&self.position),
            StyleKey::Align => symbol(&self.align),
            StyleKey::Top => number(self.top),
        }
    }

    /// Applies every set key of `other` accepted by `filter` onto this record.
    pub fn merge(&mut self, other: &StyleRecord, filter: impl Fn(StyleKey) -> bool) {
        for key in StyleKey::all().filter(|key| filter(*key)) {
            if let Some(value) = other.get(key) {
                self.apply(key, value);
            }
        }
    }

    /// The effective record of an element: the inheritable part of `parent` with the
    /// element's `own` fragment merged on top.
    pub fn cascade(parent: &StyleRecord, own: &StyleRecord) -> StyleRecord {
        let mut effective = StyleRecord::default();
        effective.merge(parent, |key| key.category().is_inherited());
        effective.merge(own, |_| true);
        effective
    }

    pub fn text_styles(&self) -> TextStyles {
        TextStyles {
            background: self.background,
            callback: self.callback.clone(),
            color: self.color,
            font: self.font.clone(),
            size: self.size,
            styles: self.styles.clone(),
            link: self.link.clone(),
            character_spacing: self.character_spacing,
            list_style_type: self.list_style_type.clone(),
            white_space: keyword(&self.white_space, WhiteSpace::from_keyword).unwrap_or_default(),
        }
    }

    pub fn block_styles(&self) -> BlockStyles {
        BlockStyles {
            align: keyword(&self.align, TextAlign::from_keyword),
            leading: self.leading,
            left: self.left.unwrap_or(0.0),
            margin_left: self.margin_left.unwrap_or(0.0),
            padding_left: self.padding_left.unwrap_or(0.0),
            position: keyword(&self.position, Position::from_keyword).unwrap_or_default(),
            top: self.top.unwrap_or(0.0),
        }
    }

    pub fn break_before(&self) -> Option<PageBreak> {
        keyword(&self.break_before, PageBreak::from_keyword)
    }

    pub fn break_after(&self) -> Option<PageBreak> {
        keyword(&self.break_after, PageBreak::from_keyword)
    }
}

fn keyword<T>(symbol: &Option<Symbol>, read: fn(&str) -> Option<T>) -> Option<T> {
    let symbol = symbol.as_ref()?;
    let value = read(symbol.as_str());
    if value.is_none() {
        log::debug!("Dropping unknown keyword '{}'", symbol);
    }
    value
}

/// The text-node subset of a record, stamped onto each buffered text run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStyles {
    pub background: Option<Color>,
    pub callback: Option<String>,
    pub color: Option<Color>,
    pub font: Option<String>,
    pub size: Option<f32>,
    pub styles: Vec<StyleToken>,
    pub link: Option<String>,
    pub character_spacing: Option<f32>,
    pub list_style_type: Option<String>,
    pub white_space: WhiteSpace,
}

impl TextStyles {
    pub fn has(&self, token: StyleToken) -> bool {
        self.styles.contains(&token)
    }
}

/// The box-geometry subset of a record, read from the block-establishing element at
/// flush time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockStyles {
    pub align: Option<TextAlign>,
    pub leading: Option<f32>,
    pub left: f32,
    pub margin_left: f32,
    pub padding_left: f32,
    pub position: Position,
    pub top: f32,
}

impl BlockStyles {
    pub fn left_indent(&self) -> f32 {
        self.margin_left + self.padding_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> StyleRecord {
        StyleRecord::new().with_declarations(text)
    }

    #[test]
    fn test_accumulating_keys_sum_through_cascade() {
        let parent = record("margin-left: 10");
        let child = StyleRecord::cascade(&parent, &record("margin-left: 5"));
        assert_eq!(child.margin_left, Some(15.0));
        assert_eq!(child.block_styles().left_indent(), 15.0);
    }

    #[test]
    fn test_plain_keys_overwrite() {
        let parent = record("color: red");
        let child = StyleRecord::cascade(&parent, &record("color: blue"));
        assert_eq!(child.color.map(|c| c.to_hex()), Some("0000ff".to_string()));
    }

    #[test]
    fn test_style_tokens_append() {
        let parent = record("font-style: italic");
        let child = StyleRecord::cascade(&parent, &record("text-decoration: underline"));
        assert_eq!(child.styles, vec![StyleToken::Italic, StyleToken::Underline]);
        let text = child.text_styles();
        assert!(text.has(StyleToken::Italic));
        assert!(text.has(StyleToken::Underline));
    }

    #[test]
    fn test_spacing_is_not_inherited() {
        let parent = record("margin-top: 20; padding-bottom: 4; break-after: page; font-size: 9");
        let child = StyleRecord::cascade(&parent, &StyleRecord::new());
        assert_eq!(child.margin_top, None);
        assert_eq!(child.padding_bottom, None);
        assert_eq!(child.break_after(), None);
        assert_eq!(child.size, Some(9.0));
    }

    #[test]
    fn test_block_styles_read_typed_keywords() {
        let block = record("text-align: Center; position: absolute; top: 1in; line-height: 14")
            .block_styles();
        assert_eq!(block.align, Some(TextAlign::Center));
        assert_eq!(block.position, Position::Absolute);
        assert_eq!(block.top, 72.0);
        assert_eq!(block.leading, Some(14.0));

        let unknown = record("text-align: sideways").block_styles();
        assert_eq!(unknown.align, None);
    }

    #[test]
    fn test_white_space_keyword() {
        assert_eq!(record("white-space: pre").text_styles().white_space, WhiteSpace::Pre);
        assert_eq!(record("").text_styles().white_space, WhiteSpace::Normal);
    }

    #[test]
    fn test_page_break_keywords() {
        let styles = record("break-before: page; break-after: avoid");
        assert_eq!(styles.break_before(), Some(PageBreak::Page));
        assert_eq!(styles.break_after(), Some(PageBreak::Avoid));
    }

    #[test]
    fn test_get_round_trips_every_set_key() {
        let original = record(
            "background: #ff0; callback: highlight; href: https://x.test; margin-left: 3; font-weight: bold",
        );
        let mut copy = StyleRecord::new();
        copy.merge(&original, |_| true);
        assert_eq!(copy, original);
    }
}
