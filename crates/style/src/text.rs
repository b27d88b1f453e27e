use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

impl TextAlign {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "left" | "start" => Some(TextAlign::Left),
            "right" | "end" => Some(TextAlign::Right),
            "center" => Some(TextAlign::Center),
            "justify" => Some(TextAlign::Justify),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Right => "right",
            TextAlign::Center => "center",
            TextAlign::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WhiteSpace {
    #[default]
    Normal,
    Nowrap,
    Pre,
    PreWrap,
    PreLine,
}

impl WhiteSpace {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "normal" => Some(WhiteSpace::Normal),
            "nowrap" => Some(WhiteSpace::Nowrap),
            "pre" => Some(WhiteSpace::Pre),
            "pre-wrap" => Some(WhiteSpace::PreWrap),
            "pre-line" => Some(WhiteSpace::PreLine),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            WhiteSpace::Normal => "normal",
            WhiteSpace::Nowrap => "nowrap",
            WhiteSpace::Pre => "pre",
            WhiteSpace::PreWrap => "pre-wrap",
            WhiteSpace::PreLine => "pre-line",
        }
    }

    /// Whether text content is kept verbatim instead of being collapsed.
    pub fn preserves(&self) -> bool {
        matches!(self, WhiteSpace::Pre | WhiteSpace::PreWrap)
    }
}

/// A canonical font style token. A run carries a list of these; they accumulate
/// through the cascade instead of replacing each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StyleToken {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Subscript,
    Superscript,
}

impl StyleToken {
    /// Maps a CSS shorthand keyword (`font-weight`, `font-style`, `text-decoration`,
    /// `vertical-align` values) to its token.
    pub fn from_shorthand(keyword: &str) -> Option<Self> {
        match keyword {
            "bold" | "bolder" | "600" | "700" | "800" | "900" => Some(StyleToken::Bold),
            "italic" | "oblique" => Some(StyleToken::Italic),
            "underline" => Some(StyleToken::Underline),
            "line-through" => Some(StyleToken::Strikethrough),
            "sub" => Some(StyleToken::Subscript),
            "super" => Some(StyleToken::Superscript),
            _ => None,
        }
    }
}
