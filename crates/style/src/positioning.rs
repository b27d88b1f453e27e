//! Keywords governing block placement: positioning scheme and page breaks.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
}

impl Position {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "static" => Some(Position::Static),
            "relative" => Some(Position::Relative),
            "absolute" => Some(Position::Absolute),
            "fixed" => Some(Position::Fixed),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Position::Static => "static",
            Position::Relative => "relative",
            Position::Absolute => "absolute",
            Position::Fixed => "fixed",
        }
    }
}

/// A `break-before` / `break-after` request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PageBreak {
    Auto,
    Avoid,
    Always,
    Page,
    Left,
    Right,
}

impl PageBreak {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "auto" => Some(PageBreak::Auto),
            "avoid" => Some(PageBreak::Avoid),
            "always" => Some(PageBreak::Always),
            "page" => Some(PageBreak::Page),
            "left" => Some(PageBreak::Left),
            "right" => Some(PageBreak::Right),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PageBreak::Auto => "auto",
            PageBreak::Avoid => "avoid",
            PageBreak::Always => "always",
            PageBreak::Page => "page",
            PageBreak::Left => "left",
            PageBreak::Right => "right",
        }
    }

    /// `auto` and `avoid` never start a new page: declaring a break property is not by
    /// itself a break, only the forcing keywords are.
    pub fn forces_page(&self) -> bool {
        !matches!(self, PageBreak::Auto | PageBreak::Avoid)
    }
}
