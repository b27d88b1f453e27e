//! Page geometry used by the render configuration.
use crate::parsers::{StyleParseError, parse_shorthand_margins};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Page margins in points.
///
/// Deserializes from a number (all sides), a CSS shorthand string (`"36pt 48pt"`) or a
/// map of sides, where missing sides are 0.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margins {
    /// Half an inch on every side.
    fn default() -> Self {
        Margins::all(36.0)
    }
}

impl Margins {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl<'de> Deserialize<'de> for Margins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum MarginsDef {
            Uniform(f32),
            Shorthand(String),
            Sides {
                #[serde(default)]
                top: f32,
                #[serde(default)]
                right: f32,
                #[serde(default)]
                bottom: f32,
                #[serde(default)]
                left: f32,
            },
        }

        match MarginsDef::deserialize(deserializer)? {
            MarginsDef::Uniform(value) => Ok(Margins::all(value)),
            MarginsDef::Shorthand(value) => {
                parse_shorthand_margins(&value).map_err(de::Error::custom)
            }
            MarginsDef::Sides {
                top,
                right,
                bottom,
                left,
            } => Ok(Margins {
                top,
                right,
                bottom,
                left,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Width and height in points, portrait.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }

    pub fn name(&self) -> Option<&'static str> {
        match self {
            PageSize::A4 => Some("A4"),
            PageSize::Letter => Some("Letter"),
            PageSize::Legal => Some("Legal"),
            PageSize::Custom { .. } => None,
        }
    }

    /// Looks up a named size, ignoring case.
    pub fn from_name(s: &str) -> Result<Self, StyleParseError> {
        [PageSize::A4, PageSize::Letter, PageSize::Legal]
            .into_iter()
            .find(|size| size.name().is_some_and(|name| name.eq_ignore_ascii_case(s.trim())))
            .ok_or_else(|| StyleParseError::InvalidValue {
                property: "page-size".to_string(),
                value: s.to_string(),
            })
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PageSizeDef {
    Named(String),
    Custom { width: f32, height: f32 },
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let def = match (self.name(), *self) {
            (Some(name), _) => PageSizeDef::Named(name.to_string()),
            (None, size) => {
                let (width, height) = size.dimensions_pt();
                PageSizeDef::Custom { width, height }
            }
        };
        def.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Named(name) => Self::from_name(&name).map_err(de::Error::custom),
            PageSizeDef::Custom { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_names() {
        assert_eq!(PageSize::from_name("letter").unwrap(), PageSize::Letter);
        assert_eq!(PageSize::from_name(" A4 ").unwrap().dimensions_pt(), (595.28, 841.89));
        assert!(PageSize::from_name("tabloid").is_err());
    }

    #[test]
    fn test_margins_extents() {
        let margins = Margins { top: 1.0, right: 2.0, bottom: 3.0, left: 4.0 };
        assert_eq!(margins.horizontal(), 6.0);
        assert_eq!(margins.vertical(), 4.0);
    }
}
