use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque RGB color.
///
/// The canonical textual form is six lowercase hex digits without a leading `#`
/// (e.g. `ffbb11`), which is what `Display` and serialization produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn gray(value: u8) -> Self {
        Self { r: value, g: value, b: value }
    }

    /// Parse a hex color string (`#RGB`, `#RRGGBB`, or the same without `#`).
    pub fn parse_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: {}", s));
        }

        let component = |digits: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid color component: {}", e))
        };

        match hex.len() {
            3 => Ok(Color {
                r: component(&hex[0..1].repeat(2))?,
                g: component(&hex[1..2].repeat(2))?,
                b: component(&hex[2..3].repeat(2))?,
            }),
            6 => Ok(Color {
                r: component(&hex[0..2])?,
                g: component(&hex[2..4])?,
                b: component(&hex[4..6])?,
            }),
            _ => Err(format!("Invalid hex color length: expected 3 or 6, got {}", hex.len())),
        }
    }

    /// The canonical hex form, e.g. `"ffbb11"`.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Components scaled to `0.0..=1.0`, as PDF color operators expect them.
    pub fn to_unit_rgb(&self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map { r: u8, g: u8, b: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::parse_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b } => Ok(Color { r, g, b }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Color::parse_hex("#ffbb11").unwrap(), Color::rgb(255, 187, 17));
        assert_eq!(Color::parse_hex("ffbb11").unwrap(), Color::rgb(255, 187, 17));
        assert_eq!(Color::parse_hex("#F00").unwrap(), Color::rgb(255, 0, 0));
        assert!(Color::parse_hex("#12345").is_err());
        assert!(Color::parse_hex("zzzzzz").is_err());
    }

    #[test]
    fn test_canonical_hex_display() {
        assert_eq!(Color::rgb(255, 187, 17).to_hex(), "ffbb11");
        assert_eq!(Color::BLACK.to_string(), "000000");
    }
}
