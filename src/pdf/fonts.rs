//! The base-14 fonts the PDF writer draws with, plus their advance widths.
//!
//! Widths come from the Adobe core font metrics for the printable ASCII range. Oblique
//! and italic faces reuse the upright widths. Characters outside the table fall back to
//! a typical width for the family.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Helvetica,
    Times,
    Courier,
}

impl Family {
    /// Maps a CSS-ish family name onto the closest built-in family.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim().trim_matches(['"', '\'']).to_ascii_lowercase();
        if name.contains("courier") || name.contains("mono") {
            Family::Courier
        } else if name.contains("sans") || name.contains("helvetica") || name.contains("arial")
        {
            Family::Helvetica
        } else if name.contains("times") || name.contains("serif") {
            Family::Times
        } else {
            Family::Helvetica
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BuiltinFont {
    pub family: Family,
    pub bold: bool,
    pub italic: bool,
}

impl BuiltinFont {
    pub fn new(family: Family, bold: bool, italic: bool) -> Self {
        Self {
            family,
            bold,
            italic,
        }
    }

    /// Every face, in resource-name order.
    pub fn all() -> impl Iterator<Item = BuiltinFont> {
        [Family::Helvetica, Family::Times, Family::Courier]
            .into_iter()
            .flat_map(|family| {
                [(false, false), (true, false), (false, true), (true, true)]
                    .into_iter()
                    .map(move |(bold, italic)| BuiltinFont::new(family, bold, italic))
            })
    }

    /// The name the page resources register this face under (`F1` to `F12`).
    pub fn resource_name(&self) -> String {
        let family = match self.family {
            Family::Helvetica => 0,
            Family::Times => 1,
            Family::Courier => 2,
        };
        let face = usize::from(self.bold) + 2 * usize::from(self.italic);
        format!("F{}", family * 4 + face + 1)
    }

    pub fn postscript_name(&self) -> &'static str {
        match (self.family, self.bold, self.italic) {
            (Family::Helvetica, false, false) => "Helvetica",
            (Family::Helvetica, true, false) => "Helvetica-Bold",
            (Family::Helvetica, false, true) => "Helvetica-Oblique",
            (Family::Helvetica, true, true) => "Helvetica-BoldOblique",
            (Family::Times, false, false) => "Times-Roman",
            (Family::Times, true, false) => "Times-Bold",
            (Family::Times, false, true) => "Times-Italic",
            (Family::Times, true, true) => "Times-BoldItalic",
            (Family::Courier, false, false) => "Courier",
            (Family::Courier, true, false) => "Courier-Bold",
            (Family::Courier, false, true) => "Courier-Oblique",
            (Family::Courier, true, true) => "Courier-BoldOblique",
        }
    }

    /// Advance width of `c` in thousandths of the font size.
    pub fn char_width(&self, c: char) -> u16 {
        let table = match (self.family, self.bold) {
            (Family::Courier, _) => return 600,
            (Family::Helvetica, false) => &HELVETICA,
            (Family::Helvetica, true) => &HELVETICA_BOLD,
            (Family::Times, false) => &TIMES,
            (Family::Times, true) => &TIMES_BOLD,
        };
        match c {
            ' '..='~' => table[c as usize - 32],
            '\u{a0}' => table[0],
            _ => match self.family {
                Family::Times => 500,
                _ => 556,
            },
        }
    }

    /// Width of `text` at `size` points, with `spacing` added after every character.
    pub fn text_width(&self, text: &str, size: f32, spacing: f32) -> f32 {
        let (units, count) = text.chars().fold((0u32, 0usize), |(units, count), c| {
            (units + u32::from(self.char_width(c)), count + 1)
        });
        units as f32 * size / 1000.0 + spacing * count as f32
    }
}

/// Encodes text for a WinAnsi-encoded font. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        '\t' => b' ',
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        // List markers without a WinAnsi glyph render as bullets.
        '\u{2022}' | '\u{25e6}' | '\u{25aa}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => b'?',
    }
}

#[rustfmt::skip]
static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[rustfmt::skip]
static TIMES: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541,
];

#[rustfmt::skip]
static TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 333, 333, 570, 570, 570, 500,
    930, 722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944, 722, 778,
    611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667, 333, 278, 333, 581, 500,
    333, 500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833, 556, 500,
    556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444, 394, 220, 394, 520,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_name() {
        assert_eq!(Family::from_name("Courier New"), Family::Courier);
        assert_eq!(Family::from_name("monospace"), Family::Courier);
        assert_eq!(Family::from_name("'Times New Roman'"), Family::Times);
        assert_eq!(Family::from_name("serif"), Family::Times);
        assert_eq!(Family::from_name("sans-serif"), Family::Helvetica);
        assert_eq!(Family::from_name("Comic Sans"), Family::Helvetica);
        assert_eq!(Family::from_name("unknown"), Family::Helvetica);
    }

    #[test]
    fn test_resource_names_are_unique() {
        let names: std::collections::HashSet<_> =
            BuiltinFont::all().map(|font| font.resource_name()).collect();
        assert_eq!(names.len(), 12);
        assert_eq!(
            BuiltinFont::new(Family::Helvetica, false, false).resource_name(),
            "F1"
        );
        assert_eq!(
            BuiltinFont::new(Family::Courier, true, true).resource_name(),
            "F12"
        );
    }

    #[test]
    fn test_widths() {
        let helvetica = BuiltinFont::new(Family::Helvetica, false, false);
        assert_eq!(helvetica.char_width('A'), 667);
        assert_eq!(helvetica.char_width('i'), 222);
        assert_eq!(helvetica.char_width('~'), 584);
        assert!((helvetica.text_width("AA", 10.0, 0.0) - 13.34).abs() < 0.001);
        assert!((helvetica.text_width("AA", 10.0, 1.0) - 15.34).abs() < 0.001);

        let courier = BuiltinFont::new(Family::Courier, true, false);
        assert_eq!(courier.text_width("abc", 10.0, 0.0), 18.0);

        let bold = BuiltinFont::new(Family::Times, true, false);
        assert_eq!(bold.char_width('W'), 1000);
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("a\u{e9}\u{2022}\u{20ac}"), vec![b'a', 0xe9, 0x95, 0x80]);
        assert_eq!(encode_win_ansi("\u{4e2d}"), vec![b'?']);
    }
}
