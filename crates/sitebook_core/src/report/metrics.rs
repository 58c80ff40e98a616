//! Standard Type1 font selection and advance widths.
//!
//! Text is encoded as WinAnsi (PDF `/WinAnsiEncoding`). Widths are the
//! Adobe Helvetica / Helvetica-Bold AFM values for every WinAnsi glyph, in
//! 1/1000 em. Characters without a WinAnsi code are drawn as `?`.

/// Base-14 fonts used by reports. Never embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Regular, Font::Bold];

    /// Page resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Self::Regular => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    fn high_widths(self) -> &'static [u16; 128] {
        match self {
            Self::Regular => &HELVETICA_HIGH_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_HIGH_WIDTHS,
        }
    }

    /// Width in 1/1000 em of the glyph at WinAnsi `code`.
    fn units(self, code: u8) -> u16 {
        match code {
            32..=126 => self.widths()[usize::from(code - 32)],
            128..=255 => self.high_widths()[usize::from(code - 128)],
            _ => FALLBACK_WIDTH,
        }
    }
}

const FALLBACK_WIDTH: u16 = 556;
const REPLACEMENT: u8 = b'?';

/// Maps a character to its WinAnsi byte.
///
/// Tabs become spaces; anything WinAnsi cannot express becomes `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    match u32::from(ch) {
        0x09 => b' ',
        code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => REPLACEMENT,
    }
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

// WinAnsi 0x80..=0xFF. Unassigned slots (0x81, 0x8D, 0x8F, 0x90, 0x9D)
// carry the bullet width; `win_ansi_byte` never produces them.
#[rustfmt::skip]
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    // 0x80
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 0x90
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Advance width of one character in points, as drawn after WinAnsi mapping.
pub fn char_width(ch: char, font: Font, size: f32) -> f32 {
    f32::from(font.units(win_ansi_byte(ch))) * size / 1000.0
}

/// Advance width of a string in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    text.chars().map(|ch| char_width(ch, font, size)).sum()
}

#[cfg(test)]
mod tests {
    use super::{char_width, text_width, win_ansi_byte, Font};

    #[test]
    fn width_tables_cover_known_glyphs() {
        assert_eq!(char_width(' ', Font::Regular, 1000.0), 278.0);
        assert_eq!(char_width('W', Font::Regular, 1000.0), 944.0);
        assert_eq!(char_width('~', Font::Bold, 1000.0), 584.0);
        assert_eq!(char_width('m', Font::Bold, 1000.0), 889.0);
    }

    #[test]
    fn text_width_scales_with_size() {
        let small = text_width("Foundation", Font::Regular, 10.0);
        let large = text_width("Foundation", Font::Regular, 20.0);
        assert!((large - small * 2.0).abs() < 0.001);
    }

    #[test]
    fn win_ansi_covers_typographic_punctuation() {
        assert_eq!(win_ansi_byte('\u{2019}'), 0x92);
        assert_eq!(win_ansi_byte('\u{2013}'), 0x96);
        assert_eq!(win_ansi_byte('\u{2014}'), 0x97);
        assert_eq!(win_ansi_byte('\u{20AC}'), 0x80);
        assert_eq!(win_ansi_byte('\u{2022}'), 0x95);
        assert_eq!(win_ansi_byte('\u{2026}'), 0x85);
        assert_eq!(win_ansi_byte('\u{e9}'), 0xE9);
        assert_eq!(win_ansi_byte('\t'), b' ');
        assert_eq!(win_ansi_byte('\u{2603}'), b'?');
        assert_eq!(win_ansi_byte('\u{81}'), b'?');
    }

    #[test]
    fn non_ascii_glyphs_use_their_own_widths() {
        assert_eq!(char_width('\u{2014}', Font::Regular, 1000.0), 1000.0);
        assert_eq!(char_width('\u{2019}', Font::Regular, 1000.0), 222.0);
        assert_eq!(char_width('\u{2022}', Font::Bold, 1000.0), 350.0);
        assert_eq!(char_width('\u{c6}', Font::Regular, 1000.0), 1000.0);
        assert_eq!(char_width('\u{e9}', Font::Bold, 1000.0), 556.0);
        assert_eq!(char_width('\u{fc}', Font::Bold, 1000.0), 611.0);
        assert_eq!(char_width('\u{ed}', Font::Regular, 1000.0), 278.0);
        assert_eq!(
            char_width('\u{2603}', Font::Regular, 1000.0),
            char_width('?', Font::Regular, 1000.0)
        );
    }
}
