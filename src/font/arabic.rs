//! The Arabic font, in its four contextual variants.
//!
//! The tables are keyed by an ASCII transliteration: slot `c - 32` of each table holds the Arabic
//! letter that ASCII character `c` stands for (`'('` is beh, `'/'` is dal, `'H'` is waw, and so
//! on). Slots that carry no Arabic letter hold the Latin glyph for their ASCII character.
//! `shaping::Symbol::resolve` maps Unicode Arabic letters onto these slots.

use crate::font::{FontTable, NUM_GLYPHS, PLACEHOLDER};
use crate::shaping::Shape;

/// The bit of each column byte the letters' baseline sits on.
const BASELINE: u8 = 0x20;

/// Table slots that hold joining Arabic letters (hamza .. ghain, then tatweel .. yeh).
const fn is_letter_slot(slot: usize) -> bool {
    matches!(slot, 1..=26 | 32..=42)
}

/// Derive a contextual variant from the isolated forms by extending the baseline into the first
/// (`left`) and/or last (`right`) column of every letter slot.
const fn joined(
    isolated: &[[u8; 8]; NUM_GLYPHS],
    left: bool,
    right: bool,
) -> [[u8; 8]; NUM_GLYPHS] {
    let mut glyphs = *isolated;
    let mut slot = 0;
    while slot < NUM_GLYPHS {
        if is_letter_slot(slot) {
            if left {
                glyphs[slot][0] |= BASELINE;
            }
            if right {
                glyphs[slot][7] |= BASELINE;
            }
        }
        slot += 1;
    }
    glyphs
}

/// Isolated forms. Column-major, bit 0 is the top pixel.
const ISOLATED: [[u8; 8]; NUM_GLYPHS] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x20, 0x30, 0x28, 0x00, 0x00, 0x00], // '!' hamza
    [0x03, 0x01, 0x02, 0x03, 0x00, 0x3F, 0x00, 0x00], // '"' alef with madda above
    [0x00, 0x04, 0x06, 0x05, 0x00, 0x3F, 0x00, 0x00], // '#' alef with hamza above
    [0x04, 0x07, 0x45, 0x40, 0x44, 0x2A, 0x1E, 0x00], // '$' waw with hamza above
    [0x10, 0x24, 0x26, 0x25, 0x20, 0x1F, 0x00, 0x00], // '%' alef with hamza below
    [0x34, 0x67, 0x45, 0x40, 0x4C, 0x2A, 0x12, 0x00], // '&' yeh with hamza above
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x3F, 0x00, 0x00], // '\'' alef
    [0x38, 0x20, 0x20, 0x20, 0xA0, 0x20, 0x20, 0x38], // '(' beh
    [0x00, 0x00, 0x1D, 0x24, 0x25, 0x18, 0x00, 0x00], // ')' teh marbuta
    [0x38, 0x20, 0x20, 0x22, 0x20, 0x22, 0x20, 0x38], // '*' teh
    [0x18, 0x20, 0x20, 0x22, 0x21, 0x22, 0x20, 0x18], // '+' theh
    [0x00, 0x70, 0x8A, 0xAA, 0x8A, 0x44, 0x00, 0x00], // ',' jeem
    [0x00, 0x70, 0x8A, 0x8A, 0x8A, 0x44, 0x00, 0x00], // '-' hah
    [0x00, 0x70, 0x8A, 0x8A, 0x8A, 0x44, 0x01, 0x00], // '.' khah
    [0x00, 0x00, 0x20, 0x24, 0x28, 0x10, 0x00, 0x00], // '/' dal
    [0x00, 0x00, 0x20, 0x24, 0x28, 0x12, 0x00, 0x00], // '0' thal
    [0x00, 0x40, 0x40, 0x40, 0x20, 0x18, 0x00, 0x00], // '1' reh
    [0x00, 0x40, 0x40, 0x40, 0x20, 0x1A, 0x00, 0x00], // '2' zain
    [0x38, 0x40, 0x40, 0x38, 0x20, 0x38, 0x20, 0x18], // '3' seen
    [0x38, 0x40, 0x40, 0x38, 0x22, 0x39, 0x22, 0x18], // '4' sheen
    [0x38, 0x40, 0x40, 0x38, 0x30, 0x28, 0x24, 0x18], // '5' sad
    [0x38, 0x40, 0x40, 0x38, 0x32, 0x28, 0x24, 0x18], // '6' dad
    [0x00, 0x20, 0x20, 0x3F, 0x30, 0x28, 0x24, 0x18], // '7' tah
    [0x00, 0x20, 0x20, 0x3F, 0x30, 0x28, 0x25, 0x18], // '8' zah
    [0x00, 0x70, 0x88, 0x8E, 0x89, 0x8A, 0x00, 0x00], // '9' ain
    [0x00, 0x71, 0x88, 0x8E, 0x89, 0x8A, 0x00, 0x00], // ':' ghain
    [0x00, 0x00, 0xAC, 0x6C, 0x00, 0x00, 0x00, 0x00], // ';'
    [0x00, 0x08, 0x14, 0x22, 0x41, 0x00, 0x00, 0x00], // '<'
    [0x00, 0x14, 0x14, 0x14, 0x14, 0x14, 0x00, 0x00], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08, 0x00, 0x00, 0x00], // '>'
    [0x00, 0x02, 0x01, 0x51, 0x09, 0x06, 0x00, 0x00], // '?'
    [0x00, 0x00, 0x20, 0x20, 0x20, 0x20, 0x00, 0x00], // '@' tatweel
    [0x1C, 0x20, 0x20, 0x22, 0x20, 0x2C, 0x2A, 0x1C], // 'A' feh
    [0x78, 0xC2, 0x80, 0x82, 0x98, 0xD4, 0x7C, 0x00], // 'B' qaf
    [0x18, 0x20, 0x28, 0x2E, 0x2A, 0x20, 0x1F, 0x00], // 'C' kaf
    [0x00, 0x00, 0x00, 0x18, 0x20, 0x20, 0x1F, 0x00], // 'D' lam
    [0x00, 0x00, 0xF0, 0x10, 0x18, 0x14, 0x1C, 0x00], // 'E' meem
    [0x78, 0xC0, 0x80, 0x82, 0x80, 0xC0, 0x78, 0x00], // 'F' noon
    [0x00, 0x00, 0x1C, 0x24, 0x24, 0x18, 0x00, 0x00], // 'G' heh
    [0x00, 0x00, 0x40, 0xC0, 0xC4, 0x6A, 0x1E, 0x00], // 'H' waw
    [0x1C, 0x30, 0xA0, 0x20, 0xA6, 0x15, 0x09, 0x00], // 'I' alef maksura
    [0x1C, 0x30, 0xA0, 0x20, 0xA6, 0x15, 0x09, 0x00], // 'J' yeh
    [0x00, 0x7F, 0x08, 0x14, 0x22, 0x41, 0x00, 0x00], // 'K'
    [0x00, 0x7F, 0x40, 0x40, 0x40, 0x40, 0x00, 0x00], // 'L'
    [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F, 0x00, 0x00], // 'M'
    [0x00, 0x7F, 0x04, 0x08, 0x10, 0x7F, 0x00, 0x00], // 'N'
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x3E, 0x00, 0x00], // 'O'
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x06, 0x00, 0x00], // 'P'
    [0x00, 0x3E, 0x41, 0x51, 0x21, 0x5E, 0x00, 0x00], // 'Q'
    [0x00, 0x7F, 0x09, 0x19, 0x29, 0x46, 0x00, 0x00], // 'R'
    [0x00, 0x26, 0x49, 0x49, 0x49, 0x32, 0x00, 0x00], // 'S'
    [0x00, 0x01, 0x01, 0x7F, 0x01, 0x01, 0x00, 0x00], // 'T'
    [0x00, 0x3F, 0x40, 0x40, 0x40, 0x3F, 0x00, 0x00], // 'U'
    [0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F, 0x00, 0x00], // 'V'
    [0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F, 0x00, 0x00], // 'W'
    [0x00, 0x63, 0x14, 0x08, 0x14, 0x63, 0x00, 0x00], // 'X'
    [0x00, 0x03, 0x04, 0x78, 0x04, 0x03, 0x00, 0x00], // 'Y'
    [0x00, 0x61, 0x51, 0x49, 0x45, 0x43, 0x00, 0x00], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00, 0x00, 0x00, 0x00], // '['
    [0x00, 0x02, 0x04, 0x08, 0x10, 0x20, 0x00, 0x00], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00, 0x00, 0x00, 0x00], // ']'
    [0x00, 0x04, 0x02, 0x01, 0x02, 0x04, 0x00, 0x00], // '^'
    [0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00, 0x00, 0x00, 0x00], // '`'
    [0x00, 0x20, 0x54, 0x54, 0x54, 0x78, 0x00, 0x00], // 'a'
    [0x00, 0x7F, 0x48, 0x44, 0x44, 0x38, 0x00, 0x00], // 'b'
    [0x00, 0x38, 0x44, 0x44, 0x28, 0x00, 0x00, 0x00], // 'c'
    [0x00, 0x38, 0x44, 0x44, 0x48, 0x7F, 0x00, 0x00], // 'd'
    [0x00, 0x38, 0x54, 0x54, 0x54, 0x18, 0x00, 0x00], // 'e'
    [0x00, 0x08, 0x7E, 0x09, 0x02, 0x00, 0x00, 0x00], // 'f'
    [0x00, 0x18, 0xA4, 0xA4, 0xA4, 0x7C, 0x00, 0x00], // 'g'
    [0x00, 0x7F, 0x08, 0x04, 0x04, 0x78, 0x00, 0x00], // 'h'
    [0x00, 0x00, 0x7D, 0x00, 0x00, 0x00, 0x00, 0x00], // 'i'
    [0x00, 0x80, 0x84, 0x7D, 0x00, 0x00, 0x00, 0x00], // 'j'
    [0x00, 0x7F, 0x10, 0x28, 0x44, 0x00, 0x00, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00, 0x00, 0x00, 0x00], // 'l'
    [0x00, 0x7C, 0x04, 0x18, 0x04, 0x78, 0x00, 0x00], // 'm'
    [0x00, 0x7C, 0x08, 0x04, 0x7C, 0x00, 0x00, 0x00], // 'n'
    [0x00, 0x38, 0x44, 0x44, 0x38, 0x00, 0x00, 0x00], // 'o'
    [0x00, 0xFC, 0x24, 0x24, 0x18, 0x00, 0x00, 0x00], // 'p'
    [0x00, 0x18, 0x24, 0x24, 0xFC, 0x00, 0x00, 0x00], // 'q'
    [0x00, 0x00, 0x7C, 0x08, 0x04, 0x00, 0x00, 0x00], // 'r'
    [0x00, 0x48, 0x54, 0x54, 0x24, 0x00, 0x00, 0x00], // 's'
    [0x00, 0x04, 0x7F, 0x44, 0x00, 0x00, 0x00, 0x00], // 't'
    [0x00, 0x3C, 0x40, 0x40, 0x7C, 0x00, 0x00, 0x00], // 'u'
    [0x00, 0x1C, 0x20, 0x40, 0x20, 0x1C, 0x00, 0x00], // 'v'
    [0x00, 0x3C, 0x40, 0x30, 0x40, 0x3C, 0x00, 0x00], // 'w'
    [0x00, 0x44, 0x28, 0x10, 0x28, 0x44, 0x00, 0x00], // 'x'
    [0x00, 0x1C, 0xA0, 0xA0, 0x7C, 0x00, 0x00, 0x00], // 'y'
    [0x00, 0x44, 0x64, 0x54, 0x4C, 0x44, 0x00, 0x00], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00, 0x00, 0x00, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00, 0x00, 0x00, 0x00], // '}'
    [0x00, 0x02, 0x01, 0x01, 0x02, 0x01, 0x00, 0x00], // '~'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // DEL
];

// Screen order is left to right, so a letter joins the one that follows it in reading order
// through its first column, and the one that precedes it through its last column.
const STARTING: [[u8; 8]; NUM_GLYPHS] = joined(&ISOLATED, true, false);
const MEDIAL: [[u8; 8]; NUM_GLYPHS] = joined(&ISOLATED, true, true);
const ENDING: [[u8; 8]; NUM_GLYPHS] = joined(&ISOLATED, false, true);

/// The four variant tables used to render shaped Arabic text, and the placeholder drawn for
/// characters none of them hold. All five share the glyph width `W`.
#[derive(Clone, Copy, Debug)]
pub struct ArabicFonts<const W: usize = 8> {
    pub isolated: FontTable<W>,
    pub starting: FontTable<W>,
    pub medial: FontTable<W>,
    pub ending: FontTable<W>,
    pub placeholder: &'static [u8; W],
}

impl<const W: usize> ArabicFonts<W> {
    pub const fn new(
        isolated: &'static [[u8; W]; NUM_GLYPHS],
        starting: &'static [[u8; W]; NUM_GLYPHS],
        medial: &'static [[u8; W]; NUM_GLYPHS],
        ending: &'static [[u8; W]; NUM_GLYPHS],
        placeholder: &'static [u8; W],
    ) -> Self {
        ArabicFonts {
            isolated: FontTable::new(isolated),
            starting: FontTable::new(starting),
            medial: FontTable::new(medial),
            ending: FontTable::new(ending),
            placeholder,
        }
    }

    /// The table holding glyphs of the given shape.
    pub fn table(&self, shape: Shape) -> &FontTable<W> {
        match shape {
            Shape::Separate => &self.isolated,
            Shape::Starting => &self.starting,
            Shape::Medial => &self.medial,
            Shape::Ending => &self.ending,
        }
    }
}

/// The built-in Arabic tables.
pub static ARABIC: ArabicFonts =
    ArabicFonts::new(&ISOLATED, &STARTING, &MEDIAL, &ENDING, &PLACEHOLDER);
