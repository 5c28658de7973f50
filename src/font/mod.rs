//! Static glyph tables.
//!
//! A glyph is a run of column bytes, left to right, where bit 0 of each byte is the top-most pixel
//! of an 8-pixel strip. This is the layout the controller expects in its display RAM, so glyphs
//! are written to the bus unmodified. Every table holds exactly `NUM_GLYPHS` glyphs covering
//! codepoints 32..=127, indexed by `codepoint - 32`.

pub mod arabic;
pub mod latin;

pub use self::arabic::{ArabicFonts, ARABIC};
pub use self::latin::LATIN;

/// Number of glyphs in every font table.
pub const NUM_GLYPHS: usize = 96;

/// The first codepoint covered by a font table.
pub const FIRST_CODEPOINT: u32 = 32;

/// Drawn in place of characters no table can represent: a filled box with a one-pixel margin.
pub const PLACEHOLDER: [u8; 8] = placeholder();

/// The placeholder box at width `W`, for tables wider than the built-in ones.
pub const fn placeholder<const W: usize>() -> [u8; W] {
    let mut glyph = [0x7E; W];
    if W > 0 {
        glyph[0] = 0x00;
        glyph[W - 1] = 0x00;
    }
    glyph
}

/// An empty character cell.
pub const BLANK: [u8; 8] = [0x00; 8];

/// A table of `NUM_GLYPHS` glyphs, each `W` columns wide. The built-in tables are 8 columns wide;
/// wider tables (12 or 16 columns) can be supplied for taller-looking Arabic forms.
#[derive(Clone, Copy, Debug)]
pub struct FontTable<const W: usize = 8> {
    glyphs: &'static [[u8; W]; NUM_GLYPHS],
}

impl<const W: usize> FontTable<W> {
    /// Wrap a static glyph array.
    pub const fn new(glyphs: &'static [[u8; W]; NUM_GLYPHS]) -> Self {
        Self { glyphs }
    }

    /// Width of every glyph in this table, in columns.
    pub const fn width(&self) -> usize {
        W
    }

    /// Look up a glyph by table index.
    pub fn get(&self, index: usize) -> Option<&'static [u8]> {
        let glyphs: &'static [[u8; W]; NUM_GLYPHS] = self.glyphs;
        glyphs.get(index).map(|g| &g[..])
    }

    /// Look up the glyph for a character, or `None` if it lies outside 32..=127.
    pub fn glyph(&self, c: char) -> Option<&'static [u8]> {
        (c as u32)
            .checked_sub(FIRST_CODEPOINT)
            .and_then(|index| self.get(index as usize))
    }
}
