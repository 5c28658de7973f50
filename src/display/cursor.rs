//! Tracking of the controller's RAM address pointer.

use crate::command::consts::*;

/// Where the next glyph lands: a page (text row) and a pixel column within it.
///
/// Text positions are given as a row in 0..=7 and a column in 0..=15 of 8-pixel cells. The cursor
/// follows the controller in horizontal addressing mode as bytes are written: past pixel column 127
/// it wraps to column 0 of the next page, and past page 7 back to page 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    page: u8,
    x: u8,
}

impl Cursor {
    /// A cursor at text cell (`row`, `col`), clamped to the text grid.
    pub fn at(row: u8, col: u8) -> Self {
        Cursor {
            page: row.min(TEXT_ROW_MAX),
            x: col.min(TEXT_COL_MAX) * CELL_WIDTH,
        }
    }

    /// A cursor at pixel column `x` of `page`, clamped to the panel.
    pub fn at_pixel(page: u8, x: u8) -> Self {
        Cursor {
            page: page.min(PAGE_MAX),
            x: x.min(PIXEL_COL_MAX),
        }
    }

    /// The text row, which is also the RAM page.
    pub fn row(&self) -> u8 {
        self.page
    }

    /// The text cell the cursor is in.
    pub fn column(&self) -> u8 {
        self.x / CELL_WIDTH
    }

    pub fn pixel_column(&self) -> u8 {
        self.x
    }

    /// Move past `bytes` written bytes of display RAM.
    pub fn advance(&mut self, bytes: usize) {
        let cols = NUM_PIXEL_COLS as usize;
        let pos = self.page as usize * cols + self.x as usize + bytes;
        let pos = pos % (cols * NUM_PAGES as usize);
        self.page = (pos / cols) as u8;
        self.x = (pos % cols) as u8;
    }
}
