//! The main API to the display driver. It owns the bus interface and the text cursor, and offers
//! methods to configure the panel and to write Latin text, shaped Arabic text, glyphs, raw column
//! bytes and whole frames into display RAM.

pub mod cursor;

use core::fmt;

use itertools::iproduct;
use log::{debug, info, trace};

use crate::command::consts::*;
use crate::command::*;
use crate::config::{Config, PersistentConfig};
use crate::font::{ArabicFonts, ARABIC, BLANK, LATIN};
use crate::interface;
use crate::raster::FrameBuffer;
use crate::shaping::{self, Symbol};

pub use self::cursor::Cursor;

/// A driver for an SSD1308 display with a 128x64 panel.
pub struct Display<DI>
where
    DI: interface::DisplayInterface,
{
    iface: DI,
    cursor: Cursor,
    flipped: bool,
    persistent_config: PersistentConfig,
}

impl<DI> Display<DI>
where
    DI: interface::DisplayInterface,
{
    /// Construct a new display driver for a display connected to the interface `iface`. Nothing
    /// is sent until `init`.
    pub fn new(iface: DI) -> Self {
        Display {
            iface,
            cursor: Cursor::default(),
            flipped: false,
            persistent_config: Config::default().persistent_config,
        }
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }

    /// Initialize the display with a config message, then clear it.
    pub fn init(&mut self, config: Config) -> Result<(), DI::Error> {
        self.sleep(true)?;
        Command::SetAddressingMode(AddressingMode::Horizontal).send(&mut self.iface)?;
        config.send(&mut self.iface)?;
        self.persistent_config = config.persistent_config;
        self.flipped = false;
        self.persistent_config.send(&mut self.iface, self.flipped)?;
        self.sleep(false)?;
        Command::SetDisplayMode(DisplayMode::Normal).send(&mut self.iface)?;
        self.clear()?;
        info!("display initialized");
        Ok(())
    }

    /// Control sleep mode. The panel goes dark while asleep but keeps its RAM.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), DI::Error> {
        Command::SetSleepMode(enabled).send(&mut self.iface)
    }

    pub fn turn_on(&mut self) -> Result<(), DI::Error> {
        self.sleep(false)
    }

    pub fn turn_off(&mut self) -> Result<(), DI::Error> {
        self.sleep(true)
    }

    /// White pixels on black.
    pub fn normal(&mut self) -> Result<(), DI::Error> {
        Command::SetDisplayMode(DisplayMode::Normal).send(&mut self.iface)
    }

    /// Black pixels on white.
    pub fn invert(&mut self) -> Result<(), DI::Error> {
        Command::SetDisplayMode(DisplayMode::Inverse).send(&mut self.iface)
    }

    /// Turn the image upside down, or back again. Display RAM is not touched, so text written
    /// before flipping reappears rotated by 180 degrees.
    pub fn flip(&mut self) -> Result<(), DI::Error> {
        self.flipped = !self.flipped;
        self.sleep(true)?;
        self.persistent_config.send(&mut self.iface, self.flipped)?;
        self.sleep(false)
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Control the contrast.
    pub fn brightness(&mut self, brightness: u8) -> Result<(), DI::Error> {
        Command::SetContrast(brightness).send(&mut self.iface)
    }

    /// Blank every cell of the text grid and return the cursor to the top left.
    pub fn clear(&mut self) -> Result<(), DI::Error> {
        self.sleep(true)?;
        for (row, col) in iproduct!(0..NUM_TEXT_ROWS, 0..NUM_TEXT_COLS) {
            if col == 0 {
                self.set_cursor(row, 0)?;
            }
            self.write_glyph(&BLANK)?;
        }
        self.sleep(false)?;
        self.set_cursor(0, 0)
    }

    /// Blank `n` cells starting at the cursor.
    pub fn clear_range(&mut self, n: usize) -> Result<(), DI::Error> {
        for _ in 0..n {
            self.write_glyph(&BLANK)?;
        }
        Ok(())
    }

    /// Move the cursor to text cell (`row`, `col`), clamped to rows 0-7 and columns 0-15.
    ///
    /// The RAM pointer is set with the page addressing mode's page-start and column-start nibble
    /// commands although `init` selects horizontal addressing. This is the pairing the Grove OLED
    /// driver uses with this panel; the column and page ranges are never narrowed, so writes from
    /// the new position wrap across the whole panel.
    pub fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DI::Error> {
        self.move_to(Cursor::at(row, col))
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn move_to(&mut self, cursor: Cursor) -> Result<(), DI::Error> {
        trace!("cursor to page {} column {}", cursor.row(), cursor.pixel_column());
        self.cursor = cursor;
        Command::SetPageStart(cursor.row()).send(&mut self.iface)?;
        Command::SetColumnStart(cursor.pixel_column()).send(&mut self.iface)
    }

    /// Write column bytes at the cursor and advance past them.
    pub fn write_glyph(&mut self, glyph: &[u8]) -> Result<(), DI::Error> {
        if glyph.is_empty() {
            return Ok(());
        }
        self.iface.send_data(glyph)?;
        self.cursor.advance(glyph.len());
        Ok(())
    }

    /// Write Latin text left to right from the cursor. Characters outside 32..=127 have no glyph;
    /// they are skipped without moving the cursor.
    pub fn write_latin(&mut self, s: &str) -> Result<(), DI::Error> {
        for c in s.chars() {
            match LATIN.glyph(c) {
                Some(glyph) => self.write_glyph(glyph)?,
                None => debug!("skipping unprintable character {:?}", c),
            }
        }
        Ok(())
    }

    /// Write Arabic text with the built-in font. See `write_arabic_with`.
    pub fn write_arabic(&mut self, s: &str) -> Result<(), DI::Error> {
        self.write_arabic_with(s, &ARABIC)
    }

    /// Shape `s` and write it from the cursor. The last character of `s` is written first, so the
    /// text reads right to left while the cursor moves left to right; position the cursor at the
    /// left end of where the text should go. Characters without a glyph are drawn as a placeholder
    /// box.
    pub fn write_arabic_with<const W: usize>(
        &mut self,
        s: &str,
        fonts: &ArabicFonts<W>,
    ) -> Result<(), DI::Error> {
        for shaped in shaping::shape(s, fonts) {
            if let Symbol::Unmapped(c) = shaped.symbol {
                debug!("no glyph for {:?}, drawing placeholder", c);
            }
            self.write_glyph(shaped.glyph)?;
        }
        Ok(())
    }

    /// Write one raw column byte at pixel column `x` of `page`, both clamped to the panel.
    pub fn write_pattern(&mut self, x: u8, page: u8, pattern: u8) -> Result<(), DI::Error> {
        self.move_to(Cursor::at_pixel(page, x))?;
        self.write_glyph(&[pattern])
    }

    /// Write a whole frame. The cursor ends where it starts, at the top left.
    pub fn draw_frame(&mut self, frame: &FrameBuffer) -> Result<(), DI::Error> {
        self.set_cursor(0, 0)?;
        for page in 0..NUM_PAGES {
            self.write_glyph(frame.page(page))?;
        }
        Ok(())
    }

    /// Scroll pages `start_page` to `end_page` horizontally until `stop_scroll`.
    pub fn scroll(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
    ) -> Result<(), DI::Error> {
        Command::DeactivateScroll.send(&mut self.iface)?;
        Command::SetupHorizontalScroll(direction, start_page, end_page, interval)
            .send(&mut self.iface)?;
        Command::ActivateScroll.send(&mut self.iface)
    }

    /// Scroll pages `start_page` to `end_page` horizontally while the whole panel scrolls up by
    /// `vertical_offset` rows per step, until `stop_scroll`.
    pub fn scroll_diagonal(
        &mut self,
        direction: ScrollDirection,
        start_page: u8,
        end_page: u8,
        interval: ScrollInterval,
        vertical_offset: u8,
    ) -> Result<(), DI::Error> {
        Command::DeactivateScroll.send(&mut self.iface)?;
        Command::SetVerticalScrollArea(0, NUM_PIXEL_ROWS).send(&mut self.iface)?;
        Command::SetupDiagonalScroll(direction, start_page, end_page, interval, vertical_offset)
            .send(&mut self.iface)?;
        Command::ActivateScroll.send(&mut self.iface)
    }

    pub fn stop_scroll(&mut self) -> Result<(), DI::Error> {
        Command::DeactivateScroll.send(&mut self.iface)
    }

    /// Send a raw command byte. The cursor is not updated, so commands that move the RAM pointer
    /// leave it out of step until the next `set_cursor`.
    pub fn command(&mut self, cmd: u8) -> Result<(), DI::Error> {
        self.iface.send_command(cmd)
    }

    /// Send a raw data byte at the cursor.
    pub fn data(&mut self, byte: u8) -> Result<(), DI::Error> {
        self.write_glyph(&[byte])
    }
}

impl<DI> fmt::Write for Display<DI>
where
    DI: interface::DisplayInterface,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_latin(s).map_err(|_| fmt::Error)
    }
}
