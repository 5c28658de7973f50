//! Driver library for the Solomon Systech SSD1308 dot matrix OLED display driver, with contextual
//! shaping of right-to-left Arabic text onto its 8x16 character grid.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate embedded_hal as hal;

// This has to be here in order to be usable by mods declared afterwards.
#[cfg(test)]
#[macro_use]
mod testing {
    macro_rules! send {
        ([$($d:tt),*]) => {Sent::Data(vec![$($d,)*])};
        ($c:tt) => {Sent::Cmd($c)};
    }
    macro_rules! sends {
        ($($e:tt),*) => {&[$(send!($e),)*]};
    }
}

pub mod command;
pub mod config;
pub mod display;
pub mod font;
pub mod interface;
pub mod raster;
pub mod shaping;

// Re-exports for primary API.
pub use crate::command::{
    consts, ComLayout, ComScanDirection, ScrollDirection, ScrollInterval, SegmentRemap,
};
pub use crate::config::Config;
pub use crate::display::{Cursor, Display};
pub use crate::font::{ArabicFonts, FontTable, ARABIC, LATIN};
pub use crate::interface::i2c::I2cInterface;
pub use crate::interface::spi::SpiInterface;
pub use crate::raster::FrameBuffer;
pub use crate::shaping::{shape, Shape, ShapedGlyph};
