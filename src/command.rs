//! The command set for the SSD1308.
//!
//! Note 1: The display RAM of the SSD1308 is arranged in 8 pages of 128 columns, where each column
//! of a page is one byte driving 8 vertically adjacent pixels, with bit 0 at the top. Anywhere there
//! is a "page" address, it refers to one such horizontal band of 8 pixel rows.
//!
//! Unlike controllers that take command arguments on the data channel, every byte of an SSD1308
//! command, arguments included, is sent as a command byte. Arguments are masked to the width of
//! their register field rather than rejected.

use crate::interface::DisplayInterface;

pub mod consts {
    //! Geometry of the panel and of the text grid laid over it.

    pub const NUM_PIXEL_COLS: u8 = 128;
    pub const NUM_PIXEL_ROWS: u8 = 64;
    pub const NUM_PAGES: u8 = NUM_PIXEL_ROWS / 8;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;

    /// Width of one text cell in pixel columns.
    pub const CELL_WIDTH: u8 = 8;
    pub const NUM_TEXT_ROWS: u8 = NUM_PAGES;
    pub const NUM_TEXT_COLS: u8 = NUM_PIXEL_COLS / CELL_WIDTH;
    pub const TEXT_ROW_MAX: u8 = NUM_TEXT_ROWS - 1;
    pub const TEXT_COL_MAX: u8 = NUM_TEXT_COLS - 1;
}

use self::consts::*;

/// How the RAM address pointer moves as display data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    /// The column address increments after each byte; past the end column it wraps to the start
    /// column of the next page, and past the end page back to the start page.
    Horizontal,
    /// The page address increments after each byte; past the end page it wraps to the start page
    /// of the next column.
    Vertical,
    /// The column address increments within the current page and wraps to column 0 of the same
    /// page.
    Page,
}

/// Setting of segment (column) remapping. Changing this setting mirrors the image horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentRemap {
    /// Column address 0 maps to SEG0.
    Normal,
    /// Column address 127 maps to SEG0.
    Reversed,
}

impl SegmentRemap {
    pub fn flipped(self) -> Self {
        match self {
            SegmentRemap::Normal => SegmentRemap::Reversed,
            SegmentRemap::Reversed => SegmentRemap::Normal,
        }
    }
}

/// Setting of the COM line scanning of rows. Changing this setting will flip the image vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComScanDirection {
    /// COM lines scan from COM0 to COM[N-1].
    Increment,
    /// COM lines scan from COM[N-1] to COM0.
    Decrement,
}

impl ComScanDirection {
    pub fn flipped(self) -> Self {
        match self {
            ComScanDirection::Increment => ComScanDirection::Decrement,
            ComScanDirection::Decrement => ComScanDirection::Increment,
        }
    }
}

/// Setting the layout of the COM lines to the display rows. This setting is dictated by how the
/// display module itself wires the OLED matrix to the driver chip. See the display module datasheet
/// for the correct value to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComLayout {
    /// COM lines are connected to display rows in sequence.
    Sequential,
    /// COM lines alternate between the left and right sides of the panel.
    Alternative,
}

/// Setting of the display mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Pixels show the display RAM, a set bit lights the pixel.
    Normal,
    /// Pixels show the display RAM inverted, a set bit darkens the pixel.
    Inverse,
}

/// The direction content moves during horizontal scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Right,
    Left,
}

/// Time between scroll steps, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollInterval {
    Frames2,
    Frames3,
    Frames4,
    Frames5,
    Frames25,
    Frames64,
    Frames128,
    Frames256,
}

impl ScrollInterval {
    fn bits(self) -> u8 {
        match self {
            ScrollInterval::Frames5 => 0b000,
            ScrollInterval::Frames64 => 0b001,
            ScrollInterval::Frames128 => 0b010,
            ScrollInterval::Frames256 => 0b011,
            ScrollInterval::Frames3 => 0b100,
            ScrollInterval::Frames4 => 0b101,
            ScrollInterval::Frames25 => 0b110,
            ScrollInterval::Frames2 => 0b111,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Set the contrast (segment output current). Range 0-255.
    SetContrast(u8),
    /// Light every pixel regardless of the display RAM when `true`; show the RAM when `false`.
    SetEntireDisplayOn(bool),
    /// Set the display operating mode. See enum for details.
    SetDisplayMode(DisplayMode),
    /// Control sleep mode. The panel is dark while asleep; display RAM is retained.
    SetSleepMode(bool),
    /// Set how the RAM address pointer advances. See enum for details.
    SetAddressingMode(AddressingMode),
    /// Set the column start and end address for horizontal and vertical addressing modes. Range
    /// is 0-127.
    SetColumnAddress(u8, u8),
    /// Set the page start and end address for horizontal and vertical addressing modes. Range is
    /// 0-7.
    SetPageAddress(u8, u8),
    /// Set the page of the RAM address pointer. Range is 0-7.
    SetPageStart(u8),
    /// Set the column of the RAM address pointer, sent as its low and high nibbles. Range is 0-127.
    SetColumnStart(u8),
    /// Set the display RAM row shown on the first display row. Range is 0-63.
    SetStartLine(u8),
    /// Set segment remapping. See enum for details.
    SetSegmentRemap(SegmentRemap),
    /// Set the MUX ratio, the number of active COM lines. Range 16-64.
    SetMuxRatio(u8),
    /// Set the COM line scan direction. See enum for details.
    SetComScanDirection(ComScanDirection),
    /// Shift the mapping of COM lines to display rows upwards. Range is 0-63.
    SetDisplayOffset(u8),
    /// Set the COM pin layout and whether left and right halves are swapped.
    SetComPins(ComLayout, bool),
    /// Set the display clock divide ratio (1-16) and oscillator frequency setting (0-15).
    SetClockDivide(u8, u8),
    /// Set the pre-charge phase 1 and phase 2 periods, each 1-15 DCLKs.
    SetPrechargePeriod(u8, u8),
    /// Set the VCOMH deselect level. Range 0-7.
    SetVcomhDeselect(u8),
    /// Enable or disable the internal charge pump.
    SetChargePump(bool),
    /// Configure continuous horizontal scrolling of pages `start` to `end`.
    SetupHorizontalScroll(ScrollDirection, u8, u8, ScrollInterval),
    /// Configure continuous horizontal scrolling of pages `start` to `end` combined with vertical
    /// scrolling by `offset` rows (0-63) per step.
    SetupDiagonalScroll(ScrollDirection, u8, u8, ScrollInterval, u8),
    /// Set the vertical scroll area: `fixed` rows at the top stay put, the next `rows` rows scroll.
    SetVerticalScrollArea(u8, u8),
    /// Start scrolling as last configured.
    ActivateScroll,
    /// Stop scrolling. Display RAM must be rewritten after scrolling stops.
    DeactivateScroll,
}

macro_rules! command_bytes {
    ($buf:ident, [$($byte:expr),*]) => {{
        let bytes = [$($byte),*];
        $buf[..bytes.len()].copy_from_slice(&bytes);
        bytes.len()
    }};
}

impl Command {
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), DI::Error>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; 7];
        let len = match self {
            Command::SetContrast(contrast) => command_bytes!(buf, [0x81, contrast]),
            Command::SetEntireDisplayOn(on) => command_bytes!(buf, [0xA4 | on as u8]),
            Command::SetDisplayMode(mode) => command_bytes!(
                buf,
                [match mode {
                    DisplayMode::Normal => 0xA6,
                    DisplayMode::Inverse => 0xA7,
                }]
            ),
            Command::SetSleepMode(ena) => command_bytes!(
                buf,
                [match ena {
                    true => 0xAE,
                    false => 0xAF,
                }]
            ),
            Command::SetAddressingMode(mode) => {
                let m = match mode {
                    AddressingMode::Horizontal => 0x00,
                    AddressingMode::Vertical => 0x01,
                    AddressingMode::Page => 0x02,
                };
                command_bytes!(buf, [0x20, m])
            }
            Command::SetColumnAddress(start, end) => command_bytes!(
                buf,
                [0x21, start.min(PIXEL_COL_MAX), end.min(PIXEL_COL_MAX)]
            ),
            Command::SetPageAddress(start, end) => {
                command_bytes!(buf, [0x22, start.min(PAGE_MAX), end.min(PAGE_MAX)])
            }
            Command::SetPageStart(page) => command_bytes!(buf, [0xB0 | page.min(PAGE_MAX)]),
            Command::SetColumnStart(col) => {
                let col = col.min(PIXEL_COL_MAX);
                command_bytes!(buf, [col & 0x0F, 0x10 | (col >> 4)])
            }
            Command::SetStartLine(line) => command_bytes!(buf, [0x40 | (line & 0x3F)]),
            Command::SetSegmentRemap(remap) => command_bytes!(
                buf,
                [match remap {
                    SegmentRemap::Normal => 0xA0,
                    SegmentRemap::Reversed => 0xA1,
                }]
            ),
            Command::SetMuxRatio(ratio) => {
                let ratio = ratio.max(16).min(NUM_PIXEL_ROWS);
                command_bytes!(buf, [0xA8, ratio - 1])
            }
            Command::SetComScanDirection(dir) => command_bytes!(
                buf,
                [match dir {
                    ComScanDirection::Increment => 0xC0,
                    ComScanDirection::Decrement => 0xC8,
                }]
            ),
            Command::SetDisplayOffset(offset) => command_bytes!(buf, [0xD3, offset & 0x3F]),
            Command::SetComPins(layout, left_right_remap) => {
                let alt = match layout {
                    ComLayout::Sequential => 0x00,
                    ComLayout::Alternative => 0x10,
                };
                let lr = match left_right_remap {
                    true => 0x20,
                    false => 0x00,
                };
                command_bytes!(buf, [0xDA, 0x02 | alt | lr])
            }
            Command::SetClockDivide(divide, fosc) => {
                let d = divide.max(1).min(16) - 1;
                command_bytes!(buf, [0xD5, (fosc & 0x0F) << 4 | d])
            }
            Command::SetPrechargePeriod(phase_1, phase_2) => {
                let p1 = phase_1.max(1).min(15);
                let p2 = phase_2.max(1).min(15);
                command_bytes!(buf, [0xD9, p2 << 4 | p1])
            }
            Command::SetVcomhDeselect(level) => command_bytes!(buf, [0xDB, (level & 0x07) << 4]),
            Command::SetChargePump(ena) => command_bytes!(
                buf,
                [
                    0x8D,
                    match ena {
                        true => 0x14,
                        false => 0x10,
                    }
                ]
            ),
            Command::SetupHorizontalScroll(dir, start, end, interval) => {
                let c = match dir {
                    ScrollDirection::Right => 0x26,
                    ScrollDirection::Left => 0x27,
                };
                command_bytes!(
                    buf,
                    [
                        c,
                        0x00,
                        start.min(PAGE_MAX),
                        interval.bits(),
                        end.min(PAGE_MAX),
                        0x00,
                        0xFF
                    ]
                )
            }
            Command::SetupDiagonalScroll(dir, start, end, interval, offset) => {
                let c = match dir {
                    ScrollDirection::Right => 0x29,
                    ScrollDirection::Left => 0x2A,
                };
                command_bytes!(
                    buf,
                    [
                        c,
                        0x00,
                        start.min(PAGE_MAX),
                        interval.bits(),
                        end.min(PAGE_MAX),
                        offset & 0x3F
                    ]
                )
            }
            Command::SetVerticalScrollArea(fixed, rows) => command_bytes!(
                buf,
                [0xA3, fixed.min(NUM_PIXEL_ROWS), rows.min(NUM_PIXEL_ROWS)]
            ),
            Command::ActivateScroll => command_bytes!(buf, [0x2F]),
            Command::DeactivateScroll => command_bytes!(buf, [0x2E]),
        };
        for byte in &buf[..len] {
            iface.send_command(*byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    fn sent(cmd: Command) -> std::vec::Vec<u8> {
        let di = TestSpyInterface::new();
        cmd.send(&mut di.split()).unwrap();
        assert!(di.data().is_empty());
        di.commands()
    }

    #[test]
    fn arguments_travel_as_commands() {
        let di = TestSpyInterface::new();
        Command::SetContrast(0xCF).send(&mut di.split()).unwrap();
        di.check_multi(sends!(0x81, 0xCF));
    }

    #[test]
    fn set_contrast() {
        assert_eq!(sent(Command::SetContrast(0)), [0x81, 0]);
        assert_eq!(sent(Command::SetContrast(255)), [0x81, 255]);
    }

    #[test]
    fn entire_display_on() {
        assert_eq!(sent(Command::SetEntireDisplayOn(true)), [0xA5]);
        assert_eq!(sent(Command::SetEntireDisplayOn(false)), [0xA4]);
    }

    #[test]
    fn set_display_mode() {
        assert_eq!(sent(Command::SetDisplayMode(DisplayMode::Normal)), [0xA6]);
        assert_eq!(sent(Command::SetDisplayMode(DisplayMode::Inverse)), [0xA7]);
    }

    #[test]
    fn sleep_mode() {
        assert_eq!(sent(Command::SetSleepMode(true)), [0xAE]);
        assert_eq!(sent(Command::SetSleepMode(false)), [0xAF]);
    }

    #[test]
    fn set_addressing_mode() {
        assert_eq!(
            sent(Command::SetAddressingMode(AddressingMode::Horizontal)),
            [0x20, 0x00]
        );
        assert_eq!(
            sent(Command::SetAddressingMode(AddressingMode::Vertical)),
            [0x20, 0x01]
        );
        assert_eq!(
            sent(Command::SetAddressingMode(AddressingMode::Page)),
            [0x20, 0x02]
        );
    }

    #[test]
    fn set_column_and_page_address() {
        assert_eq!(sent(Command::SetColumnAddress(8, 127)), [0x21, 8, 127]);
        assert_eq!(sent(Command::SetColumnAddress(200, 255)), [0x21, 127, 127]);
        assert_eq!(sent(Command::SetPageAddress(2, 7)), [0x22, 2, 7]);
        assert_eq!(sent(Command::SetPageAddress(9, 12)), [0x22, 7, 7]);
    }

    #[test]
    fn set_pointer() {
        assert_eq!(sent(Command::SetPageStart(3)), [0xB3]);
        assert_eq!(sent(Command::SetPageStart(12)), [0xB7]);
        assert_eq!(sent(Command::SetColumnStart(0)), [0x00, 0x10]);
        assert_eq!(sent(Command::SetColumnStart(120)), [0x08, 0x17]);
        assert_eq!(sent(Command::SetColumnStart(200)), [0x0F, 0x17]);
    }

    #[test]
    fn set_start_line_and_offset() {
        assert_eq!(sent(Command::SetStartLine(0)), [0x40]);
        assert_eq!(sent(Command::SetStartLine(63)), [0x7F]);
        assert_eq!(sent(Command::SetDisplayOffset(32)), [0xD3, 32]);
    }

    #[test]
    fn remapping() {
        assert_eq!(sent(Command::SetSegmentRemap(SegmentRemap::Normal)), [0xA0]);
        assert_eq!(sent(Command::SetSegmentRemap(SegmentRemap::Reversed)), [0xA1]);
        assert_eq!(
            sent(Command::SetComScanDirection(ComScanDirection::Increment)),
            [0xC0]
        );
        assert_eq!(
            sent(Command::SetComScanDirection(ComScanDirection::Decrement)),
            [0xC8]
        );
        assert_eq!(SegmentRemap::Normal.flipped(), SegmentRemap::Reversed);
        assert_eq!(
            ComScanDirection::Decrement.flipped(),
            ComScanDirection::Increment
        );
    }

    #[test]
    fn set_mux_ratio() {
        assert_eq!(sent(Command::SetMuxRatio(64)), [0xA8, 63]);
        assert_eq!(sent(Command::SetMuxRatio(16)), [0xA8, 15]);
        assert_eq!(sent(Command::SetMuxRatio(2)), [0xA8, 15]);
        assert_eq!(sent(Command::SetMuxRatio(100)), [0xA8, 63]);
    }

    #[test]
    fn set_com_pins() {
        assert_eq!(
            sent(Command::SetComPins(ComLayout::Alternative, false)),
            [0xDA, 0x12]
        );
        assert_eq!(
            sent(Command::SetComPins(ComLayout::Sequential, true)),
            [0xDA, 0x22]
        );
    }

    #[test]
    fn timing() {
        assert_eq!(sent(Command::SetClockDivide(1, 8)), [0xD5, 0x80]);
        assert_eq!(sent(Command::SetClockDivide(16, 15)), [0xD5, 0xFF]);
        assert_eq!(sent(Command::SetClockDivide(0, 0)), [0xD5, 0x00]);
        assert_eq!(sent(Command::SetPrechargePeriod(1, 15)), [0xD9, 0xF1]);
        assert_eq!(sent(Command::SetPrechargePeriod(0, 2)), [0xD9, 0x21]);
        assert_eq!(sent(Command::SetVcomhDeselect(4)), [0xDB, 0x40]);
    }

    #[test]
    fn charge_pump() {
        assert_eq!(sent(Command::SetChargePump(true)), [0x8D, 0x14]);
        assert_eq!(sent(Command::SetChargePump(false)), [0x8D, 0x10]);
    }

    #[test]
    fn scrolling() {
        assert_eq!(
            sent(Command::SetupHorizontalScroll(
                ScrollDirection::Right,
                0,
                7,
                ScrollInterval::Frames5
            )),
            [0x26, 0x00, 0, 0b000, 7, 0x00, 0xFF]
        );
        assert_eq!(
            sent(Command::SetupHorizontalScroll(
                ScrollDirection::Left,
                2,
                3,
                ScrollInterval::Frames2
            )),
            [0x27, 0x00, 2, 0b111, 3, 0x00, 0xFF]
        );
        assert_eq!(
            sent(Command::SetupDiagonalScroll(
                ScrollDirection::Left,
                0,
                7,
                ScrollInterval::Frames25,
                1
            )),
            [0x2A, 0x00, 0, 0b110, 7, 1]
        );
        assert_eq!(sent(Command::SetVerticalScrollArea(0, 64)), [0xA3, 0, 64]);
        assert_eq!(sent(Command::ActivateScroll), [0x2F]);
        assert_eq!(sent(Command::DeactivateScroll), [0x2E]);
    }
}
