//! Pixel drawing.
//!
//! The controller cannot read display RAM back over the bus, so pixel-level drawing happens on a
//! `FrameBuffer` in local RAM which is then written out whole with `Display::draw_frame`. The
//! buffer is an `embedded-graphics` draw target, so any of its primitives, fonts or images can be
//! drawn onto it; the `draw_*` methods here are shorthands for the common shapes. Coordinates are
//! signed so shapes may hang off the panel edges; pixels outside the panel are silently dropped.

use core::convert::Infallible;

use embedded_graphics::primitives::{
    Circle, Line, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment,
};
use embedded_graphics::Drawable;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    primitives::Rectangle,
    Pixel,
};
use itertools::iproduct;

use crate::command::consts::*;

/// Radii are clamped to this so the circle rasterizer's squared distances stay in range.
const MAX_RADIUS: i16 = 0x3FFF;

const BUF_LEN: usize = NUM_PIXEL_COLS as usize * NUM_PAGES as usize;

fn in_range(x: i32, lo: i32, hi: i32) -> bool {
    x >= lo && x < hi
}

fn color(on: bool) -> BinaryColor {
    if on {
        BinaryColor::On
    } else {
        BinaryColor::Off
    }
}

fn outline(on: bool) -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyleBuilder::new()
        .stroke_color(color(on))
        .stroke_width(1)
        .stroke_alignment(StrokeAlignment::Inside)
        .build()
}

/// A `w` by `h` rectangle at (`x`, `y`), or `None` if it is empty.
fn rect(x: i16, y: i16, w: i16, h: i16) -> Option<Rectangle> {
    if w <= 0 || h <= 0 {
        return None;
    }
    Some(Rectangle::new(
        Point::new(x.into(), y.into()),
        Size::new(w as u32, h as u32),
    ))
}

/// A full-panel image in the controller's own layout: 8 pages of 128 column bytes, bit 0 of each
/// byte at the top.
#[derive(Clone)]
pub struct FrameBuffer {
    buf: [u8; BUF_LEN],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer { buf: [0; BUF_LEN] }
    }

    pub fn clear(&mut self) {
        self.buf = [0; BUF_LEN];
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        if !in_range(x, 0, NUM_PIXEL_COLS.into()) || !in_range(y, 0, NUM_PIXEL_ROWS.into()) {
            return None;
        }
        Some((y as usize / 8) * NUM_PIXEL_COLS as usize + x as usize)
    }

    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::index(x, y).map_or(false, |i| self.buf[i] & (1 << (y % 8)) != 0)
    }

    /// Light (`on`) or darken one pixel. Pixels outside the panel are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(i) = Self::index(x, y) {
            let bit = 1 << (y % 8);
            if on {
                self.buf[i] |= bit;
            } else {
                self.buf[i] &= !bit;
            }
        }
    }

    /// Set the 8-pixel column strip at column `x` of `page` to `pattern`, bit 0 at the top.
    pub fn set_pattern(&mut self, x: i32, page: i32, pattern: u8) {
        if in_range(x, 0, NUM_PIXEL_COLS.into()) && in_range(page, 0, NUM_PAGES.into()) {
            self.buf[page as usize * NUM_PIXEL_COLS as usize + x as usize] = pattern;
        }
    }

    /// The 128 column bytes of one page. Pages past the last clamp to it.
    pub fn page(&self, page: u8) -> &[u8] {
        let start = page.min(PAGE_MAX) as usize * NUM_PIXEL_COLS as usize;
        &self.buf[start..start + NUM_PIXEL_COLS as usize]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn paint<D>(&mut self, drawable: D)
    where
        D: Drawable<Color = BinaryColor, Output = ()>,
    {
        if let Err(never) = drawable.draw(self) {
            match never {}
        }
    }

    pub fn draw_hline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        self.fill_rect(x, y, len, 1, on);
    }

    pub fn draw_vline(&mut self, x: i16, y: i16, len: i16, on: bool) {
        self.fill_rect(x, y, 1, len, on);
    }

    /// Line from (`x0`, `y0`) to (`x1`, `y1`), both ends included.
    pub fn draw_line(&mut self, x0: i16, y0: i16, x1: i16, y1: i16, on: bool) {
        let line = Line::new(
            Point::new(x0.into(), y0.into()),
            Point::new(x1.into(), y1.into()),
        );
        self.paint(line.into_styled(PrimitiveStyle::with_stroke(color(on), 1)));
    }

    /// Outline of the `w` by `h` rectangle whose top-left pixel is (`x`, `y`).
    pub fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if let Some(r) = rect(x, y, w, h) {
            self.paint(r.into_styled(outline(on)));
        }
    }

    pub fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, on: bool) {
        if let Some(r) = rect(x, y, w, h) {
            self.paint(r.into_styled(PrimitiveStyle::with_fill(color(on))));
        }
    }

    /// Circle of radius `r` centred on (`cx`, `cy`).
    pub fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, on: bool) {
        if r < 0 {
            return;
        }
        let diameter = 2 * u32::from(r.min(MAX_RADIUS) as u16) + 1;
        let circle = Circle::with_center(Point::new(cx.into(), cy.into()), diameter);
        self.paint(circle.into_styled(outline(on)));
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(NUM_PIXEL_COLS.into(), NUM_PIXEL_ROWS.into())
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            self.set_pixel(x, y, color.is_on());
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Point { x, y } = area.top_left;
        let (w, h) = (area.size.width as i32, area.size.height as i32);
        for (py, px) in iproduct!(y..y + h, x..x + w) {
            self.set_pixel(px, py, color.is_on());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(fb: &FrameBuffer) -> usize {
        fb.as_bytes().iter().map(|b| b.count_ones() as usize).sum()
    }

    #[test]
    fn set_and_clear_pixel() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(3, 9, true);
        assert!(fb.pixel(3, 9));
        assert_eq!(fb.page(1)[3], 0b10);
        fb.set_pixel(3, 9, false);
        assert!(!fb.pixel(3, 9));
        assert_eq!(lit(&fb), 0);
    }

    #[test]
    fn out_of_range_pixels_are_dropped() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(-1, 0, true);
        fb.set_pixel(0, -1, true);
        fb.set_pixel(128, 0, true);
        fb.set_pixel(0, 64, true);
        fb.set_pattern(130, 0, 0xFF);
        fb.set_pattern(0, 8, 0xFF);
        assert_eq!(lit(&fb), 0);
        assert!(!fb.pixel(500, 500));
    }

    #[test]
    fn pattern_writes_a_column_strip() {
        let mut fb = FrameBuffer::new();
        fb.set_pattern(10, 2, 0xA5);
        assert_eq!(fb.page(2)[10], 0xA5);
        assert!(fb.pixel(10, 16));
        assert!(!fb.pixel(10, 17));
        assert!(fb.pixel(10, 23));
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(0, 0, 9, 0, true);
        assert_eq!(lit(&fb), 10);
        fb.clear();
        fb.draw_line(5, 20, 5, 11, true);
        assert_eq!(lit(&fb), 10);
        assert!(fb.pixel(5, 11) && fb.pixel(5, 20));
        fb.clear();
        fb.draw_hline(120, 3, 20, true);
        fb.draw_vline(0, 60, 20, true);
        assert_eq!(lit(&fb), 8 + 4);
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(0, 0, 7, 7, true);
        assert_eq!(lit(&fb), 8);
        assert!((0..8).all(|i| fb.pixel(i, i)));
        fb.clear();
        fb.draw_line(20, 3, 0, 13, true);
        assert!(fb.pixel(20, 3) && fb.pixel(0, 13));
        assert_eq!(lit(&fb), 21);
    }

    #[test]
    fn line_is_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_line(-10, 0, 9, 0, true);
        assert_eq!(lit(&fb), 10);
    }

    #[test]
    fn rect_outline_and_fill() {
        let mut fb = FrameBuffer::new();
        fb.draw_rect(2, 2, 4, 3, true);
        assert_eq!(lit(&fb), 10);
        assert!(!fb.pixel(3, 3));
        fb.clear();
        fb.fill_rect(2, 2, 4, 3, true);
        assert_eq!(lit(&fb), 12);
        fb.fill_rect(120, 60, 20, 20, true);
        assert_eq!(lit(&fb), 12 + 8 * 4);
        fb.draw_rect(0, 0, 0, 5, true);
        fb.fill_rect(0, 0, -3, 5, true);
        assert_eq!(lit(&fb), 12 + 8 * 4);
        fb.fill_rect(2, 2, 2, 2, false);
        assert_eq!(lit(&fb), 8 + 8 * 4);
    }

    #[test]
    fn circle_is_symmetric() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(32, 32, 10, true);
        for &(x, y) in &[(42, 32), (22, 32), (32, 42), (32, 22)] {
            assert!(fb.pixel(x, y));
        }
        assert!(!fb.pixel(32, 32));
        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(fb.pixel(x, y), fb.pixel(64 - x, y));
                assert_eq!(fb.pixel(x, y), fb.pixel(x, 64 - y));
            }
        }
    }

    #[test]
    fn negative_radius_draws_nothing() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(5, 5, -1, true);
        assert_eq!(lit(&fb), 0);
        fb.draw_circle(0, 0, 3, true);
        assert!(fb.pixel(3, 0) && fb.pixel(0, 3));
    }

    #[test]
    fn far_off_panel_shapes_are_clipped() {
        let mut fb = FrameBuffer::new();
        fb.draw_circle(0, 0, 20000, true);
        fb.draw_circle(i16::MAX, i16::MIN, i16::MAX, true);
        fb.draw_hline(i16::MAX - 1, 0, 5, true);
        fb.draw_vline(0, i16::MIN, i16::MAX, true);
        fb.draw_rect(0, i16::MAX, 4, 4, true);
        fb.draw_rect(i16::MIN, i16::MIN, i16::MAX, i16::MAX, true);
        fb.fill_rect(i16::MAX, i16::MAX, i16::MAX, i16::MAX, true);
        fb.draw_line(i16::MIN, i16::MIN, i16::MAX, i16::MAX, true);
        assert!(fb.pixel(0, 0) && fb.pixel(63, 63));
        assert!(!fb.pixel(0, 1));
    }

    #[test]
    fn draws_embedded_graphics_primitives() {
        let mut fb = FrameBuffer::new();
        assert_eq!(fb.bounding_box().size, Size::new(128, 64));
        Rectangle::new(Point::new(-4, -4), Size::new(6, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(lit(&fb), 4);
        Pixel(Point::new(127, 63), BinaryColor::On).draw(&mut fb).unwrap();
        assert!(fb.pixel(127, 63));
    }
}
