// File: crates/kline-core/src/canvas.rs
// Summary: CPU pixel buffer and the drawing primitives used by the rasterizer.
// Notes:
// - Every primitive clips silently at the canvas edge.
// - Colors with alpha < 255 are blended source-over; opaque colors overwrite.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use crate::error::ChartError;
use crate::text::BitmapFont;

pub struct Canvas {
    img: RgbaImage,
    font: BitmapFont,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self { img: RgbaImage::from_pixel(width, height, background), font: BitmapFont }
    }

    pub fn width(&self) -> u32 { self.img.width() }
    pub fn height(&self) -> u32 { self.img.height() }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        if x < 0 || y < 0 {
            return None;
        }
        self.img.get_pixel_checked(x as u32, y as u32).copied()
    }

    pub fn set(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let Some(dst) = self.img.get_pixel_mut_checked(x as u32, y as u32) else { return };
        if color[3] == 255 {
            *dst = color;
            return;
        }
        let a = color[3] as u32;
        for c in 0..3 {
            dst[c] = ((color[c] as u32 * a + dst[c] as u32 * (255 - a) + 127) / 255) as u8;
        }
        dst[3] = dst[3].max(color[3]);
    }

    /// Fill `[x1, x2) x [y1, y2)`.
    pub fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba<u8>) {
        for y in y1.max(0)..y2.min(self.height() as i32) {
            for x in x1.max(0)..x2.min(self.width() as i32) {
                self.set(x, y, color);
            }
        }
    }

    /// Vertical line, both endpoints inclusive, in either order.
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Rgba<u8>) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set(x, y, color);
        }
    }

    /// Horizontal line, both endpoints inclusive, in either order.
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Rgba<u8>) {
        self.dashed_hline(x1, x2, y, 1, color);
    }

    /// Horizontal line lighting every `step`-th pixel starting at the left end.
    pub fn dashed_hline(&mut self, x1: i32, x2: i32, y: i32, step: usize, color: Rgba<u8>) {
        for x in (x1.min(x2)..=x1.max(x2)).step_by(step.max(1)) {
            self.set(x, y, color);
        }
    }

    /// Integer line from `(x0, y0)` to `(x1, y1)`, Bresenham stepping on both axes.
    /// Consecutive pixels are 8-connected, so the line has no gaps at any slope.
    pub fn line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, color: Rgba<u8>) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        loop {
            self.set(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draw `text` with its baseline at `y`, starting at column `x`.
    pub fn text(&mut self, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let font = self.font;
        font.for_each_pixel(text, x, y, |px, py| self.set(px, py, color));
    }

    pub fn measure_text(&self, text: &str) -> i32 {
        self.font.measure_width(text)
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.img
    }

    /// Encode the buffer as an RGBA PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>, ChartError> {
        let mut out = Cursor::new(Vec::new());
        PngEncoder::new(&mut out).write_image(
            self.img.as_raw(),
            self.width(),
            self.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(out.into_inner())
    }
}
