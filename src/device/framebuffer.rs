use std::fs;
use std::path::{Path, PathBuf};

use crate::device::font::{ADVANCE, GLYPH_WIDTH, glyph};
use crate::device::{Color, DisplayDriver, DisplayError};

/// Host stand-in for a monochrome OLED: a back buffer that primitives draw
/// into and a front buffer holding the last flushed frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    back: Vec<bool>,
    front: Vec<bool>,
    flushes: u32,
    sink: Option<PathBuf>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let n = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![false; n],
            front: vec![false; n],
            flushes: 0,
            sink: None,
        }
    }

    /// Every flush also writes the presented frame to `path` as PBM.
    pub fn with_sink(mut self, path: &Path) -> Self {
        self.sink = Some(path.to_path_buf());
        self
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    #[cfg(test)]
    pub fn presented_pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some_and(|i| self.front[i])
    }

    pub fn lit_pixels(&self) -> usize {
        self.front.iter().filter(|&&p| p).count()
    }

    pub fn to_pbm(&self) -> String {
        let mut out = format!("P1\n{} {}\n", self.width, self.height);
        for row in self.front.chunks(self.width.max(1) as usize) {
            // plain PBM lines should stay under 70 characters
            for chunk in row.chunks(64) {
                out.extend(chunk.iter().map(|&p| if p { '1' } else { '0' }));
                out.push('\n');
            }
        }
        out
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.front.len() + self.height as usize);
        for row in self.front.chunks(self.width.max(1) as usize) {
            out.extend(row.iter().map(|&p| if p { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.back[i] = true;
        }
    }
}

impl DisplayDriver for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill(&mut self, color: Color) -> Result<(), DisplayError> {
        self.back.fill(color == Color::On);
        Ok(())
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError> {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError> {
        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyph(ch) else {
                continue;
            };
            let gx = x + i as i32 * ADVANCE;
            for (ry, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> col) != 0 {
                        self.set(gx + col, y + ry as i32);
                    }
                }
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.front.copy_from_slice(&self.back);
        self.flushes += 1;
        if let Some(path) = &self.sink {
            fs::write(path, self.to_pbm())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/device/framebuffer.rs"]
mod tests;
