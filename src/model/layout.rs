use std::time::Duration;

/// Largest canvas side accepted from configuration.
pub const MAX_CANVAS_SIDE: u32 = 4096;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("canvas {width}x{height} is outside 1..={max} pixels per side")]
    Canvas { width: u32, height: u32, max: u32 },
    #[error("cell size {w}x{h} must be positive")]
    CellSize { w: i32, h: i32 },
    #[error("bottom inset {inset} must lie in [0, {cell_h})")]
    BottomInset { inset: i32, cell_h: i32 },
    #[error("grid origin ({x}, {y}) lies outside the canvas")]
    Origin { x: i32, y: i32 },
    #[error("{n}x{n} grid overflows pixel coordinates")]
    Overflow { n: usize },
}

/// Geometry of the confusion grid on the bitmap canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub cell_w: i32,
    pub cell_h: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Pixels the closing bottom border is pulled up by.
    pub bottom_inset: i32,
    pub text_margin_x: i32,
    pub text_margin_y: i32,
    pub header: String,
    pub header_x: i32,
    pub header_y: i32,
}

impl RenderLayout {
    /// 128x64 SSD1306 panel with an 8x8 font.
    pub fn ssd1306_v1() -> Self {
        Self {
            canvas_width: 128,
            canvas_height: 64,
            cell_w: 35,
            cell_h: 18,
            origin_x: 0,
            origin_y: 10,
            bottom_inset: 3,
            text_margin_x: 8,
            text_margin_y: 6,
            header: "Matriz Confusao".to_string(),
            header_x: 5,
            header_y: 0,
        }
    }

    /// Rejects layouts whose coordinates cannot be computed for an `n` x `n`
    /// grid. Every other geometry method assumes this passed.
    pub fn validate(&self, n: usize) -> Result<(), LayoutError> {
        let side_ok = |v: u32| (1..=MAX_CANVAS_SIDE).contains(&v);
        if !side_ok(self.canvas_width) || !side_ok(self.canvas_height) {
            return Err(LayoutError::Canvas {
                width: self.canvas_width,
                height: self.canvas_height,
                max: MAX_CANVAS_SIDE,
            });
        }
        if self.cell_w <= 0 || self.cell_h <= 0 {
            return Err(LayoutError::CellSize {
                w: self.cell_w,
                h: self.cell_h,
            });
        }
        if self.bottom_inset < 0 || self.bottom_inset >= self.cell_h {
            return Err(LayoutError::BottomInset {
                inset: self.bottom_inset,
                cell_h: self.cell_h,
            });
        }
        // canvas sides are bounded above, so these casts are exact
        if !(0..self.canvas_width as i32).contains(&self.origin_x)
            || !(0..self.canvas_height as i32).contains(&self.origin_y)
        {
            return Err(LayoutError::Origin {
                x: self.origin_x,
                y: self.origin_y,
            });
        }
        self.checked_extent(n).ok_or(LayoutError::Overflow { n })?;
        Ok(())
    }

    fn checked_extent(&self, n: usize) -> Option<(i32, i32)> {
        let n = i32::try_from(n).ok()?;
        let right = self
            .cell_w
            .checked_mul(n)?
            .checked_add(self.origin_x)?
            .checked_add(self.text_margin_x)?;
        let bottom = self
            .cell_h
            .checked_mul(n)?
            .checked_add(self.origin_y)?
            .checked_add(self.text_margin_y)?;
        Some((right, bottom))
    }

    pub fn grid_bottom(&self, n: usize) -> i32 {
        self.origin_y + self.cell_h * n as i32 - self.bottom_inset
    }

    pub fn grid_right(&self, n: usize) -> i32 {
        self.origin_x + self.cell_w * n as i32
    }

    pub fn fits_canvas(&self, n: usize) -> bool {
        self.origin_x >= 0
            && self.origin_y >= 0
            && self.grid_right(n) < self.canvas_width as i32
            && self.grid_bottom(n) < self.canvas_height as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticPolicy {
    /// Number of leading samples logged with their raw scores.
    pub sample_lines: usize,
}

impl DiagnosticPolicy {
    pub fn default_v1() -> Self {
        Self { sample_lines: 15 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    pub poll_interval: Duration,
    pub debounce: Duration,
}

impl DebouncePolicy {
    pub fn default_v1() -> Self {
        Self {
            poll_interval: Duration::from_millis(10),
            debounce: Duration::from_millis(200),
        }
    }
}
