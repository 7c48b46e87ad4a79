use crate::device::{Color, DisplayDriver, DisplayError};
use crate::model::confusion::ConfusionMatrix;
use crate::model::layout::RenderLayout;

const PROMPT_LINES: [(&str, i32, i32); 2] = [("Pressione A", 30, 15), ("para Inferir", 28, 35)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAnchor {
    pub row: usize,
    pub col: usize,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    pub horizontal: Vec<Segment>,
    pub vertical: Vec<Segment>,
    pub cells: Vec<CellAnchor>,
}

/// Borders and text anchors of an `n` x `n` grid. `layout` must have passed
/// [`RenderLayout::validate`] for `n`.
///
/// Both closing borders stop at the inset bottom edge instead of the raw
/// `origin_y + n * cell_h`, which keeps the last row inside the panel.
pub fn grid_geometry(n: usize, layout: &RenderLayout) -> GridGeometry {
    let y_end = layout.grid_bottom(n);
    let x_end = layout.grid_right(n);

    let horizontal = (0..=n)
        .map(|r| {
            let y = if r == n {
                y_end
            } else {
                layout.origin_y + r as i32 * layout.cell_h
            };
            Segment {
                x0: layout.origin_x,
                y0: y,
                x1: x_end,
                y1: y,
            }
        })
        .collect();

    let vertical = (0..=n)
        .map(|c| {
            let x = layout.origin_x + c as i32 * layout.cell_w;
            Segment {
                x0: x,
                y0: layout.origin_y,
                x1: x,
                y1: y_end,
            }
        })
        .collect();

    let mut cells = Vec::with_capacity(n * n);
    for row in 0..n {
        for col in 0..n {
            cells.push(CellAnchor {
                row,
                col,
                x: layout.origin_x + col as i32 * layout.cell_w + layout.text_margin_x,
                y: layout.origin_y + row as i32 * layout.cell_h + layout.text_margin_y,
            });
        }
    }

    GridGeometry {
        horizontal,
        vertical,
        cells,
    }
}

pub fn render_confusion(
    display: &mut dyn DisplayDriver,
    matrix: &ConfusionMatrix,
    layout: &RenderLayout,
) -> Result<(), DisplayError> {
    let n = matrix.n_classes();
    layout.validate(n)?;
    if !layout.fits_canvas(n) {
        let (width, height) = (display.width(), display.height());
        tracing::warn!(
            classes = n,
            right = layout.grid_right(n),
            bottom = layout.grid_bottom(n),
            width,
            height,
            "confusion grid exceeds the canvas; it will be clipped"
        );
    }

    let geometry = grid_geometry(n, layout);

    display.fill(Color::Off)?;
    display.draw_text(layout.header_x, layout.header_y, &layout.header)?;
    for s in geometry.horizontal.iter().chain(&geometry.vertical) {
        display.draw_line(s.x0, s.y0, s.x1, s.y1)?;
    }
    for cell in &geometry.cells {
        let value = matrix.get(cell.row, cell.col).to_string();
        display.draw_text(cell.x, cell.y, &value)?;
    }
    display.flush()
}

/// Shown while the harness waits for the user trigger.
pub fn show_trigger_prompt(display: &mut dyn DisplayDriver) -> Result<(), DisplayError> {
    display.fill(Color::Off)?;
    for (text, x, y) in PROMPT_LINES {
        display.draw_text(x, y, text)?;
    }
    display.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_render.rs"]
mod tests;
