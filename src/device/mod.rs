pub mod font;
pub mod framebuffer;
pub mod trigger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Off,
    On,
}

#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("display transfer failed: {0}")]
    Transfer(#[from] std::io::Error),
    #[error("invalid display layout: {0}")]
    Layout(#[from] crate::model::layout::LayoutError),
}

/// Monochrome bitmap panel with a fixed pixel canvas.
///
/// Drawing primitives only touch the back buffer; nothing is visible on the
/// device until [`DisplayDriver::flush`] transfers it.
pub trait DisplayDriver {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn fill(&mut self, color: Color) -> Result<(), DisplayError>;
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<(), DisplayError>;
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), DisplayError>;
    fn flush(&mut self) -> Result<(), DisplayError>;
}
