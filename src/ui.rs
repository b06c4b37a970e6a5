//! UiFrame: a thin wrapper around a ratatui buffer that clamps every write
//! to the visible area.
//!
//! Elements live in signed coordinates and are routinely dragged partly off
//! screen. Writing out of bounds into a `Buffer` panics, so all cell writes
//! made by the drawer go through `UiFrame`, which drops anything outside its
//! area instead.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Used for
    /// offscreen rendering and in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    /// Write one cell at signed coordinates. Off-area cells are ignored.
    pub fn set_cell(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        let Some((x, y)) = self.cell_position(x, y) else {
            return;
        };
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Patch the style of one cell, keeping its symbol.
    pub fn set_style(&mut self, x: i32, y: i32, style: Style) {
        let Some((x, y)) = self.cell_position(x, y) else {
            return;
        };
        if let Some(cell) = self.buffer.cell_mut((x, y)) {
            cell.set_style(style);
        }
    }

    fn cell_position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let x0 = self.area.x as i32;
        let y0 = self.area.y as i32;
        let inside = x >= x0
            && y >= y0
            && x < x0 + self.area.width as i32
            && y < y0 + self.area.height as i32;
        inside.then_some((x as u16, y as u16))
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
