use ratatui::style::{Color, Style};

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuiPart {
    Panel,
    WindowPanel,
    TopBar,
    CloseButton,
    Resizer,
    Button,
    Tooltip,
    ScrollTrackVertical,
    ScrollTrackHorizontal,
    Scroller,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ScrollCorner,
}

/// Interaction modifiers for a skinned part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartState {
    pub mouse_over: bool,
    pub mouse_down: bool,
}

impl PartState {
    pub const fn new(mouse_over: bool, mouse_down: bool) -> Self {
        Self {
            mouse_over,
            mouse_down,
        }
    }
}

pub trait Texture {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Color at `(x, y)`, `None` for transparent or out of range.
    fn pixel(&self, x: i32, y: i32) -> Option<Color>;
}

/// Row-major in-memory texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Pixmap {
    width: i32,
    height: i32,
    pixels: Vec<Option<Color>>,
}

impl Pixmap {
    pub fn filled(width: i32, height: i32, color: Color) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            pixels: vec![Some(color); (width * height) as usize],
        }
    }

    pub fn set(&mut self, x: i32, y: i32, color: Option<Color>) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }
}

impl Texture for Pixmap {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[(y * self.width + x) as usize]
    }
}

pub trait Drawer {
    /// Size of the drawing surface.
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn draw_rectangle(&mut self, rect: Rect, color: Color, filled: bool);
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);
    fn draw_texture(&mut self, texture: &dyn Texture, x: i32, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: Style);
    fn draw_gui_part(&mut self, part: GuiPart, rect: Rect, state: PartState);

    /// Replace the clip region with `rect`.
    fn push_scissor(&mut self, rect: Rect);
    /// Clip to the overlap of `rect` and the current clip region.
    fn push_smallest_scissor(&mut self, rect: Rect);
    fn pop_scissor(&mut self);
}

/// Run `f` clipped to `rect` intersected with the current clip, popping the
/// region afterwards.
pub fn with_smallest_scissor<R>(
    drawer: &mut dyn Drawer,
    rect: Rect,
    f: impl FnOnce(&mut dyn Drawer) -> R,
) -> R {
    drawer.push_smallest_scissor(rect);
    let out = f(drawer);
    drawer.pop_scissor();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixmap_ignores_out_of_range_writes() {
        let mut pixmap = Pixmap::filled(2, 2, Color::Red);
        pixmap.set(5, 5, None);
        pixmap.set(1, 0, None);
        assert_eq!(pixmap.pixel(0, 0), Some(Color::Red));
        assert_eq!(pixmap.pixel(1, 0), None);
        assert_eq!(pixmap.pixel(-1, 0), None);
        assert_eq!(pixmap.pixel(0, 2), None);
    }

    #[test]
    fn negative_pixmap_size_is_empty() {
        let pixmap = Pixmap::filled(-3, 4, Color::Blue);
        assert_eq!(pixmap.width(), 0);
        assert_eq!(pixmap.pixel(0, 0), None);
    }
}
