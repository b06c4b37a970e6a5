use ratatui::style::{Color, Style};

use crate::draw::{Drawer, GuiPart, PartState, Texture};
use crate::geometry::Rect;
use crate::theme::Theme;
use crate::ui::{UiFrame, safe_set_string};

pub struct RatatuiDrawer<'a> {
    frame: UiFrame<'a>,
    theme: &'a Theme,
    scissors: Vec<Rect>,
}

impl<'a> RatatuiDrawer<'a> {
    pub fn new(frame: UiFrame<'a>, theme: &'a Theme) -> Self {
        Self {
            frame,
            theme,
            scissors: Vec::new(),
        }
    }

    /// Current clip region: the top scissor, or the whole surface.
    pub fn clip(&self) -> Rect {
        self.scissors
            .last()
            .copied()
            .unwrap_or_else(|| Rect::from(self.frame.area()))
    }

    pub fn scissor_depth(&self) -> usize {
        self.scissors.len()
    }

    fn put(&mut self, x: i32, y: i32, symbol: &str, style: Style) {
        if self.clip().contains(x, y) {
            self.frame.set_cell(x, y, symbol, style);
        }
    }

    fn fill(&mut self, rect: Rect, symbol: &str, style: Style) {
        let visible = rect.intersection(self.clip());
        for y in visible.y0..visible.y1 {
            for x in visible.x0..visible.x1 {
                self.frame.set_cell(x, y, symbol, style);
            }
        }
    }

    fn outline(&mut self, rect: Rect, style: Style) {
        if rect.is_empty() {
            return;
        }
        let (left, top) = (rect.x0, rect.y0);
        let (right, bottom) = (rect.x1 - 1, rect.y1 - 1);
        for x in left..=right {
            let (upper, lower) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            self.put(x, top, upper, style);
            if bottom != top {
                self.put(x, bottom, lower, style);
            }
        }
        for y in top + 1..bottom {
            self.put(left, y, "│", style);
            if right != left {
                self.put(right, y, "│", style);
            }
        }
    }

    fn glyph(&mut self, rect: Rect, symbol: &str, style: Style) {
        self.put(rect.center_x(), rect.center_y(), symbol, style);
    }
}

impl Drawer for RatatuiDrawer<'_> {
    fn width(&self) -> i32 {
        self.frame.area().width as i32
    }

    fn height(&self) -> i32 {
        self.frame.area().height as i32
    }

    fn draw_rectangle(&mut self, rect: Rect, color: Color, filled: bool) {
        if filled {
            self.fill(rect, " ", Style::default().bg(color));
        } else {
            self.outline(rect, Style::default().fg(color));
        }
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let style = Style::default().fg(color);
        let symbol = if y0 == y1 {
            "─"
        } else if x0 == x1 {
            "│"
        } else {
            "•"
        };
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.put(x, y, symbol, style);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_texture(&mut self, texture: &dyn Texture, x: i32, y: i32) {
        for ty in 0..texture.height() {
            for tx in 0..texture.width() {
                if let Some(color) = texture.pixel(tx, ty) {
                    self.put(x + tx, y + ty, " ", Style::default().bg(color));
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: Style) {
        let clip = self.clip();
        if y < clip.y0.max(0) || y >= clip.y1 || x >= clip.x1 {
            return;
        }
        // Raw scissors may start left of the surface.
        let left = clip.x0.max(0);
        let skip = (left - x).max(0);
        let visible: String = text.chars().skip(skip as usize).collect();
        let Some(bounds) = clip.to_cells(self.frame.area()) else {
            return;
        };
        let start = x + skip;
        let style = self.theme.text.patch(style);
        safe_set_string(
            self.frame.buffer_mut(),
            bounds,
            start as u16,
            y as u16,
            &visible,
            style,
        );
    }

    fn draw_gui_part(&mut self, part: GuiPart, rect: Rect, state: PartState) {
        let theme = self.theme;
        let style = theme.part(part, state);
        match part {
            GuiPart::WindowPanel => {
                self.fill(rect, " ", style);
                self.outline(rect, theme.window_border);
            }
            GuiPart::ScrollTrackVertical | GuiPart::ScrollTrackHorizontal => {
                self.fill(rect, "░", style);
            }
            GuiPart::CloseButton => {
                self.fill(rect, " ", style);
                self.glyph(rect, "x", style);
            }
            GuiPart::Resizer => self.fill(rect, "◢", style),
            GuiPart::ArrowUp => {
                self.fill(rect, " ", style);
                self.glyph(rect, "▲", style);
            }
            GuiPart::ArrowDown => {
                self.fill(rect, " ", style);
                self.glyph(rect, "▼", style);
            }
            GuiPart::ArrowLeft => {
                self.fill(rect, " ", style);
                self.glyph(rect, "◀", style);
            }
            GuiPart::ArrowRight => {
                self.fill(rect, " ", style);
                self.glyph(rect, "▶", style);
            }
            GuiPart::Panel
            | GuiPart::TopBar
            | GuiPart::Button
            | GuiPart::Tooltip
            | GuiPart::Scroller
            | GuiPart::ScrollCorner => self.fill(rect, " ", style),
        }
    }

    fn push_scissor(&mut self, rect: Rect) {
        self.scissors.push(rect);
    }

    fn push_smallest_scissor(&mut self, rect: Rect) {
        let clip = rect.intersection(self.clip());
        self.scissors.push(clip);
    }

    fn pop_scissor(&mut self) {
        if self.scissors.pop().is_none() {
            tracing::warn!("scissor popped with an empty clip stack");
        }
    }
}
