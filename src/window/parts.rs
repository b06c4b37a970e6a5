use crossterm::event::MouseButton;
use ratatui::style::{Modifier, Style};

use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{Element, ElementBase};
use crate::geometry::Rect;

fn part_state(base: &ElementBase) -> PartState {
    PartState::new(base.mouse_over(), base.grabbed(MouseButton::Left))
}

/// Drag bar along the top edge, showing the title.
pub struct TopBar {
    base: ElementBase,
    title: String,
}

impl TopBar {
    pub fn new(rect: Rect, title: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(rect),
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

impl Element for TopBar {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let rect = self.base.rect();
        drawer.draw_gui_part(GuiPart::TopBar, rect, part_state(&self.base));
        let len = self.title.chars().count() as i32;
        if len > 0 && len <= rect.width() {
            let x = rect.x0 + (rect.width() - len) / 2;
            let style = Style::default().add_modifier(Modifier::BOLD);
            drawer.draw_text(&self.title, x, rect.y0, style);
        }
    }
}

pub struct CloseButton {
    base: ElementBase,
}

impl CloseButton {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
        }
    }
}

impl Element for CloseButton {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        drawer.draw_gui_part(GuiPart::CloseButton, self.base.rect(), part_state(&self.base));
    }
}

/// Corner handle that drags the window's far corner.
pub struct Resizer {
    base: ElementBase,
}

impl Resizer {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
        }
    }
}

impl Element for Resizer {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        drawer.draw_gui_part(GuiPart::Resizer, self.base.rect(), part_state(&self.base));
    }
}
