use ratatui::style::Style;

use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{Element, ElementBase};
use crate::geometry::Rect;

/// One-line text box shown as a hover element.
pub struct Tooltip {
    base: ElementBase,
    text: String,
}

impl Tooltip {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let rect = Rect::sized(0, 0, Self::width_for(&text), 1);
        Self {
            base: ElementBase::new(rect),
            text,
        }
    }

    fn width_for(text: &str) -> i32 {
        text.chars().count() as i32 + 2
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let rect = self.base.rect();
        self.base
            .set_rect(Rect::sized(rect.x0, rect.y0, Self::width_for(&self.text), 1));
    }
}

impl Element for Tooltip {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let rect = self.base.rect();
        drawer.draw_gui_part(GuiPart::Tooltip, rect, PartState::default());
        drawer.draw_text(&self.text, rect.x0 + 1, rect.y0, Style::default());
    }
}
