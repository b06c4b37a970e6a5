use ratatui::style::Color;

use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{Element, ElementBase};
use crate::geometry::Rect;

/// A solid block. Skinned as `GuiPart::Panel` unless given a flat color.
pub struct Panel {
    base: ElementBase,
    color: Option<Color>,
}

impl Panel {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }
}

impl Element for Panel {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        match self.color {
            Some(color) => drawer.draw_rectangle(self.base.rect(), color, true),
            None => drawer.draw_gui_part(
                GuiPart::Panel,
                self.base.rect(),
                PartState::new(self.base.mouse_over(), false),
            ),
        }
    }
}
