use crossterm::event::MouseButton;
use ratatui::style::Style;

use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{Element, ElementBase, Shared, erase, shared};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::widgets::Tooltip;

/// Push button with a centered label and an optional tooltip.
pub struct Button {
    base: ElementBase,
    label: String,
    tooltip: Option<Shared<Tooltip>>,
    clicks: u32,
    was_clicked: bool,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(rect),
            label: label.into(),
            tooltip: None,
            clicks: 0,
            was_clicked: false,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(shared(Tooltip::new(text)));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Clicked during the last handled frame.
    pub fn was_clicked(&self) -> bool {
        self.was_clicked
    }

    /// Total clicks since creation.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Element for Button {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        self.was_clicked = self.base.clicked(MouseButton::Left);
        if self.was_clicked {
            self.clicks += 1;
            tracing::debug!(label = %self.label, "button clicked");
        }

        if let Some(tooltip) = &self.tooltip
            && self.base.mouse_over()
            && !self.base.grabbed(MouseButton::Left)
        {
            if let Ok(mut tip) = tooltip.try_borrow_mut() {
                tip.move_to(input.mouse_x() + 1, input.mouse_y() + 1);
            }
            ctx.add_hover_element(&erase(tooltip));
        }
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let rect = self.base.rect();
        let state = PartState::new(
            self.base.mouse_over(),
            self.base.mouse_down(MouseButton::Left),
        );
        drawer.draw_gui_part(GuiPart::Button, rect, state);
        let width = self.label.chars().count() as i32;
        let x = rect.x0 + ((rect.width() - width) / 2).max(0);
        drawer.draw_text(&self.label, x, rect.center_y(), Style::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::dispatch_handle;
    use crate::input::InputSnapshot;

    #[test]
    fn counts_clicks() {
        let mut button = Button::new(Rect::new(0, 0, 10, 3), "ok");
        let mut ctx = FrameContext::new();
        let frames = [
            InputSnapshot::at(2, 1),
            InputSnapshot::at(2, 1).pressed(MouseButton::Left),
            InputSnapshot::at(3, 1),
            InputSnapshot::at(3, 1),
        ];
        let mut seen = Vec::new();
        for input in &frames {
            dispatch_handle(&mut button, input, &mut ctx);
            seen.push(button.was_clicked());
        }
        assert_eq!(seen, [false, false, true, false]);
        assert_eq!(button.clicks(), 1);
    }

    #[test]
    fn tooltip_registers_while_hovered() {
        let mut button = Button::new(Rect::new(0, 0, 10, 3), "ok").with_tooltip("does things");
        let mut ctx = FrameContext::new();
        ctx.hover_mut().begin_frame();
        dispatch_handle(&mut button, &InputSnapshot::at(20, 20), &mut ctx);
        ctx.hover_mut().end_frame();
        assert!(ctx.hover().is_empty());

        ctx.hover_mut().begin_frame();
        dispatch_handle(&mut button, &InputSnapshot::at(2, 1), &mut ctx);
        ctx.hover_mut().end_frame();
        assert_eq!(ctx.hover().len(), 1);
        assert!(ctx.hover().covers(3, 2));
    }
}
