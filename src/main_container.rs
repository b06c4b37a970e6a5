use crate::container::Container;
use crate::draw::Drawer;
use crate::element::{Element, ElementHandle, dispatch_draw, dispatch_handle};
use crate::geometry::Rect;
use crate::hover::{FrameContext, HoverManager};
use crate::input::InputSource;
use crate::sticky::Sticky;

pub struct MainContainer {
    root: Container,
    ctx: FrameContext,
}

impl MainContainer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            root: Container::new(Rect::new(0, 0, width, height)),
            ctx: FrameContext::new(),
        }
    }

    pub fn root(&self) -> &Container {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Container {
        &mut self.root
    }

    pub fn push_top(&mut self, child: &ElementHandle) {
        self.root.push_top(child);
    }

    pub fn push_top_with(&mut self, child: &ElementHandle, sticky: Sticky) {
        self.root.push_top_with(child, sticky);
    }

    pub fn push_top_relative(&mut self, child: &ElementHandle) {
        self.root.push_top_relative(child);
    }

    pub fn push_top_full(&mut self, child: &ElementHandle) {
        self.root.push_top_full(child);
    }

    pub fn remove(&mut self, child: &ElementHandle) -> bool {
        self.root.remove(child)
    }

    pub fn hover(&self) -> &HoverManager {
        self.ctx.hover()
    }

    /// Follow a new surface size. Children re-anchor as usual.
    pub fn resize(&mut self, width: i32, height: i32) {
        let rect = Rect::new(0, 0, width, height);
        if rect != self.root.base().rect() {
            tracing::debug!(width, height, "root resized");
            self.root.resize(rect);
        }
    }

    pub fn handle(&mut self, input: &dyn InputSource) {
        let (x, y) = (input.mouse_x(), input.mouse_y());
        let covered = self.ctx.hover().covers(x, y);
        self.ctx.hover_mut().begin_frame();
        self.root.set_element_over(covered);
        dispatch_handle(&mut self.root, input, &mut self.ctx);
        self.ctx.hover_mut().end_frame();
    }

    pub fn draw(&self, drawer: &mut dyn Drawer) {
        dispatch_draw(&self.root, drawer);
        self.ctx.hover().draw(drawer);
    }

    /// Element under the pointer: hover elements first, then the tree.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.ctx
            .hover()
            .hit_test(x, y)
            .or_else(|| self.root.hit_test(x, y))
    }

    /// `hit_test` at the input's pointer position.
    pub fn hit_test_input(&self, input: &dyn InputSource) -> Option<ElementHandle> {
        self.hit_test(input.mouse_x(), input.mouse_y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{erase, same_element, shared};
    use crate::input::InputSnapshot;
    use crate::widgets::{Button, Panel};

    #[test]
    fn tooltip_covers_tree_on_next_frame() {
        let mut main = MainContainer::new(80, 24);
        let button = shared(Button::new(Rect::new(0, 0, 10, 3), "ok").with_tooltip("hint"));
        let under = shared(Panel::new(Rect::new(0, 3, 20, 10)));
        main.push_top(&erase(&button));
        main.push_top(&erase(&under));

        main.handle(&InputSnapshot::at(2, 2));
        assert_eq!(main.hover().len(), 1);
        // The tooltip now sits at (3, 3), on top of the panel.
        let hit = main.hit_test(4, 3).expect("tooltip");
        assert!(!same_element(&hit, &erase(&under)));

        main.handle(&InputSnapshot::at(4, 3));
        assert!(!under.borrow().base().mouse_over());
        assert!(main.hover().is_empty(), "button is no longer hovered");

        main.handle(&InputSnapshot::at(4, 3));
        assert!(under.borrow().base().mouse_over());
    }

    #[test]
    fn resize_reanchors_children() {
        let mut main = MainContainer::new(80, 24);
        let bar_rect = Rect::new(0, 23, 80, 24);
        let bottom_bar = shared(Panel::new(bar_rect));
        let sticky = Sticky::tied(bar_rect, Rect::new(0, 0, 80, 24), [0.0, 1.0, 1.0, 1.0]);
        main.push_top_with(&erase(&bottom_bar), sticky);
        let body = shared(Panel::new(Rect::new(0, 0, 80, 23)));
        main.push_top_full(&erase(&body));

        main.resize(100, 40);
        assert_eq!(bottom_bar.borrow().base().rect(), Rect::new(0, 39, 100, 40));
        assert_eq!(body.borrow().base().rect(), Rect::new(0, 0, 100, 39));
    }
}
