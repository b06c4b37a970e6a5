pub mod parts;

use std::cell::{Ref, RefMut};

use crossterm::event::MouseButton;

use crate::constants::{
    CLOSE_BUTTON_WIDTH, RESIZER_SIZE, TOP_BAR_HEIGHT, WINDOW_BORDER, WINDOW_MIN_HEIGHT,
    WINDOW_MIN_WIDTH,
};
use crate::container::Container;
use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{
    Element, ElementBase, ElementHandle, Shared, dispatch_handle, erase, same_element, shared,
};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::scroll::ScrollElement;
use crate::sticky::Sticky;

pub use parts::{CloseButton, Resizer, TopBar};

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub top_bar: bool,
    pub close_button: bool,
    pub resizer: bool,
    /// Show the content through a `ScrollElement` that grows to fit it.
    pub scrollable: bool,
    pub min_size: (i32, i32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            top_bar: true,
            close_button: true,
            resizer: true,
            scrollable: false,
            min_size: (WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT),
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    #[must_use]
    pub fn min_size(mut self, width: i32, height: i32) -> Self {
        self.min_size = (width, height);
        self
    }

    #[must_use]
    pub fn without_top_bar(mut self) -> Self {
        self.top_bar = false;
        self
    }

    #[must_use]
    pub fn without_close_button(mut self) -> Self {
        self.close_button = false;
        self
    }

    #[must_use]
    pub fn without_resizer(mut self) -> Self {
        self.resizer = false;
        self
    }
}

/// Where the body was grabbed, relative to the window origin.
#[derive(Debug, Clone, Copy)]
struct BodyDrag {
    grab_x: i32,
    grab_y: i32,
}

/// Floating window. Its parts sit in a private `Container`, so the close
/// button wins over the top bar and the resizer wins over the content.
pub struct Window {
    base: ElementBase,
    frame: Container,
    top_bar: Option<Shared<TopBar>>,
    close_button: Option<Shared<CloseButton>>,
    resizer: Option<Shared<Resizer>>,
    container: Shared<Container>,
    scroll: Option<Shared<ScrollElement>>,
    body_drag: Option<BodyDrag>,
    closed: bool,
}

impl Window {
    pub fn new(rect: Rect, config: WindowConfig) -> Self {
        let mut base = ElementBase::new(rect);
        base.set_min_size(config.min_size.0, config.min_size.1);
        let rect = base.rect();
        let b = WINDOW_BORDER;
        let bar_height = if config.top_bar { TOP_BAR_HEIGHT } else { 0 };
        let inner = Rect::new(rect.x0 + b, rect.y0 + b + bar_height, rect.x1 - b, rect.y1 - b);

        let mut frame = Container::new(rect);
        let container = shared(Container::new(inner));
        let scroll = config
            .scrollable
            .then(|| shared(ScrollElement::new(inner, &erase(&container))));
        match &scroll {
            Some(scroll) => frame.push_top_full(&erase(scroll)),
            None => frame.push_top_full(&erase(&container)),
        }

        let top_bar = config.top_bar.then(|| {
            shared(TopBar::new(
                Rect::new(rect.x0 + b, rect.y0 + b, rect.x1 - b, rect.y0 + b + TOP_BAR_HEIGHT),
                config.title.clone(),
            ))
        });
        if let Some(bar) = &top_bar {
            frame.push_top_full(&erase(bar));
        }

        let close_button = config.close_button.then(|| {
            shared(CloseButton::new(Rect::new(
                rect.x1 - b - CLOSE_BUTTON_WIDTH,
                rect.y0 + b,
                rect.x1 - b,
                rect.y0 + b + TOP_BAR_HEIGHT,
            )))
        });
        if let Some(close) = &close_button {
            let sticky = Sticky::tied(close.borrow().base().rect(), rect, [1.0, 0.0, 1.0, 0.0]);
            frame.push_top_with(&erase(close), sticky);
        }

        let resizer = config.resizer.then(|| {
            shared(Resizer::new(Rect::new(
                rect.x1 - RESIZER_SIZE,
                rect.y1 - RESIZER_SIZE,
                rect.x1,
                rect.y1,
            )))
        });
        if let Some(resizer) = &resizer {
            let sticky = Sticky::tied(resizer.borrow().base().rect(), rect, [1.0; 4]);
            frame.push_top_with(&erase(resizer), sticky);
        }

        Self {
            base,
            frame,
            top_bar,
            close_button,
            resizer,
            container,
            scroll,
            body_drag: None,
            closed: false,
        }
    }

    pub fn title(&self) -> String {
        self.top_bar
            .as_ref()
            .map(|bar| bar.borrow().title().to_string())
            .unwrap_or_default()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(bar) = &self.top_bar {
            bar.borrow_mut().set_title(title);
        }
    }

    pub fn close(&mut self) {
        if !self.closed {
            tracing::debug!(title = %self.title(), "window closed");
        }
        self.closed = true;
        self.body_drag = None;
        self.base.set_present(false);
    }

    pub fn unclose(&mut self) {
        self.closed = false;
        self.base.set_present(true);
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn container(&self) -> Ref<'_, Container> {
        self.container.borrow()
    }

    pub fn container_mut(&self) -> RefMut<'_, Container> {
        self.container.borrow_mut()
    }

    pub fn scroll(&self) -> Option<Ref<'_, ScrollElement>> {
        self.scroll.as_ref().map(|scroll| scroll.borrow())
    }

    pub fn push_top(&mut self, child: &ElementHandle) {
        self.container.borrow_mut().push_top(child);
    }

    /// Push `child` at `(x, y)` relative to the content origin.
    pub fn push_top_at(&mut self, child: &ElementHandle, x: i32, y: i32) {
        self.container.borrow_mut().push_top_at(child, x, y);
    }

    pub fn push_top_relative(&mut self, child: &ElementHandle) {
        self.container.borrow_mut().push_top_relative(child);
    }

    pub fn push_top_full(&mut self, child: &ElementHandle) {
        self.container.borrow_mut().push_top_full(child);
    }

    pub fn remove(&mut self, child: &ElementHandle) -> bool {
        self.container.borrow_mut().remove(child)
    }

    /// Area the content is shown in.
    pub fn content_rect(&self) -> Rect {
        match &self.scroll {
            Some(scroll) => scroll.borrow().viewport(),
            None => self.container.borrow().base().rect(),
        }
    }

    pub fn top_bar_rect(&self) -> Option<Rect> {
        self.top_bar.as_ref().map(|part| part.borrow().base().rect())
    }

    pub fn close_button_rect(&self) -> Option<Rect> {
        self.close_button
            .as_ref()
            .map(|part| part.borrow().base().rect())
    }

    pub fn resizer_rect(&self) -> Option<Rect> {
        self.resizer.as_ref().map(|part| part.borrow().base().rect())
    }

    /// Grow the scrolled container to cover its children, and at least the
    /// viewport they would be shown through. Children are not re-anchored.
    fn fit_scrolled_container(&mut self) {
        let Some(scroll) = &self.scroll else {
            return;
        };
        let mut container = self.container.borrow_mut();
        let rect = container.base().rect();
        let (extent_w, extent_h) = container
            .children_bounds()
            .map(|bounds| (bounds.x1 - rect.x0, bounds.y1 - rect.y0))
            .unwrap_or((0, 0));
        let viewport = scroll.borrow().viewport_for(extent_w, extent_h);
        let width = extent_w.max(viewport.width());
        let height = extent_h.max(viewport.height());
        if (width, height) != (rect.width(), rect.height()) {
            container
                .base_mut()
                .set_rect(Rect::sized(rect.x0, rect.y0, width, height));
        }
    }

    /// Whether `(x, y)` is on the window itself rather than on a part or a
    /// child widget.
    fn is_body_at(&self, x: i32, y: i32) -> bool {
        match self.frame.hit_test(x, y) {
            None => true,
            Some(hit) => {
                same_element(&hit, &erase(&self.container))
                    || self
                        .scroll
                        .as_ref()
                        .is_some_and(|scroll| same_element(&hit, &erase(scroll)))
            }
        }
    }

    fn update_drag(&mut self, input: &dyn InputSource) {
        let (x, y) = (input.mouse_x(), input.mouse_y());
        let (dx, dy) = match &self.top_bar {
            Some(bar) => {
                let bar = bar.borrow();
                let base = bar.base();
                if base.mouse_just_down_here(MouseButton::Left) {
                    tracing::debug!(title = %bar.title(), "window drag started");
                }
                if !base.grabbed(MouseButton::Left) {
                    return;
                }
                let (grab_x, grab_y) = base.grab_offset(MouseButton::Left);
                (x - grab_x - base.x0(), y - grab_y - base.y0())
            }
            None => {
                if self.base.mouse_just_down_here(MouseButton::Left) && self.is_body_at(x, y) {
                    let (grab_x, grab_y) = self.base.grab_offset(MouseButton::Left);
                    self.body_drag = Some(BodyDrag { grab_x, grab_y });
                    tracing::debug!("window body drag started");
                }
                if !self.base.grabbed(MouseButton::Left) {
                    self.body_drag = None;
                }
                let Some(drag) = self.body_drag else {
                    return;
                };
                (
                    x - drag.grab_x - self.base.x0(),
                    y - drag.grab_y - self.base.y0(),
                )
            }
        };
        if (dx, dy) != (0, 0) {
            self.move_by(dx, dy);
        }
    }

    fn update_resize(&mut self, input: &dyn InputSource) {
        let Some(resizer) = &self.resizer else {
            return;
        };
        let target = {
            let resizer = resizer.borrow();
            let base = resizer.base();
            if base.mouse_just_down_here(MouseButton::Left) {
                tracing::debug!("window resize started");
            }
            if !base.grabbed(MouseButton::Left) {
                return;
            }
            let (grab_x, grab_y) = base.grab_offset(MouseButton::Left);
            let rect = self.base.rect();
            Rect::new(
                rect.x0,
                rect.y0,
                input.mouse_x() - grab_x + base.width(),
                input.mouse_y() - grab_y + base.height(),
            )
        };
        if target != self.base.rect() {
            self.resize(target);
        }
    }

    fn close_clicked(&self) -> bool {
        self.close_button
            .as_ref()
            .is_some_and(|close| close.borrow().base().clicked(MouseButton::Left))
    }
}

impl Element for Window {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        self.fit_scrolled_container();
        self.frame.set_element_over(self.base.element_over());
        dispatch_handle(&mut self.frame, input, ctx);

        if self.close_clicked() {
            self.close();
            return;
        }
        self.update_drag(input);
        self.update_resize(input);
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let state = PartState::new(self.base.mouse_over(), false);
        drawer.draw_gui_part(GuiPart::WindowPanel, self.base.rect(), state);
        self.frame.draw(drawer);
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.frame.move_by(dx, dy);
    }

    fn resize(&mut self, rect: Rect) {
        self.base.set_rect(rect);
        self.frame.resize(self.base.rect());
        // The bars were chosen against the old content size.
        if let Some(scroll) = self.scroll.clone() {
            self.fit_scrolled_container();
            let rect = scroll.borrow().base().rect();
            scroll.borrow_mut().resize(rect);
        }
    }

    fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.frame.hit_test(x, y)
    }

    fn is_floating(&self) -> bool {
        true
    }

    fn set_element_over(&mut self, over: bool) {
        self.base.set_element_over(over);
        self.frame.set_element_over(over);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::widgets::{Button, Panel};

    fn window(config: WindowConfig) -> Window {
        Window::new(Rect::new(0, 0, 40, 20), config.min_size(10, 5))
    }

    fn run(window: &mut Window, frames: &[InputSnapshot]) {
        let mut ctx = FrameContext::new();
        for input in frames {
            dispatch_handle(window, input, &mut ctx);
        }
    }

    fn held(x: i32, y: i32) -> InputSnapshot {
        InputSnapshot::at(x, y).pressed(MouseButton::Left)
    }

    #[test]
    fn parts_are_laid_out_inside_the_border() {
        let w = window(WindowConfig::new("demo"));
        assert_eq!(w.top_bar_rect(), Some(Rect::new(1, 1, 39, 2)));
        assert_eq!(w.close_button_rect(), Some(Rect::new(36, 1, 39, 2)));
        assert_eq!(w.resizer_rect(), Some(Rect::new(39, 19, 40, 20)));
        assert_eq!(w.content_rect(), Rect::new(1, 2, 39, 19));
        assert_eq!(w.title(), "demo");
    }

    #[test]
    fn min_size_applies_at_construction() {
        let w = Window::new(Rect::new(0, 0, 10, 10), WindowConfig::default());
        assert_eq!(w.base().rect(), Rect::new(0, 0, 64, 64));
    }

    #[test]
    fn dragging_top_bar_moves_everything() {
        let mut w = window(WindowConfig::new("demo"));
        let child = shared(Panel::new(Rect::new(0, 0, 4, 2)));
        w.push_top_at(&erase(&child), 2, 2);
        run(&mut w, &[InputSnapshot::at(10, 1), held(10, 1), held(13, 4)]);
        assert_eq!(w.base().rect(), Rect::new(3, 3, 43, 23));
        assert_eq!(w.top_bar_rect(), Some(Rect::new(4, 4, 42, 5)));
        assert_eq!(child.borrow().base().rect(), Rect::new(6, 7, 10, 9));
    }

    #[test]
    fn close_button_closes_without_dragging() {
        let mut w = window(WindowConfig::new("demo"));
        run(
            &mut w,
            &[
                InputSnapshot::at(37, 1),
                held(37, 1),
                held(30, 6),
                InputSnapshot::at(30, 6),
            ],
        );
        assert_eq!(w.base().rect(), Rect::new(0, 0, 40, 20));
        assert!(!w.is_closed(), "release happened off the button");

        run(&mut w, &[InputSnapshot::at(37, 1), held(37, 1), InputSnapshot::at(37, 1)]);
        assert!(w.is_closed());
        assert!(!w.base().is_present());
        w.unclose();
        assert!(w.base().is_present());
    }

    #[test]
    fn resizer_follows_pointer_and_respects_min_size() {
        let mut w = window(WindowConfig::new("demo"));
        run(&mut w, &[InputSnapshot::at(39, 19), held(39, 19), held(49, 24)]);
        assert_eq!(w.base().rect(), Rect::new(0, 0, 50, 25));
        assert_eq!(w.resizer_rect(), Some(Rect::new(49, 24, 50, 25)));
        assert_eq!(w.close_button_rect(), Some(Rect::new(46, 1, 49, 2)));

        run(&mut w, &[held(0, 0)]);
        assert_eq!(w.base().rect(), Rect::new(0, 0, 10, 5));
    }

    #[test]
    fn body_drags_without_top_bar_only_off_widgets() {
        let mut w = window(WindowConfig::new("bare").without_top_bar());
        let button = shared(Button::new(Rect::new(0, 0, 6, 3), "b"));
        w.push_top_at(&erase(&button), 0, 0);
        // Press on the button: the window stays put.
        run(&mut w, &[InputSnapshot::at(2, 2), held(2, 2), held(8, 8)]);
        assert_eq!(w.base().rect(), Rect::new(0, 0, 40, 20));
        // Press on empty content: the window follows.
        run(&mut w, &[InputSnapshot::at(20, 10), held(20, 10), held(25, 12)]);
        assert_eq!(w.base().rect(), Rect::new(5, 2, 45, 22));
    }

    #[test]
    fn scrollable_content_grows_with_children() {
        let mut w = window(WindowConfig::new("scroll").scrollable(true));
        let wide = shared(Panel::new(Rect::new(0, 0, 80, 3)));
        w.push_top_at(&erase(&wide), 0, 0);
        run(&mut w, &[InputSnapshot::at(100, 100)]);
        let scroll = w.scroll().expect("scroll element");
        assert!(scroll.horizontal_enabled());
        assert!(!scroll.vertical_enabled());
        assert_eq!(scroll.scroll_size().0, 80 - 38);
    }

    #[test]
    fn shrinking_keeps_bars_off_for_small_content() {
        let mut w = window(WindowConfig::new("scroll").scrollable(true));
        let small = shared(Panel::new(Rect::new(0, 0, 5, 2)));
        w.push_top_at(&erase(&small), 0, 0);
        run(&mut w, &[InputSnapshot::at(39, 19), held(39, 19), held(29, 14)]);
        assert_eq!(w.base().rect(), Rect::new(0, 0, 30, 15));
        let scroll = w.scroll().expect("scroll element");
        assert!(!scroll.horizontal_enabled());
        assert!(!scroll.vertical_enabled());
        assert_eq!(scroll.viewport(), Rect::new(1, 2, 29, 14));
    }

    #[test]
    fn occluded_window_parts_ignore_pointer() {
        let mut w = window(WindowConfig::new("demo"));
        w.set_element_over(true);
        run(&mut w, &[InputSnapshot::at(10, 1), held(10, 1), held(20, 5)]);
        assert_eq!(w.base().rect(), Rect::new(0, 0, 40, 20));
    }
}
