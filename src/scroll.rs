use std::cell::Ref;
use std::rc::Rc;

use crate::constants::{SCROLLBAR_THICKNESS, WHEEL_STEP};
use crate::draw::{Drawer, GuiPart, PartState, with_smallest_scissor};
use crate::element::{
    Element, ElementBase, ElementHandle, Shared, WeakElement, dispatch_draw, dispatch_handle,
    downgrade, hittable, shared, with_element, with_element_mut,
};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::internal_container::InternalContainer;
use crate::sticky::Sticky;
use crate::widgets::{Orientation, Scrollbar};

/// One content element shown through a viewport with two scrollbars.
pub struct ScrollElement {
    base: ElementBase,
    content: Option<WeakElement>,
    horizontal: Shared<Scrollbar>,
    vertical: Shared<Scrollbar>,
    bars: InternalContainer,
    thickness: i32,
    horizontal_on: bool,
    vertical_on: bool,
}

impl ScrollElement {
    pub fn new(rect: Rect, content: &ElementHandle) -> Self {
        let mut scroll = Self::empty(rect);
        scroll.set_content(content);
        scroll
    }

    /// A viewport with nothing in it yet.
    pub fn empty(rect: Rect) -> Self {
        let horizontal = shared(Scrollbar::new(Orientation::Horizontal, rect));
        let vertical = shared(Scrollbar::new(Orientation::Vertical, rect));
        let mut bars = InternalContainer::new();
        bars.push(downgrade(&horizontal), Sticky::fixed());
        bars.push(downgrade(&vertical), Sticky::fixed());
        let mut scroll = Self {
            base: ElementBase::new(rect),
            content: None,
            horizontal,
            vertical,
            bars,
            thickness: SCROLLBAR_THICKNESS,
            horizontal_on: false,
            vertical_on: false,
        };
        scroll.refresh();
        scroll
    }

    /// Replace the scrolled element. The caller keeps owning it.
    pub fn set_content(&mut self, content: &ElementHandle) {
        self.content = Some(Rc::downgrade(content));
        self.refresh();
        self.apply();
    }

    pub fn content(&self) -> Option<ElementHandle> {
        self.content.as_ref().and_then(|link| link.upgrade())
    }

    pub fn horizontal_enabled(&self) -> bool {
        self.horizontal_on
    }

    pub fn vertical_enabled(&self) -> bool {
        self.vertical_on
    }

    pub fn horizontal(&self) -> Ref<'_, Scrollbar> {
        self.horizontal.borrow()
    }

    pub fn vertical(&self) -> Ref<'_, Scrollbar> {
        self.vertical.borrow()
    }

    /// Area the content is shown through: the element minus enabled bars.
    pub fn viewport(&self) -> Rect {
        let rect = self.base.rect();
        let right = if self.vertical_on { self.thickness } else { 0 };
        let bottom = if self.horizontal_on { self.thickness } else { 0 };
        Rect::new(rect.x0, rect.y0, rect.x1 - right, rect.y1 - bottom)
    }

    /// `(horizontal, vertical)` scroll ranges.
    pub fn scroll_size(&self) -> (i32, i32) {
        (
            self.horizontal.borrow().scroll_size(),
            self.vertical.borrow().scroll_size(),
        )
    }

    pub fn scroll_pos(&self) -> (i32, i32) {
        (
            self.horizontal.borrow().scroll_pos(),
            self.vertical.borrow().scroll_pos(),
        )
    }

    /// Set both positions and move the content right away.
    pub fn scroll_to(&mut self, x: i32, y: i32) {
        self.horizontal.borrow_mut().set_scroll_pos(x);
        self.vertical.borrow_mut().set_scroll_pos(y);
        self.apply();
    }

    fn content_rect(&self) -> Option<Rect> {
        let link = self.content.as_ref()?;
        with_element(link, |content| {
            content
                .base()
                .is_present()
                .then(|| content.base().rect())
        })
        .flatten()
    }

    /// Which bars content of the given size needs, as
    /// `(horizontal, vertical)`.
    fn bars_for(&self, width: i32, height: i32) -> (bool, bool) {
        let rect = self.base.rect();
        let t = self.thickness;
        let (mut horizontal, mut vertical) = (false, false);
        loop {
            let view_w = rect.width() - if vertical { t } else { 0 };
            let view_h = rect.height() - if horizontal { t } else { 0 };
            let need_h = width > view_w;
            let need_v = height > view_h;
            if need_h == horizontal && need_v == vertical {
                return (horizontal, vertical);
            }
            horizontal |= need_h;
            vertical |= need_v;
        }
    }

    /// Viewport that content of the given size would be shown through.
    pub fn viewport_for(&self, width: i32, height: i32) -> Rect {
        let rect = self.base.rect();
        let (horizontal, vertical) = self.bars_for(width, height);
        let right = if vertical { self.thickness } else { 0 };
        let bottom = if horizontal { self.thickness } else { 0 };
        Rect::new(rect.x0, rect.y0, rect.x1 - right, rect.y1 - bottom)
    }

    /// Decide which bars are needed and lay them out.
    fn refresh(&mut self) {
        let rect = self.base.rect();
        let t = self.thickness;
        let content = self.content_rect();
        let (horizontal, vertical) = content
            .map(|content| self.bars_for(content.width(), content.height()))
            .unwrap_or((false, false));
        if (horizontal, vertical) != (self.horizontal_on, self.vertical_on) {
            tracing::debug!(horizontal, vertical, "scrollbars toggled");
        }
        self.horizontal_on = horizontal;
        self.vertical_on = vertical;

        let viewport = self.viewport();
        let content = content.unwrap_or(viewport);
        {
            let mut bar = self.horizontal.borrow_mut();
            bar.base_mut().set_enabled(horizontal);
            bar.resize(Rect::new(rect.x0, rect.y1 - t, viewport.x1, rect.y1));
            bar.set_range(viewport.width(), content.width());
        }
        {
            let mut bar = self.vertical.borrow_mut();
            bar.base_mut().set_enabled(vertical);
            bar.resize(Rect::new(rect.x1 - t, rect.y0, rect.x1, viewport.y1));
            bar.set_range(viewport.height(), content.height());
        }
    }

    /// Move the content to match the bars. On an axis without a bar the
    /// content fits and is kept inside the viewport.
    fn apply(&mut self) {
        let Some(link) = &self.content else {
            return;
        };
        let viewport = self.viewport();
        let (scroll_x, scroll_y) = self.scroll_pos();
        let (horizontal, vertical) = (self.horizontal_on, self.vertical_on);
        with_element_mut(link, |content| {
            let rect = content.base().rect();
            let x = if horizontal {
                viewport.x0 - scroll_x
            } else {
                rect.x0
                    .clamp(viewport.x0, (viewport.x1 - rect.width()).max(viewport.x0))
            };
            let y = if vertical {
                viewport.y0 - scroll_y
            } else {
                rect.y0
                    .clamp(viewport.y0, (viewport.y1 - rect.height()).max(viewport.y0))
            };
            content.move_to(x, y);
        });
    }

    fn corner(&self) -> Option<Rect> {
        let rect = self.base.rect();
        (self.horizontal_on && self.vertical_on).then(|| {
            Rect::new(
                rect.x1 - self.thickness,
                rect.y1 - self.thickness,
                rect.x1,
                rect.y1,
            )
        })
    }
}

impl Element for ScrollElement {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        self.refresh();
        let occluded = self.base.element_over();
        self.bars.set_element_over(occluded);
        self.bars.handle(input, ctx);

        let (x, y) = (input.mouse_x(), input.mouse_y());
        let viewport = self.viewport();
        if viewport.contains(x, y) {
            let bar = if self.vertical_on {
                Some(&self.vertical)
            } else if self.horizontal_on {
                Some(&self.horizontal)
            } else {
                None
            };
            if let Some(bar) = bar {
                if self.base.wheel_up() {
                    bar.borrow_mut().scroll_by(-WHEEL_STEP);
                } else if self.base.wheel_down() {
                    bar.borrow_mut().scroll_by(WHEEL_STEP);
                }
            }
        }
        self.apply();

        if let Some(link) = &self.content {
            with_element_mut(link, |content| {
                content.set_element_over(occluded || !viewport.contains(x, y));
                dispatch_handle(content, input, ctx);
            });
        }
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        if let Some(link) = &self.content {
            with_smallest_scissor(drawer, self.viewport(), |drawer| {
                with_element(link, |content| dispatch_draw(content, drawer));
            });
        }
        self.bars.draw(drawer);
        if let Some(corner) = self.corner() {
            drawer.draw_gui_part(GuiPart::ScrollCorner, corner, PartState::default());
        }
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.bars.move_by(dx, dy);
        if let Some(link) = &self.content {
            with_element_mut(link, |content| content.move_by(dx, dy));
        }
    }

    fn resize(&mut self, rect: Rect) {
        self.base.set_rect(rect);
        self.refresh();
        self.apply();
    }

    fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        if let Some(hit) = self.bars.hit_test(x, y) {
            return Some(hit);
        }
        if !self.viewport().contains(x, y) {
            return None;
        }
        let link = self.content.as_ref()?;
        let handle = link.upgrade()?;
        let hit = with_element(link, |content| {
            hittable(content, x, y).then(|| content.hit_test(x, y))
        })??;
        Some(hit.unwrap_or(handle))
    }

    fn set_element_over(&mut self, over: bool) {
        self.base.set_element_over(over);
        self.bars.set_element_over(over);
        if let Some(link) = &self.content {
            with_element_mut(link, |content| content.set_element_over(over));
        }
    }
}
