use crossterm::event::MouseButton;

use crate::constants::{SCROLL_SPEED, WHEEL_STEP};
use crate::draw::{Drawer, GuiPart, PartState};
use crate::element::{Element, ElementBase, ElementHandle, Shared, downgrade, shared};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::internal_container::InternalContainer;
use crate::sticky::Sticky;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Near and far edges of `rect` along the scrolling axis.
    fn span(self, rect: Rect) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (rect.x0, rect.x1),
            Orientation::Vertical => (rect.y0, rect.y1),
        }
    }

    /// Thickness of `rect` across the scrolling axis.
    fn thickness(self, rect: Rect) -> i32 {
        match self {
            Orientation::Horizontal => rect.height(),
            Orientation::Vertical => rect.width(),
        }
    }

    fn along(self, x: i32, y: i32) -> i32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }

    /// Sub-rectangle of `rect` covering `[near, far)` along the axis.
    fn slice(self, rect: Rect, near: i32, far: i32) -> Rect {
        match self {
            Orientation::Horizontal => Rect::new(near, rect.y0, far, rect.y1),
            Orientation::Vertical => Rect::new(rect.x0, near, rect.x1, far),
        }
    }

    fn track_part(self) -> GuiPart {
        match self {
            Orientation::Horizontal => GuiPart::ScrollTrackHorizontal,
            Orientation::Vertical => GuiPart::ScrollTrackVertical,
        }
    }

    fn arrow_parts(self) -> (GuiPart, GuiPart) {
        match self {
            Orientation::Horizontal => (GuiPart::ArrowLeft, GuiPart::ArrowRight),
            Orientation::Vertical => (GuiPart::ArrowUp, GuiPart::ArrowDown),
        }
    }
}

struct Arrow {
    base: ElementBase,
    part: GuiPart,
}

impl Element for Arrow {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let state = PartState::new(
            self.base.mouse_over(),
            self.base.grabbed(MouseButton::Left),
        );
        drawer.draw_gui_part(self.part, self.base.rect(), state);
    }
}

struct Scroller {
    base: ElementBase,
}

impl Element for Scroller {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let state = PartState::new(
            self.base.mouse_over(),
            self.base.grabbed(MouseButton::Left),
        );
        drawer.draw_gui_part(GuiPart::Scroller, self.base.rect(), state);
    }
}

pub struct Scrollbar {
    base: ElementBase,
    orientation: Orientation,
    back: Shared<Arrow>,
    forward: Shared<Arrow>,
    scroller: Shared<Scroller>,
    parts: InternalContainer,
    page: i32,
    scroll_size: i32,
    pos: f64,
    scroll_speed: f64,
    last_seconds: Option<f64>,
}

impl Scrollbar {
    pub fn new(orientation: Orientation, rect: Rect) -> Self {
        let (back_part, forward_part) = orientation.arrow_parts();
        let back = shared(Arrow {
            base: ElementBase::new(rect),
            part: back_part,
        });
        let forward = shared(Arrow {
            base: ElementBase::new(rect),
            part: forward_part,
        });
        let scroller = shared(Scroller {
            base: ElementBase::new(rect),
        });
        let mut parts = InternalContainer::new();
        parts.push(downgrade(&back), Sticky::fixed());
        parts.push(downgrade(&forward), Sticky::fixed());
        parts.push(downgrade(&scroller), Sticky::fixed());
        let mut bar = Self {
            base: ElementBase::new(rect),
            orientation,
            back,
            forward,
            scroller,
            parts,
            page: 0,
            scroll_size: 1,
            pos: 0.0,
            scroll_speed: SCROLL_SPEED,
            last_seconds: None,
        };
        bar.layout();
        bar
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Describe the scrolled content: `page` units are visible out of
    /// `content` units in total.
    pub fn set_range(&mut self, page: i32, content: i32) {
        self.page = page.max(0);
        self.scroll_size = (content - self.page).max(1);
        self.pos = self.pos.clamp(0.0, self.scroll_size as f64);
        self.layout();
    }

    pub fn page(&self) -> i32 {
        self.page
    }

    pub fn scroll_size(&self) -> i32 {
        self.scroll_size
    }

    pub fn scroll_pos(&self) -> i32 {
        self.pos.round() as i32
    }

    pub fn set_scroll_pos(&mut self, pos: i32) {
        self.pos = f64::from(pos).clamp(0.0, self.scroll_size as f64);
        self.layout();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.pos = (self.pos + delta).clamp(0.0, self.scroll_size as f64);
        self.layout();
    }

    /// Units per second scrolled while an arrow is held.
    pub fn set_scroll_speed(&mut self, speed: f64) {
        self.scroll_speed = speed.max(0.0);
    }

    pub fn scroller_rect(&self) -> Rect {
        self.scroller.borrow().base.rect()
    }

    fn arrow_len(&self) -> i32 {
        let rect = self.base.rect();
        let (near, far) = self.orientation.span(rect);
        self.orientation.thickness(rect).min((far - near) / 2).max(0)
    }

    /// Track between the two arrows, as `(near, far)` along the axis.
    fn track(&self) -> (i32, i32) {
        let (near, far) = self.orientation.span(self.base.rect());
        let arrow = self.arrow_len();
        (near + arrow, far - arrow)
    }

    fn scroller_len(&self) -> i32 {
        let (near, far) = self.track();
        let track = (far - near).max(0);
        let total = (self.page + self.scroll_size).max(1);
        (track * self.page / total).clamp(track.min(1), track)
    }

    /// Place arrows and scroller for the current geometry and position.
    fn layout(&mut self) {
        let rect = self.base.rect();
        let (near, far) = self.orientation.span(rect);
        let arrow = self.arrow_len();
        let (track_near, track_far) = self.track();
        let len = self.scroller_len();
        let travel = (track_far - track_near - len).max(0);
        let start =
            track_near + (f64::from(travel) * self.pos / self.scroll_size as f64).round() as i32;

        self.back
            .borrow_mut()
            .base
            .set_rect(self.orientation.slice(rect, near, near + arrow));
        self.forward
            .borrow_mut()
            .base
            .set_rect(self.orientation.slice(rect, far - arrow, far));
        let mut scroller = self.scroller.borrow_mut();
        scroller
            .base
            .set_rect(self.orientation.slice(rect, start, start + len));
        scroller.base.set_visible(len > 0);
    }

    fn drag_scroller(&mut self, input: &dyn InputSource) {
        let (grab_x, grab_y) = self.scroller.borrow().base.grab_offset(MouseButton::Left);
        let grab = self.orientation.along(grab_x, grab_y);
        let pointer = self.orientation.along(input.mouse_x(), input.mouse_y());
        let (track_near, track_far) = self.track();
        let travel = (track_far - track_near - self.scroller_len()).max(1);
        let offset = (pointer - grab - track_near).clamp(0, travel);
        self.pos = f64::from(offset) * self.scroll_size as f64 / f64::from(travel);
        self.pos = self.pos.clamp(0.0, self.scroll_size as f64);
    }

    fn page_towards(&mut self, input: &dyn InputSource) {
        let pointer = self.orientation.along(input.mouse_x(), input.mouse_y());
        let (scroller_near, _) = self.orientation.span(self.scroller_rect());
        let page = f64::from(self.page.max(1));
        if pointer < scroller_near {
            self.scroll_by(-page);
        } else {
            self.scroll_by(page);
        }
    }
}

impl Element for Scrollbar {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        self.layout();
        self.parts.handle(input, ctx);

        let now = input.seconds();
        let elapsed = self.last_seconds.map_or(0.0, |last| (now - last).max(0.0));
        self.last_seconds = Some(now);

        let step = self.scroll_speed * elapsed;
        for (arrow, sign) in [(self.back.clone(), -1.0), (self.forward.clone(), 1.0)] {
            let (pressed, held) = {
                let arrow = arrow.borrow();
                (
                    arrow.base.mouse_just_down_here(MouseButton::Left),
                    arrow.base.grabbed(MouseButton::Left),
                )
            };
            if pressed {
                self.scroll_by(sign);
            } else if held {
                self.scroll_by(sign * step);
            }
        }

        if self.scroller.borrow().base.grabbed(MouseButton::Left) {
            self.drag_scroller(input);
        } else if self.base.mouse_just_down_here(MouseButton::Left)
            && self.parts.hit_test(input.mouse_x(), input.mouse_y()).is_none()
        {
            self.page_towards(input);
        }

        if self.base.wheel_up() {
            self.scroll_by(-WHEEL_STEP);
        } else if self.base.wheel_down() {
            self.scroll_by(WHEEL_STEP);
        }
        self.layout();
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        let state = PartState::new(self.base.mouse_over(), false);
        drawer.draw_gui_part(self.orientation.track_part(), self.base.rect(), state);
        self.parts.draw(drawer);
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.parts.move_by(dx, dy);
    }

    fn resize(&mut self, rect: Rect) {
        self.base.set_rect(rect);
        self.layout();
    }

    fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.parts.hit_test(x, y)
    }

    fn set_element_over(&mut self, over: bool) {
        self.base.set_element_over(over);
        self.parts.set_element_over(over);
    }
}
