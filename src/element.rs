use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crossterm::event::MouseButton;

use crate::draw::Drawer;
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::mouse_state::{MouseSample, MouseState};

pub type Shared<E> = Rc<RefCell<E>>;
pub type ElementHandle = Rc<RefCell<dyn Element>>;
pub type WeakElement = Weak<RefCell<dyn Element>>;

/// Wrap an element in an owning handle.
pub fn shared<E: Element + 'static>(element: E) -> Shared<E> {
    Rc::new(RefCell::new(element))
}

/// Type-erased clone of a typed handle.
pub fn erase<E: Element + 'static>(element: &Shared<E>) -> ElementHandle {
    element.clone()
}

/// Weak link to a typed handle, as stored by containers.
pub fn downgrade<E: Element + 'static>(element: &Shared<E>) -> WeakElement {
    let erased: ElementHandle = element.clone();
    Rc::downgrade(&erased)
}

/// True when both handles point at the same element.
pub fn same_element(a: &ElementHandle, b: &ElementHandle) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

pub(crate) fn same_weak(a: &WeakElement, b: &WeakElement) -> bool {
    std::ptr::addr_eq(a.as_ptr(), b.as_ptr())
}

/// Run `f` on a live, not currently borrowed element. Dead links and
/// re-entrant borrows both read as "absent".
pub(crate) fn with_element_mut<R>(
    link: &WeakElement,
    f: impl FnOnce(&mut dyn Element) -> R,
) -> Option<R> {
    let rc = link.upgrade()?;
    let Ok(mut element) = rc.try_borrow_mut() else {
        tracing::warn!("element is already borrowed; skipping it this pass");
        return None;
    };
    Some(f(&mut *element))
}

pub(crate) fn with_element<R>(link: &WeakElement, f: impl FnOnce(&dyn Element) -> R) -> Option<R> {
    let rc = link.upgrade()?;
    let Ok(element) = rc.try_borrow() else {
        tracing::warn!("element is mutably borrowed; skipping it this pass");
        return None;
    };
    Some(f(&*element))
}

pub const TRACKED_BUTTONS: [MouseButton; 3] =
    [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

const fn button_index(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right => 2,
    }
}

/// Geometry, flags and mouse memory shared by every element.
#[derive(Debug, Clone)]
pub struct ElementBase {
    rect: Rect,
    min_width: i32,
    min_height: i32,
    visible: bool,
    active: bool,
    present: bool,
    element_over: bool,
    over: bool,
    wheel_up: bool,
    wheel_down: bool,
    mouse: [MouseState; 3],
    arbitration: MouseState,
}

impl ElementBase {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            min_width: 0,
            min_height: 0,
            visible: true,
            active: true,
            present: true,
            element_over: false,
            over: false,
            wheel_up: false,
            wheel_down: false,
            mouse: [MouseState::new(); 3],
            arbitration: MouseState::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x0(&self) -> i32 {
        self.rect.x0
    }

    pub fn y0(&self) -> i32 {
        self.rect.y0
    }

    pub fn x1(&self) -> i32 {
        self.rect.x1
    }

    pub fn y1(&self) -> i32 {
        self.rect.y1
    }

    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    pub fn height(&self) -> i32 {
        self.rect.height()
    }

    pub fn min_size(&self) -> (i32, i32) {
        (self.min_width, self.min_height)
    }

    /// Set the minimum size and grow the current rectangle if it is smaller.
    pub fn set_min_size(&mut self, width: i32, height: i32) {
        self.min_width = width.max(0);
        self.min_height = height.max(0);
        self.rect = self.rect.with_min_size(self.min_width, self.min_height);
    }

    /// Apply a new rectangle, clamped to the minimum size. Returns the
    /// rectangle the element had before.
    pub fn set_rect(&mut self, rect: Rect) -> Rect {
        let old = self.rect;
        self.rect = rect.with_min_size(self.min_width, self.min_height);
        old
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.rect = self.rect.translated(dx, dy);
    }

    /// Shape containment, ignoring flags and occlusion.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn set_present(&mut self, present: bool) {
        self.present = present;
    }

    pub fn is_enabled(&self) -> bool {
        self.visible && self.active && self.present
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.visible = enabled;
        self.active = enabled;
        self.present = enabled;
    }

    /// Another element is in front of this one for the current frame.
    pub fn element_over(&self) -> bool {
        self.element_over
    }

    pub fn set_element_over(&mut self, over: bool) {
        self.element_over = over;
    }

    /// Sample this frame's input into the per-button state machines.
    pub fn sample(&mut self, input: &dyn InputSource) {
        let (x, y) = (input.mouse_x(), input.mouse_y());
        self.over = self.visible && self.present && !self.element_over && self.contains(x, y);
        self.wheel_up = self.over && input.mouse_wheel_up();
        self.wheel_down = self.over && input.mouse_wheel_down();
        let origin = (self.rect.x0, self.rect.y0);
        for button in TRACKED_BUTTONS {
            let sample = MouseSample {
                x,
                y,
                over: self.over,
                down: input.mouse_button_down(button),
                seconds: input.seconds(),
            };
            self.mouse[button_index(button)].update(sample, origin, true);
        }
    }

    pub fn mouse_state(&self, button: MouseButton) -> &MouseState {
        &self.mouse[button_index(button)]
    }

    /// State used by the parent container to decide who owns the pointer.
    pub fn arbitration(&self) -> &MouseState {
        &self.arbitration
    }

    pub(crate) fn arbitration_mut(&mut self) -> &mut MouseState {
        &mut self.arbitration
    }

    /// Pointer over the element this frame and nothing in front of it.
    pub fn mouse_over(&self) -> bool {
        self.over
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.over && self.mouse_state(button).grabbed()
    }

    pub fn mouse_just_down_here(&self, button: MouseButton) -> bool {
        self.mouse_state(button).just_down_here()
    }

    pub fn mouse_just_up_here(&self, button: MouseButton) -> bool {
        self.mouse_state(button).just_up_here()
    }

    pub fn mouse_down_elsewhere(&self, button: MouseButton) -> bool {
        self.mouse_state(button).just_down_elsewhere()
    }

    pub fn clicked(&self, button: MouseButton) -> bool {
        self.mouse_state(button).clicked()
    }

    pub fn double_clicked(&self, button: MouseButton) -> bool {
        self.mouse_state(button).double_clicked()
    }

    pub fn grabbed(&self, button: MouseButton) -> bool {
        self.mouse_state(button).grabbed()
    }

    pub fn grab_offset(&self, button: MouseButton) -> (i32, i32) {
        self.mouse_state(button).grab_offset()
    }

    pub fn drag_delta(&self, button: MouseButton) -> (i32, i32) {
        self.mouse_state(button).drag_delta()
    }

    pub fn wheel_up(&self) -> bool {
        self.wheel_up
    }

    pub fn wheel_down(&self) -> bool {
        self.wheel_down
    }
}

pub trait Element {
    fn base(&self) -> &ElementBase;
    fn base_mut(&mut self) -> &mut ElementBase;

    /// Per-frame update. Runs after the base has sampled the frame's input.
    fn handle(&mut self, _input: &dyn InputSource, _ctx: &mut FrameContext) {}

    /// Draw the element. Drawing never changes interaction state.
    fn draw(&self, drawer: &mut dyn Drawer);

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.base_mut().translate(dx, dy);
    }

    fn move_to(&mut self, x: i32, y: i32) {
        let (dx, dy) = (x - self.base().x0(), y - self.base().y0());
        self.move_by(dx, dy);
    }

    /// Resize to `rect`, clamped to the minimum size. Composites also
    /// re-anchor their children.
    fn resize(&mut self, rect: Rect) {
        self.base_mut().set_rect(rect);
    }

    /// Deepest descendant under `(x, y)`. Leaves have none; the caller
    /// reports the element itself in that case.
    fn hit_test(&self, _x: i32, _y: i32) -> Option<ElementHandle> {
        None
    }

    /// Floating elements are raised to the top of their container when
    /// freshly pressed.
    fn is_floating(&self) -> bool {
        false
    }

    fn set_element_over(&mut self, over: bool) {
        self.base_mut().set_element_over(over);
    }
}

/// Sample input and run `handle` if the element takes part this frame.
pub fn dispatch_handle(
    element: &mut dyn Element,
    input: &dyn InputSource,
    ctx: &mut FrameContext,
) {
    if !element.base().is_present() {
        return;
    }
    element.base_mut().sample(input);
    if element.base().is_active() {
        element.handle(input, ctx);
    }
}

/// Draw the element if it is present and visible.
pub fn dispatch_draw(element: &dyn Element, drawer: &mut dyn Drawer) {
    let base = element.base();
    if base.is_present() && base.is_visible() {
        element.draw(drawer);
    }
}

/// Whether the element can be hit by the pointer at all.
pub(crate) fn hittable(element: &dyn Element, x: i32, y: i32) -> bool {
    let base = element.base();
    base.is_present() && base.is_visible() && base.contains(x, y)
}
