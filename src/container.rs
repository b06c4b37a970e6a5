//! Public ordered collection of elements with pointer arbitration.
//!
//! Every frame the container decides which single child owns the pointer:
//!
//! 1. Grab pass, top to bottom. Each child's arbitration state is advanced
//!    from raw shape containment of the left button. The first child found
//!    grabbed claims the press, so lower children see it as elsewhere.
//! 2. Hover pass, only without a grab winner: the topmost child whose shape
//!    contains the pointer.
//! 3. Every child but the winner is marked `element_over`.
//! 4. A floating winner pressed this very frame is raised to the top.
//! 5. Every child is dispatched, occluded or not.
//!
//! An occluded container has no winner at all; everything inside it behaves
//! as if the pointer were elsewhere.

use std::rc::Rc;

use crossterm::event::MouseButton;

use crate::draw::{Drawer, with_smallest_scissor};
use crate::element::{
    Element, ElementBase, ElementHandle, WeakElement, hittable, same_weak, with_element,
    with_element_mut,
};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::internal_container::InternalContainer;
use crate::mouse_state::MouseSample;
use crate::sticky::Sticky;

pub struct Container {
    base: ElementBase,
    children: InternalContainer,
    owner: Option<WeakElement>,
    grab: Option<WeakElement>,
}

impl Container {
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            children: InternalContainer::new(),
            owner: None,
            grab: None,
        }
    }

    /// Add `child` on top, pinned to its current pixel position.
    pub fn push_top(&mut self, child: &ElementHandle) {
        self.push_top_with(child, Sticky::fixed());
    }

    pub fn push_top_with(&mut self, child: &ElementHandle, sticky: Sticky) {
        tracing::debug!(len = self.children.len(), "child pushed on top");
        self.children.push(Rc::downgrade(child), sticky);
    }

    /// Move `child` to `(x, y)` relative to this container's origin, then
    /// push it on top.
    pub fn push_top_at(&mut self, child: &ElementHandle, x: i32, y: i32) {
        let (x, y) = (self.base.x0() + x, self.base.y0() + y);
        if let Ok(mut element) = child.try_borrow_mut() {
            element.move_to(x, y);
        }
        self.push_top(child);
    }

    /// Push on top with every edge kept at its current proportion of this
    /// container, so the child scales with it.
    pub fn push_top_relative(&mut self, child: &ElementHandle) {
        let sticky = Sticky::relative(rect_of(child), self.base.rect());
        self.push_top_with(child, sticky);
    }

    /// Push on top with each edge tracking the matching container edge.
    pub fn push_top_full(&mut self, child: &ElementHandle) {
        let sticky = Sticky::full(rect_of(child), self.base.rect());
        self.push_top_with(child, sticky);
    }

    /// Add `child` below everything else.
    pub fn push_bottom(&mut self, child: &ElementHandle) {
        self.insert(0, child, Sticky::fixed());
    }

    pub fn insert(&mut self, index: usize, child: &ElementHandle, sticky: Sticky) {
        tracing::debug!(index, "child inserted");
        self.children
            .insert(index, Rc::downgrade(child), sticky);
    }

    /// Detach `child`. The element keeps existing for whoever owns it.
    pub fn remove(&mut self, child: &ElementHandle) -> bool {
        let removed = self.children.remove(&Rc::downgrade(child));
        if removed {
            tracing::debug!(len = self.children.len(), "child removed");
        }
        removed
    }

    pub fn contains(&self, child: &ElementHandle) -> bool {
        self.children.contains(&Rc::downgrade(child))
    }

    pub fn index_of(&self, child: &ElementHandle) -> Option<usize> {
        self.children.index_of(&Rc::downgrade(child))
    }

    pub fn set_sticky(&mut self, child: &ElementHandle, sticky: Sticky) -> bool {
        self.children
            .set_sticky(&Rc::downgrade(child), sticky)
    }

    pub fn sticky(&self, child: &ElementHandle) -> Option<Sticky> {
        self.children.sticky(&Rc::downgrade(child))
    }

    pub fn bring_to_top(&mut self, child: &ElementHandle) -> bool {
        match self.index_of(child) {
            Some(index) => {
                self.children.bring_to_top(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn clear(&mut self) {
        self.children.clear();
        self.owner = None;
        self.grab = None;
    }

    /// Live children, bottom first.
    pub fn children(&self) -> Vec<ElementHandle> {
        self.children
            .links()
            .filter_map(|link| link.upgrade())
            .collect()
    }

    /// Child that owned the pointer after the last `handle`.
    pub fn owner(&self) -> Option<ElementHandle> {
        self.owner.as_ref().and_then(|link| link.upgrade())
    }

    /// Bounding box of the present children.
    pub fn children_bounds(&self) -> Option<Rect> {
        self.children.bounding_box()
    }

    /// Set the children's enabled flags all at once.
    pub fn set_children_enabled(&mut self, enabled: bool) {
        self.children.set_enabled(enabled);
    }

    /// Grab pass then hover pass. Returns the winning index.
    fn arbitrate(&mut self, input: &dyn InputSource) -> Option<usize> {
        self.children.prune();
        let occluded = self.base.element_over();
        let (x, y) = (input.mouse_x(), input.mouse_y());
        let down = input.mouse_button_down(MouseButton::Left);
        let seconds = input.seconds();

        let links: Vec<WeakElement> = self.children.links().cloned().collect();
        let mut claimed = occluded;
        let mut winner = None;
        for (index, link) in links.iter().enumerate().rev() {
            let grabbed = with_element_mut(link, |child| {
                let over = hittable(child, x, y);
                let base = child.base_mut();
                let origin = (base.x0(), base.y0());
                let sample = MouseSample {
                    x,
                    y,
                    over,
                    down,
                    seconds,
                };
                base.arbitration_mut().update(sample, origin, !claimed);
                base.arbitration().grabbed()
            })
            .unwrap_or(false);
            if grabbed && winner.is_none() {
                winner = Some(index);
                claimed = true;
            }
        }

        self.track_grab(winner.map(|index| links[index].clone()));

        // A grab survives occlusion in the child's own state, but the child
        // still sees the pointer as not over it.
        if occluded {
            return None;
        }
        if winner.is_none() {
            winner = links.iter().rposition(|link| {
                with_element(link, |child| hittable(child, x, y)).unwrap_or(false)
            });
        }
        winner
    }

    fn track_grab(&mut self, grab: Option<WeakElement>) {
        match (&self.grab, &grab) {
            (None, Some(_)) => tracing::debug!("grab started"),
            (Some(_), None) => tracing::debug!("grab released"),
            (Some(old), Some(new)) if !same_weak(old, new) => {
                tracing::debug!("grab moved to another child")
            }
            _ => {}
        }
        self.grab = grab;
    }
}

fn rect_of(child: &ElementHandle) -> Rect {
    child
        .try_borrow()
        .map(|element| element.base().rect())
        .unwrap_or_default()
}

impl Element for Container {
    fn base(&self) -> &ElementBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ElementBase {
        &mut self.base
    }

    fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        let winner = self.arbitrate(input);

        for (index, link) in self.children.links().enumerate() {
            let occluded = Some(index) != winner;
            with_element_mut(link, |child| child.set_element_over(occluded));
        }

        self.owner = winner.and_then(|index| self.children.links().nth(index).cloned());

        if let Some(index) = winner {
            let raise = self
                .children
                .links()
                .nth(index)
                .and_then(|link| {
                    with_element(link, |child| {
                        child.is_floating() && child.base().arbitration().just_down_here()
                    })
                })
                .unwrap_or(false);
            if raise && index + 1 < self.children.links().count() {
                tracing::debug!(from = index, "bringing floating child to top");
                self.children.bring_to_top(index);
            }
        }

        self.children.handle(input, ctx);
    }

    fn draw(&self, drawer: &mut dyn Drawer) {
        with_smallest_scissor(drawer, self.base.rect(), |drawer| self.children.draw(drawer));
    }

    fn move_by(&mut self, dx: i32, dy: i32) {
        self.base.translate(dx, dy);
        self.children.move_by(dx, dy);
    }

    fn resize(&mut self, rect: Rect) {
        let old = self.base.set_rect(rect);
        self.children.resize(old, self.base.rect());
    }

    fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.children.hit_test(x, y)
    }

    /// Occluding a container occludes everything in it at once. Clearing the
    /// flag leaves the children to the next arbitration pass.
    fn set_element_over(&mut self, over: bool) {
        self.base.set_element_over(over);
        if over {
            self.children.set_element_over(true);
        }
    }
}
