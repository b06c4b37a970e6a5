use std::rc::Rc;

use crate::draw::Drawer;
use crate::element::{
    ElementHandle, WeakElement, dispatch_draw, hittable, same_weak, with_element,
};

#[derive(Default)]
pub struct HoverManager {
    collecting: Vec<WeakElement>,
    shown: Vec<WeakElement>,
}

impl HoverManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `element` as an overlay for the frame being handled.
    /// Registering the same element twice in one frame has no extra effect.
    pub fn add(&mut self, element: &ElementHandle) {
        let link = Rc::downgrade(element);
        if !self.collecting.iter().any(|known| same_weak(known, &link)) {
            self.collecting.push(link);
        }
    }

    pub(crate) fn begin_frame(&mut self) {
        self.collecting.clear();
    }

    /// Make the overlays collected this frame the ones on screen.
    pub(crate) fn end_frame(&mut self) {
        self.shown = std::mem::take(&mut self.collecting);
    }

    /// Number of live overlays shown this frame.
    pub fn len(&self) -> usize {
        self.shown.iter().filter(|link| link.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topmost overlay (or a descendant of it) under the pointer. Later
    /// registrations sit above earlier ones.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.shown.iter().rev().find_map(|link| {
            let handle = link.upgrade()?;
            let hit = with_element(link, |element| {
                hittable(element, x, y).then(|| element.hit_test(x, y))
            })??;
            Some(hit.unwrap_or(handle))
        })
    }

    pub fn covers(&self, x: i32, y: i32) -> bool {
        self.shown.iter().any(|link| {
            with_element(link, |element| hittable(element, x, y)).unwrap_or(false)
        })
    }

    pub fn draw(&self, drawer: &mut dyn Drawer) {
        for link in &self.shown {
            with_element(link, |element| dispatch_draw(element, drawer));
        }
    }
}

/// State handed to every element during `handle`, scoped to one root.
#[derive(Default)]
pub struct FrameContext {
    hover: HoverManager,
}

impl FrameContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `element` as an overlay for the current frame only.
    pub fn add_hover_element(&mut self, element: &ElementHandle) {
        self.hover.add(element);
    }

    pub fn hover(&self) -> &HoverManager {
        &self.hover
    }

    pub(crate) fn hover_mut(&mut self) -> &mut HoverManager {
        &mut self.hover
    }
}
