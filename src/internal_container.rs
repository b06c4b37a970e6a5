use crate::draw::Drawer;
use crate::element::{
    ElementHandle, WeakElement, dispatch_draw, dispatch_handle, hittable, same_weak,
    with_element, with_element_mut,
};
use crate::geometry::Rect;
use crate::hover::FrameContext;
use crate::input::InputSource;
use crate::sticky::Sticky;

#[derive(Clone)]
struct Entry {
    link: WeakElement,
    sticky: Sticky,
}

#[derive(Default, Clone)]
pub struct InternalContainer {
    entries: Vec<Entry>,
}

impl InternalContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live children.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.link.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Child at z-position `index`, if it is still alive.
    pub fn get(&self, index: usize) -> Option<ElementHandle> {
        self.entries.get(index).and_then(|entry| entry.link.upgrade())
    }

    pub fn links(&self) -> impl Iterator<Item = &WeakElement> {
        self.entries.iter().map(|entry| &entry.link)
    }

    pub fn index_of(&self, link: &WeakElement) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| same_weak(&entry.link, link))
    }

    pub fn contains(&self, link: &WeakElement) -> bool {
        self.index_of(link).is_some()
    }

    /// Put `link` on top. A child that is already present moves to the top
    /// and takes the new anchor.
    pub fn push(&mut self, link: WeakElement, sticky: Sticky) {
        self.remove(&link);
        self.entries.push(Entry { link, sticky });
    }

    /// Insert at z-position `index`, clamped to the current length.
    pub fn insert(&mut self, index: usize, link: WeakElement, sticky: Sticky) {
        self.remove(&link);
        let index = index.min(self.entries.len());
        self.entries.insert(index, Entry { link, sticky });
    }

    /// Detach `link` and its anchor. The element itself is untouched.
    pub fn remove(&mut self, link: &WeakElement) -> bool {
        match self.index_of(link) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn sticky(&self, link: &WeakElement) -> Option<Sticky> {
        self.index_of(link).map(|index| self.entries[index].sticky)
    }

    pub fn set_sticky(&mut self, link: &WeakElement, sticky: Sticky) -> bool {
        match self.index_of(link) {
            Some(index) => {
                self.entries[index].sticky = sticky;
                true
            }
            None => false,
        }
    }

    /// Move the child at `index` to the top of the stack.
    pub fn bring_to_top(&mut self, index: usize) {
        if index < self.entries.len() {
            let entry = self.entries.remove(index);
            self.entries.push(entry);
        }
    }

    /// Forget children whose owners dropped them.
    pub fn prune(&mut self) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.link.strong_count() > 0);
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::trace!(dropped, "pruned dead children");
        }
    }

    /// Re-anchor every child after the parent went from `old` to `new`.
    pub fn resize(&mut self, old: Rect, new: Rect) {
        for entry in &self.entries {
            with_element_mut(&entry.link, |child| {
                let target = entry.sticky.resolve(child.base().rect(), old, new);
                child.resize(target);
            });
        }
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        for entry in &self.entries {
            with_element_mut(&entry.link, |child| child.move_by(dx, dy));
        }
    }

    /// Bottom to top, every child gets its frame update.
    pub fn handle(&mut self, input: &dyn InputSource, ctx: &mut FrameContext) {
        self.prune();
        for entry in &self.entries {
            with_element_mut(&entry.link, |child| dispatch_handle(child, input, ctx));
        }
    }

    /// Bottom to top, so later children paint over earlier ones.
    pub fn draw(&self, drawer: &mut dyn Drawer) {
        for entry in &self.entries {
            with_element(&entry.link, |child| dispatch_draw(child, drawer));
        }
    }

    /// Topmost visible child under the point, or the deepest descendant of
    /// it that reports one.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<ElementHandle> {
        self.entries.iter().rev().find_map(|entry| {
            let handle = entry.link.upgrade()?;
            let hit = with_element(&entry.link, |child| {
                hittable(child, x, y).then(|| child.hit_test(x, y))
            })??;
            Some(hit.unwrap_or(handle))
        })
    }

    pub fn set_element_over(&mut self, over: bool) {
        for entry in &self.entries {
            with_element_mut(&entry.link, |child| child.set_element_over(over));
        }
    }

    /// Enable or disable every child at once.
    pub fn set_enabled(&mut self, enabled: bool) {
        for entry in &self.entries {
            with_element_mut(&entry.link, |child| child.base_mut().set_enabled(enabled));
        }
    }

    /// Smallest rectangle covering every present child.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.entries
            .iter()
            .filter_map(|entry| {
                with_element(&entry.link, |child| {
                    child.base().is_present().then(|| child.base().rect())
                })
                .flatten()
            })
            .reduce(|acc, rect| acc.union(rect))
    }
}
