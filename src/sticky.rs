//! Anchor descriptors deciding how a child's edges respond when its parent
//! moves or resizes.
//!
//! Each of the four edges carries a fraction, a pixel offset and a follow
//! flag. A floating edge (follow = false) is recomputed from the parent's new
//! rectangle: `near + fraction * size + offset`. A following edge keeps its
//! own absolute value and only shifts by a blend of the parent's near and far
//! edge deltas, weighted by the same fraction.

use crate::geometry::Rect;

// Guards against `0.57 * 100.0 == 56.99999999999999` style truncation.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnchor {
    pub fraction: f64,
    pub offset: i32,
    pub follow: bool,
}

impl EdgeAnchor {
    pub const fn floating(fraction: f64, offset: i32) -> Self {
        Self {
            fraction,
            offset,
            follow: false,
        }
    }

    pub const fn following(fraction: f64) -> Self {
        Self {
            fraction,
            offset: 0,
            follow: true,
        }
    }

    /// New position of one edge on one axis.
    ///
    /// `old_near`/`old_far` and `new_near`/`new_far` are the parent's edges on
    /// the same axis before and after the change.
    pub fn resolve(
        &self,
        old_edge: i32,
        old_near: i32,
        old_far: i32,
        new_near: i32,
        new_far: i32,
    ) -> i32 {
        if self.follow {
            let d_near = (new_near - old_near) as f64;
            let d_far = (new_far - old_far) as f64;
            let shift = d_near * (1.0 - self.fraction) + d_far * self.fraction;
            old_edge + shift.round() as i32
        } else {
            let size = (new_far - new_near) as f64;
            new_near + (self.fraction * size + EPSILON).floor() as i32 + self.offset
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sticky {
    pub left: EdgeAnchor,
    pub top: EdgeAnchor,
    pub right: EdgeAnchor,
    pub bottom: EdgeAnchor,
}

impl Sticky {
    pub const fn new(
        left: EdgeAnchor,
        top: EdgeAnchor,
        right: EdgeAnchor,
        bottom: EdgeAnchor,
    ) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Every edge keeps the same proportion of the parent it has now, so the
    /// child scales with the parent.
    pub fn relative(child: Rect, parent: Rect) -> Self {
        // Zero-sized parents would divide by zero; treat them as one unit.
        let width = parent.width().max(1) as f64;
        let height = parent.height().max(1) as f64;
        Self {
            left: EdgeAnchor::floating((child.x0 - parent.x0) as f64 / width, 0),
            top: EdgeAnchor::floating((child.y0 - parent.y0) as f64 / height, 0),
            right: EdgeAnchor::floating((child.x1 - parent.x0) as f64 / width, 0),
            bottom: EdgeAnchor::floating((child.y1 - parent.y0) as f64 / height, 0),
        }
    }

    /// Each child edge tracks the matching parent edge at a fixed pixel
    /// distance: near edges follow the parent's near edges, far edges the far
    /// ones. Used by the built-in composites for their parts.
    pub fn full(child: Rect, parent: Rect) -> Self {
        Self::tied(child, parent, [0.0, 0.0, 1.0, 1.0])
    }

    /// Each edge keeps its current pixel distance to a point on the parent
    /// chosen by its fraction, given as `[left, top, right, bottom]`: 0.0 is
    /// the parent's near edge, 1.0 the far one. A close button tied with
    /// `[1.0, 0.0, 1.0, 0.0]` stays in the top-right corner.
    pub fn tied(child: Rect, parent: Rect, fractions: [f64; 4]) -> Self {
        let [left, top, right, bottom] = fractions;
        let edge = |fraction: f64, value: i32, near: i32, far: i32| {
            let size = (far - near) as f64;
            let at = near + (fraction * size + EPSILON).floor() as i32;
            EdgeAnchor::floating(fraction, value - at)
        };
        Self {
            left: edge(left, child.x0, parent.x0, parent.x1),
            top: edge(top, child.y0, parent.y0, parent.y1),
            right: edge(right, child.x1, parent.x0, parent.x1),
            bottom: edge(bottom, child.y1, parent.y0, parent.y1),
        }
    }

    /// Keeps size and offset from the parent's top-left corner, pinned to the
    /// pixel.
    pub const fn fixed() -> Self {
        Self {
            left: EdgeAnchor::following(0.0),
            top: EdgeAnchor::following(0.0),
            right: EdgeAnchor::following(0.0),
            bottom: EdgeAnchor::following(0.0),
        }
    }

    /// All edges follow, each blended by its own fraction.
    pub const fn following(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: EdgeAnchor::following(left),
            top: EdgeAnchor::following(top),
            right: EdgeAnchor::following(right),
            bottom: EdgeAnchor::following(bottom),
        }
    }

    /// Where `child` lands after its parent went from `old_parent` to
    /// `new_parent`. The result is not clamped; the child's own `resize`
    /// applies its minimum size.
    pub fn resolve(&self, child: Rect, old_parent: Rect, new_parent: Rect) -> Rect {
        let (ox0, ox1, nx0, nx1) = (old_parent.x0, old_parent.x1, new_parent.x0, new_parent.x1);
        let (oy0, oy1, ny0, ny1) = (old_parent.y0, old_parent.y1, new_parent.y0, new_parent.y1);
        Rect {
            x0: self.left.resolve(child.x0, ox0, ox1, nx0, nx1),
            y0: self.top.resolve(child.y0, oy0, oy1, ny0, ny1),
            x1: self.right.resolve(child.x1, ox0, ox1, nx0, nx1),
            y1: self.bottom.resolve(child.y1, oy0, oy1, ny0, ny1),
        }
    }
}

impl Default for Sticky {
    fn default() -> Self {
        Self::fixed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_round_trip_restores_child() {
        let parent = Rect::new(0, 0, 200, 100);
        let child = Rect::new(10, 5, 190, 95);
        let sticky = Sticky::full(child, parent);
        let grown = Rect::new(-20, 10, 320, 260);
        let moved = sticky.resolve(child, parent, grown);
        assert_eq!(moved, Rect::new(-10, 15, 310, 255));
        assert_eq!(sticky.resolve(moved, grown, parent), child);
    }

    #[test]
    fn half_fraction_lands_on_parent_middle() {
        let sticky = Sticky::new(
            EdgeAnchor::floating(0.5, 3),
            EdgeAnchor::floating(0.0, 0),
            EdgeAnchor::floating(0.5, 10),
            EdgeAnchor::floating(1.0, 0),
        );
        let old = Rect::new(0, 0, 100, 100);
        for width in [1, 2, 7, 64, 101, 333] {
            let parent = Rect::new(40, 0, 40 + width, 50);
            let r = sticky.resolve(Rect::new(0, 0, 10, 10), old, parent);
            assert_eq!(r.x0, parent.x0 + width / 2 + 3, "width {width}");
            assert_eq!(r.x1, parent.x0 + width / 2 + 10, "width {width}");
        }
    }

    #[test]
    fn follow_edges_blend_parent_deltas() {
        let old = Rect::new(0, 0, 100, 100);
        let new = Rect::new(4, 0, 130, 100);
        let near = EdgeAnchor::following(0.0);
        let far = EdgeAnchor::following(1.0);
        let mid = EdgeAnchor::following(0.5);
        assert_eq!(near.resolve(50, old.x0, old.x1, new.x0, new.x1), 54);
        assert_eq!(far.resolve(50, old.x0, old.x1, new.x0, new.x1), 80);
        assert_eq!(mid.resolve(50, old.x0, old.x1, new.x0, new.x1), 67);
    }

    #[test]
    fn follow_edges_ignore_offset_and_keep_absolute_value() {
        let anchor = EdgeAnchor {
            fraction: 0.0,
            offset: 999,
            follow: true,
        };
        assert_eq!(anchor.resolve(17, 0, 10, 0, 50), 17);
    }

    #[test]
    fn relative_is_stable_for_awkward_fractions() {
        let parent = Rect::new(0, 0, 100, 100);
        let child = Rect::new(57, 29, 83, 71);
        let sticky = Sticky::relative(child, parent);
        assert_eq!(sticky.resolve(child, parent, parent), child);
    }

    #[test]
    fn relative_tolerates_zero_sized_parent() {
        let parent = Rect::new(5, 5, 5, 5);
        let sticky = Sticky::relative(Rect::new(5, 5, 6, 6), parent);
        assert!(sticky.left.fraction.is_finite());
    }

    #[test]
    fn tied_corner_stays_in_corner() {
        let parent = Rect::new(0, 0, 40, 20);
        let close = Rect::new(36, 1, 39, 2);
        let sticky = Sticky::tied(close, parent, [1.0, 0.0, 1.0, 0.0]);
        let r = sticky.resolve(close, parent, Rect::new(0, 0, 55, 30));
        assert_eq!(r, Rect::new(51, 1, 54, 2));
    }

    #[test]
    fn fixed_moves_with_near_corner_only() {
        let child = Rect::new(10, 10, 20, 20);
        let r = Sticky::fixed().resolve(child, Rect::new(0, 0, 50, 50), Rect::new(5, 3, 90, 90));
        assert_eq!(r, Rect::new(15, 13, 25, 23));
    }
}
