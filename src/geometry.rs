use ratatui::layout::Rect as CellRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle from an origin and a size.
    pub const fn sized(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + width,
            y1: y + height,
        }
    }

    pub const fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub const fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    pub const fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    pub const fn center_x(&self) -> i32 {
        self.x0 + self.width() / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.y0 + self.height() / 2
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            x0: self.x0 + dx,
            y0: self.y0 + dy,
            x1: self.x1 + dx,
            y1: self.y1 + dy,
        }
    }

    /// Overlap of two rectangles. Disjoint inputs give an empty rectangle
    /// anchored at the clamped corner rather than a negative size.
    #[must_use]
    pub fn intersection(&self, other: Rect) -> Rect {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1).max(x0);
        let y1 = self.y1.min(other.y1).max(y0);
        Rect { x0, y0, x1, y1 }
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Shrink every edge inward by `amount`, never crossing over.
    #[must_use]
    pub fn inset(&self, amount: i32) -> Rect {
        let x0 = self.x0 + amount;
        let y0 = self.y0 + amount;
        Rect {
            x0,
            y0,
            x1: (self.x1 - amount).max(x0),
            y1: (self.y1 - amount).max(y0),
        }
    }

    /// Push the far corner out so the rectangle is at least `min_width` by
    /// `min_height`. The near corner never moves.
    #[must_use]
    pub fn with_min_size(&self, min_width: i32, min_height: i32) -> Rect {
        Rect {
            x0: self.x0,
            y0: self.y0,
            x1: self.x1.max(self.x0 + min_width.max(0)),
            y1: self.y1.max(self.y0 + min_height.max(0)),
        }
    }

    /// Visible part of this rectangle as terminal cells, or `None` when
    /// nothing of it lands inside `bounds`.
    pub fn to_cells(&self, bounds: CellRect) -> Option<CellRect> {
        let clip = self.intersection(Rect::from(bounds));
        if clip.is_empty() {
            return None;
        }
        Some(CellRect {
            x: clip.x0 as u16,
            y: clip.y0 as u16,
            width: clip.width() as u16,
            height: clip.height() as u16,
        })
    }
}

impl From<CellRect> for Rect {
    fn from(rect: CellRect) -> Self {
        Rect::sized(
            rect.x as i32,
            rect.y as i32,
            rect.width as i32,
            rect.height as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_excludes_far_edges() {
        let r = Rect::new(1, 1, 4, 4);
        assert!(r.contains(1, 1));
        assert!(r.contains(3, 3));
        assert!(!r.contains(4, 1));
        assert!(!r.contains(1, 4));
        assert!(!Rect::new(0, 0, 0, 5).contains(0, 0));
    }

    #[test]
    fn min_size_only_moves_far_corner() {
        let r = Rect::new(10, 20, 12, 21).with_min_size(5, 5);
        assert_eq!(r, Rect::new(10, 20, 15, 25));
        let big = Rect::new(0, 0, 50, 50).with_min_size(5, 5);
        assert_eq!(big, Rect::new(0, 0, 50, 50));
    }

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(10, 10, 20, 20);
        assert!(a.intersection(b).is_empty());
        assert_eq!(a.intersection(Rect::new(3, 3, 8, 8)), Rect::new(3, 3, 5, 5));
    }

    #[test]
    fn to_cells_clips_negative_origin() {
        let bounds = CellRect {
            x: 0,
            y: 0,
            width: 10,
            height: 5,
        };
        let r = Rect::new(-3, -1, 4, 2);
        assert_eq!(
            r.to_cells(bounds),
            Some(CellRect {
                x: 0,
                y: 0,
                width: 4,
                height: 2
            })
        );
        assert_eq!(Rect::new(20, 20, 30, 30).to_cells(bounds), None);
    }

    #[test]
    fn inset_never_inverts() {
        let r = Rect::new(0, 0, 3, 3).inset(2);
        assert_eq!(r.width(), 0);
        assert!(r.is_empty());
    }
}
