/// An axis-aligned rectangle. `pos` is the top-left corner and the rectangle
/// covers `[pos, pos + size)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (
            self.pos.0.saturating_add(self.size.0),
            self.pos.1.saturating_add(self.size.1),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size.0 == 0 || self.size.1 == 0
    }

    /// Tells whether two rectangles share at least one pixel. Rectangles that
    /// only touch along an edge do not intersect, and an empty rectangle
    /// intersects nothing.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let (self_max, other_max) = (self.max(), other.max());

        let x_overlap = self.pos.0 < other_max.0 && other.pos.0 < self_max.0;
        let y_overlap = self.pos.1 < other_max.1 && other.pos.1 < self_max.1;

        x_overlap && y_overlap
    }

    /// Tells whether this rectangle lies entirely within `[0, size)`.
    pub fn fits_within(&self, size: (u32, u32)) -> bool {
        let max = self.max();
        max.0 <= size.0 && max.1 <= size.1
    }
}
