//! Rectangle math for computing intersection entries.

use crate::visibility::options::RootMargin;

/// An axis-aligned rectangle in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Edge-adjacent rectangles intersect with zero area, matching the
    /// platform primitive.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Grows (or, for negative lengths, shrinks) the rectangle by a root
    /// margin. Percentages resolve against this rectangle's own extent.
    pub fn expand(&self, margin: &RootMargin) -> Rect {
        let top = margin.top.resolve(self.height);
        let bottom = margin.bottom.resolve(self.height);
        let left = margin.left.resolve(self.width);
        let right = margin.right.resolve(self.width);

        Rect::new(
            self.x - left,
            self.y - top,
            (self.width + left + right).max(0.0),
            (self.height + top + bottom).max(0.0),
        )
    }
}

/// Fraction of `target` covered by `intersection`.
/// A zero-area target counts as fully covered when it intersects at all.
pub fn intersection_ratio(target: &Rect, intersection: Option<&Rect>) -> f64 {
    match intersection {
        None => 0.0,
        Some(_) if target.area() == 0.0 => 1.0,
        Some(hit) => (hit.area() / target.area()).clamp(0.0, 1.0),
    }
}
