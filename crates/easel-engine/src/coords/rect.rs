use super::{Dimension2, Vector2};

/// Axis-aligned rectangle in surface pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vector2,
    pub size: Dimension2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vector2::new(x, y),
            size: Dimension2::new(width, height),
        }
    }

    /// Smallest rectangle containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Vector2]) -> Option<Rect> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    #[inline]
    pub fn max(self) -> Vector2 {
        Vector2::new(self.origin.x + self.size.width, self.origin.y + self.size.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Flips negative extents so width/height are non-negative.
    pub fn normalized(self) -> Self {
        let Rect { mut origin, mut size } = self;
        if size.width < 0.0 {
            origin.x += size.width;
            size.width = -size.width;
        }
        if size.height < 0.0 {
            origin.y += size.height;
            size.height = -size.height;
        }
        Rect { origin, size }
    }

    /// Closed containment: both edges count as inside.
    pub fn contains(self, p: Vector2) -> bool {
        let r = self.normalized();
        let max = r.max();
        p.x >= r.origin.x && p.x <= max.x && p.y >= r.origin.y && p.y <= max.y
    }

    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let a = self.normalized();
        let b = other.normalized();
        let x0 = a.origin.x.max(b.origin.x);
        let y0 = a.origin.y.max(b.origin.y);
        let x1 = a.max().x.min(b.max().x);
        let y1 = a.max().y.min(b.max().y);
        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}
