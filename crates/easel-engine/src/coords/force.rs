use super::angle;
use super::Vector2;

/// A polar displacement: direction in radians plus magnitude.
///
/// Converts to and from [`Vector2`] through the polar/Cartesian transform.
/// `degrees` is a view over `radians`; nothing else is stored.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Force {
    pub radians: f32,
    pub magnitude: f32,
}

impl Force {
    #[inline]
    pub const fn new(radians: f32, magnitude: f32) -> Self {
        Self { radians, magnitude }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    #[inline]
    pub fn to_vector(self) -> Vector2 {
        let (s, c) = self.radians.sin_cos();
        Vector2::new(c * self.magnitude, s * self.magnitude)
    }

    /// Replaces direction and magnitude with the polar form of `v`.
    pub fn set_vectors(&mut self, v: Vector2) {
        *self = v.to_force(Vector2::ORIGIN);
    }

    /// Replaces this force with the resultant of `self + other`.
    pub fn add(&mut self, other: Force) {
        *self = Force::sum(*self, other);
    }

    pub fn sum(a: Force, b: Force) -> Force {
        (a.to_vector() + b.to_vector()).to_force(Vector2::ORIGIN)
    }

    #[inline]
    pub fn degrees(self) -> f32 {
        angle::to_degrees(self.radians)
    }

    #[inline]
    pub fn set_degrees(&mut self, degrees: f32) {
        self.radians = angle::to_radians(degrees);
    }
}

impl From<Force> for Vector2 {
    fn from(f: Force) -> Self {
        f.to_vector()
    }
}

impl From<Vector2> for Force {
    fn from(v: Vector2) -> Self {
        v.to_force(Vector2::ORIGIN)
    }
}
