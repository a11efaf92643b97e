use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use super::Force;

/// A point or displacement in surface pixels.
///
/// Mutating helpers (`translate`, `add_force`, `+=`) work in place; the associated
/// functions (`difference`, `hadamard`) and the operators return new values.
/// NaN and infinities are not rejected and propagate like any float.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ORIGIN: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const ONE: Vector2 = Vector2 { x: 1.0, y: 1.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::ORIGIN
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance_to(self, other: Vector2) -> f32 {
        (self - other).length()
    }

    /// Polar form of the displacement from `from` to `self`.
    pub fn to_force(self, from: Vector2) -> Force {
        let d = self - from;
        Force::new(d.y.atan2(d.x), d.length())
    }

    /// Adds `other` to this vector in place.
    ///
    /// Not named `add`: `Vector2` is `Copy` and implements `ops::Add`, so a
    /// call like `v.add(o)` resolves to the by-value operator.
    #[inline]
    pub fn translate(&mut self, other: Vector2) {
        *self += other;
    }

    /// Adds the Cartesian form of `force` to this vector in place.
    #[inline]
    pub fn add_force(&mut self, force: Force) {
        *self += force.to_vector();
    }

    /// `to - from`.
    #[inline]
    pub fn difference(from: Vector2, to: Vector2) -> Vector2 {
        to - from
    }

    /// Component-wise product.
    #[inline]
    pub fn hadamard(a: Vector2, b: Vector2) -> Vector2 {
        Vector2::new(a.x * b.x, a.y * b.y)
    }

    /// Rotates around the origin by `radians`.
    #[inline]
    pub fn rotated(self, radians: f32) -> Vector2 {
        let (s, c) = radians.sin_cos();
        Vector2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }
}

impl Add for Vector2 {
    type Output = Vector2;
    #[inline]
    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;
    #[inline]
    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;
    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::hadamard(self, rhs)
    }
}

impl Div<f32> for Vector2 {
    type Output = Vector2;
    #[inline]
    fn div(self, rhs: f32) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}
