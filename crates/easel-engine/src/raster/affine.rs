use core::ops::Mul;

use crate::coords::Vector2;

/// 2D affine transform `[a c e; b d f]`, column-vector convention.
///
/// `self * other` applies `other` first, matching how canvas-style
/// `translate`/`rotate`/`scale` calls compose.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    #[inline]
    pub const fn translation(x: f32, y: f32) -> Self {
        Affine { e: x, f: y, ..Self::IDENTITY }
    }

    #[inline]
    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Affine { a: c, b: s, c: -s, d: c, e: 0.0, f: 0.0 }
    }

    #[inline]
    pub const fn scaling(x: f32, y: f32) -> Self {
        Affine { a: x, d: y, ..Self::IDENTITY }
    }

    #[inline]
    pub fn apply(self, p: Vector2) -> Vector2 {
        Vector2::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Applies only the linear part (no translation).
    #[inline]
    pub fn apply_vector(self, v: Vector2) -> Vector2 {
        Vector2::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    #[inline]
    pub fn determinant(self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// `None` for singular transforms (e.g. a zero scale).
    pub fn inverse(self) -> Option<Affine> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let a = self.d * inv;
        let b = -self.b * inv;
        let c = -self.c * inv;
        let d = self.a * inv;
        Some(Affine {
            a,
            b,
            c,
            d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        })
    }

    /// Average linear scale factor, used to size stroke widths and curve
    /// tolerances in device space.
    #[inline]
    pub fn mean_scale(self) -> f32 {
        self.determinant().abs().sqrt()
    }
}

impl Mul for Affine {
    type Output = Affine;

    fn mul(self, o: Affine) -> Affine {
        Affine {
            a: self.a * o.a + self.c * o.b,
            b: self.b * o.a + self.d * o.b,
            c: self.a * o.c + self.c * o.d,
            d: self.b * o.c + self.d * o.d,
            e: self.a * o.e + self.c * o.f + self.e,
            f: self.b * o.e + self.d * o.f + self.f,
        }
    }
}
