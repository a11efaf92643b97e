//! Radian/degree conversion. Values are not wrapped or clamped.

use core::f32::consts::PI;

#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

#[inline]
pub fn to_degrees(radians: f32) -> f32 {
    radians * (180.0 / PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_turn() {
        assert!((to_radians(180.0) - PI).abs() < 1e-6);
        assert!((to_degrees(PI) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn unclamped() {
        assert!((to_degrees(to_radians(720.0)) - 720.0).abs() < 1e-3);
        assert!((to_radians(-90.0) + PI / 2.0).abs() < 1e-6);
    }
}
