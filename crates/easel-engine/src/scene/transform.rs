use core::f32::consts::TAU;

use crate::coords::{Force, Vector2};

/// Local motion state of one object.
///
/// `position` is relative to the parent chain (see
/// [`SceneTree::render_position`](super::SceneTree::render_position)).
/// `velocity` is a polar force applied as a Cartesian delta once per
/// [`integrate`](Self::integrate); `angular_velocity` is in radians per frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vector2,
    pub scale: Vector2,
    pub velocity: Force,
    pub rotation: f32,
    pub angular_velocity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector2::ORIGIN,
            scale: Vector2::ONE,
            velocity: Force::zero(),
            rotation: 0.0,
            angular_velocity: 0.0,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vector2::new(x, y),
            ..Self::default()
        }
    }

    /// One frame of motion: position advances by `velocity`, rotation by
    /// `angular_velocity`, wrapped into `[0, 2π)`.
    pub fn integrate(&mut self) {
        self.position.add_force(self.velocity);
        self.rotation = wrap_angle(self.rotation + self.angular_velocity);
    }
}

fn wrap_angle(radians: f32) -> f32 {
    let r = radians.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if r >= TAU { 0.0 } else { r }
}
