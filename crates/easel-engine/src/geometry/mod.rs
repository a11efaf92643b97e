//! Exposed geometry predicates and interpolation helpers.
//!
//! Nothing here resolves collisions; callers decide what a hit means.

mod lerp;
mod predicates;

pub use lerp::{easing, lerp, Easing, Lerper};
pub use predicates::{
    between, clamp, is_line_in_circle, is_line_intersecting_line, is_point_in_circle,
    is_point_in_polygon, is_point_in_rectangle, is_position_on_line, normalize, safe_divide,
    wrap_clamp,
};
