//! Coordinate and geometry value types shared by the scene tree, the draw
//! pipeline, and the renderers.
//!
//! Canonical space:
//! - Surface pixels
//! - Origin top-left
//! - +X right, +Y down (so positive radians turn clockwise on screen)

pub mod angle;
mod dimension;
mod force;
mod rect;
mod vec2;

pub use dimension::Dimension2;
pub use force::Force;
pub use rect::Rect;
pub use vec2::Vector2;
