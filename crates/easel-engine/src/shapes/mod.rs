//! Shape renderer components.

mod alignment;
mod renderer;
mod shape;

pub use alignment::{offset_from_alignment, Alignment};
pub use renderer::ShapeRenderer;
pub use shape::{Shape, ShapeGeometry};
