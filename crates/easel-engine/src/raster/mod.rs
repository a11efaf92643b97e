//! Software rasterizer backing the window runtime.

mod affine;
mod canvas;
mod fill;
mod path;

pub use affine::Affine;
pub use canvas::Canvas;
pub use fill::fill_polygons;
pub use path::{PathBuilder, SubPath};
