//! Paint values consumed by surfaces.
//!
//! Colors are straight (non-premultiplied) alpha here; surfaces premultiply
//! when they write pixels.

pub mod color;
mod pixmap;

pub use color::{Color, ColorParseError};
pub use pixmap::ImageData;
