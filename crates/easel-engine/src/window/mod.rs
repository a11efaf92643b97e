//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, feeds platform input to
//! the [`FrameDriver`](crate::core::FrameDriver) and presents its canvas.

mod runtime;
mod translate;

pub use runtime::{Runtime, RuntimeConfig};
