//! Easel engine crate.
//!
//! A 2D scene-graph render loop. A [`FrameDriver`](core::FrameDriver) owns a
//! tree of scenes and game objects, ticks it once per frame through a
//! [`PaintSurface`](draw::PaintSurface), and polls a cooperative scheduler of
//! timed and conditional waiters. The [`window`] runtime puts the result on
//! screen through a software canvas and a wgpu blit.

pub mod coords;
pub mod geometry;
pub mod paint;
pub mod draw;
pub mod raster;
pub mod input;
pub mod random;

pub mod scene;
pub mod shapes;
pub mod schedule;
pub mod resource;
pub mod time;
pub mod core;
pub mod error;

pub mod logging;
pub mod render;
pub mod window;

pub use error::{EngineError, Result};
