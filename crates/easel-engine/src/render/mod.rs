//! GPU presentation of the software canvas.
//!
//! Everything is drawn on the CPU by [`Canvas`](crate::raster::Canvas); this
//! module only owns the wgpu device and swapchain and blits the finished
//! frame once per redraw.

mod presenter;

pub use presenter::{GpuInit, Presenter, SurfaceErrorAction};
