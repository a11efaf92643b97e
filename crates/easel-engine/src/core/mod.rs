//! Core engine-facing contracts.
//!
//! [`App`] is what a program implements, [`FrameCtx`] is what every hook
//! receives, and [`FrameDriver`] runs the per-frame pipeline. None of these
//! depend on the window runtime, so a driver can be ticked headless.

mod app;
mod config;
mod ctx;
mod cursor;
mod driver;

pub use app::{App, AppControl};
pub use config::DriverConfig;
pub use ctx::FrameCtx;
pub use cursor::Cursor;
pub use driver::FrameDriver;

#[cfg(test)]
pub(crate) use ctx::run_test_frame;
