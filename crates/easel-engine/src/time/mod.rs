//! Time subsystem.
//!
//! One [`FrameClock`] per frame driver. The driver calls
//! [`FrameClock::begin`] at the start of a tick and [`FrameClock::finish`]
//! at its end; [`FrameTime`] carries the normalized delta to user code.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
