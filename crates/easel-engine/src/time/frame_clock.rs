use std::time::Instant;

/// Frame timing snapshot, taken once at the start of a tick.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Elapsed time since the previous frame ended, in units of one target
    /// frame: `1.0` means exactly one frame at the target framerate.
    pub delta_time: f32,

    /// The same interval in seconds.
    pub dt: f32,

    /// Monotonic timestamp of the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

impl FrameTime {
    /// Timing of a frame with no predecessor.
    pub fn first(now: Instant) -> Self {
        Self { delta_time: 0.0, dt: 0.0, now, frame_index: 0 }
    }
}

/// Framerate-normalized frame clock.
///
/// `delta_time = (now - last_frame_end) / (1000 / target_framerate)` with
/// both sides in milliseconds. The frame end is recorded by
/// [`finish`](Self::finish), so work done inside a frame does not count
/// towards the next frame's delta. There is no clamping.
#[derive(Debug, Clone)]
pub struct FrameClock {
    target_framerate: f32,
    last_end: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    /// Non-positive or non-finite framerates fall back to 60.
    pub fn new(target_framerate: f32) -> Self {
        let target_framerate = if target_framerate.is_finite() && target_framerate > 0.0 {
            target_framerate
        } else {
            60.0
        };
        Self { target_framerate, last_end: None, frame_index: 0 }
    }

    #[inline]
    pub fn target_framerate(&self) -> f32 {
        self.target_framerate
    }

    /// Milliseconds per target frame.
    #[inline]
    pub fn frame_millis(&self) -> f32 {
        1000.0 / self.target_framerate
    }

    /// Normalized delta at `now`. `0.0` before the first finished frame.
    pub fn delta_time(&self, now: Instant) -> f32 {
        match self.last_end {
            Some(last) => {
                let ms = now.saturating_duration_since(last).as_secs_f32() * 1000.0;
                ms / self.frame_millis()
            }
            None => 0.0,
        }
    }

    /// Snapshot for a frame starting at `now`.
    pub fn begin(&self, now: Instant) -> FrameTime {
        let dt = self
            .last_end
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        FrameTime {
            delta_time: self.delta_time(now),
            dt,
            now,
            frame_index: self.frame_index,
        }
    }

    /// Records the frame-end timestamp and advances the frame counter.
    pub fn finish(&mut self, now: Instant) {
        self.last_end = Some(now);
        self.frame_index = self.frame_index.wrapping_add(1);
    }

    /// Forgets the last frame end, e.g. after the window was hidden.
    pub fn reset(&mut self) {
        self.last_end = None;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(60.0)
    }
}
