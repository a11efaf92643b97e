use std::time::{Duration, Instant};

use super::predicates::clamp;

/// Maps progress in `[0, 1]` onto an eased rate.
pub type Easing = fn(f32) -> f32;

#[inline]
pub fn lerp(from: f32, to: f32, rate: f32) -> f32 {
    from + (to - from) * rate
}

pub mod easing {
    use super::lerp;

    pub fn linear(x: f32) -> f32 {
        x
    }

    pub fn reverse(x: f32) -> f32 {
        1.0 - x
    }

    pub fn ease_in(x: f32) -> f32 {
        x * x
    }

    pub fn ease_out(x: f32) -> f32 {
        ease_in(reverse(x))
    }

    pub fn ease_in_out(x: f32) -> f32 {
        lerp(ease_in(x), ease_out(x), x)
    }

    /// Rises to 1 at the midpoint and falls back to 0.
    pub fn spike(x: f32) -> f32 {
        if x <= 0.5 {
            ease_in(x / 0.5)
        } else {
            ease_in(reverse(x) / 0.5)
        }
    }
}

/// Time-driven interpolation between two values.
#[derive(Debug, Clone)]
pub struct Lerper {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    /// Clamp progress to `[0, 1]` before easing.
    pub clamped: bool,
    pub easing: Easing,
    start: Instant,
}

impl Lerper {
    pub fn new(from: f32, to: f32, duration: Duration, start: Instant) -> Self {
        Self {
            from,
            to,
            duration,
            clamped: true,
            easing: easing::linear,
            start,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn unclamped(mut self) -> Self {
        self.clamped = false;
        self
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    fn progress(&self, now: Instant) -> f32 {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        let elapsed = if now >= self.start {
            now.duration_since(self.start).as_secs_f32()
        } else {
            -self.start.duration_since(now).as_secs_f32()
        };
        elapsed / total
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        let mut t = self.progress(now);
        if self.clamped {
            t = clamp(t, 0.0, 1.0);
        }
        lerp(self.from, self.to, (self.easing)(t))
    }

    pub fn reset(&mut self, now: Instant) {
        self.start = now;
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.start + self.duration < now
    }
}
