//! Time-driven value interpolation.
//!
//! An [`Interpolation`] carries a value from a start to an end over a fixed
//! duration, following an easing curve. It is the single animation primitive
//! shared by the smooth scroller and the item animation manager.
//!
//! Interpolations are *not* concurrency: they hold no timer and spawn no
//! thread. The hosting view advances them cooperatively by passing an
//! explicit `now` instant each frame, which keeps ordering deterministic and
//! makes the arithmetic fully testable without sleeping.

use std::time::{Duration, Instant};

use crate::easing::{Easing, ease};
use crate::geometry::{Point, Size};

/// Values that can be linearly interpolated.
pub trait Interpolate: Copy + PartialEq {
    /// Interpolate between `self` and `other` at progress `t` in `[0, 1]`.
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for Point {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Point {
            x: self.x.lerp(other.x, t),
            y: self.y.lerp(other.y, t),
        }
    }
}

impl Interpolate for Size {
    #[inline]
    fn lerp(self, other: Self, t: f32) -> Self {
        Size {
            width: self.width.lerp(other.width, t),
            height: self.height.lerp(other.height, t),
        }
    }
}

/// A single running interpolation from a start value to an end value.
///
/// The interpolation is a plain value object: creating one records the start
/// instant, and [`value_at`](Self::value_at) reads the eased value for any
/// later instant. Cancellation is simply dropping it.
#[derive(Debug, Clone, Copy)]
pub struct Interpolation<T> {
    start_value: T,
    end_value: T,
    start_time: Instant,
    duration: Duration,
    easing: Easing,
}

impl<T: Interpolate> Interpolation<T> {
    /// Start a new interpolation at `start_time`.
    pub fn new(
        start_value: T,
        end_value: T,
        start_time: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            start_value,
            end_value,
            start_time,
            duration,
            easing,
        }
    }

    /// The value the interpolation started from.
    #[inline]
    pub fn start_value(&self) -> T {
        self.start_value
    }

    /// The value the interpolation will reach on completion.
    #[inline]
    pub fn end_value(&self) -> T {
        self.end_value
    }

    /// The fixed duration of the interpolation.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// The easing curve in use.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Time elapsed since the interpolation started, saturating at zero for
    /// instants before the start.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.start_time)
    }

    /// Time left until natural completion.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Raw progress in `[0, 1]` at `now`, before easing.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed(now).as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// The eased value at `now`. Past the duration this is the end value.
    pub fn value_at(&self, now: Instant) -> T {
        let t = ease(self.easing, self.progress(now));
        self.start_value.lerp(self.end_value, t)
    }

    /// Whether the interpolation has run its full duration at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.duration
    }
}
