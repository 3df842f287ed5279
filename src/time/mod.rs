//! Time values consumed by the sleep operations.
//!
//! [`Duration`] is a span of time measured in seconds as a float, which
//! means it also admits the values a float does: negative spans, infinity,
//! and NaN. The sleep paths give each of those a defined meaning (no-op,
//! unbounded sleep, no-op) instead of rejecting them.
//!
//! [`Instant`] is a point on the monotonic clock, used to express absolute
//! deadlines for [`Thread::sleep_until`](crate::thread::Thread::sleep_until).

use std::ops::{Add, Sub};
use std::time::Duration as StdDuration;

/// A span of time in seconds, possibly negative, infinite, or NaN.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Duration {
    secs: f64,
}

impl Duration {
    /// A zero-length span.
    pub const ZERO: Duration = Duration { secs: 0.0 };

    /// An unbounded span; sleeping for it never returns.
    pub const INFINITE: Duration = Duration { secs: f64::INFINITY };

    /// Creates a duration from fractional seconds.
    pub const fn from_secs_f64(secs: f64) -> Self {
        Self { secs }
    }

    /// Creates a duration from whole milliseconds.
    pub fn from_millis(millis: u64) -> Self {
        Self {
            secs: millis as f64 / 1_000.0,
        }
    }

    /// The span in fractional seconds.
    pub const fn as_secs_f64(&self) -> f64 {
        self.secs
    }

    /// Whether the span is unbounded.
    pub fn is_infinite(&self) -> bool {
        self.secs.is_infinite() && self.secs > 0.0
    }

    /// Whether the span has no meaningful length: negative, NaN, or
    /// negative infinity. Sleeping for such a span is a no-op.
    pub fn is_degenerate(&self) -> bool {
        self.secs.is_nan() || (self.secs <= 0.0 && !self.is_infinite())
    }

    /// Splits a finite positive span into whole seconds and nanoseconds,
    /// the shape native `timespec`-based calls consume.
    ///
    /// Returns `None` for degenerate or infinite spans.
    pub fn to_timespec_parts(&self) -> Option<(i64, i64)> {
        if self.is_degenerate() || self.is_infinite() {
            return None;
        }
        let whole = self.secs.floor();
        let nanos = ((self.secs - whole) * 1_000_000_000.0) as i64;
        Some((whole as i64, nanos.clamp(0, 999_999_999)))
    }

    /// Converts a finite positive span to milliseconds, saturating at
    /// `u64::MAX`. Degenerate spans convert to zero.
    pub fn to_millis_saturating(&self) -> u64 {
        if self.is_degenerate() {
            return 0;
        }
        let ms = self.secs * 1_000.0;
        if ms >= u64::MAX as f64 {
            u64::MAX
        } else {
            ms as u64
        }
    }

    /// Converts to a `std::time::Duration`, clamping degenerate spans to
    /// zero and saturating infinity at the std maximum.
    pub fn to_std(&self) -> StdDuration {
        if self.is_degenerate() {
            StdDuration::ZERO
        } else if self.is_infinite() {
            StdDuration::MAX
        } else {
            StdDuration::from_secs_f64(self.secs)
        }
    }
}

impl From<StdDuration> for Duration {
    fn from(d: StdDuration) -> Self {
        Self::from_secs_f64(d.as_secs_f64())
    }
}

/// A point on the monotonic clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    inner: std::time::Instant,
}

impl Instant {
    /// The current instant.
    pub fn now() -> Self {
        Self {
            inner: std::time::Instant::now(),
        }
    }

    /// The span from `earlier` to `self`, zero if `earlier` is later.
    pub fn duration_since(&self, earlier: Instant) -> Duration {
        Duration::from_secs_f64(
            self.inner
                .saturating_duration_since(earlier.inner)
                .as_secs_f64(),
        )
    }

    /// The span from this instant to now, zero if it lies in the future.
    pub fn elapsed(&self) -> Duration {
        Self::now().duration_since(*self)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;

    fn add(self, rhs: Duration) -> Instant {
        Instant {
            inner: self.inner + rhs.to_std(),
        }
    }
}

impl Sub<Instant> for Instant {
    type Output = Duration;

    fn sub(self, rhs: Instant) -> Duration {
        self.duration_since(rhs)
    }
}
