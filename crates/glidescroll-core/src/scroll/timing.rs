//! L4 Atomic Layer: Time sources and per-frame interpolation
//!
//! Provides the clock abstraction the driver samples once per frame, and the
//! pure position function applied to each scroll axis.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use super::easing::ease_in_out_cubic;

/// Millisecond time source, monotonic enough for elapsed-duration comparisons
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock that only moves when told to
///
/// Clones share the same time, so a test can keep one handle while a
/// [`super::Scroller`] owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Check if a run of `duration` ms is complete after `elapsed` ms
///
/// A zero duration is complete on its first frame.
#[inline]
pub fn is_complete(elapsed: u64, duration: u64) -> bool {
    duration == 0 || elapsed > duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Eased scroll position for one axis at a moment of the animation
///
/// Returns exactly `end` once the run is complete, so frame jitter never
/// leaves the final write short of the target.
#[inline]
pub fn position(start: i32, end: i32, elapsed: u64, duration: u64) -> i32 {
    if is_complete(elapsed, duration) {
        end
    } else {
        let t = ease_in_out_cubic(elapsed as f64 / duration as f64);
        lerp(start as f64, end as f64, t).round() as i32
    }
}
