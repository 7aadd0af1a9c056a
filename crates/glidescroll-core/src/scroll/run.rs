//! L3 Molecular Layer: A single scroll animation run
//!
//! A run captures its start position, resolves and clamps its target once, and
//! then advances one frame per [`ScrollRun::step`] call until it arrives or
//! detects that something else moved the container.

use std::fmt;

use tracing::{debug, trace};

use super::bounds::scroll_max;
use super::timing::{is_complete, position};
use crate::error::{Error, Result};
use crate::geometry::ScrollOffset;
use crate::host::ScrollHost;

/// How a run (or a scroll-to-element session) ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Duration elapsed and the container sits exactly on the clamped target
    Arrived,
    /// Some other agent changed the scroll position between frames
    Interrupted,
}

/// Result of evaluating one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Another frame is needed
    Pending,
    Done(Outcome),
}

/// Single callback slot notified once with the terminal outcome
pub type FinishCallback = Box<dyn FnOnce(Outcome)>;

/// Wrap `prev` so `f` runs after it when the outcome equals `when`
pub(crate) fn chain_callback(
    prev: Option<FinishCallback>,
    when: Outcome,
    f: impl FnOnce() + 'static,
) -> FinishCallback {
    Box::new(move |outcome| {
        if let Some(prev) = prev {
            prev(outcome);
        }
        if outcome == when {
            f();
        }
    })
}

/// Wrap `prev` so `f` runs after it with every outcome
pub(crate) fn then_callback(
    prev: Option<FinishCallback>,
    f: impl FnOnce(Outcome) + 'static,
) -> FinishCallback {
    Box::new(move |outcome| {
        if let Some(prev) = prev {
            prev(outcome);
        }
        f(outcome);
    })
}

/// Resolved numeric request for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunRequest {
    /// Per-axis target; `None` keeps the current position on that axis
    pub target_x: Option<i32>,
    pub target_y: Option<i32>,
    /// Added to the resolved target
    pub offset: ScrollOffset,
    pub duration_ms: u64,
}

/// Per-frame state of one animation
#[derive(Debug)]
pub struct ScrollRun<N> {
    container: N,
    start: ScrollOffset,
    target: ScrollOffset,
    /// Last offsets this run wrote; anything else on the container is interference
    last: ScrollOffset,
    duration_ms: u64,
    started_at: u64,
}

impl<N: Copy + Eq + fmt::Debug> ScrollRun<N> {
    /// Validate the container, capture the start position and resolve the target
    ///
    /// The scroll bounds are queried here only; the clamped target is fixed for
    /// the rest of the run.
    pub fn start<H>(
        host: &H,
        root: Option<N>,
        container: N,
        request: &RunRequest,
        now: u64,
    ) -> Result<Self>
    where
        H: ScrollHost<Node = N>,
    {
        if !host.is_element(container) {
            return Err(Error::InvalidArgument(format!(
                "option `container` must be an element, got {:?}",
                container
            )));
        }

        let start = host.scroll_offset(container);
        let requested = ScrollOffset::new(
            request.target_x.unwrap_or(start.x).saturating_add(request.offset.x),
            request.target_y.unwrap_or(start.y).saturating_add(request.offset.y),
        );
        let target = requested.min(scroll_max(host, root, container));

        debug!(
            container = ?container,
            start = ?start,
            destination = ?target,
            duration_ms = request.duration_ms,
            "Scroll run started"
        );

        Ok(Self {
            container,
            start,
            target,
            last: start,
            duration_ms: request.duration_ms,
            started_at: now,
        })
    }

    pub fn container(&self) -> N {
        self.container
    }

    /// The clamped target this run is heading for
    pub fn target(&self) -> ScrollOffset {
        self.target
    }

    /// Evaluate one frame at time `now`
    pub fn step<H>(&mut self, host: &mut H, now: u64) -> Step
    where
        H: ScrollHost<Node = N>,
    {
        let current = host.scroll_offset(self.container);
        if current != self.last {
            debug!(
                container = ?self.container,
                expected = ?self.last,
                found = ?current,
                "Scroll run interrupted"
            );
            return Step::Done(Outcome::Interrupted);
        }

        let elapsed = now.saturating_sub(self.started_at);
        // Nothing to animate: land on the first frame instead of idling out the duration.
        let complete = self.start == self.target || is_complete(elapsed, self.duration_ms);
        let next = if complete {
            self.target
        } else {
            ScrollOffset::new(
                position(self.start.x, self.target.x, elapsed, self.duration_ms),
                position(self.start.y, self.target.y, elapsed, self.duration_ms),
            )
        };

        host.set_scroll_offset(self.container, next);
        self.last = next;
        trace!(container = ?self.container, elapsed, offset = ?next, "Scroll frame applied");

        if complete {
            debug!(container = ?self.container, offset = ?next, "Scroll run arrived");
            Step::Done(Outcome::Arrived)
        } else {
            Step::Pending
        }
    }
}
