//! L3 Molecular Layer: Scroll to an element that may move while scrolling
//!
//! Wraps a [`ScrollRun`] aimed at an element's current offset. When a run
//! arrives but the container's scrollable size has changed in the meantime
//! (lazy content, images loading), the element is measured again and a fresh
//! run replaces the finished one.

use std::fmt;

use tracing::{info, warn};

use super::offset::target_scroll_offset;
use super::run::{Outcome, RunRequest, ScrollRun, Step};
use crate::error::{Error, Result};
use crate::geometry::{ScrollExtent, ScrollOffset};
use crate::host::ScrollHost;

/// Resolved request for a scroll-to-element session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementRequest<N> {
    pub container: N,
    pub target: N,
    pub offset: ScrollOffset,
    pub duration_ms: u64,
    /// Cap on restarts; `None` retargets for as long as the size keeps changing
    pub max_retargets: Option<u32>,
}

#[derive(Debug)]
pub struct ElementScroll<N> {
    request: ElementRequest<N>,
    root: Option<N>,
    /// Container scroll size when the current run started
    captured: ScrollExtent,
    run: ScrollRun<N>,
    retargets: u32,
}

impl<N: Copy + Eq + fmt::Debug> ElementScroll<N> {
    /// Validate both elements and start the first run toward `target`
    pub fn start<H>(host: &H, root: Option<N>, request: ElementRequest<N>, now: u64) -> Result<Self>
    where
        H: ScrollHost<Node = N>,
    {
        let (captured, run) = Self::begin_run(host, root, &request, now)?;
        Ok(Self {
            request,
            root,
            captured,
            run,
            retargets: 0,
        })
    }

    fn begin_run<H>(
        host: &H,
        root: Option<N>,
        request: &ElementRequest<N>,
        now: u64,
    ) -> Result<(ScrollExtent, ScrollRun<N>)>
    where
        H: ScrollHost<Node = N>,
    {
        if !host.is_element(request.container) {
            return Err(Error::InvalidArgument(format!(
                "option `container` must be an element, got {:?}",
                request.container
            )));
        }
        if !host.is_element(request.target) {
            return Err(Error::InvalidArgument(format!(
                "option `target` must be an element, got {:?}",
                request.target
            )));
        }

        let captured = host.scroll_size(request.container);
        let destination = target_scroll_offset(host, root, request.container, request.target);
        let run = ScrollRun::start(
            host,
            root,
            request.container,
            &RunRequest {
                target_x: Some(destination.x),
                target_y: Some(destination.y),
                offset: request.offset,
                duration_ms: request.duration_ms,
            },
            now,
        )?;
        Ok((captured, run))
    }

    /// Number of restarts so far
    pub fn retargets(&self) -> u32 {
        self.retargets
    }

    /// Evaluate one frame of the current run, restarting it if the target may have moved
    pub fn step<H>(&mut self, host: &mut H, now: u64) -> Step
    where
        H: ScrollHost<Node = N>,
    {
        match self.run.step(host, now) {
            Step::Pending => Step::Pending,
            Step::Done(Outcome::Interrupted) => Step::Done(Outcome::Interrupted),
            Step::Done(Outcome::Arrived) => {
                let size = host.scroll_size(self.request.container);
                if size == self.captured {
                    return Step::Done(Outcome::Arrived);
                }

                if let Some(max) = self.request.max_retargets {
                    if self.retargets >= max {
                        warn!(
                            container = ?self.request.container,
                            retargets = self.retargets,
                            "Retarget limit reached, target element may not be in view"
                        );
                        return Step::Done(Outcome::Arrived);
                    }
                }

                match Self::begin_run(host, self.root, &self.request, now) {
                    Ok((captured, run)) => {
                        self.retargets += 1;
                        info!(
                            container = ?self.request.container,
                            from = ?self.captured,
                            to = ?size,
                            destination = ?run.target(),
                            "Scroll size changed, retargeting"
                        );
                        self.captured = captured;
                        self.run = run;
                        Step::Pending
                    }
                    Err(e) => {
                        warn!(error = %e, "Retarget failed");
                        Step::Done(Outcome::Interrupted)
                    }
                }
            }
        }
    }
}
