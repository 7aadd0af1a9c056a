//! Frame ticker standing in for a display refresh
//!
//! Drives a [`Scroller`] on a tokio interval, applies scripted page changes
//! (user scrolls, content loading) at their scheduled times, and reports each
//! frame.

use std::time::Duration;

use anyhow::Result;
use kurbo::Vec2;
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use glidescroll_core::{
    Clock, NodeId, Outcome, ScrollExtent, ScrollHost, ScrollOffset, Scroller, VirtualPage,
};

/// Clock backed by tokio's time source, so paused test time applies
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    origin: Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A page change applied once its time comes
#[derive(Debug, Clone, Copy)]
pub enum PageChange {
    /// Native scroll of the document, as a user would do
    Scroll(ScrollOffset),
    /// Content of this height loads above `shift`, pushing it down
    Grow { by: i32, shift: NodeId },
}

#[derive(Debug, Clone, Copy)]
pub struct Scheduled {
    pub at_ms: u64,
    pub change: PageChange,
}

#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub frame: u32,
    pub elapsed_ms: u64,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub outcome: &'static str,
    pub frames: u32,
    pub x: i32,
    pub y: i32,
}

impl Summary {
    pub fn new(outcome: Option<Outcome>, frames: u32, offset: ScrollOffset) -> Self {
        Self {
            outcome: match outcome {
                Some(Outcome::Arrived) => "arrived",
                Some(Outcome::Interrupted) => "interrupted",
                None => "pending",
            },
            frames,
            x: offset.x,
            y: offset.y,
        }
    }
}

/// Text or JSON-lines printer for frame reports
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
}

impl Output {
    pub fn frame(&self, report: &FrameReport) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(report)?);
        } else {
            println!(
                "frame {:>3}  {:>5}ms  x={:<6} y={}",
                report.frame, report.elapsed_ms, report.x, report.y
            );
        }
        Ok(())
    }

    pub fn summary(&self, summary: &Summary) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(summary)?);
        } else {
            println!(
                "\n{} after {} frame(s) at x={} y={}",
                summary.outcome, summary.frames, summary.x, summary.y
            );
        }
        Ok(())
    }
}

fn apply(page: &mut VirtualPage, change: PageChange) {
    let root = page.root();
    match change {
        PageChange::Scroll(offset) => page.scroll_to(root, offset),
        PageChange::Grow { by, shift } => {
            let content = page.scroll_size(root);
            page.set_scroll_size(root, ScrollExtent::new(content.width, content.height + by));
            if let Some(position) = page.position(shift) {
                page.set_position(shift, position + Vec2::new(0.0, by as f64));
            }
        }
    }
}

/// Tick frames until no animation is pending
///
/// Returns the number of frames evaluated after the synchronous first one.
pub async fn drive(
    scroller: &mut Scroller<VirtualPage, TokioClock>,
    interval: Duration,
    mut schedule: Vec<Scheduled>,
    output: Output,
) -> Result<u32> {
    let root = scroller.host().root();
    let started = Instant::now();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticker.tick().await;

    schedule.sort_by_key(|s| s.at_ms);
    let mut frames = 0;

    while scroller.is_animating() {
        ticker.tick().await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        while let Some(next) = schedule.first().copied() {
            if next.at_ms > elapsed_ms {
                break;
            }
            debug!(at_ms = next.at_ms, change = ?next.change, "Applying page change");
            apply(scroller.host_mut(), next.change);
            schedule.remove(0);
        }

        scroller.frame();
        frames += 1;

        let offset = scroller.host().scroll_offset(root);
        output.frame(&FrameReport {
            frame: frames,
            elapsed_ms,
            x: offset.x,
            y: offset.y,
        })?;
    }

    Ok(frames)
}
