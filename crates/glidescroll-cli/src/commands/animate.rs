use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use glidescroll_core::{AnimateOptions, AppConfig, ScrollHost, ScrollOffset, Scroller, VirtualPage};

use super::{AnimateArgs, PageArgs};
use crate::frames::{drive, Output, PageChange, Scheduled, Summary, TokioClock};

pub async fn run(config: &AppConfig, args: AnimateArgs) -> Result<()> {
    let page = VirtualPage::new(args.page.viewport, args.page.content);
    let root = page.root();
    let mut scroller = Scroller::new(page, TokioClock::new())
        .with_scrolling_root(root)
        .with_config(config.animation.clone());

    let outcome = Rc::new(Cell::new(None));
    let finished = outcome.clone();

    let mut options = AnimateOptions::new()
        .offset_x(args.page.offset_x)
        .offset_y(args.page.offset_y)
        .on_finish(move |o| finished.set(Some(o)));
    options.target_x = args.target_x;
    options.target_y = args.target_y;
    options.duration_ms = args.page.duration;
    scroller.animate(options)?;

    let output = Output { json: args.page.json };
    let frames = drive(
        &mut scroller,
        config.animation.frame_interval(),
        interruptions(&args.page),
        output,
    )
    .await?;

    output.summary(&Summary::new(outcome.get(), frames, scroller.host().scroll_offset(root)))
}

/// Scripted user scroll from `--interrupt-at` / `--interrupt-to`
pub(crate) fn interruptions(page: &PageArgs) -> Vec<Scheduled> {
    match (page.interrupt_at, page.interrupt_to) {
        (Some(at_ms), Some(y)) => vec![Scheduled {
            at_ms,
            change: PageChange::Scroll(ScrollOffset::new(0, y)),
        }],
        _ => Vec::new(),
    }
}
