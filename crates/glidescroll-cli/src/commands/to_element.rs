use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;
use kurbo::Point;

use glidescroll_core::{
    AppConfig, ElementScrollOptions, ScrollExtent, ScrollHost, Scroller, VirtualPage,
};

use super::animate::interruptions;
use super::ToElementArgs;
use crate::frames::{drive, Output, PageChange, Scheduled, Summary, TokioClock};

/// Height given to the target element
const TARGET_HEIGHT: i32 = 100;

pub async fn run(config: &AppConfig, args: ToElementArgs) -> Result<()> {
    let mut page = VirtualPage::new(args.page.viewport, args.page.content);
    let root = page.root();
    let target = page.append_element(
        root,
        Point::new(args.target_left, args.target_top),
        ScrollExtent::new(args.page.viewport.width, TARGET_HEIGHT),
        ScrollExtent::new(args.page.viewport.width, TARGET_HEIGHT),
    );

    let mut scroller = Scroller::new(page, TokioClock::new())
        .with_scrolling_root(root)
        .with_config(config.animation.clone());

    let outcome = Rc::new(Cell::new(None));
    let finished = outcome.clone();

    let mut options = ElementScrollOptions::new(target)
        .offset_x(args.page.offset_x)
        .offset_y(args.page.offset_y)
        .on_finish(move |o| finished.set(Some(o)));
    options.duration_ms = args.page.duration;
    scroller.scroll_to_element(options)?;

    let mut schedule = interruptions(&args.page);
    if let (Some(at_ms), Some(by)) = (args.grow_at, args.grow_by) {
        schedule.push(Scheduled {
            at_ms,
            change: PageChange::Grow { by, shift: target },
        });
    }

    let output = Output { json: args.page.json };
    let frames = drive(&mut scroller, config.animation.frame_interval(), schedule, output).await?;

    output.summary(&Summary::new(outcome.get(), frames, scroller.host().scroll_offset(root)))
}
