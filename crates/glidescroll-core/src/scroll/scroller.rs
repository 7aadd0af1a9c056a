//! L2 Organism Layer: Entry points and the per-frame task list
//!
//! The embedding environment owns a [`Scroller`] and calls
//! [`Scroller::frame`] once per display refresh while
//! [`Scroller::is_animating`] reports pending work.

use tracing::debug;

use super::element::{ElementRequest, ElementScroll};
use super::run::{chain_callback, then_callback, FinishCallback, Outcome, RunRequest, ScrollRun, Step};
use super::timing::Clock;
use crate::config::AnimationConfig;
use crate::error::{Error, Result};
use crate::geometry::ScrollOffset;
use crate::host::ScrollHost;

/// Options for [`Scroller::animate`]
pub struct AnimateOptions<N> {
    /// Element to scroll; defaults to the scrolling root
    pub container: Option<N>,
    /// Target X position; defaults to the current position
    pub target_x: Option<i32>,
    /// Target Y position; defaults to the current position
    pub target_y: Option<i32>,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Defaults to [`AnimationConfig::duration_ms`]
    pub duration_ms: Option<u64>,
    on_finish: Option<FinishCallback>,
}

impl<N> Default for AnimateOptions<N> {
    fn default() -> Self {
        Self {
            container: None,
            target_x: None,
            target_y: None,
            offset_x: 0,
            offset_y: 0,
            duration_ms: None,
            on_finish: None,
        }
    }
}

impl<N> AnimateOptions<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn container(mut self, container: N) -> Self {
        self.container = Some(container);
        self
    }

    pub fn target_x(mut self, x: i32) -> Self {
        self.target_x = Some(x);
        self
    }

    pub fn target_y(mut self, y: i32) -> Self {
        self.target_y = Some(y);
        self
    }

    pub fn offset_x(mut self, x: i32) -> Self {
        self.offset_x = x;
        self
    }

    pub fn offset_y(mut self, y: i32) -> Self {
        self.offset_y = y;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Called exactly once with the run's outcome
    pub fn on_finish(mut self, f: impl FnOnce(Outcome) + 'static) -> Self {
        self.on_finish = Some(then_callback(self.on_finish.take(), f));
        self
    }

    pub fn on_arrive(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(chain_callback(self.on_finish.take(), Outcome::Arrived, f));
        self
    }

    pub fn on_interrupt(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(chain_callback(self.on_finish.take(), Outcome::Interrupted, f));
        self
    }
}

/// Options for [`Scroller::scroll_to_element`]
pub struct ElementScrollOptions<N> {
    /// Element to scroll; defaults to the scrolling root
    pub container: Option<N>,
    /// Element to bring to the container's top-left corner
    pub target: N,
    pub offset_x: i32,
    pub offset_y: i32,
    /// Defaults to [`AnimationConfig::duration_ms`]
    pub duration_ms: Option<u64>,
    on_finish: Option<FinishCallback>,
}

impl<N> ElementScrollOptions<N> {
    pub fn new(target: N) -> Self {
        Self {
            container: None,
            target,
            offset_x: 0,
            offset_y: 0,
            duration_ms: None,
            on_finish: None,
        }
    }

    pub fn container(mut self, container: N) -> Self {
        self.container = Some(container);
        self
    }

    pub fn offset_x(mut self, x: i32) -> Self {
        self.offset_x = x;
        self
    }

    pub fn offset_y(mut self, y: i32) -> Self {
        self.offset_y = y;
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Called exactly once with the session's outcome
    pub fn on_finish(mut self, f: impl FnOnce(Outcome) + 'static) -> Self {
        self.on_finish = Some(then_callback(self.on_finish.take(), f));
        self
    }

    /// Called once a run lands with the container size unchanged
    pub fn on_arrive(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(chain_callback(self.on_finish.take(), Outcome::Arrived, f));
        self
    }

    pub fn on_interrupt(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_finish = Some(chain_callback(self.on_finish.take(), Outcome::Interrupted, f));
        self
    }
}

enum Motion<N> {
    Run(ScrollRun<N>),
    Element(ElementScroll<N>),
}

impl<N: Copy + Eq + std::fmt::Debug> Motion<N> {
    fn step<H: ScrollHost<Node = N>>(&mut self, host: &mut H, now: u64) -> Step {
        match self {
            Motion::Run(run) => run.step(host, now),
            Motion::Element(session) => session.step(host, now),
        }
    }
}

struct Task<N> {
    motion: Motion<N>,
    on_finish: Option<FinishCallback>,
}

/// Smooth scroll controller bound to a host and a clock
///
/// Runs are not coordinated: starting a second animation on a container
/// that is already animating makes the first one observe interference.
pub struct Scroller<H: ScrollHost, C: Clock> {
    host: H,
    clock: C,
    /// Page-level scrolling root, used when a call names no container
    root: Option<H::Node>,
    config: AnimationConfig,
    tasks: Vec<Task<H::Node>>,
}

impl<H: ScrollHost, C: Clock> Scroller<H, C> {
    /// Create a scroller with default configuration and no scrolling root
    pub fn new(host: H, clock: C) -> Self {
        Self {
            host,
            clock,
            root: None,
            config: AnimationConfig::default(),
            tasks: Vec::new(),
        }
    }

    /// Set the element treated as the page scrolling root
    pub fn with_scrolling_root(mut self, root: H::Node) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access, e.g. to scroll natively or change layout between frames
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Whether any run still needs frames
    #[inline]
    pub fn is_animating(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Number of runs and sessions awaiting a frame
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    fn resolve_container(&self, container: Option<H::Node>) -> Result<H::Node> {
        container.or(self.root).ok_or_else(|| {
            Error::InvalidArgument(
                "option `container` is required when no scrolling root is set".to_string(),
            )
        })
    }

    /// Smoothly scroll a container to a numeric position
    ///
    /// Fails only on an invalid container, before anything is scrolled. The
    /// first frame is evaluated immediately; the rest follow on [`Self::frame`].
    pub fn animate(&mut self, options: AnimateOptions<H::Node>) -> Result<()> {
        let container = self.resolve_container(options.container)?;
        let request = RunRequest {
            target_x: options.target_x,
            target_y: options.target_y,
            offset: ScrollOffset::new(options.offset_x, options.offset_y),
            duration_ms: options.duration_ms.unwrap_or(self.config.duration_ms),
        };
        let run = ScrollRun::start(&self.host, self.root, container, &request, self.clock.now_ms())?;
        self.launch(Motion::Run(run), options.on_finish);
        Ok(())
    }

    /// Smoothly scroll a container to an element, following it if layout shifts
    pub fn scroll_to_element(&mut self, options: ElementScrollOptions<H::Node>) -> Result<()> {
        let container = self.resolve_container(options.container)?;
        let request = ElementRequest {
            container,
            target: options.target,
            offset: ScrollOffset::new(options.offset_x, options.offset_y),
            duration_ms: options.duration_ms.unwrap_or(self.config.duration_ms),
            max_retargets: self.config.max_retargets,
        };
        let session = ElementScroll::start(&self.host, self.root, request, self.clock.now_ms())?;
        self.launch(Motion::Element(session), options.on_finish);
        Ok(())
    }

    fn launch(&mut self, mut motion: Motion<H::Node>, on_finish: Option<FinishCallback>) {
        match motion.step(&mut self.host, self.clock.now_ms()) {
            Step::Pending => self.tasks.push(Task { motion, on_finish }),
            Step::Done(outcome) => {
                if let Some(f) = on_finish {
                    f(outcome);
                }
            }
        }
    }

    /// Advance every pending run by one frame
    ///
    /// Callbacks for runs that finish on this frame fire after all runs have
    /// been stepped.
    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        let host = &mut self.host;
        let mut finished = Vec::new();

        self.tasks.retain_mut(|task| match task.motion.step(host, now) {
            Step::Pending => true,
            Step::Done(outcome) => {
                finished.push((task.on_finish.take(), outcome));
                false
            }
        });

        if !finished.is_empty() {
            debug!(finished = finished.len(), remaining = self.tasks.len(), "Scroll frame done");
        }
        for (on_finish, outcome) in finished {
            if let Some(f) = on_finish {
                f(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use kurbo::Point;

    use super::*;
    use crate::geometry::ScrollExtent;
    use crate::page::{NodeId, VirtualPage};
    use crate::scroll::ManualClock;

    const FRAME_MS: u64 = 16;

    fn scroller(content: ScrollExtent) -> (Scroller<VirtualPage, ManualClock>, ManualClock, NodeId) {
        let page = VirtualPage::new(ScrollExtent::new(800, 600), content);
        let root = page.root();
        let clock = ManualClock::new();
        let scroller = Scroller::new(page, clock.clone()).with_scrolling_root(root);
        (scroller, clock, root)
    }

    fn run_frames(scroller: &mut Scroller<VirtualPage, ManualClock>, clock: &ManualClock) {
        for _ in 0..1000 {
            if !scroller.is_animating() {
                return;
            }
            clock.advance(FRAME_MS);
            scroller.frame();
        }
        panic!("animation never finished");
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn test_target_beyond_max_is_clamped() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(1800, 1600));
        s.host_mut().scroll_to(root, ScrollOffset::new(0, 250));
        let (arrived, on_arrive) = counter();

        s.animate(AnimateOptions::new().target_x(3000).on_arrive(on_arrive))
            .unwrap();
        run_frames(&mut s, &clock);

        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(1000, 250));
        assert_eq!(arrived.get(), 1);
    }

    #[test]
    fn test_negative_offset_from_origin() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(1800, 1600));
        s.animate(AnimateOptions::new().target_x(100).offset_x(-10))
            .unwrap();
        run_frames(&mut s, &clock);
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(90, 0));
    }

    #[test]
    fn test_invalid_container_fails_without_side_effects() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(1800, 1600));
        let text = s.host_mut().append_text(root);
        let fired = Rc::new(Cell::new(false));
        let f = fired.clone();

        let err = s
            .animate(
                AnimateOptions::new()
                    .container(text)
                    .target_y(500)
                    .on_finish(move |_| f.set(true)),
            )
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!s.is_animating());
        clock.advance(FRAME_MS);
        s.frame();
        assert!(!fired.get());
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::ZERO);
    }

    #[test]
    fn test_missing_container_without_root_fails() {
        let page = VirtualPage::new(ScrollExtent::new(800, 600), ScrollExtent::new(800, 1600));
        let mut s = Scroller::new(page, ManualClock::new());
        let err = s.animate(AnimateOptions::new().target_y(10)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_native_scroll_interrupts_within_one_frame() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 3000));
        let (interrupted, on_interrupt) = counter();
        let (arrived, on_arrive) = counter();

        s.animate(
            AnimateOptions::new()
                .target_y(2000)
                .on_interrupt(on_interrupt)
                .on_arrive(on_arrive),
        )
        .unwrap();
        for _ in 0..5 {
            clock.advance(FRAME_MS);
            s.frame();
        }

        s.host_mut().scroll_to(root, ScrollOffset::new(0, 42));
        clock.advance(FRAME_MS);
        s.frame();
        assert_eq!(interrupted.get(), 1);
        assert!(!s.is_animating());

        for _ in 0..60 {
            clock.advance(FRAME_MS);
            s.frame();
        }
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 42));
        assert_eq!(interrupted.get(), 1);
        assert_eq!(arrived.get(), 0);
    }

    #[test]
    fn test_outcome_delivered_once() {
        let (mut s, clock, _) = scroller(ScrollExtent::new(800, 3000));
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let o = outcomes.clone();

        s.animate(
            AnimateOptions::new()
                .target_y(700)
                .duration_ms(100)
                .on_finish(move |outcome| o.borrow_mut().push(outcome)),
        )
        .unwrap();
        run_frames(&mut s, &clock);
        for _ in 0..10 {
            clock.advance(FRAME_MS);
            s.frame();
        }

        assert_eq!(*outcomes.borrow(), vec![Outcome::Arrived]);
    }

    #[test]
    fn test_callbacks_fire_in_builder_order() {
        let (mut s, clock, _) = scroller(ScrollExtent::new(800, 3000));
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (log.clone(), log.clone());

        s.animate(
            AnimateOptions::new()
                .target_y(300)
                .on_arrive(move || a.borrow_mut().push("arrive"))
                .on_finish(move |_| b.borrow_mut().push("finish")),
        )
        .unwrap();
        run_frames(&mut s, &clock);

        assert_eq!(*log.borrow(), vec!["arrive", "finish"]);
    }

    #[test]
    fn test_zero_duration_arrives_during_call() {
        let (mut s, _, root) = scroller(ScrollExtent::new(800, 3000));
        let (arrived, on_arrive) = counter();

        s.animate(AnimateOptions::new().target_y(400).duration_ms(0).on_arrive(on_arrive))
            .unwrap();

        assert_eq!(arrived.get(), 1);
        assert!(!s.is_animating());
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 400));
    }

    #[test]
    fn test_default_duration_comes_from_config() {
        let (s, clock, root) = scroller(ScrollExtent::new(800, 3000));
        let mut s = s.with_config(AnimationConfig {
            duration_ms: 64,
            ..AnimationConfig::default()
        });
        s.animate(AnimateOptions::new().target_y(1000)).unwrap();

        let mut frames = 0;
        while s.is_animating() {
            clock.advance(FRAME_MS);
            s.frame();
            frames += 1;
        }
        // 16, 32, 48, 64 are within the duration; 80 lands.
        assert_eq!(frames, 5);
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 1000));
    }

    #[test]
    fn test_overlapping_runs_on_same_container_conflict() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 3000));
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (outcomes.clone(), outcomes.clone());

        s.animate(
            AnimateOptions::new()
                .target_y(2000)
                .on_finish(move |outcome| a.borrow_mut().push(("first", outcome))),
        )
        .unwrap();
        clock.advance(FRAME_MS * 4);
        s.frame();

        s.animate(
            AnimateOptions::new()
                .target_y(100)
                .on_finish(move |outcome| b.borrow_mut().push(("second", outcome))),
        )
        .unwrap();
        assert_eq!(s.pending(), 2);
        run_frames(&mut s, &clock);

        // The run already in motion writes first on the next frame; the newer
        // run sees a position it did not write and yields.
        assert_eq!(
            *outcomes.borrow(),
            vec![("second", Outcome::Interrupted), ("first", Outcome::Arrived)]
        );
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 2000));
    }

    #[test]
    fn test_nested_container_animates_independently_of_page() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 3000));
        let panel = s.host_mut().append_element(
            root,
            Point::new(0.0, 100.0),
            ScrollExtent::new(300, 300),
            ScrollExtent::new(300, 900),
        );
        s.animate(AnimateOptions::new().container(panel).target_y(5000))
            .unwrap();
        run_frames(&mut s, &clock);

        assert_eq!(s.host().scroll_offset(panel), ScrollOffset::new(0, 600));
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::ZERO);
    }

    #[test]
    fn test_scroll_to_element_defers_arrival_until_layout_settles() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 4000));
        let target = s.host_mut().append_element(
            root,
            Point::new(0.0, 2400.0),
            ScrollExtent::new(800, 200),
            ScrollExtent::new(800, 200),
        );
        let (arrived, on_arrive) = counter();

        s.scroll_to_element(
            ElementScrollOptions::new(target)
                .duration_ms(160)
                .on_arrive(on_arrive),
        )
        .unwrap();

        let mut frame = 0;
        let mut grown = false;
        while s.is_animating() {
            clock.advance(FRAME_MS);
            s.frame();
            frame += 1;
            // Lazy content loads mid-run; the run still lands on its stale target first.
            if !grown && frame == 5 {
                assert_eq!(arrived.get(), 0);
                let page = s.host_mut();
                page.set_scroll_size(root, ScrollExtent::new(800, 6000));
                page.set_position(target, Point::new(0.0, 3900.0));
                grown = true;
            }
            assert!(frame < 1000, "scroll never settled");
        }

        assert_eq!(arrived.get(), 1);
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 3900));
    }

    #[test]
    fn test_scroll_to_element_interrupt_skips_retarget() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 4000));
        let target = s.host_mut().append_element(
            root,
            Point::new(0.0, 2400.0),
            ScrollExtent::new(800, 200),
            ScrollExtent::new(800, 200),
        );
        let outcomes = Rc::new(RefCell::new(Vec::new()));
        let o = outcomes.clone();

        s.scroll_to_element(
            ElementScrollOptions::new(target).on_finish(move |outcome| o.borrow_mut().push(outcome)),
        )
        .unwrap();
        clock.advance(FRAME_MS * 3);
        s.frame();

        s.host_mut().set_scroll_size(root, ScrollExtent::new(800, 8000));
        s.host_mut().scroll_to(root, ScrollOffset::new(0, 1234));
        run_frames(&mut s, &clock);

        assert_eq!(*outcomes.borrow(), vec![Outcome::Interrupted]);
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 1234));
    }

    #[test]
    fn test_scroll_to_element_rejects_text_target() {
        let (mut s, _, root) = scroller(ScrollExtent::new(800, 4000));
        let text = s.host_mut().append_text(root);
        let err = s.scroll_to_element(ElementScrollOptions::new(text)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(!s.is_animating());
    }

    #[test]
    fn test_scroll_to_element_in_nested_container() {
        let (mut s, clock, root) = scroller(ScrollExtent::new(800, 4000));
        s.host_mut().scroll_to(root, ScrollOffset::new(0, 150));
        let list = s.host_mut().append_element(
            root,
            Point::new(200.0, 400.0),
            ScrollExtent::new(300, 400),
            ScrollExtent::new(300, 5000),
        );
        let row = s.host_mut().append_element(
            list,
            Point::new(0.0, 1234.0),
            ScrollExtent::new(300, 20),
            ScrollExtent::new(300, 20),
        );

        s.scroll_to_element(ElementScrollOptions::new(row).container(list).offset_y(-20))
            .unwrap();
        run_frames(&mut s, &clock);

        assert_eq!(s.host().scroll_offset(list), ScrollOffset::new(0, 1214));
        assert_eq!(s.host().scroll_offset(root), ScrollOffset::new(0, 150));
    }
}
