//! Smooth scrolling engine
//!
//! Animates a container's scroll position toward numeric offsets or toward a
//! descendant element, giving way to any other scroll source mid-flight.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Cubic ease-in-out curve
//! - `timing` - Clocks and per-axis interpolation
//! - `bounds` - Maximum reachable scroll offsets
//! - `offset` - Scroll offset that brings an element into view
//!
//! ## L3 Molecular Layer
//! - `run` - One animation run with interference detection
//! - `element` - Scroll-to-element session that retargets on layout shifts
//!
//! ## L2 Organism Layer
//! - `scroller` - Entry points and per-frame task list
//!
//! # Usage
//!
//! ```ignore
//! use glidescroll_core::{AnimateOptions, Scroller, SystemClock, VirtualPage};
//!
//! let root = page.root();
//! let mut scroller = Scroller::new(page, SystemClock::new()).with_scrolling_root(root);
//!
//! scroller.animate(AnimateOptions::new().target_y(1200).on_arrive(|| println!("there")))?;
//!
//! // Once per display refresh:
//! while scroller.is_animating() {
//!     scroller.frame();
//! }
//! ```

// L4 Atomic Layer
pub mod bounds;
pub mod easing;
pub mod offset;
pub mod timing;

// L3 Molecular Layer
pub mod element;
pub mod run;

// L2 Organism Layer
pub mod scroller;

// Re-exports for convenient access
pub use bounds::scroll_max;
pub use easing::ease_in_out_cubic;
pub use element::{ElementRequest, ElementScroll};
pub use offset::target_scroll_offset;
pub use run::{FinishCallback, Outcome, RunRequest, ScrollRun, Step};
pub use scroller::{AnimateOptions, ElementScrollOptions, Scroller};
pub use timing::{Clock, ManualClock, SystemClock};
