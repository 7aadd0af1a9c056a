//! Integer scroll geometry shared by hosts and the animation driver.
//!
//! Screen-space element boxes use `kurbo::Rect`; scroll offsets and scrollable
//! extents are whole pixels, the way the DOM reports them.

use serde::Serialize;

/// A horizontal and vertical scroll offset in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScrollOffset {
    pub x: i32,
    pub y: i32,
}

impl ScrollOffset {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Per-axis minimum, used to keep a target inside the reachable range
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
        }
    }
}

/// Width and height of a content or viewport box in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ScrollExtent {
    pub width: i32,
    pub height: i32,
}

impl ScrollExtent {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}
