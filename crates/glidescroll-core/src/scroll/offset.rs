//! L4 Atomic Layer: Scroll offset that brings a descendant element into view

use crate::geometry::ScrollOffset;
use crate::host::ScrollHost;

/// Scroll offset at which `target`'s top-left corner meets `container`'s
/// visible top-left corner
///
/// For the page scrolling root, target geometry is already relative to the
/// viewport; any other container's own screen position is subtracted so the
/// result is relative to its content frame.
pub fn target_scroll_offset<H: ScrollHost>(
    host: &H,
    root: Option<H::Node>,
    container: H::Node,
    target: H::Node,
) -> ScrollOffset {
    let target_bounds = host.bounding_rect(target);
    let scroll = host.scroll_offset(container);
    let mut x = target_bounds.x0 + scroll.x as f64;
    let mut y = target_bounds.y0 + scroll.y as f64;

    if root != Some(container) {
        let container_bounds = host.bounding_rect(container);
        x -= container_bounds.x0;
        y -= container_bounds.y0;
    }

    ScrollOffset::new(x.round() as i32, y.round() as i32)
}
