//! L4 Atomic Layer: Maximum reachable scroll offsets

use crate::geometry::ScrollOffset;
use crate::host::ScrollHost;

/// Maximum X and Y scroll offsets of `element`
///
/// When `element` is the page scrolling root, the document element's metrics
/// are measured instead of the root's own box.
pub fn scroll_max<H: ScrollHost>(host: &H, root: Option<H::Node>, element: H::Node) -> ScrollOffset {
    let measured = if root == Some(element) {
        host.document_element()
    } else {
        element
    };
    let content = host.scroll_size(measured);
    let client = host.client_size(measured);

    ScrollOffset::new(
        (content.width - client.width).max(0),
        (content.height - client.height).max(0),
    )
}
