//! The environment the animation driver runs against.
//!
//! A host exposes element handles with scroll metrics and screen geometry.
//! The browser DOM is the reference shape; [`crate::VirtualPage`] is an
//! in-memory implementation used by tests and the CLI.

use std::fmt;

use kurbo::Rect;

use crate::geometry::{ScrollExtent, ScrollOffset};

pub trait ScrollHost {
    /// Handle to a node in the host's tree. Compared by identity.
    type Node: Copy + Eq + fmt::Debug;

    /// Whether `node` refers to an element (as opposed to text, a detached
    /// handle, or a handle from another host)
    fn is_element(&self, node: Self::Node) -> bool;

    /// The root element of the document
    fn document_element(&self) -> Self::Node;

    /// Current scroll offset of an element
    fn scroll_offset(&self, element: Self::Node) -> ScrollOffset;

    /// Write a scroll offset. Hosts may clamp to the reachable range.
    fn set_scroll_offset(&mut self, element: Self::Node, offset: ScrollOffset);

    /// Total scrollable content size of an element
    fn scroll_size(&self, element: Self::Node) -> ScrollExtent;

    /// Visible viewport size of an element
    fn client_size(&self, element: Self::Node) -> ScrollExtent;

    /// Screen-relative border box of an element
    fn bounding_rect(&self, element: Self::Node) -> Rect;
}
