//! In-memory page model implementing [`ScrollHost`]
//!
//! Follows browser layout semantics closely enough to exercise the driver:
//! the document element is scrolled by the viewport, nested elements sit in
//! their parent's content box, and scroll writes are clamped to the reachable
//! range.

use kurbo::{Point, Rect, Vec2};

use crate::geometry::{ScrollExtent, ScrollOffset};
use crate::host::ScrollHost;

/// Handle to a node in a [`VirtualPage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct ElementBox {
    /// Position of the border box inside the parent's content box
    position: Point,
    client: ScrollExtent,
    content: ScrollExtent,
    scroll: ScrollOffset,
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(ElementBox),
    Text,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// A tree of scrollable boxes
#[derive(Debug, Clone)]
pub struct VirtualPage {
    nodes: Vec<Node>,
}

impl VirtualPage {
    /// Create a page whose document element has the given viewport and content size
    pub fn new(viewport: ScrollExtent, content: ScrollExtent) -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                kind: NodeKind::Element(ElementBox {
                    position: Point::ZERO,
                    client: viewport,
                    content,
                    scroll: ScrollOffset::ZERO,
                }),
            }],
        }
    }

    /// The document element, which is also the page scrolling root
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append an element positioned inside `parent`'s content box
    pub fn append_element(
        &mut self,
        parent: NodeId,
        position: Point,
        client: ScrollExtent,
        content: ScrollExtent,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element(ElementBox {
                position,
                client,
                content,
                scroll: ScrollOffset::ZERO,
            }),
        )
    }

    /// Append a text node; text nodes are not elements
    pub fn append_text(&mut self, parent: NodeId) -> NodeId {
        self.push(parent, NodeKind::Text)
    }

    /// Native scroll, as a user or another script would perform it
    pub fn scroll_to(&mut self, element: NodeId, offset: ScrollOffset) {
        self.set_scroll_offset(element, offset);
    }

    /// Change an element's content size, e.g. after lazy content loads
    pub fn set_scroll_size(&mut self, element: NodeId, content: ScrollExtent) {
        if let Some(el) = self.element_mut(element) {
            el.content = content;
        }
        // Shrinking content pulls the scroll offset back into range.
        let offset = self.scroll_offset(element);
        self.set_scroll_offset(element, offset);
    }

    /// Position of an element inside its parent's content box
    pub fn position(&self, element: NodeId) -> Option<Point> {
        self.element(element).map(|el| el.position)
    }

    /// Move an element inside its parent's content box
    pub fn set_position(&mut self, element: NodeId, position: Point) {
        if let Some(el) = self.element_mut(element) {
            el.position = position;
        }
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            kind,
        });
        id
    }

    fn element(&self, id: NodeId) -> Option<&ElementBox> {
        match &self.nodes.get(id.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementBox> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Element(el) => Some(el),
            NodeKind::Text => None,
        }
    }

    /// Screen position of an element's border box origin
    fn origin(&self, id: NodeId) -> Point {
        let Some(el) = self.element(id) else {
            return Point::ZERO;
        };
        let scroll = Vec2::new(el.scroll.x as f64, el.scroll.y as f64);
        match self.nodes[id.0].parent {
            // The viewport scrolls the document element itself.
            None => Point::ZERO - scroll,
            Some(parent) => {
                let base = self.origin(parent) + el.position.to_vec2();
                if parent == self.root() {
                    base
                } else {
                    let parent_scroll = self.scroll_offset(parent);
                    base - Vec2::new(parent_scroll.x as f64, parent_scroll.y as f64)
                }
            }
        }
    }
}

impl ScrollHost for VirtualPage {
    type Node = NodeId;

    fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    fn document_element(&self) -> NodeId {
        self.root()
    }

    fn scroll_offset(&self, element: NodeId) -> ScrollOffset {
        self.element(element).map(|el| el.scroll).unwrap_or_default()
    }

    fn set_scroll_offset(&mut self, element: NodeId, offset: ScrollOffset) {
        if let Some(el) = self.element_mut(element) {
            let max_x = (el.content.width - el.client.width).max(0);
            let max_y = (el.content.height - el.client.height).max(0);
            el.scroll = ScrollOffset::new(offset.x.clamp(0, max_x), offset.y.clamp(0, max_y));
        }
    }

    fn scroll_size(&self, element: NodeId) -> ScrollExtent {
        self.element(element).map(|el| el.content).unwrap_or_default()
    }

    fn client_size(&self, element: NodeId) -> ScrollExtent {
        self.element(element).map(|el| el.client).unwrap_or_default()
    }

    fn bounding_rect(&self, element: NodeId) -> Rect {
        let Some(el) = self.element(element) else {
            return Rect::ZERO;
        };
        // The document element's box spans its content, not the viewport.
        let size = if element == self.root() {
            el.content
        } else {
            el.client
        };
        Rect::from_origin_size(
            self.origin(element),
            (size.width as f64, size.height as f64),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> VirtualPage {
        VirtualPage::new(ScrollExtent::new(800, 600), ScrollExtent::new(800, 3000))
    }

    #[test]
    fn test_scroll_writes_are_clamped() {
        let mut page = page();
        let root = page.root();
        page.scroll_to(root, ScrollOffset::new(50, 5000));
        assert_eq!(page.scroll_offset(root), ScrollOffset::new(0, 2400));

        page.scroll_to(root, ScrollOffset::new(-10, -10));
        assert_eq!(page.scroll_offset(root), ScrollOffset::ZERO);
    }

    #[test]
    fn test_text_nodes_are_not_elements() {
        let mut page = page();
        let text = page.append_text(page.root());
        assert!(!page.is_element(text));
        assert!(page.is_element(page.root()));
        assert_eq!(page.bounding_rect(text), Rect::ZERO);
    }

    #[test]
    fn test_root_children_move_with_page_scroll() {
        let mut page = page();
        let root = page.root();
        let child = page.append_element(
            root,
            Point::new(0.0, 1200.0),
            ScrollExtent::new(100, 100),
            ScrollExtent::new(100, 100),
        );
        page.scroll_to(root, ScrollOffset::new(0, 200));
        let rect = page.bounding_rect(child);
        assert_eq!(rect.y0, 1000.0);
        assert_eq!(page.bounding_rect(root).y0, -200.0);
    }

    #[test]
    fn test_nested_elements_move_with_parent_scroll() {
        let mut page = page();
        let root = page.root();
        let panel = page.append_element(
            root,
            Point::new(40.0, 100.0),
            ScrollExtent::new(300, 300),
            ScrollExtent::new(300, 2000),
        );
        let item = page.append_element(
            panel,
            Point::new(0.0, 900.0),
            ScrollExtent::new(300, 50),
            ScrollExtent::new(300, 50),
        );
        page.scroll_to(panel, ScrollOffset::new(0, 400));
        let rect = page.bounding_rect(item);
        assert_eq!(rect.x0, 40.0);
        assert_eq!(rect.y0, 600.0);
    }

    #[test]
    fn test_shrinking_content_pulls_scroll_back() {
        let mut page = page();
        let root = page.root();
        page.scroll_to(root, ScrollOffset::new(0, 2400));
        page.set_scroll_size(root, ScrollExtent::new(800, 1000));
        assert_eq!(page.scroll_offset(root), ScrollOffset::new(0, 400));
    }
}
