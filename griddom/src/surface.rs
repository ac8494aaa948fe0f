//! Rendering adapter.
//!
//! [`Surface`] is the only way view code touches the visual tree. The
//! in-memory [`crate::Document`] implements it; a browser or terminal backend
//! can implement it as well.
//!
//! Operations on handles that no longer resolve are no-ops (and queries
//! return empty results), matching how detached DOM nodes behave.

use crate::element::{NodeId, Tag};

pub trait Surface {
    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    /// Create a detached element.
    fn create(&mut self, tag: Tag) -> NodeId;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` as the first child of `parent`, detaching it first.
    fn prepend(&mut self, parent: NodeId, child: NodeId);

    /// Insert `node` as the next sibling of `anchor`.
    fn insert_after(&mut self, anchor: NodeId, node: NodeId);

    /// Detach `node` and drop it together with its subtree.
    fn remove(&mut self, node: NodeId);

    fn contains(&self, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    // -------------------------------------------------------------------------
    // Content and attributes
    // -------------------------------------------------------------------------

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> Option<String>;

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_data(&mut self, node: NodeId, key: &str, value: &str);

    fn data(&self, node: NodeId, key: &str) -> Option<String>;

    // -------------------------------------------------------------------------
    // Form state and visibility
    // -------------------------------------------------------------------------

    fn set_checked(&mut self, node: NodeId, checked: bool);

    fn is_checked(&self, node: NodeId) -> bool;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn value(&self, node: NodeId) -> Option<String>;

    fn set_visible(&mut self, node: NodeId, visible: bool);

    fn is_visible(&self, node: NodeId) -> bool;

    /// Move keyboard focus to `node`, optionally selecting its text.
    fn focus(&mut self, node: NodeId, select_text: bool);

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Width of the element's content, never less than its visible width.
    fn scroll_width(&self, node: NodeId) -> u32;

    /// Visible width of the element.
    fn client_width(&self, node: NodeId) -> u32;

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Descendants of `root` (excluding `root`) carrying `class`, in document order.
    fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            if self.has_class(node, class) {
                found.push(node);
            }
            stack.extend(self.children(node).into_iter().rev());
        }
        found
    }

    /// First descendant of `root` carrying `class`.
    fn find_first(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.find_by_class(root, class).into_iter().next()
    }

    /// Nearest element carrying `class`, starting at `node` itself and walking up.
    fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.has_class(id, class) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Nearest element with the given tag, starting at `node` itself.
    fn closest_tag(&self, node: NodeId, tag: Tag) -> Option<NodeId>;
}
