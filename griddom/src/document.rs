//! In-memory element tree.

use std::collections::HashMap;

use crate::element::{Node, NodeId, Tag};
use crate::measure::intrinsic_width;
use crate::surface::Surface;

/// An arena of [`Node`]s with a permanent root element.
///
/// # Example
///
/// ```
/// use griddom::{Document, Surface, Tag};
///
/// let mut doc = Document::new();
/// let cell = doc.create(Tag::Td);
/// doc.set_text(cell, "hello");
/// doc.append(doc.root(), cell);
/// assert_eq!(doc.scroll_width(cell), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    focused: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, Tag::Div));
        Self {
            nodes,
            root,
            next_id: 1,
            focused: None,
        }
    }

    /// The document root. It can never be removed.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of live elements, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Set the visible width of an element (a viewport).
    pub fn set_client_width(&mut self, id: NodeId, width: u32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.client_width = Some(width);
        }
    }

    /// Pin the content width of an element instead of measuring it.
    pub fn set_content_width(&mut self, id: NodeId, width: Option<u32>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.content_width = width;
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get(&id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| *c != id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = None;
        }
    }

    /// Rejects moves that would make a node its own ancestor.
    fn can_adopt(&self, parent: NodeId, child: NodeId) -> bool {
        if parent == child || child == self.root {
            return false;
        }
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return false;
        }
        let mut current = Some(parent);
        while let Some(node) = current {
            if node == child {
                return false;
            }
            current = self.nodes.get(&node).and_then(|n| n.parent);
        }
        true
    }

    fn insert_at(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) {
        if !self.can_adopt(parent, child) {
            log::warn!("[dom] refusing to insert {} into {}", child, parent);
            return;
        }
        self.detach(child);
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            match index {
                Some(i) => {
                    let i = i.min(parent_node.children.len());
                    parent_node.children.insert(i, child);
                }
                None => parent_node.children.push(child),
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
    }
}

impl Surface for Document {
    fn create(&mut self, tag: Tag) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, tag));
        id
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, child, None);
    }

    fn prepend(&mut self, parent: NodeId, child: NodeId) {
        self.insert_at(parent, child, Some(0));
    }

    fn insert_after(&mut self, anchor: NodeId, node: NodeId) {
        let Some(parent) = self.parent(anchor) else {
            log::warn!("[dom] insert_after on detached anchor {}", anchor);
            return;
        };
        if anchor == node {
            return;
        }
        self.detach(node);
        let index = self
            .nodes
            .get(&parent)
            .and_then(|p| p.children.iter().position(|c| *c == anchor))
            .map(|i| i + 1);
        self.insert_at(parent, node, index);
    }

    fn remove(&mut self, id: NodeId) {
        if id == self.root || !self.nodes.contains_key(&id) {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
    }

    fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.add_class(class);
        }
    }

    fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.remove_class(class);
        }
    }

    fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.has_class(class))
    }

    fn set_text(&mut self, id: NodeId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text = Some(text.to_string());
        }
    }

    fn text(&self, id: NodeId) -> Option<String> {
        self.nodes.get(&id).and_then(|n| n.text.clone())
    }

    fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.nodes.get(&id).and_then(|n| n.attrs.get(name).cloned())
    }

    fn set_data(&mut self, id: NodeId, key: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.data.insert(key.to_string(), value.to_string());
        }
    }

    fn data(&self, id: NodeId, key: &str) -> Option<String> {
        self.nodes.get(&id).and_then(|n| n.get_data(key).cloned())
    }

    fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.checked = checked;
        }
    }

    fn is_checked(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.checked)
    }

    fn set_value(&mut self, id: NodeId, value: &str) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.value = value.to_string();
            node.text_selected = false;
        }
    }

    fn value(&self, id: NodeId) -> Option<String> {
        self.nodes.get(&id).map(|n| n.value.clone())
    }

    fn set_visible(&mut self, id: NodeId, visible: bool) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.hidden = !visible;
        }
    }

    fn is_visible(&self, id: NodeId) -> bool {
        // An element is only visible when none of its ancestors is hidden.
        let mut current = Some(id);
        let mut seen = false;
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                return false;
            };
            if node.hidden {
                return false;
            }
            seen = true;
            current = node.parent;
        }
        seen
    }

    fn focus(&mut self, id: NodeId, select_text: bool) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        if let Some(previous) = self.focused.and_then(|f| self.nodes.get_mut(&f)) {
            previous.text_selected = false;
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.text_selected = select_text;
        }
        log::trace!("[dom] focus {} (select: {})", id, select_text);
        self.focused = Some(id);
    }

    fn scroll_width(&self, id: NodeId) -> u32 {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        let lookup = |child: NodeId| self.nodes.get(&child);
        intrinsic_width(node, &lookup).max(self.client_width(id))
    }

    fn client_width(&self, id: NodeId) -> u32 {
        let Some(node) = self.nodes.get(&id) else {
            return 0;
        };
        match node.client_width {
            Some(width) => width,
            None => {
                let lookup = |child: NodeId| self.nodes.get(&child);
                intrinsic_width(node, &lookup)
            }
        }
    }

    fn closest_tag(&self, id: NodeId, tag: Tag) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.nodes.get(&node_id)?;
            if node.tag == tag {
                return Some(node_id);
            }
            current = node.parent;
        }
        None
    }
}
