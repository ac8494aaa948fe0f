use std::collections::{BTreeMap, HashMap};

use super::{NodeId, Tag};

/// A single element in a [`crate::Document`].
#[derive(Debug, Clone)]
pub struct Node {
    // Identity
    pub id: NodeId,
    pub tag: Tag,

    // Tree
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    // Content
    pub text: Option<String>,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, String>,
    pub data: HashMap<String, String>,

    // Form state
    pub checked: bool,
    pub value: String,
    /// Whole input text selected (set by `focus(node, true)`).
    pub text_selected: bool,

    // Visual
    pub hidden: bool,
    /// Visible width assigned by the host (a viewport). `None` means the
    /// element is exactly as wide as its content.
    pub client_width: Option<u32>,
    /// Fixed content width overriding measurement.
    pub content_width: Option<u32>,
}

impl Node {
    pub fn new(id: NodeId, tag: Tag) -> Self {
        Self {
            id,
            tag,
            parent: None,
            children: Vec::new(),
            text: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            data: HashMap::new(),
            checked: false,
            value: String::new(),
            text_selected: false,
            hidden: false,
            client_width: None,
            content_width: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Adds every whitespace separated class in `class` that is not present yet.
    pub fn add_class(&mut self, class: &str) {
        for name in class.split_whitespace() {
            if !self.has_class(name) {
                self.classes.push(name.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        for name in class.split_whitespace() {
            self.classes.retain(|c| c != name);
        }
    }

    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    pub fn get_data(&self, key: &str) -> Option<&String> {
        self.data.get(key)
    }
}
