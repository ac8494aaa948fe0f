mod node;

pub use node::Node;

use std::fmt;

/// Handle to an element owned by a [`crate::Document`] (or any other surface).
///
/// Handles are never reused within one document, so a stale handle simply
/// stops resolving once its element is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    /// Build a handle from a raw value. Surfaces other than `Document` use this
    /// to mint their own handles.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Kind of `<input>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Checkbox,
    Radio,
}

impl InputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Checkbox => "checkbox",
            InputKind::Radio => "radio",
        }
    }
}

/// Element tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Span,
    Table,
    THead,
    TBody,
    Tr,
    Th,
    Td,
    Img,
    Input(InputKind),
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Table => "table",
            Tag::THead => "thead",
            Tag::TBody => "tbody",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
            Tag::Img => "img",
            Tag::Input(_) => "input",
        }
    }

    /// Void elements have no closing tag and no children.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Img | Tag::Input(_))
    }

    /// Whether children are laid out side by side (their widths add up).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Tag::Tr)
    }

    pub fn is_cell(self) -> bool {
        matches!(self, Tag::Th | Tag::Td)
    }
}
