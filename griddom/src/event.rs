use crate::element::NodeId;

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click on an element
    Click { target: NodeId },
    /// Key press, targeted at the focused element
    KeyPress { target: NodeId, key: Key },
    /// Element lost focus
    FocusOut { target: NodeId },
    /// A checkbox or radio changed; `checked` is the new state
    Change { target: NodeId, checked: bool },
    /// Viewport resized
    Resize,
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
}
