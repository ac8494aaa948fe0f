//! HTML serialization of a document subtree, used for snapshots and the demo.

use std::fmt::Write;

use crate::element::{Node, NodeId, Tag};
use crate::text::escape_html;
use crate::Document;

/// Serialize `id` and its subtree. Unknown handles produce an empty string.
pub fn to_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    if let Some(node) = doc.node(id) {
        write_node(doc, node, &mut out);
    }
    out
}

fn write_node(doc: &Document, node: &Node, out: &mut String) {
    out.push('<');
    out.push_str(node.tag.name());

    if let Tag::Input(kind) = node.tag {
        let _ = write!(out, " type=\"{}\"", kind.as_str());
    }
    if !node.classes.is_empty() {
        let _ = write!(out, " class=\"{}\"", escape_html(&node.class_string()));
    }

    let mut data: Vec<_> = node.data.iter().collect();
    data.sort();
    for (key, value) in data {
        let _ = write!(out, " data-{}=\"{}\"", key, escape_html(value));
    }
    for (name, value) in &node.attrs {
        let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
    }

    if let Tag::Input(_) = node.tag {
        if !node.value.is_empty() {
            let _ = write!(out, " value=\"{}\"", escape_html(&node.value));
        }
        if node.checked {
            out.push_str(" checked");
        }
    }
    if node.hidden {
        out.push_str(" hidden");
    }

    if node.tag.is_void() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    if let Some(text) = &node.text {
        out.push_str(&escape_html(text));
    }
    for child in &node.children {
        if let Some(child_node) = doc.node(*child) {
            write_node(doc, child_node, out);
        }
    }

    let _ = write!(out, "</{}>", node.tag.name());
}
