//! Intrinsic width measurement.
//!
//! There is no layout engine: an element is as wide as its content. Table rows
//! add up their cells, every other element takes its widest child.

use crate::element::{InputKind, Node, Tag};
use crate::text::block_width;

/// Horizontal padding counted for every table cell.
pub const CELL_PADDING: u32 = 2;

/// Width of a checkbox or radio control.
pub const TOGGLE_WIDTH: u32 = 3;

/// Measure `node` using `lookup` to resolve children.
pub fn intrinsic_width<'a, F>(node: &'a Node, lookup: &F) -> u32
where
    F: Fn(crate::NodeId) -> Option<&'a Node>,
{
    if node.hidden {
        return 0;
    }
    if let Some(fixed) = node.content_width {
        return fixed;
    }

    let own = match node.tag {
        Tag::Input(InputKind::Text) => block_width(&node.value) as u32,
        Tag::Input(_) => TOGGLE_WIDTH,
        Tag::Img => node
            .attrs
            .get("width")
            .and_then(|w| w.parse::<u32>().ok())
            .unwrap_or(0),
        _ => node.text.as_deref().map(block_width).unwrap_or(0) as u32,
    };

    let children = node.children.iter().filter_map(|id| lookup(*id));
    let nested = if node.tag.is_horizontal() {
        children.map(|child| intrinsic_width(child, lookup)).sum()
    } else {
        children
            .map(|child| intrinsic_width(child, lookup))
            .max()
            .unwrap_or(0)
    };

    let padding = if node.tag.is_cell() { CELL_PADDING } else { 0 };
    own.max(nested) + padding
}
