//! Row model: the view's own record of what it has rendered.
//!
//! Plain data keyed by [`RowKey`]; element handles point into the surface but
//! nothing here touches it.

use std::collections::HashMap;

use griddom::NodeId;

use crate::record::RowKey;

/// Inline editor of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellEditor {
    /// Span showing the value while not editing.
    pub display: NodeId,
    /// Hidden wrapper around the input.
    pub wrapper: NodeId,
    pub input: NodeId,
    /// Text the input was pre-filled with; edits are diffed against it.
    pub initial_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellState {
    pub attribute: String,
    pub element: NodeId,
    pub editable: bool,
    /// Present when the cell was rendered as inline-editable.
    pub editor: Option<CellEditor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: RowKey,
    pub element: NodeId,
    /// Checkbox or radio input.
    pub control: Option<NodeId>,
    /// One entry per rendered column, in column order.
    pub cells: Vec<CellState>,
    pub selected: bool,
}

impl Row {
    pub fn new(key: RowKey, element: NodeId) -> Self {
        Self {
            key,
            element,
            control: None,
            cells: Vec::new(),
            selected: false,
        }
    }

    pub fn cell(&self, attribute: &str) -> Option<&CellState> {
        self.cells.iter().find(|c| c.attribute == attribute)
    }

    /// Inline editors of the row, in column order.
    pub fn editors(&self) -> impl Iterator<Item = (&str, &CellEditor)> {
        self.cells
            .iter()
            .filter_map(|c| c.editor.as_ref().map(|e| (c.attribute.as_str(), e)))
    }

    pub fn first_editable_attribute(&self) -> Option<&str> {
        self.editors().next().map(|(attribute, _)| attribute)
    }

    pub fn has_editors(&self) -> bool {
        self.editors().next().is_some()
    }
}

/// Rows keyed by record identity.
#[derive(Debug, Default)]
pub struct RowModel {
    rows: HashMap<RowKey, Row>,
    by_element: HashMap<NodeId, RowKey>,
}

impl RowModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.rows.contains_key(key)
    }

    pub fn get(&self, key: &RowKey) -> Option<&Row> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &RowKey) -> Option<&mut Row> {
        self.rows.get_mut(key)
    }

    /// Store `row`, returning the row it replaced (same key), if any.
    pub fn insert(&mut self, row: Row) -> Option<Row> {
        self.by_element.insert(row.element, row.key.clone());
        let previous = self.rows.insert(row.key.clone(), row);
        if let Some(old) = &previous {
            self.by_element.remove(&old.element);
        }
        previous
    }

    pub fn remove(&mut self, key: &RowKey) -> Option<Row> {
        let row = self.rows.remove(key)?;
        self.by_element.remove(&row.element);
        Some(row)
    }

    /// Key of the row rendered as `element`.
    pub fn key_for_element(&self, element: NodeId) -> Option<&RowKey> {
        self.by_element.get(&element)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.values_mut()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCellState {
    pub element: NodeId,
    pub sortable: bool,
    /// Loader container, once sorting by this column was requested.
    pub loader: Option<NodeId>,
}

#[derive(Debug)]
pub struct Header {
    pub element: NodeId,
    pub row: NodeId,
    /// Select-all checkbox input.
    pub select_all: Option<NodeId>,
    pub cells: HashMap<String, HeaderCellState>,
}

/// Everything one `render` call produced.
#[derive(Debug)]
pub struct Table {
    pub element: NodeId,
    pub body: NodeId,
    pub header: Option<Header>,
    pub rows: RowModel,
}
