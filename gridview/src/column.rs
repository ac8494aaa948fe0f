//! Column ("matching") descriptors and sort state.

use serde::Deserialize;
use serde::Serialize;

/// Content type of a column, used by the host's content filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    DateTime,
    Bytes,
    /// Image column; rendered through the host's content manipulator.
    Thumbnails,
    #[serde(other)]
    Other,
}

/// Column configuration supplied by the host.
///
/// # Examples
///
/// ```
/// use gridview::{Column, ColumnType};
///
/// let columns = vec![
///     Column::new("name", "public.name").sortable().editable(),
///     Column::new("image", "public.image").kind(ColumnType::Thumbnails),
/// ];
/// assert!(columns[0].sortable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Record attribute shown in this column.
    pub attribute: String,
    /// Translation key of the header label.
    pub content: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub editable: bool,
    #[serde(default, rename = "type")]
    pub kind: ColumnType,
}

impl Column {
    pub fn new(attribute: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            content: content.into(),
            sortable: false,
            editable: false,
            kind: ColumnType::Text,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// The host's current sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub attribute: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(attribute: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            attribute: attribute.into(),
            direction,
        }
    }

    pub fn asc(attribute: impl Into<String>) -> Self {
        Self::new(attribute, SortDirection::Asc)
    }

    pub fn desc(attribute: impl Into<String>) -> Self {
        Self::new(attribute, SortDirection::Desc)
    }
}
