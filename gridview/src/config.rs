//! View configuration.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::column::{Column, SortState};
use crate::error::ConfigError;

/// Selection idiom of the select column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectKind {
    /// Multi-select with a select-all control in the header.
    #[default]
    Checkbox,
    /// Single-select.
    Radio,
}

/// Configuration of the select column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectItem {
    #[serde(rename = "type")]
    pub kind: SelectKind,
    /// Put the control into the first content cell instead of its own cell.
    #[serde(default)]
    pub in_first_cell: bool,
}

impl SelectItem {
    pub fn checkbox() -> Self {
        Self {
            kind: SelectKind::Checkbox,
            in_first_cell: false,
        }
    }

    pub fn radio() -> Self {
        Self {
            kind: SelectKind::Radio,
            in_first_cell: false,
        }
    }

    pub fn in_first_cell(mut self) -> Self {
        self.in_first_cell = true;
        self
    }
}

/// Thumbnail size handed to the host's content manipulator, e.g. `50x50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailFormat {
    pub width: u32,
    pub height: u32,
}

impl FromStr for ThumbnailFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::ThumbnailFormat(s.to_string());
        let (width, height) = s.split_once('x').ok_or_else(invalid)?;
        let width = width.trim().parse::<u32>().map_err(|_| invalid())?;
        let height = height.trim().parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

impl fmt::Display for ThumbnailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Options of a table view.
///
/// Deserializes from the camelCase option object the grid passes to its
/// views; every field is optional.
///
/// # Example
///
/// ```
/// use gridview::{SelectItem, ViewOptions};
///
/// let options = ViewOptions::default()
///     .editable(true)
///     .select_item(Some(SelectItem::radio()))
///     .exclude_fields(["id"]);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
    /// Render editable columns as inline-editable cells.
    pub editable: bool,
    /// Add a remove affordance at the end of every row.
    pub remove_row: bool,
    /// Select column; `None` disables selection controls.
    pub select_item: Option<SelectItem>,
    /// Insert added rows at the top instead of the bottom.
    pub add_row_top: bool,
    /// Attributes never rendered.
    pub exclude_fields: Vec<String>,
    /// Extra class(es) for the view root.
    pub css_class: String,
    pub show_head: bool,
    /// Highlight the last clicked row.
    pub highlight_selected: bool,
    pub full_width: bool,
    /// Translation key of the empty-state text.
    pub no_items_text: String,
    pub thumbnail_format: String,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            editable: false,
            remove_row: false,
            select_item: Some(SelectItem::checkbox()),
            add_row_top: true,
            exclude_fields: Vec::new(),
            css_class: String::new(),
            show_head: true,
            highlight_selected: false,
            full_width: false,
            no_items_text: "This list is empty".to_string(),
            thumbnail_format: "50x50".to_string(),
        }
    }
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let options: ViewOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Check the options that cannot be enforced by their types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thumbnail()?;
        Ok(())
    }

    /// The parsed thumbnail format.
    pub fn thumbnail(&self) -> Result<ThumbnailFormat, ConfigError> {
        self.thumbnail_format.parse()
    }

    pub fn is_excluded(&self, attribute: &str) -> bool {
        self.exclude_fields.iter().any(|f| f == attribute)
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn remove_row(mut self, remove_row: bool) -> Self {
        self.remove_row = remove_row;
        self
    }

    pub fn select_item(mut self, select_item: Option<SelectItem>) -> Self {
        self.select_item = select_item;
        self
    }

    pub fn add_row_top(mut self, add_row_top: bool) -> Self {
        self.add_row_top = add_row_top;
        self
    }

    pub fn exclude_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn css_class(mut self, css_class: impl Into<String>) -> Self {
        self.css_class = css_class.into();
        self
    }

    pub fn show_head(mut self, show_head: bool) -> Self {
        self.show_head = show_head;
        self
    }

    pub fn highlight_selected(mut self, highlight: bool) -> Self {
        self.highlight_selected = highlight;
        self
    }

    pub fn full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    pub fn no_items_text(mut self, text: impl Into<String>) -> Self {
        self.no_items_text = text.into();
        self
    }

    pub fn thumbnail_format(mut self, format: impl Into<String>) -> Self {
        self.thumbnail_format = format.into();
        self
    }
}

/// Grid-level settings the view reads from its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    /// Header cells of sortable columns react to clicks.
    pub sortable: bool,
    /// Instance name, used to group radio controls.
    pub instance_name: String,
    /// Run the overflow check right after rendering.
    pub resize_listeners: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            sortable: true,
            instance_name: String::new(),
            resize_listeners: true,
        }
    }
}

impl GridSettings {
    pub fn new(instance_name: impl Into<String>) -> Self {
        Self {
            instance_name: instance_name.into(),
            ..Default::default()
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn resize_listeners(mut self, enabled: bool) -> Self {
        self.resize_listeners = enabled;
        self
    }
}

/// Validate the host's column list and sort state against each other.
pub(crate) fn validate_columns(
    columns: &[Column],
    sort: Option<&SortState>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for column in columns {
        if !seen.insert(column.attribute.as_str()) {
            return Err(ConfigError::DuplicateColumn(column.attribute.clone()));
        }
    }

    if let Some(sort) = sort {
        let column = columns
            .iter()
            .find(|c| c.attribute == sort.attribute)
            .ok_or_else(|| ConfigError::UnknownSortColumn(sort.attribute.clone()))?;
        if !column.sortable {
            return Err(ConfigError::UnsortableColumn(sort.attribute.clone()));
        }
    }
    Ok(())
}
