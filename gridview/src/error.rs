//! Error types

use crate::record::RowKey;

/// Errors detected while validating the view configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The options JSON could not be parsed.
    #[error("invalid view options: {0}")]
    Parse(String),

    /// `thumbnailFormat` is not of the form `<width>x<height>`.
    #[error("invalid thumbnail format '{0}', expected <width>x<height>")]
    ThumbnailFormat(String),

    /// Two columns share the same attribute.
    #[error("duplicate column attribute '{0}'")]
    DuplicateColumn(String),

    /// The host sorts by an attribute no column provides.
    #[error("sort attribute '{0}' does not match any column")]
    UnknownSortColumn(String),

    /// The host sorts by a column that is not sortable.
    #[error("sort attribute '{0}' refers to a column that is not sortable")]
    UnsortableColumn(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Contract violations between the host and the view.
///
/// These are programming errors (a row that was never rendered, a call
/// before `render`), not user-recoverable conditions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("table view has not been rendered")]
    NotRendered,

    #[error("table view is already rendered; create a new instance to render again")]
    AlreadyRendered,

    #[error("no row with id '{0}'")]
    UnknownRow(RowKey),

    #[error("row '{key}' has no cell for attribute '{attribute}'")]
    UnknownCell { key: RowKey, attribute: String },

    #[error("row '{0}' has no editable cell")]
    NoEditableCell(RowKey),

    #[error("cell '{attribute}' of row '{key}' is not editable")]
    NotEditable { key: RowKey, attribute: String },

    /// No sortable header cell for the attribute, or sorting is disabled.
    #[error("column '{0}' cannot be sorted from this view")]
    NotSortable(String),
}

/// A save reported as failed by the host.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct SaveError {
    /// Human-readable reason.
    pub message: String,
    /// Attributes the host rejected, if it reports them.
    pub fields: Vec<String>,
}

impl SaveError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach the attributes that failed validation.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// The host dropped the save without answering.
    pub fn abandoned() -> Self {
        Self::new("save was abandoned by the host")
    }
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
