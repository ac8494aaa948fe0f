//! Table view for a datagrid.
//!
//! [`TableView`] renders records as table rows through a [`griddom::Surface`]
//! and keeps its own row, selection and edit model in sync with that tree.
//! Everything it needs from the owning grid goes through the [`GridHost`]
//! trait.

pub mod classes;
pub mod column;
pub mod config;
pub mod error;
pub mod host;
pub mod record;
pub mod table;

pub use column::{Column, ColumnType, SortDirection, SortState};
pub use config::{GridSettings, SelectItem, SelectKind, ThumbnailFormat, ViewOptions};
pub use error::{ConfigError, SaveError, ViewError};
pub use host::{GridHost, PendingSave, SaveRequest, SaveResolver, Thumbnail};
pub use record::{Record, RecordId, RowKey, Value};
pub use table::{ClickDebounce, CommitOutcome, EditState, EventResult, TableView, ViewContext};
