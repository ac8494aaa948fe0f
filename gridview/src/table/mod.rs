//! The table view.
//!
//! A [`TableView`] is created once per grid view with [`TableView::initialize`],
//! builds its tree with [`TableView::render`] and from then on reacts to
//! [`griddom::Event`]s and to calls from its host. Each operation borrows the
//! host and the surface through a [`ViewContext`]; the view itself holds no
//! references.

mod edit;
mod events;
mod lifecycle;
pub mod model;
mod overflow;
mod render;
mod selection;
mod sort;

use griddom::{NodeId, Surface};

use crate::column::Column;
use crate::config::{GridSettings, ThumbnailFormat, ViewOptions, validate_columns};
use crate::error::{ConfigError, Result, ViewError};
use crate::host::{GridHost, PendingSave};
use crate::record::RowKey;

pub use edit::{CommitOutcome, EditState};
pub use events::{ClickDebounce, EventResult};
pub use model::{CellEditor, CellState, Row, RowModel};

use model::Table;

/// Borrowed collaborators of one view operation.
pub struct ViewContext<'a> {
    pub host: &'a mut dyn GridHost,
    pub dom: &'a mut dyn Surface,
}

impl<'a> ViewContext<'a> {
    pub fn new(host: &'a mut dyn GridHost, dom: &'a mut dyn Surface) -> Self {
        Self { host, dom }
    }
}

/// Table view of a datagrid.
#[derive(Debug)]
pub struct TableView {
    options: ViewOptions,
    thumbnail: ThumbnailFormat,
    /// Host columns, captured at initialization.
    columns: Vec<Column>,
    settings: GridSettings,

    /// `husky-table` root.
    root: Option<NodeId>,
    /// `table-container`, the element checked for overflow.
    container: Option<NodeId>,
    table: Option<Table>,
    empty_indicator: Option<NodeId>,

    edit: EditState,
    /// Row and attribute of the input currently shown.
    visible_input: Option<(RowKey, String)>,
    /// Input an Enter commit came from; its focus-out does not commit again.
    enter_guard: Option<NodeId>,
    pending: Vec<(RowKey, PendingSave)>,

    debounce: ClickDebounce,
    destroyed: bool,
}

impl TableView {
    /// Create a view for `host` with the given options.
    ///
    /// Fails when the options are malformed or the host's columns and sort
    /// state contradict each other.
    pub fn initialize(host: &dyn GridHost, options: ViewOptions) -> Result<Self, ConfigError> {
        let thumbnail = options.thumbnail()?;
        validate_columns(host.columns(), host.sort())?;
        log::debug!(
            "[table] initialize: {} columns, instance '{}'",
            host.columns().len(),
            host.settings().instance_name
        );

        Ok(Self {
            options,
            thumbnail,
            columns: host.columns().to_vec(),
            settings: host.settings().clone(),
            root: None,
            container: None,
            table: None,
            empty_indicator: None,
            edit: EditState::Idle,
            visible_input: None,
            enter_guard: None,
            pending: Vec::new(),
            debounce: ClickDebounce::default(),
            destroyed: false,
        })
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    /// Columns that are rendered, in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns
            .iter()
            .filter(|c| !self.options.is_excluded(&c.attribute))
    }

    pub fn is_rendered(&self) -> bool {
        self.table.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn table_container(&self) -> Option<NodeId> {
        self.container
    }

    pub fn body(&self) -> Option<NodeId> {
        self.table.as_ref().map(|t| t.body)
    }

    pub fn header_cell(&self, attribute: &str) -> Option<NodeId> {
        let header = self.table.as_ref()?.header.as_ref()?;
        header.cells.get(attribute).map(|c| c.element)
    }

    /// The header's select-all checkbox.
    pub fn select_all_control(&self) -> Option<NodeId> {
        self.table.as_ref()?.header.as_ref()?.select_all
    }

    pub fn is_select_all_checked(&self, dom: &dyn Surface) -> bool {
        self.select_all_control()
            .is_some_and(|control| dom.is_checked(control))
    }

    pub fn empty_indicator(&self) -> Option<NodeId> {
        self.empty_indicator
    }

    pub fn row(&self, key: &RowKey) -> Option<&Row> {
        self.table.as_ref()?.rows.get(key)
    }

    pub fn rows(&self) -> Option<&RowModel> {
        self.table.as_ref().map(|t| &t.rows)
    }

    pub fn row_count(&self) -> usize {
        self.table.as_ref().map_or(0, |t| t.rows.len())
    }

    /// Row keys in visual order.
    pub fn row_keys(&self, dom: &dyn Surface) -> Vec<RowKey> {
        let Some(table) = &self.table else {
            return Vec::new();
        };
        dom.children(table.body)
            .into_iter()
            .filter_map(|element| table.rows.key_for_element(element).cloned())
            .collect()
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Number of saves handed to the host that have not settled yet.
    pub fn pending_saves(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending_save(&self, key: &RowKey) -> bool {
        self.pending.iter().any(|(k, _)| k == key)
    }

    fn table(&self) -> Result<&Table> {
        self.table.as_ref().ok_or(ViewError::NotRendered)
    }

    fn table_mut(&mut self) -> Result<&mut Table> {
        self.table.as_mut().ok_or(ViewError::NotRendered)
    }

    fn require_row(&self, key: &RowKey) -> Result<&Row> {
        self.table()?
            .rows
            .get(key)
            .ok_or_else(|| ViewError::UnknownRow(key.clone()))
    }
}
