//! The contract between the table view and the grid that owns it.

use std::collections::BTreeMap;

use griddom::NodeId;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::column::{Column, ColumnType, SortDirection, SortState};
use crate::config::{GridSettings, ThumbnailFormat};
use crate::error::SaveError;
use crate::record::{Record, RowKey, Value};

/// Everything the table view needs from the grid controller.
///
/// The host owns the record set. The view never edits records itself; it only
/// asks the host to remove, select or save them and re-renders rows from what
/// the host hands back.
pub trait GridHost {
    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    /// Column descriptors ("matchings"), in display order.
    fn columns(&self) -> &[Column];

    /// Current sort, if any.
    fn sort(&self) -> Option<&SortState>;

    fn settings(&self) -> &GridSettings;

    // -------------------------------------------------------------------------
    // Record set
    // -------------------------------------------------------------------------

    /// Drop a record from the master set.
    fn remove_record(&mut self, key: &RowKey);

    fn record_count(&self) -> usize;

    fn record_index_by_id(&self, key: &RowKey) -> Option<usize>;

    fn record_at(&self, index: usize) -> Option<&Record>;

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    fn select_all_items(&mut self);

    fn deselect_all_items(&mut self);

    fn set_item_selected(&mut self, key: &RowKey);

    fn set_item_unselected(&mut self, key: &RowKey);

    fn selected_item_ids(&self) -> Vec<RowKey>;

    // -------------------------------------------------------------------------
    // Persistence, sorting and notifications
    // -------------------------------------------------------------------------

    /// Endpoint saves are sent to.
    fn url_without_params(&self) -> String;

    /// Persist a record. The returned [`PendingSave`] settles with the stored
    /// record (possibly carrying a new id) or the reason it was rejected.
    fn save_record(&mut self, request: SaveRequest) -> PendingSave;

    /// Re-order the grid. The host re-fetches and re-renders on its own.
    fn sort_grid(&mut self, attribute: &str, direction: SortDirection);

    fn emit_item_clicked(&mut self, key: &RowKey);

    // -------------------------------------------------------------------------
    // Content hooks
    // -------------------------------------------------------------------------

    /// Turn a raw value into cell text. `row_count` counts rendered rows,
    /// including the one being built, so filters can number rows.
    fn process_content_filter(
        &self,
        _attribute: &str,
        value: &Value,
        _kind: ColumnType,
        _row_count: usize,
    ) -> String {
        value.to_text()
    }

    /// Resolve a thumbnail column value into an image.
    fn manipulate_content(&self, value: &Value, _kind: ColumnType, format: ThumbnailFormat) -> Thumbnail {
        Thumbnail::from_value(value, format)
    }

    /// Translate a user-facing key.
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }

    /// Start a loading indicator inside `container`.
    fn start_loader(&mut self, _container: NodeId) {}
}

/// Image shown in a thumbnail cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Thumbnail {
    pub src: String,
    pub alt: String,
}

impl Thumbnail {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }

    /// Read a thumbnail from a value.
    ///
    /// Objects keyed by format (`{"50x50": {"url": .., "alt": ..}}`) pick the
    /// requested size; flat objects use their `url`/`alt` keys; anything else
    /// is taken as the image source.
    pub fn from_value(value: &Value, format: ThumbnailFormat) -> Self {
        let Value::Json(serde_json::Value::Object(map)) = value else {
            return Self::new(value.to_text(), "");
        };
        let sized = map
            .get(&format.to_string())
            .and_then(|v| v.as_object())
            .unwrap_or(map);
        let text = |key: &str| {
            sized
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self::new(text("url"), text("alt"))
    }
}

/// A save handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// Row the save belongs to.
    pub key: RowKey,
    /// Host record merged with the edited values; no id for new records.
    pub record: Record,
    /// Only the attributes whose value actually changed.
    pub patch: BTreeMap<String, Value>,
    pub endpoint: String,
    /// Whether a newly created row should go to the top.
    pub prepend: bool,
}

/// Single-slot result of a save, settled by the host through a [`SaveResolver`].
#[derive(Debug)]
pub struct PendingSave {
    rx: oneshot::Receiver<Result<Record, SaveError>>,
}

/// Sending half of a [`PendingSave`].
#[derive(Debug)]
pub struct SaveResolver {
    tx: oneshot::Sender<Result<Record, SaveError>>,
}

impl PendingSave {
    /// A pending save plus the resolver the host keeps.
    pub fn channel() -> (SaveResolver, PendingSave) {
        let (tx, rx) = oneshot::channel();
        (SaveResolver { tx }, PendingSave { rx })
    }

    /// An already settled save.
    pub fn ready(result: Result<Record, SaveError>) -> Self {
        let (resolver, pending) = Self::channel();
        resolver.resolve(result);
        pending
    }

    /// Take the result if the host has answered. A dropped resolver counts as
    /// a failure.
    pub(crate) fn try_settle(&mut self) -> Option<Result<Record, SaveError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(SaveError::abandoned())),
        }
    }

    /// Wait for the host's answer.
    pub(crate) async fn settle(self) -> Result<Record, SaveError> {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(SaveError::abandoned()),
        }
    }
}

impl SaveResolver {
    pub fn resolve(self, result: Result<Record, SaveError>) {
        if self.tx.send(result).is_err() {
            log::debug!("[table] save result dropped, view no longer waiting");
        }
    }

    pub fn succeed(self, record: Record) {
        self.resolve(Ok(record));
    }

    pub fn fail(self, error: SaveError) {
        self.resolve(Err(error));
    }
}
