//! Inline editing.
//!
//! One input is visible at a time. A commit collects every editable input of
//! the row, diffs it against the text the inputs were filled with and only
//! bothers the host when something changed. Saves run asynchronously: the
//! host answers through the [`PendingSave`](crate::PendingSave) it returned
//! and the view applies the answer in [`TableView::poll_saves`] or
//! [`TableView::finish_saves`].

use std::collections::BTreeMap;

use super::model::CellEditor;
use super::{TableView, ViewContext};
use crate::classes;
use crate::error::{Result, SaveError, ViewError};
use crate::host::SaveRequest;
use crate::record::{Record, RowKey, Value};

/// Edit session of the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Idle,
    /// An input is open.
    Editing { key: RowKey, attribute: String },
    /// Changes were handed to the host.
    Saving { key: RowKey },
    /// The host rejected the last save; the inputs keep their values.
    Failed { key: RowKey },
}

impl EditState {
    /// Row the session is bound to.
    pub fn row(&self) -> Option<&RowKey> {
        match self {
            EditState::Idle => None,
            EditState::Editing { key, .. }
            | EditState::Saving { key }
            | EditState::Failed { key } => Some(key),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditState::Idle)
    }
}

/// What a commit did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing changed; the row was re-rendered without asking the host.
    Unchanged,
    /// A save was handed to the host.
    Submitted,
    /// A save of this row is still in flight; the commit was dropped.
    Busy,
}

impl TableView {
    /// Open the input of `attribute`, or of the first editable cell when
    /// `attribute` is `None`. Hides any other open input.
    pub fn show_input(
        &mut self,
        cx: &mut ViewContext<'_>,
        key: &RowKey,
        attribute: Option<&str>,
    ) -> Result<()> {
        let row = self.require_row(key)?;
        let attribute = match attribute {
            Some(attribute) => attribute,
            None => row
                .first_editable_attribute()
                .ok_or_else(|| ViewError::NoEditableCell(key.clone()))?,
        }
        .to_string();
        let editor = self.editor(key, &attribute)?;
        let (wrapper, input) = (editor.wrapper, editor.input);

        if let Some((open_key, open_attribute)) = self.visible_input.take() {
            if (&open_key, &open_attribute) != (key, &attribute) {
                if let Ok(open) = self.editor(&open_key, &open_attribute) {
                    cx.dom.set_visible(open.wrapper, false);
                }
            }
        }

        cx.dom.set_visible(wrapper, true);
        cx.dom.focus(input, true);
        log::debug!("[edit] open {key}.{attribute}");
        self.visible_input = Some((key.clone(), attribute.clone()));
        self.edit = EditState::Editing {
            key: key.clone(),
            attribute,
        };
        Ok(())
    }

    /// Commit the current values of every editable input in the row.
    pub fn edit_row(&mut self, cx: &mut ViewContext<'_>, key: &RowKey) -> Result<CommitOutcome> {
        let row = self.require_row(key)?;
        let candidate = row
            .editors()
            .map(|(attribute, editor)| {
                let text = cx.dom.value(editor.input).unwrap_or_default();
                (attribute.to_string(), Value::String(text))
            })
            .collect();
        self.save_row(cx, key, candidate)
    }

    /// Save `candidate` values for a row.
    ///
    /// Only attributes whose text differs from what the input was filled with
    /// end up in the patch. The candidate is merged onto the host's record;
    /// an unsaved record loses its placeholder id.
    pub fn save_row(
        &mut self,
        cx: &mut ViewContext<'_>,
        key: &RowKey,
        candidate: BTreeMap<String, Value>,
    ) -> Result<CommitOutcome> {
        let row = self.require_row(key)?;
        if self.has_pending_save(key) {
            log::debug!("[edit] row {key} already saving, commit dropped");
            return Ok(CommitOutcome::Busy);
        }

        let patch: BTreeMap<String, Value> = candidate
            .iter()
            .filter(|(attribute, value)| {
                row.cell(attribute)
                    .and_then(|cell| cell.editor.as_ref())
                    .is_some_and(|editor| value.to_text() != editor.initial_text)
            })
            .map(|(attribute, value)| (attribute.clone(), value.clone()))
            .collect();

        let base = cx
            .host
            .record_index_by_id(key)
            .and_then(|index| cx.host.record_at(index))
            .cloned()
            .unwrap_or_else(|| Record {
                id: key.record_id().cloned(),
                ..Record::default()
            });
        let mut record = base.merged(&candidate);
        if key.is_new() {
            record.id = None;
        }

        if patch.is_empty() {
            log::debug!("[edit] row {key} unchanged");
            self.on_save_success(cx, key, record)?;
            return Ok(CommitOutcome::Unchanged);
        }

        log::debug!("[edit] saving row {key}: {:?}", patch.keys().collect::<Vec<_>>());
        let request = SaveRequest {
            key: key.clone(),
            record,
            patch,
            endpoint: cx.host.url_without_params(),
            prepend: self.options.add_row_top,
        };
        let pending = cx.host.save_record(request);
        self.pending.push((key.clone(), pending));
        self.edit = EditState::Saving { key: key.clone() };
        Ok(CommitOutcome::Submitted)
    }

    /// Apply every save the host has answered so far. Returns how many were
    /// applied. Every result is applied even if one fails; the first error is
    /// returned.
    pub fn poll_saves(&mut self, cx: &mut ViewContext<'_>) -> Result<usize> {
        let mut settled = Vec::new();
        self.pending.retain_mut(|(key, pending)| match pending.try_settle() {
            Some(result) => {
                settled.push((key.clone(), result));
                false
            }
            None => true,
        });

        let count = settled.len();
        let mut first_error = None;
        for (key, result) in settled {
            if let Err(err) = self.apply_save_result(cx, &key, result) {
                log::warn!("[edit] applying save of row {key} failed: {err}");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(count), Err)
    }

    /// Wait for every outstanding save and apply it, in submission order.
    pub async fn finish_saves(&mut self, cx: &mut ViewContext<'_>) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len();
        let mut first_error = None;
        for (key, save) in pending {
            let result = save.settle().await;
            if let Err(err) = self.apply_save_result(cx, &key, result) {
                log::warn!("[edit] applying save of row {key} failed: {err}");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(count), Err)
    }

    fn apply_save_result(
        &mut self,
        cx: &mut ViewContext<'_>,
        key: &RowKey,
        result: std::result::Result<Record, SaveError>,
    ) -> Result<()> {
        if self.destroyed {
            log::debug!("[edit] save of row {key} settled after destroy");
            return Ok(());
        }
        match result {
            Ok(record) => self.on_save_success(cx, key, record),
            Err(error) => {
                self.on_save_error(cx, key, &error);
                Ok(())
            }
        }
    }

    /// Close the inputs of the saved row and render it from `record`.
    ///
    /// The row is looked up by the record's id first and falls back to the
    /// unsaved placeholder, so a freshly created record replaces it.
    fn on_save_success(&mut self, cx: &mut ViewContext<'_>, key: &RowKey, record: Record) -> Result<()> {
        let rows = &self.table()?.rows;
        let target = record
            .id
            .as_ref()
            .map(|id| RowKey::Id(id.clone()))
            .filter(|k| rows.contains(k))
            .or_else(|| rows.contains(&RowKey::New).then_some(RowKey::New));
        let Some(target) = target.and_then(|k| rows.get(&k)) else {
            log::debug!("[edit] saved row {key} is gone, result ignored");
            return Ok(());
        };

        for (_, editor) in target.editors() {
            cx.dom.set_visible(editor.wrapper, false);
        }
        // before re-rendering: a new-record row opens a fresh session
        if self.edit.row() == Some(key) {
            self.edit = EditState::Idle;
        }
        self.render_row(cx, &record, self.options.add_row_top)?;
        Ok(())
    }

    /// Flag the row's inputs as rejected. Only the reported fields are
    /// flagged when the host names them.
    fn on_save_error(&mut self, cx: &mut ViewContext<'_>, key: &RowKey, error: &SaveError) {
        let Some(row) = self.row(key) else {
            log::debug!("[edit] failed row {key} is gone, error ignored");
            return;
        };
        log::warn!("[edit] save of row {key} failed: {error}");

        for (attribute, editor) in row.editors() {
            if error.fields.is_empty() || error.fields.iter().any(|f| f == attribute) {
                cx.dom.add_class(editor.wrapper, classes::EDIT_ERROR);
            }
        }
        if self.edit.row() == Some(key) {
            self.edit = EditState::Failed { key: key.clone() };
        }
    }

    fn editor(&self, key: &RowKey, attribute: &str) -> Result<&CellEditor> {
        let cell = self
            .require_row(key)?
            .cell(attribute)
            .ok_or_else(|| ViewError::UnknownCell {
                key: key.clone(),
                attribute: attribute.to_string(),
            })?;
        cell.editor.as_ref().ok_or_else(|| ViewError::NotEditable {
            key: key.clone(),
            attribute: attribute.to_string(),
        })
    }
}
