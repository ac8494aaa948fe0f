//! Row selection and highlighting.
//!
//! The host owns the selection; every operation here tells the host first and
//! then brings the row model and the controls in line with it.

use griddom::Surface;

use super::model::Row;
use super::{TableView, ViewContext};
use crate::classes;
use crate::error::Result;
use crate::record::RowKey;

impl TableView {
    /// Select or deselect one row. The select-all control follows the host's
    /// selected and total counts.
    pub fn toggle_select_record(
        &mut self,
        cx: &mut ViewContext<'_>,
        key: &RowKey,
        select: bool,
    ) -> Result<()> {
        self.require_row(key)?;
        if select {
            cx.host.set_item_selected(key);
        } else {
            cx.host.set_item_unselected(key);
        }

        if let Some(row) = self.table_mut()?.rows.get_mut(key) {
            set_row_selected(cx.dom, row, select);
        }
        self.sync_select_all(cx);
        log::trace!("[table] row {key} selected={select}");
        Ok(())
    }

    /// Select exactly one row, deselecting every other.
    pub fn unique_select_record(&mut self, cx: &mut ViewContext<'_>, key: &RowKey) -> Result<()> {
        self.require_row(key)?;
        cx.host.deselect_all_items();
        cx.host.set_item_selected(key);

        for row in self.table_mut()?.rows.iter_mut() {
            let selected = row.key == *key;
            set_row_selected(cx.dom, row, selected);
        }
        self.sync_select_all(cx);
        log::debug!("[table] unique selection {key}");
        Ok(())
    }

    pub fn select_all_records(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.set_all_selected(cx, true)
    }

    pub fn deselect_all_records(&mut self, cx: &mut ViewContext<'_>) -> Result<()> {
        self.set_all_selected(cx, false)
    }

    /// Move the highlight to one row. Does nothing unless highlighting is
    /// enabled.
    pub fn unique_highlight_record(&mut self, cx: &mut ViewContext<'_>, key: &RowKey) -> Result<()> {
        let target = self.require_row(key)?.element;
        if !self.options.highlight_selected {
            return Ok(());
        }

        for row in self.table()?.rows.iter() {
            cx.dom.remove_class(row.element, classes::SELECTED_ROW);
        }
        cx.dom.add_class(target, classes::SELECTED_ROW);
        Ok(())
    }

    /// Mark a re-rendered row selected without asking the host again.
    pub(super) fn restore_selection(&mut self, cx: &mut ViewContext<'_>, key: &RowKey) -> Result<()> {
        if let Some(row) = self.table_mut()?.rows.get_mut(key) {
            set_row_selected(cx.dom, row, true);
        }
        self.sync_select_all(cx);
        Ok(())
    }

    fn set_all_selected(&mut self, cx: &mut ViewContext<'_>, select: bool) -> Result<()> {
        self.table()?;
        if select {
            cx.host.select_all_items();
        } else {
            cx.host.deselect_all_items();
        }

        for row in self.table_mut()?.rows.iter_mut() {
            set_row_selected(cx.dom, row, select);
        }
        self.set_select_all_control(cx.dom, select);
        log::debug!("[table] all rows selected={select}");
        Ok(())
    }

    /// Check the select-all control iff the host reports every record selected.
    fn sync_select_all(&self, cx: &mut ViewContext<'_>) {
        let total = cx.host.record_count();
        let all = total > 0 && cx.host.selected_item_ids().len() == total;
        self.set_select_all_control(cx.dom, all);
    }

    pub(super) fn set_select_all_control(&self, dom: &mut dyn Surface, checked: bool) {
        if let Some(control) = self.select_all_control() {
            dom.set_checked(control, checked);
        }
    }
}

fn set_row_selected(dom: &mut dyn Surface, row: &mut Row, selected: bool) {
    row.selected = selected;
    if let Some(control) = row.control {
        dom.set_checked(control, selected);
    }
}
