//! Row insertion, replacement and removal.

use griddom::{InputKind, NodeId, Surface, Tag};

use super::model::{CellEditor, CellState, Row};
use super::render::build_select_control;
use super::{TableView, ViewContext};
use crate::classes;
use crate::column::{Column, ColumnType};
use crate::config::SelectKind;
use crate::error::Result;
use crate::record::{Record, RowKey};

impl TableView {
    /// Add a row for `record`, at the top when `addRowTop` is set.
    pub fn add_record(&mut self, cx: &mut ViewContext<'_>, record: &Record) -> Result<RowKey> {
        self.table()?;
        self.hide_empty_indicator(cx.dom);
        self.render_row(cx, record, self.options.add_row_top)
    }

    /// Remove the row of `key` and tell the host to drop the record.
    pub fn remove_record(&mut self, cx: &mut ViewContext<'_>, key: &RowKey) -> Result<()> {
        self.require_row(key)?;
        cx.host.remove_record(key);

        let table = self.table_mut()?;
        if let Some(row) = table.rows.remove(key) {
            cx.dom.remove(row.element);
        }
        let now_empty = table.rows.is_empty();
        self.end_session_on(key);
        if self.enter_guard.is_some_and(|input| !cx.dom.contains(input)) {
            self.enter_guard = None;
        }
        log::debug!("[table] removed row {key}");

        if now_empty {
            self.set_select_all_control(cx.dom, false);
            self.show_empty_indicator(cx);
        }
        Ok(())
    }

    /// Render `record` as a row.
    ///
    /// A row with the same key is replaced in place; otherwise the row goes
    /// to the top or bottom of the body. Any unsaved placeholder row is
    /// dropped first.
    pub(super) fn render_row(
        &mut self,
        cx: &mut ViewContext<'_>,
        record: &Record,
        prepend: bool,
    ) -> Result<RowKey> {
        self.remove_new_record_row(cx.dom);

        let key = record.key();
        let table = self.table()?;
        let body = table.body;
        let previous = table.rows.get(&key).map(|r| r.element);
        let was_selected = table.rows.get(&key).is_some_and(|r| r.selected);
        let row_count = table.rows.len() + usize::from(previous.is_none());

        let row = self.build_row(cx, record, key.clone(), row_count);
        let element = row.element;

        match previous.filter(|old| cx.dom.contains(*old)) {
            Some(old) => {
                cx.dom.insert_after(old, element);
                cx.dom.remove(old);
                log::trace!("[table] replaced row {key}");
            }
            None if prepend => cx.dom.prepend(body, element),
            None => cx.dom.append(body, element),
        }
        self.table_mut()?.rows.insert(row);
        if self
            .visible_input
            .as_ref()
            .is_some_and(|(row_key, _)| *row_key == key)
        {
            self.visible_input = None;
        }
        if self.enter_guard.is_some_and(|input| !cx.dom.contains(input)) {
            self.enter_guard = None;
        }

        self.after_row_rendered(cx, record, &key, was_selected)?;
        Ok(key)
    }

    fn after_row_rendered(
        &mut self,
        cx: &mut ViewContext<'_>,
        record: &Record,
        key: &RowKey,
        was_selected: bool,
    ) -> Result<()> {
        if record.selected {
            self.toggle_select_record(cx, key, true)?;
        } else if was_selected {
            // replaced rows keep the selection the host already holds
            self.restore_selection(cx, key)?;
        } else {
            self.set_select_all_control(cx.dom, false);
        }

        if self.options.editable && key.is_new() {
            if self.row(key).is_some_and(Row::has_editors) {
                self.show_input(cx, key, None)?;
            } else {
                log::debug!("[table] new row has no editable cell to open");
            }
        }
        Ok(())
    }

    fn build_row(
        &self,
        cx: &mut ViewContext<'_>,
        record: &Record,
        key: RowKey,
        row_count: usize,
    ) -> Row {
        let element = cx.dom.create(Tag::Tr);
        cx.dom.add_class(element, classes::ROW);
        cx.dom.set_data(element, "id", &key.to_string());
        let mut row = Row::new(key, element);

        for column in self.visible_columns() {
            let cell = self.build_cell(cx, record, column, row_count);
            cx.dom.append(element, cell.element);
            row.cells.push(cell);
        }

        if let Some(select) = &self.options.select_item {
            let radio_name = format!("datagrid-{}", self.settings.instance_name);
            let radio_name = (select.kind == SelectKind::Radio).then_some(radio_name.as_str());
            let (wrapper, input) = build_select_control(cx.dom, select.kind, radio_name);

            match row.cells.first().filter(|_| select.in_first_cell) {
                Some(first) => cx.dom.prepend(first.element, wrapper),
                None => {
                    let cell = cx.dom.create(Tag::Td);
                    cx.dom.add_class(cell, classes::CELL_FIT);
                    cx.dom.append(cell, wrapper);
                    cx.dom.prepend(element, cell);
                }
            }
            row.control = Some(input);
        }

        if self.options.remove_row {
            let cell = cx.dom.create(Tag::Td);
            cx.dom.add_class(cell, classes::CELL_FIT);
            let remover = cx.dom.create(Tag::Span);
            cx.dom.add_class(remover, classes::REMOVE_ICON);
            cx.dom.add_class(remover, classes::ROW_REMOVER);
            cx.dom.append(cell, remover);
            cx.dom.append(element, cell);
        }

        row
    }

    fn build_cell(
        &self,
        cx: &mut ViewContext<'_>,
        record: &Record,
        column: &Column,
        row_count: usize,
    ) -> CellState {
        let value = record.value(&column.attribute);
        let element = cx.dom.create(Tag::Td);
        cx.dom.set_data(element, "attribute", &column.attribute);

        let mut editor = None;
        if column.kind == ColumnType::Thumbnails {
            let thumbnail = cx.host.manipulate_content(&value, column.kind, self.thumbnail);
            let img = cx.dom.create(Tag::Img);
            cx.dom.set_attr(img, "alt", &thumbnail.alt);
            cx.dom.set_attr(img, "src", &thumbnail.src);
            cx.dom.append(element, img);
        } else {
            let text =
                cx.host
                    .process_content_filter(&column.attribute, &value, column.kind, row_count);
            if self.options.editable && column.editable {
                editor = Some(build_editor(cx.dom, element, text));
            } else {
                cx.dom.set_text(element, &text);
            }
        }

        CellState {
            attribute: column.attribute.clone(),
            element,
            editable: column.editable,
            editor,
        }
    }

    /// Drop the row of the unsaved record, if there is one.
    fn remove_new_record_row(&mut self, dom: &mut dyn Surface) {
        let Some(table) = self.table.as_mut() else {
            return;
        };
        if let Some(row) = table.rows.remove(&RowKey::New) {
            dom.remove(row.element);
            self.end_session_on(&RowKey::New);
            log::trace!("[table] dropped new record placeholder");
        }
    }

    /// Forget an edit session bound to a row that is going away.
    pub(super) fn end_session_on(&mut self, key: &RowKey) {
        if self.edit.row() == Some(key) {
            self.edit = super::EditState::Idle;
        }
        if self
            .visible_input
            .as_ref()
            .is_some_and(|(row_key, _)| row_key == key)
        {
            self.visible_input = None;
        }
    }
}

/// Display span plus a hidden input pre-filled with `text`.
fn build_editor(dom: &mut dyn Surface, cell: NodeId, text: String) -> CellEditor {
    let display = dom.create(Tag::Span);
    dom.add_class(display, classes::EDITABLE);
    dom.set_text(display, &text);

    let wrapper = dom.create(Tag::Div);
    dom.add_class(wrapper, classes::INPUT_WRAPPER);
    dom.set_visible(wrapper, false);

    let input = dom.create(Tag::Input(InputKind::Text));
    dom.add_class(input, classes::FORM_ELEMENT);
    dom.add_class(input, classes::EDITABLE_INPUT);
    dom.set_value(input, &text);

    dom.append(wrapper, input);
    dom.append(cell, display);
    dom.append(cell, wrapper);

    CellEditor {
        display,
        wrapper,
        input,
        initial_text: text,
    }
}
