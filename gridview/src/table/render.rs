//! Skeleton, header and body construction.

use std::collections::HashMap;

use griddom::{InputKind, NodeId, Surface, Tag};

use super::model::{Header, HeaderCellState, RowModel, Table};
use super::{TableView, ViewContext};
use crate::classes;
use crate::column::SortDirection;
use crate::config::SelectKind;
use crate::error::{Result, ViewError};
use crate::record::Record;

impl TableView {
    /// Build the view inside `container`.
    ///
    /// Renders once per instance; a second call fails with
    /// [`ViewError::AlreadyRendered`].
    pub fn render(
        &mut self,
        cx: &mut ViewContext<'_>,
        records: &[Record],
        container: NodeId,
    ) -> Result<()> {
        if self.destroyed || self.root.is_some() {
            return Err(ViewError::AlreadyRendered);
        }

        let root = cx.dom.create(Tag::Div);
        cx.dom.add_class(root, classes::SKELETON);
        let inner = cx.dom.create(Tag::Div);
        cx.dom.add_class(inner, classes::CONTAINER);
        cx.dom.append(root, inner);
        self.add_view_classes(cx.dom, root);
        cx.dom.append(container, root);
        self.root = Some(root);
        self.container = Some(inner);

        let table = cx.dom.create(Tag::Table);
        cx.dom.add_class(table, classes::TABLE);
        let header = if self.options.show_head {
            Some(self.render_header(cx, table))
        } else {
            None
        };
        let body = cx.dom.create(Tag::TBody);
        cx.dom.append(table, body);
        cx.dom.append(inner, table);

        self.table = Some(Table {
            element: table,
            body,
            header,
            rows: RowModel::new(),
        });

        if records.is_empty() {
            self.show_empty_indicator(cx);
        } else {
            for record in records {
                self.render_row(cx, record, false)?;
            }
        }
        log::debug!("[table] rendered {} rows", self.row_count());

        if self.settings.resize_listeners {
            self.on_resize(cx.dom);
        }
        Ok(())
    }

    /// Remove the tree and stop reacting to events.
    ///
    /// Safe to call before `render` and more than once. Saves still in flight
    /// are dropped.
    pub fn destroy(&mut self, cx: &mut ViewContext<'_>) {
        if self.destroyed {
            return;
        }
        if let Some(root) = self.root.take() {
            cx.dom.remove(root);
        }
        if let Some(indicator) = self.empty_indicator.take() {
            cx.dom.remove(indicator);
        }
        if !self.pending.is_empty() {
            log::debug!("[table] dropping {} pending saves", self.pending.len());
        }
        self.pending.clear();
        self.table = None;
        self.container = None;
        self.visible_input = None;
        self.enter_guard = None;
        self.edit = super::EditState::Idle;
        self.destroyed = true;
        log::debug!("[table] destroyed");
    }

    fn add_view_classes(&self, dom: &mut dyn Surface, root: NodeId) {
        if !self.options.css_class.is_empty() {
            dom.add_class(root, &self.options.css_class);
        }
        if self.options.full_width {
            dom.add_class(root, classes::FULL_WIDTH);
        }
        if self.options.highlight_selected {
            dom.add_class(root, classes::IS_SELECTABLE);
        }
    }

    fn render_header(&self, cx: &mut ViewContext<'_>, table: NodeId) -> Header {
        let element = cx.dom.create(Tag::THead);
        let row = cx.dom.create(Tag::Tr);
        cx.dom.add_class(row, classes::ROW);
        cx.dom.append(element, row);

        let mut cells = HashMap::new();
        let mut first_cell = None;
        for column in self.visible_columns() {
            let cell = cx.dom.create(Tag::Th);
            cx.dom.add_class(cell, classes::HEADER_CELL);
            cx.dom.set_text(cell, &cx.host.translate(&column.content));
            cx.dom.set_data(cell, "attribute", &column.attribute);

            let sortable = self.settings.sortable && column.sortable;
            if sortable {
                cx.dom.add_class(cell, classes::SORTABLE);
                if let Some(sort) = cx.host.sort().filter(|s| s.attribute == column.attribute) {
                    let class = match sort.direction {
                        SortDirection::Asc => classes::SORTED_ASC,
                        SortDirection::Desc => classes::SORTED_DESC,
                    };
                    cx.dom.add_class(cell, class);
                }
            }

            cx.dom.append(row, cell);
            first_cell.get_or_insert(cell);
            cells.insert(
                column.attribute.clone(),
                HeaderCellState {
                    element: cell,
                    sortable,
                    loader: None,
                },
            );
        }

        let select_all = self.render_header_select_item(cx.dom, row, first_cell);

        if self.options.remove_row {
            let cell = cx.dom.create(Tag::Th);
            cx.dom.add_class(cell, classes::HEADER_CELL);
            cx.dom.add_class(cell, classes::CELL_FIT);
            cx.dom.append(row, cell);
        }

        cx.dom.append(table, element);
        Header {
            element,
            row,
            select_all,
            cells,
        }
    }

    /// Select-all cell; only checkbox selection gets a control.
    fn render_header_select_item(
        &self,
        dom: &mut dyn Surface,
        row: NodeId,
        first_cell: Option<NodeId>,
    ) -> Option<NodeId> {
        let select = self.options.select_item.as_ref()?;

        let cell = match first_cell.filter(|_| select.in_first_cell) {
            Some(cell) => cell,
            None => {
                let cell = dom.create(Tag::Th);
                dom.add_class(cell, classes::HEADER_CELL);
                dom.add_class(cell, classes::CELL_FIT);
                dom.prepend(row, cell);
                cell
            }
        };

        match select.kind {
            SelectKind::Checkbox => {
                let (wrapper, input) = build_select_control(dom, SelectKind::Checkbox, None);
                dom.prepend(cell, wrapper);
                Some(input)
            }
            SelectKind::Radio => None,
        }
    }

    /// Attach the empty-state indicator to the view root.
    pub(super) fn show_empty_indicator(&mut self, cx: &mut ViewContext<'_>) {
        let Some(root) = self.root else {
            return;
        };
        if self.empty_indicator.is_some_and(|e| cx.dom.contains(e)) {
            return;
        }

        let indicator = cx.dom.create(Tag::Div);
        cx.dom.add_class(indicator, classes::EMPTY_LIST);
        let icon = cx.dom.create(Tag::Div);
        cx.dom.add_class(icon, classes::EMPTY_ICON);
        let text = cx.dom.create(Tag::Span);
        cx.dom.set_text(text, &cx.host.translate(&self.options.no_items_text));
        cx.dom.append(indicator, icon);
        cx.dom.append(indicator, text);
        cx.dom.append(root, indicator);
        self.empty_indicator = Some(indicator);
    }

    pub(super) fn hide_empty_indicator(&mut self, dom: &mut dyn Surface) {
        if let Some(indicator) = self.empty_indicator.take() {
            dom.remove(indicator);
        }
    }
}

/// A custom checkbox or radio: wrapper, input and icon. Returns the wrapper
/// and the input.
pub(super) fn build_select_control(
    dom: &mut dyn Surface,
    kind: SelectKind,
    radio_name: Option<&str>,
) -> (NodeId, NodeId) {
    let (wrapper_class, input_class, input_kind) = match kind {
        SelectKind::Checkbox => (classes::CUSTOM_CHECKBOX, classes::CHECKBOX, InputKind::Checkbox),
        SelectKind::Radio => (classes::CUSTOM_RADIO, classes::RADIO, InputKind::Radio),
    };

    let wrapper = dom.create(Tag::Div);
    dom.add_class(wrapper, wrapper_class);
    let input = dom.create(Tag::Input(input_kind));
    dom.add_class(input, input_class);
    dom.set_data(input, "form", "false");
    if let Some(name) = radio_name {
        dom.set_attr(input, "name", name);
    }
    let icon = dom.create(Tag::Span);
    dom.add_class(icon, classes::ICON);

    dom.append(wrapper, input);
    dom.append(wrapper, icon);
    (wrapper, input)
}
