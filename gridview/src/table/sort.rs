//! Header sorting.

use griddom::Tag;

use super::{TableView, ViewContext};
use crate::classes;
use crate::column::{SortDirection, SortState};
use crate::error::{Result, ViewError};

/// Direction of the next sort by `attribute`: descending only when the grid
/// is already sorted ascending by it.
pub fn next_direction(current: Option<&SortState>, attribute: &str) -> SortDirection {
    match current {
        Some(sort) if sort.attribute == attribute && sort.direction == SortDirection::Asc => {
            SortDirection::Desc
        }
        _ => SortDirection::Asc,
    }
}

impl TableView {
    /// Ask the host to sort by `attribute`, as a click on its header does.
    ///
    /// Puts a loader into the header cell first. The host re-renders the
    /// grid once sorted.
    pub fn sort_by_column(&mut self, cx: &mut ViewContext<'_>, attribute: &str) -> Result<SortDirection> {
        let not_sortable = || ViewError::NotSortable(attribute.to_string());
        if !self.settings.sortable {
            return Err(not_sortable());
        }
        let header = self.table_mut()?.header.as_mut().ok_or_else(not_sortable)?;
        let cell = header
            .cells
            .get_mut(attribute)
            .filter(|c| c.sortable)
            .ok_or_else(not_sortable)?;

        let direction = next_direction(cx.host.sort(), attribute);

        cx.dom.add_class(cell.element, classes::HEADER_LOADING);
        if cell.loader.is_none() {
            let loader = cx.dom.create(Tag::Div);
            cx.dom.add_class(loader, classes::HEADER_LOADER);
            cx.dom.append(cell.element, loader);
            cell.loader = Some(loader);
            cx.host.start_loader(loader);
        }

        log::debug!("[table] sort {attribute} {}", direction.as_str());
        cx.host.sort_grid(attribute, direction);
        Ok(direction)
    }

    /// Loader container of a header cell, once sorting by it was requested.
    pub fn header_loader(&self, attribute: &str) -> Option<griddom::NodeId> {
        self.table.as_ref()?.header.as_ref()?.cells.get(attribute)?.loader
    }
}
