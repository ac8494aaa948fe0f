//! Class names the view puts on its elements. Hosts style and query by these.

pub const SKELETON: &str = "husky-table";
pub const CONTAINER: &str = "table-container";
pub const TABLE: &str = "table";
pub const ROW: &str = "row";
pub const HEADER_CELL: &str = "header-cell";

pub const FULL_WIDTH: &str = "fullwidth";
pub const IS_SELECTABLE: &str = "is-selectable";
pub const OVERFLOW: &str = "overflow";

/// Highlighted row.
pub const SELECTED_ROW: &str = "selected";

pub const SORTABLE: &str = "is-sortable";
pub const SORTED_ASC: &str = "sorted-asc";
pub const SORTED_DESC: &str = "sorted-desc";
pub const HEADER_LOADER: &str = "header-loader";
pub const HEADER_LOADING: &str = "is-loading";

pub const EMPTY_LIST: &str = "empty-list";
pub const EMPTY_ICON: &str = "fa-coffee icon";
pub const ROW_REMOVER: &str = "row-remover";
pub const REMOVE_ICON: &str = "fa-trash-o";
pub const CELL_FIT: &str = "fit";

pub const CUSTOM_CHECKBOX: &str = "custom-checkbox";
pub const CUSTOM_RADIO: &str = "custom-radio";
pub const CHECKBOX: &str = "checkbox";
pub const RADIO: &str = "radio";
pub const ICON: &str = "icon";

pub const EDITABLE: &str = "editable";
pub const EDITABLE_INPUT: &str = "editable-input";
pub const INPUT_WRAPPER: &str = "input-wrapper";
pub const FORM_ELEMENT: &str = "form-element";
pub const EDIT_ERROR: &str = "server-validation-error";
