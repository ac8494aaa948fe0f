mod common;

use common::{columns, key, records, Fixture, MockHost};
use griddom::{Event, Surface, Tag};
use gridview::classes;
use gridview::{
    Column, ColumnType, ConfigError, GridSettings, Record, SelectItem, SortState, TableView,
    Value, ViewError, ViewOptions,
};

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_render_mirrors_records() {
    let fx = Fixture::new(ViewOptions::default());

    assert_eq!(fx.keys(), vec![key(1), key(2)]);
    assert_eq!(fx.view.row_count(), 2);
    for k in [key(1), key(2)] {
        let row = fx.view.row(&k).unwrap();
        let attributes: Vec<_> = row.cells.iter().map(|c| c.attribute.as_str()).collect();
        assert_eq!(attributes, vec!["id", "name", "city"]);
        assert_eq!(fx.doc.data(row.element, "id"), Some(k.to_string()));
        assert!(fx.doc.has_class(row.element, classes::ROW));
    }
    assert_eq!(fx.doc.text(fx.cell(&key(2), "city")).as_deref(), Some("Bergen"));
    assert!(fx.view.empty_indicator().is_none());
}

#[test]
fn test_skeleton_and_view_classes() {
    let options = ViewOptions::default()
        .css_class("contacts-table")
        .full_width(true)
        .highlight_selected(true);
    let fx = Fixture::new(options);

    let root = fx.root();
    assert_eq!(fx.doc.parent(root), Some(fx.container));
    for class in [
        classes::SKELETON,
        "contacts-table",
        classes::FULL_WIDTH,
        classes::IS_SELECTABLE,
    ] {
        assert!(fx.doc.has_class(root, class), "missing {class}");
    }

    let inner = fx.view.table_container().unwrap();
    assert!(fx.doc.has_class(inner, classes::CONTAINER));
    let table = fx.doc.children(inner)[0];
    assert!(fx.doc.has_class(table, classes::TABLE));
}

#[test]
fn test_header_cells() {
    let host = MockHost::new(columns(), records()).with_sort(SortState::desc("name"));
    let fx = Fixture::with_host(host, ViewOptions::default().exclude_fields(["id"]));

    assert!(fx.view.header_cell("id").is_none());

    let name = fx.view.header_cell("name").unwrap();
    assert_eq!(fx.doc.text(name).as_deref(), Some("NAME"));
    assert_eq!(fx.doc.data(name, "attribute").as_deref(), Some("name"));
    assert!(fx.doc.has_class(name, classes::HEADER_CELL));
    assert!(fx.doc.has_class(name, classes::SORTABLE));
    assert!(fx.doc.has_class(name, classes::SORTED_DESC));
    assert!(!fx.doc.has_class(name, classes::SORTED_ASC));

    let city = fx.view.header_cell("city").unwrap();
    assert!(!fx.doc.has_class(city, classes::SORTABLE));

    // select-all cell first, then the two visible columns
    let header_row = fx.doc.parent(name).unwrap();
    let cells = fx.doc.children(header_row);
    assert_eq!(cells.len(), 3);
    assert!(fx.doc.has_class(cells[0], classes::CELL_FIT));
    let select_all = fx.view.select_all_control().unwrap();
    assert_eq!(fx.doc.closest_tag(select_all, Tag::Th), Some(cells[0]));
}

#[test]
fn test_sorting_disabled_leaves_header_plain() {
    let host = MockHost::new(columns(), records())
        .with_settings(GridSettings::new("contacts").sortable(false))
        .with_sort(SortState::asc("name"));
    let fx = Fixture::with_host(host, ViewOptions::default());

    let name = fx.view.header_cell("name").unwrap();
    assert!(!fx.doc.has_class(name, classes::SORTABLE));
    assert!(!fx.doc.has_class(name, classes::SORTED_ASC));
}

#[test]
fn test_no_header_when_hidden() {
    let fx = Fixture::new(ViewOptions::default().show_head(false));
    assert!(fx.view.header_cell("name").is_none());
    assert!(fx.view.select_all_control().is_none());
    assert_eq!(fx.keys().len(), 2);
}

#[test]
fn test_select_and_remove_chrome() {
    let fx = Fixture::new(ViewOptions::default().remove_row(true));
    let row = fx.row_element(&key(1));
    let cells = fx.doc.children(row);

    // select cell + three columns + remove cell
    assert_eq!(cells.len(), 5);
    assert!(fx.doc.has_class(cells[0], classes::CELL_FIT));
    assert!(fx.doc.has_class(cells[4], classes::CELL_FIT));
    assert_eq!(fx.doc.find_by_class(cells[4], classes::ROW_REMOVER).len(), 1);

    let control = fx.control(&key(1));
    assert!(fx.doc.has_class(control, classes::CHECKBOX));
    assert_eq!(fx.doc.closest_tag(control, Tag::Td), Some(cells[0]));
}

#[test]
fn test_select_control_in_first_cell() {
    let options = ViewOptions::default().select_item(Some(SelectItem::checkbox().in_first_cell()));
    let fx = Fixture::new(options);

    let row = fx.row_element(&key(1));
    assert_eq!(fx.doc.children(row).len(), 3);
    let first = fx.cell(&key(1), "id");
    assert_eq!(fx.doc.closest_tag(fx.control(&key(1)), Tag::Td), Some(first));

    let id_header = fx.view.header_cell("id").unwrap();
    let select_all = fx.view.select_all_control().unwrap();
    assert_eq!(fx.doc.closest_tag(select_all, Tag::Th), Some(id_header));
}

#[test]
fn test_radio_controls_share_a_group() {
    let fx = Fixture::new(ViewOptions::default().select_item(Some(SelectItem::radio())));

    for k in [key(1), key(2)] {
        let control = fx.control(&k);
        assert!(fx.doc.has_class(control, classes::RADIO));
        assert_eq!(
            fx.doc.attr(control, "name").as_deref(),
            Some("datagrid-contacts")
        );
    }
    // radios have no select-all
    assert!(fx.view.select_all_control().is_none());
}

#[test]
fn test_no_select_column() {
    let fx = Fixture::new(ViewOptions::default().select_item(None));
    assert!(fx.view.row(&key(1)).unwrap().control.is_none());
    assert_eq!(fx.doc.children(fx.row_element(&key(1))).len(), 3);
}

// ============================================================================
// Cell content
// ============================================================================

#[test]
fn test_content_filter_counts_rows_being_built() {
    let fx = Fixture::new(ViewOptions::default());

    let calls = fx.host.filter_calls.borrow();
    assert_eq!(calls.len(), 6);
    assert!(calls[..3].iter().all(|(_, count)| *count == 1));
    assert!(calls[3..].iter().all(|(_, count)| *count == 2));
}

#[test]
fn test_thumbnail_cells_render_images() {
    let columns = vec![
        Column::new("name", "public.name").editable(),
        Column::new("image", "public.image")
            .kind(ColumnType::Thumbnails)
            .editable(),
    ];
    let image = Value::Json(serde_json::json!({
        "50x50": {"url": "/media/1-50x50.png", "alt": "portrait"}
    }));
    let records = vec![Record::with_id(1).set("name", "A").set("image", image)];
    let fx = Fixture::with_host(MockHost::new(columns, records), ViewOptions::default().editable(true));

    let row = fx.view.row(&key(1)).unwrap();
    let image_cell = row.cell("image").unwrap();
    assert!(image_cell.editor.is_none());
    let img = fx.doc.children(image_cell.element)[0];
    assert_eq!(fx.doc.attr(img, "src").as_deref(), Some("/media/1-50x50.png"));
    assert_eq!(fx.doc.attr(img, "alt").as_deref(), Some("portrait"));

    // editable text columns still get an editor
    assert!(row.cell("name").unwrap().editor.is_some());
    assert_eq!(fx.host.filter_calls.borrow().len(), 1);
}

#[test]
fn test_editable_cells_start_closed() {
    let fx = Fixture::new(ViewOptions::default().editable(true));

    let row = fx.view.row(&key(1)).unwrap();
    assert!(row.cell("id").unwrap().editor.is_none());
    let name = row.cell("name").unwrap().editor.clone().unwrap();
    assert_eq!(name.initial_text, "A");
    assert_eq!(fx.doc.text(name.display).as_deref(), Some("A"));
    assert_eq!(fx.doc.value(name.input).as_deref(), Some("A"));
    assert!(!fx.doc.is_visible(name.wrapper));
    assert!(fx.doc.has_class(name.input, classes::EDITABLE_INPUT));
}

// ============================================================================
// Empty state
// ============================================================================

#[test]
fn test_empty_render_shows_indicator() {
    let host = MockHost::new(columns(), Vec::new());
    let fx = Fixture::with_host(host, ViewOptions::default().no_items_text("public.empty"));

    let indicator = fx.view.empty_indicator().unwrap();
    assert_eq!(fx.doc.parent(indicator), Some(fx.root()));
    assert!(fx.doc.has_class(indicator, classes::EMPTY_LIST));
    let children = fx.doc.children(indicator);
    assert_eq!(fx.doc.text(children[1]).as_deref(), Some("EMPTY"));
    assert!(fx.keys().is_empty());
}

// ============================================================================
// Lifetime and configuration errors
// ============================================================================

#[test]
fn test_render_twice_fails() {
    let mut fx = Fixture::new(ViewOptions::default());
    let container = fx.container;
    let err = fx.with(|view, cx| view.render(cx, &records(), container)).unwrap_err();
    assert_eq!(err, ViewError::AlreadyRendered);
    assert_eq!(fx.keys().len(), 2);
}

#[test]
fn test_operations_before_render_fail() {
    let mut fx = Fixture::unrendered(MockHost::new(columns(), records()), ViewOptions::default());

    let add = fx.with(|view, cx| view.add_record(cx, &Record::with_id(9)));
    assert_eq!(add, Err(ViewError::NotRendered));
    let remove = fx.with(|view, cx| view.remove_record(cx, &key(1)));
    assert_eq!(remove, Err(ViewError::NotRendered));
    let select = fx.with(|view, cx| view.select_all_records(cx));
    assert_eq!(select, Err(ViewError::NotRendered));
    assert!(fx.host.calls.is_empty());

    // events and resizes are ignored
    let container = fx.container;
    assert!(!fx.event(Event::Click { target: container }).is_handled());
    fx.view.on_resize(&mut fx.doc);
}

#[test]
fn test_destroy_releases_tree_and_ignores_events() {
    let mut fx = Fixture::new(ViewOptions::default());
    let root = fx.root();
    let row = fx.row_element(&key(1));

    fx.with(|view, cx| view.destroy(cx));
    assert!(!fx.doc.contains(root));
    assert!(fx.view.is_destroyed());
    assert!(!fx.view.is_rendered());
    assert!(!fx.event(Event::Click { target: row }).is_handled());
    assert_eq!(fx.host.item_clicks(), 0);

    // idempotent, and no second life
    fx.with(|view, cx| view.destroy(cx));
    let container = fx.container;
    let err = fx.with(|view, cx| view.render(cx, &records(), container));
    assert_eq!(err, Err(ViewError::AlreadyRendered));
}

#[test]
fn test_initialize_validates_configuration() {
    let host = MockHost::new(columns(), records()).with_sort(SortState::asc("zip"));
    let err = TableView::initialize(&host, ViewOptions::default()).unwrap_err();
    assert_eq!(err, ConfigError::UnknownSortColumn("zip".into()));

    let host = MockHost::new(columns(), records());
    let err = TableView::initialize(&host, ViewOptions::default().thumbnail_format("big"))
        .unwrap_err();
    assert_eq!(err, ConfigError::ThumbnailFormat("big".into()));
}

// ============================================================================
// Overflow
// ============================================================================

#[test]
fn test_overflow_class_follows_container_width() {
    let mut fx = Fixture::new(ViewOptions::default());
    let container = fx.view.table_container().unwrap();
    let root = fx.root();

    fx.doc.set_client_width(container, 600);
    fx.doc.set_content_width(container, Some(800));
    fx.view.on_resize(&mut fx.doc);
    assert!(fx.doc.has_class(root, classes::OVERFLOW));
    assert!(fx.view.is_overflown(&fx.doc));

    fx.doc.set_content_width(container, Some(500));
    fx.view.on_resize(&mut fx.doc);
    assert!(!fx.doc.has_class(root, classes::OVERFLOW));

    // idempotent
    fx.view.on_resize(&mut fx.doc);
    assert!(!fx.doc.has_class(root, classes::OVERFLOW));
}

#[test]
fn test_resize_event_runs_overflow_check() {
    let mut fx = Fixture::new(ViewOptions::default());
    let container = fx.view.table_container().unwrap();
    fx.doc.set_client_width(container, 10);

    assert!(fx.event(Event::Resize).is_handled());
    assert!(fx.view.is_overflown(&fx.doc));
}

#[test]
fn test_resize_event_ignored_without_listeners() {
    let host = MockHost::new(columns(), records())
        .with_settings(GridSettings::new("contacts").resize_listeners(false));
    let mut fx = Fixture::with_host(host, ViewOptions::default());
    let container = fx.view.table_container().unwrap();
    fx.doc.set_client_width(container, 10);

    assert!(!fx.event(Event::Resize).is_handled());
    assert!(!fx.view.is_overflown(&fx.doc));
}
