mod common;

use common::{columns, key, Call, Fixture, MockHost};
use griddom::{Event, Surface};
use gridview::classes;
use gridview::{Record, SelectItem, ViewError, ViewOptions};

fn three_records() -> Vec<Record> {
    (1..=3)
        .map(|id| Record::with_id(id).set("name", format!("N{id}")))
        .collect()
}

/// Model flag, control and host agree for every row.
fn assert_consistent(fx: &Fixture) {
    for row in fx.view.rows().unwrap().iter() {
        let checked = fx.doc.is_checked(row.control.unwrap());
        assert_eq!(row.selected, checked, "row {} control", row.key);
        assert_eq!(
            row.selected,
            fx.host.selected.contains(&row.key),
            "row {} host",
            row.key
        );
    }
    let all = fx.host.selected.len() == fx.host.records.len();
    assert_eq!(fx.view.is_select_all_checked(&fx.doc), all);
}

#[test]
fn test_select_all_then_deselect_all() {
    let mut fx = Fixture::new(ViewOptions::default());

    fx.with(|view, cx| view.select_all_records(cx)).unwrap();
    assert_eq!(fx.host.selected.len(), 2);
    assert!(fx.view.is_select_all_checked(&fx.doc));
    assert_consistent(&fx);

    fx.with(|view, cx| view.deselect_all_records(cx)).unwrap();
    assert!(fx.host.selected.is_empty());
    assert!(!fx.view.is_select_all_checked(&fx.doc));
    assert!(fx.view.rows().unwrap().iter().all(|r| !r.selected));
    assert_consistent(&fx);
}

#[test]
fn test_toggle_sequence_keeps_select_all_in_sync() {
    let host = MockHost::new(columns(), three_records());
    let mut fx = Fixture::with_host(host, ViewOptions::default());

    let steps = [
        (1, true),
        (2, true),
        (3, true),
        (2, false),
        (2, true),
        (1, false),
        (1, false),
        (3, false),
    ];
    for (id, select) in steps {
        fx.with(|view, cx| view.toggle_select_record(cx, &key(id), select))
            .unwrap();
        assert_consistent(&fx);
    }

    fx.with(|view, cx| view.toggle_select_record(cx, &key(1), true)).unwrap();
    fx.with(|view, cx| view.toggle_select_record(cx, &key(3), true)).unwrap();
    assert!(fx.view.is_select_all_checked(&fx.doc));
}

#[test]
fn test_selected_records_render_selected() {
    let records = vec![
        Record::with_id(1).set("name", "A").selected(true),
        Record::with_id(2).set("name", "B").selected(true),
    ];
    let fx = Fixture::with_host(MockHost::new(columns(), records), ViewOptions::default());

    assert_eq!(fx.host.selected, vec![key(1), key(2)]);
    assert!(fx.view.is_select_all_checked(&fx.doc));
    assert_consistent(&fx);
}

#[test]
fn test_unselected_row_render_clears_select_all() {
    let mut fx = Fixture::new(ViewOptions::default());
    fx.with(|view, cx| view.select_all_records(cx)).unwrap();
    assert!(fx.view.is_select_all_checked(&fx.doc));

    fx.with(|view, cx| view.add_record(cx, &Record::with_id(3).set("name", "C")))
        .unwrap();
    assert!(!fx.view.is_select_all_checked(&fx.doc));
}

#[test]
fn test_unique_select_keeps_one_row() {
    let host = MockHost::new(columns(), three_records());
    let options = ViewOptions::default().select_item(Some(SelectItem::radio()));
    let mut fx = Fixture::with_host(host, options);

    fx.with(|view, cx| view.unique_select_record(cx, &key(2))).unwrap();
    assert_eq!(fx.host.selected, vec![key(2)]);
    fx.with(|view, cx| view.unique_select_record(cx, &key(3))).unwrap();
    assert_eq!(fx.host.selected, vec![key(3)]);

    let rows = fx.view.rows().unwrap();
    assert_eq!(rows.iter().filter(|r| r.selected).count(), 1);
    assert!(rows.get(&key(3)).unwrap().selected);
    assert!(fx.doc.is_checked(fx.control(&key(3))));
    assert!(!fx.doc.is_checked(fx.control(&key(2))));
}

#[test]
fn test_unknown_row_fails_before_host_call() {
    let mut fx = Fixture::new(ViewOptions::default());

    let err = fx.with(|view, cx| view.toggle_select_record(cx, &key(9), true));
    assert_eq!(err, Err(ViewError::UnknownRow(key(9))));
    let err = fx.with(|view, cx| view.unique_select_record(cx, &key(9)));
    assert_eq!(err, Err(ViewError::UnknownRow(key(9))));
    assert!(fx.host.calls.is_empty());
}

// ============================================================================
// Re-rendered rows
// ============================================================================

#[test]
fn test_selection_survives_save_rerender() {
    let mut fx = Fixture::new(ViewOptions::default().editable(true));
    fx.with(|view, cx| view.toggle_select_record(cx, &key(1), true))
        .unwrap();
    fx.type_into(&key(1), "name", "A2");
    fx.with(|view, cx| view.edit_row(cx, &key(1))).unwrap();

    let stored = fx.host.saves[0].record.clone();
    assert!(!stored.selected);
    fx.host.take_resolver().succeed(stored);
    assert_eq!(fx.poll(), 1);

    assert!(fx.view.row(&key(1)).unwrap().selected);
    assert!(fx.doc.is_checked(fx.control(&key(1))));
    assert_consistent(&fx);
}

#[test]
fn test_select_all_survives_unchanged_commit() {
    let mut fx = Fixture::new(ViewOptions::default().editable(true));
    fx.with(|view, cx| view.select_all_records(cx)).unwrap();
    let old_row = fx.row_element(&key(1));

    fx.with(|view, cx| view.edit_row(cx, &key(1))).unwrap();

    assert!(!fx.doc.contains(old_row));
    assert!(fx.view.is_select_all_checked(&fx.doc));
    assert_consistent(&fx);
}

// ============================================================================
// Through events
// ============================================================================

#[test]
fn test_checkbox_change_toggles_row() {
    let mut fx = Fixture::new(ViewOptions::default());
    let control = fx.control(&key(1));

    let result = fx.event(Event::Change {
        target: control,
        checked: true,
    });
    assert!(result.is_handled());
    assert_eq!(fx.host.calls, vec![Call::Selected(key(1))]);
    assert_consistent(&fx);

    fx.event(Event::Change {
        target: control,
        checked: false,
    });
    assert!(fx.host.selected.is_empty());
    assert_consistent(&fx);
}

#[test]
fn test_click_on_control_does_not_click_row() {
    let mut fx = Fixture::new(ViewOptions::default());
    let control = fx.control(&key(1));

    assert!(fx.event(Event::Click { target: control }).is_handled());
    assert_eq!(fx.host.item_clicks(), 0);
}

#[test]
fn test_radio_change_selects_uniquely() {
    let options = ViewOptions::default().select_item(Some(SelectItem::radio()));
    let mut fx = Fixture::new(options);

    let first = fx.control(&key(1));
    let second = fx.control(&key(2));
    fx.event(Event::Change {
        target: first,
        checked: true,
    });
    fx.event(Event::Change {
        target: second,
        checked: true,
    });

    assert_eq!(fx.host.selected, vec![key(2)]);
    assert!(!fx.view.row(&key(1)).unwrap().selected);
    assert!(fx.view.row(&key(2)).unwrap().selected);
}

#[test]
fn test_header_checkbox_selects_all() {
    let mut fx = Fixture::new(ViewOptions::default());
    let select_all = fx.view.select_all_control().unwrap();

    fx.event(Event::Change {
        target: select_all,
        checked: true,
    });
    assert_eq!(fx.host.calls, vec![Call::SelectAll]);
    assert_consistent(&fx);

    fx.event(Event::Change {
        target: select_all,
        checked: false,
    });
    assert_eq!(fx.host.count(&Call::DeselectAll), 1);
    assert_consistent(&fx);
}

// ============================================================================
// Highlighting
// ============================================================================

#[test]
fn test_row_click_moves_highlight() {
    let mut fx = Fixture::new(ViewOptions::default().highlight_selected(true));
    let first = fx.row_element(&key(1));
    let second = fx.row_element(&key(2));

    fx.event(Event::Click {
        target: fx.cell(&key(1), "name"),
    });
    assert!(fx.doc.has_class(first, classes::SELECTED_ROW));

    fx.event(Event::Click {
        target: fx.cell(&key(2), "city"),
    });
    assert!(!fx.doc.has_class(first, classes::SELECTED_ROW));
    assert!(fx.doc.has_class(second, classes::SELECTED_ROW));
}

#[test]
fn test_highlight_disabled_is_noop() {
    let mut fx = Fixture::new(ViewOptions::default());
    fx.with(|view, cx| view.unique_highlight_record(cx, &key(1))).unwrap();
    assert!(!fx.doc.has_class(fx.row_element(&key(1)), classes::SELECTED_ROW));
}
