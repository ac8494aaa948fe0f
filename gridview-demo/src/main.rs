mod host;

use std::fs::File;

use griddom::{Document, Event, Key, Surface, Tag};
use gridview::{CommitOutcome, Record, RowKey, TableView, ViewContext, ViewOptions};
use simplelog::{Config, LevelFilter, WriteLogger};

use host::ContactsHost;

const COLUMNS: &str = r#"[
    {"attribute": "id", "content": "public.id"},
    {"attribute": "name", "content": "public.name", "sortable": true, "editable": true},
    {"attribute": "city", "content": "public.city", "editable": true}
]"#;

const RECORDS: &str = r#"[
    {"id": 1, "name": "Ada", "city": "London"},
    {"id": 2, "name": "Linus", "city": "Helsinki", "selected": true},
    {"id": 3, "name": "Grace", "city": "Arlington"}
]"#;

const OPTIONS: &str = r#"{
    "editable": true,
    "removeRow": true,
    "highlightSelected": true,
    "cssClass": "contacts",
    "noItemsText": "public.no_contacts"
}"#;

#[tokio::main]
async fn main() {
    let log_file = match File::create("gridview-demo.log") {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file) {
        eprintln!("Error: {}", e);
        return;
    }

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = ContactsHost::from_json(COLUMNS, RECORDS)?;
    let options = ViewOptions::from_json(OPTIONS)?;

    let mut doc = Document::new();
    let container = doc.create(Tag::Div);
    let page = doc.root();
    doc.append(page, container);

    let mut view = TableView::initialize(&host, options)?;
    let records = host.records().to_vec();
    let mut cx = ViewContext::new(&mut host, &mut doc);
    view.render(&mut cx, &records, container)?;

    let ada = RowKey::from(1);
    let grace = RowKey::from(3);

    // click a row, then select it
    if let Some(row) = view.row(&ada).map(|r| r.element) {
        view.handle_event(&mut cx, &Event::Click { target: row })?;
    }
    view.toggle_select_record(&mut cx, &ada, true)?;

    // sort by name through the header
    if let Some(header) = view.header_cell("name") {
        view.handle_event(&mut cx, &Event::Click { target: header })?;
    }

    // rename Grace and press Enter
    view.show_input(&mut cx, &grace, Some("name"))?;
    if let Some(input) = editor_input(&view, &grace, "name") {
        cx.dom.set_value(input, "Grace Hopper");
        view.handle_event(
            &mut cx,
            &Event::KeyPress {
                target: input,
                key: Key::Enter,
            },
        )?;
        view.handle_event(&mut cx, &Event::FocusOut { target: input })?;
    }
    let settled = view.finish_saves(&mut cx).await?;
    log::info!("[demo] {settled} save(s) settled");

    // add a contact, submit a blank name once, then fix it
    view.add_record(&mut cx, &Record::new().set("city", "Zurich"))?;
    for name in ["  ", "Niklaus"] {
        let Some(input) = editor_input(&view, &RowKey::New, "name") else {
            break;
        };
        cx.dom.set_value(input, name);
        match view.edit_row(&mut cx, &RowKey::New)? {
            CommitOutcome::Submitted => {
                view.finish_saves(&mut cx).await?;
            }
            outcome => log::info!("[demo] new row commit: {outcome:?}"),
        }
        log::info!("[demo] new row is {:?}", view.edit_state());
    }

    view.remove_record(&mut cx, &RowKey::from(2))?;
    view.on_resize(cx.dom);

    if let Some(root) = view.root() {
        println!("{}", griddom::html::to_html(&doc, root));
    }
    Ok(())
}

fn editor_input(view: &TableView, key: &RowKey, attribute: &str) -> Option<griddom::NodeId> {
    view.row(key)?
        .cell(attribute)?
        .editor
        .as_ref()
        .map(|editor| editor.input)
}
