#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Instant;

use griddom::{Document, Event, NodeId, Surface, Tag};
use gridview::{
    Column, ColumnType, EventResult, GridHost, GridSettings, PendingSave, Record, RowKey,
    SaveRequest, SaveResolver, SortDirection, SortState, TableView, Value, ViewContext,
    ViewOptions,
};

/// Host calls the tests assert on.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RemoveRecord(RowKey),
    SelectAll,
    DeselectAll,
    Selected(RowKey),
    Unselected(RowKey),
    Sort(String, SortDirection),
    ItemClicked(RowKey),
    StartLoader(NodeId),
}

pub struct MockHost {
    pub columns: Vec<Column>,
    pub sort: Option<SortState>,
    pub settings: GridSettings,
    pub records: Vec<Record>,
    pub selected: Vec<RowKey>,
    pub calls: Vec<Call>,
    pub saves: Vec<SaveRequest>,
    pub resolvers: Vec<SaveResolver>,
    /// `(attribute, row_count)` of every content filter call.
    pub filter_calls: RefCell<Vec<(String, usize)>>,
}

impl MockHost {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        Self {
            columns,
            sort: None,
            settings: GridSettings::new("contacts"),
            records,
            selected: Vec::new(),
            calls: Vec::new(),
            saves: Vec::new(),
            resolvers: Vec::new(),
            filter_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_settings(mut self, settings: GridSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn item_clicks(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::ItemClicked(_)))
            .count()
    }

    pub fn sort_calls(&self) -> Vec<(String, SortDirection)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Sort(attribute, direction) => Some((attribute.clone(), *direction)),
                _ => None,
            })
            .collect()
    }

    /// Resolver of the oldest unanswered save.
    pub fn take_resolver(&mut self) -> SaveResolver {
        assert!(!self.resolvers.is_empty(), "no pending save");
        self.resolvers.remove(0)
    }
}

impl GridHost for MockHost {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    fn settings(&self) -> &GridSettings {
        &self.settings
    }

    fn remove_record(&mut self, key: &RowKey) {
        self.records.retain(|r| r.key() != *key);
        self.selected.retain(|k| k != key);
        self.calls.push(Call::RemoveRecord(key.clone()));
    }

    fn record_count(&self) -> usize {
        self.records.len()
    }

    fn record_index_by_id(&self, key: &RowKey) -> Option<usize> {
        self.records.iter().position(|r| r.key() == *key)
    }

    fn record_at(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    fn select_all_items(&mut self) {
        self.selected = self.records.iter().map(Record::key).collect();
        self.calls.push(Call::SelectAll);
    }

    fn deselect_all_items(&mut self) {
        self.selected.clear();
        self.calls.push(Call::DeselectAll);
    }

    fn set_item_selected(&mut self, key: &RowKey) {
        if !self.selected.contains(key) {
            self.selected.push(key.clone());
        }
        self.calls.push(Call::Selected(key.clone()));
    }

    fn set_item_unselected(&mut self, key: &RowKey) {
        self.selected.retain(|k| k != key);
        self.calls.push(Call::Unselected(key.clone()));
    }

    fn selected_item_ids(&self) -> Vec<RowKey> {
        self.selected.clone()
    }

    fn url_without_params(&self) -> String {
        "/admin/api/contacts".to_string()
    }

    fn save_record(&mut self, request: SaveRequest) -> PendingSave {
        let (resolver, pending) = PendingSave::channel();
        self.saves.push(request);
        self.resolvers.push(resolver);
        pending
    }

    fn sort_grid(&mut self, attribute: &str, direction: SortDirection) {
        self.calls.push(Call::Sort(attribute.to_string(), direction));
    }

    fn emit_item_clicked(&mut self, key: &RowKey) {
        self.calls.push(Call::ItemClicked(key.clone()));
    }

    fn process_content_filter(
        &self,
        attribute: &str,
        value: &Value,
        _kind: ColumnType,
        row_count: usize,
    ) -> String {
        self.filter_calls
            .borrow_mut()
            .push((attribute.to_string(), row_count));
        value.to_text()
    }

    fn translate(&self, key: &str) -> String {
        key.strip_prefix("public.").unwrap_or(key).to_uppercase()
    }

    fn start_loader(&mut self, container: NodeId) {
        self.calls.push(Call::StartLoader(container));
    }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("id", "public.id"),
        Column::new("name", "public.name").sortable().editable(),
        Column::new("city", "public.city").editable(),
    ]
}

pub fn records() -> Vec<Record> {
    vec![
        Record::with_id(1).set("name", "A").set("city", "Oslo"),
        Record::with_id(2).set("name", "B").set("city", "Bergen"),
    ]
}

pub fn key(id: i64) -> RowKey {
    RowKey::from(id)
}

/// A rendered view plus everything it talks to.
pub struct Fixture {
    pub host: MockHost,
    pub doc: Document,
    pub view: TableView,
    pub container: NodeId,
}

impl Fixture {
    pub fn new(options: ViewOptions) -> Self {
        Self::with_host(MockHost::new(columns(), records()), options)
    }

    pub fn with_host(host: MockHost, options: ViewOptions) -> Self {
        let mut fixture = Self::unrendered(host, options);
        let records = fixture.host.records.clone();
        let container = fixture.container;
        fixture
            .with(|view, cx| view.render(cx, &records, container))
            .expect("render");
        fixture
    }

    pub fn unrendered(host: MockHost, options: ViewOptions) -> Self {
        let mut doc = Document::new();
        let container = doc.create(Tag::Div);
        let root = doc.root();
        doc.append(root, container);
        let view = TableView::initialize(&host, options).expect("initialize");
        Self {
            host,
            doc,
            view,
            container,
        }
    }

    pub fn with<R>(&mut self, f: impl FnOnce(&mut TableView, &mut ViewContext<'_>) -> R) -> R {
        let mut cx = ViewContext::new(&mut self.host, &mut self.doc);
        f(&mut self.view, &mut cx)
    }

    pub fn event(&mut self, event: Event) -> EventResult {
        self.with(|view, cx| view.handle_event(cx, &event))
            .expect("event handling")
    }

    pub fn event_at(&mut self, event: Event, now: Instant) -> EventResult {
        self.with(|view, cx| view.handle_event_at(cx, &event, now))
            .expect("event handling")
    }

    pub fn poll(&mut self) -> usize {
        self.with(|view, cx| view.poll_saves(cx)).expect("poll saves")
    }

    pub fn keys(&self) -> Vec<RowKey> {
        self.view.row_keys(&self.doc)
    }

    pub fn row_element(&self, key: &RowKey) -> NodeId {
        self.view.row(key).expect("row").element
    }

    pub fn control(&self, key: &RowKey) -> NodeId {
        self.view.row(key).expect("row").control.expect("control")
    }

    pub fn cell(&self, key: &RowKey, attribute: &str) -> NodeId {
        self.view
            .row(key)
            .expect("row")
            .cell(attribute)
            .expect("cell")
            .element
    }

    pub fn input(&self, key: &RowKey, attribute: &str) -> NodeId {
        self.editor(key, attribute).input
    }

    pub fn wrapper(&self, key: &RowKey, attribute: &str) -> NodeId {
        self.editor(key, attribute).wrapper
    }

    pub fn display(&self, key: &RowKey, attribute: &str) -> NodeId {
        self.editor(key, attribute).display
    }

    fn editor(&self, key: &RowKey, attribute: &str) -> gridview::table::CellEditor {
        self.view
            .row(key)
            .expect("row")
            .cell(attribute)
            .and_then(|c| c.editor.clone())
            .expect("editor")
    }

    /// Type `text` into an input, replacing its value.
    pub fn type_into(&mut self, key: &RowKey, attribute: &str, text: &str) {
        let input = self.input(key, attribute);
        self.doc.set_value(input, text);
    }

    pub fn root(&self) -> NodeId {
        self.view.root().expect("rendered")
    }
}
