//! In-memory grid host.
//!
//! Keeps the record set in a `Vec` and answers saves from a spawned task after
//! a short delay, the way a remote endpoint would.

use std::time::Duration;

use gridview::{
    Column, GridHost, GridSettings, PendingSave, Record, RecordId, RowKey, SaveError,
    SaveRequest, SortDirection, SortState,
};

pub struct ContactsHost {
    columns: Vec<Column>,
    sort: Option<SortState>,
    settings: GridSettings,
    records: Vec<Record>,
    selected: Vec<RowKey>,
    next_id: i64,
    latency: Duration,
}

impl ContactsHost {
    pub fn new(columns: Vec<Column>, records: Vec<Record>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| match r.id {
                Some(RecordId::Number(n)) => Some(n),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            columns,
            sort: None,
            settings: GridSettings::new("contacts"),
            records,
            selected: Vec::new(),
            next_id,
            latency: Duration::from_millis(50),
        }
    }

    /// Load columns and records from JSON.
    pub fn from_json(columns: &str, records: &str) -> serde_json::Result<Self> {
        Ok(Self::new(
            serde_json::from_str(columns)?,
            serde_json::from_str(records)?,
        ))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Validate and store a record, assigning an id to new ones.
    fn store(&mut self, mut record: Record) -> Result<Record, SaveError> {
        let name = record.get("name").map(|v| v.to_text()).unwrap_or_default();
        if name.trim().is_empty() {
            return Err(SaveError::new("name must not be empty").with_fields(["name"]));
        }

        match &record.id {
            Some(id) => {
                let key = RowKey::Id(id.clone());
                if let Some(index) = self.record_index_by_id(&key) {
                    self.records[index] = record.clone();
                }
            }
            None => {
                record.id = Some(RecordId::Number(self.next_id));
                self.next_id += 1;
                self.records.insert(0, record.clone());
            }
        }
        Ok(record)
    }
}

impl GridHost for ContactsHost {
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
    }

    fn deselect_all_items(&mut self) {
        self.selected.clear();
    }

    fn set_item_selected(&mut self, key: &RowKey) {
        if !self.selected.contains(key) {
            self.selected.push(key.clone());
        }
    }

    fn set_item_unselected(&mut self, key: &RowKey) {
        self.selected.retain(|k| k != key);
    }

    fn selected_item_ids(&self) -> Vec<RowKey> {
        self.selected.clone()
    }

    fn url_without_params(&self) -> String {
        "/admin/api/contacts".to_string()
    }

    fn save_record(&mut self, request: SaveRequest) -> PendingSave {
        log::info!(
            "[host] save {} to {} (changed: {:?})",
            request.key,
            request.endpoint,
            request.patch.keys().collect::<Vec<_>>()
        );
        let result = self.store(request.record);
        let (resolver, pending) = PendingSave::channel();
        let latency = self.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            resolver.resolve(result);
        });
        pending
    }

    fn sort_grid(&mut self, attribute: &str, direction: SortDirection) {
        log::info!("[host] sort by {attribute} {}", direction.as_str());
        self.sort = Some(SortState::new(attribute, direction));
    }

    fn emit_item_clicked(&mut self, key: &RowKey) {
        log::info!("[host] item clicked: {key}");
    }

    fn translate(&self, key: &str) -> String {
        match key {
            "public.name" => "Name".to_string(),
            "public.city" => "City".to_string(),
            "public.id" => "#".to_string(),
            other => other.to_string(),
        }
    }
}
