//! Records, record ids and dynamic field values.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Text used for the row of a record that has not been saved yet.
pub const NEW_RECORD_ID: &str = "newrecord";

/// Identifier of a persisted record, as assigned by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(v: i64) -> Self {
        RecordId::Number(v)
    }
}

impl From<i32> for RecordId {
    fn from(v: i32) -> Self {
        RecordId::Number(i64::from(v))
    }
}

impl From<&str> for RecordId {
    fn from(v: &str) -> Self {
        RecordId::Text(v.to_string())
    }
}

impl From<String> for RecordId {
    fn from(v: String) -> Self {
        RecordId::Text(v)
    }
}

/// Identity of a row in the view.
///
/// Rows of persisted records are keyed by their id. The single unsaved row is
/// keyed by [`RowKey::New`] until the host confirms a real id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowKey {
    Id(RecordId),
    New,
}

impl RowKey {
    /// Key for a record id, mapping a missing id to the new-record sentinel.
    pub fn for_id(id: Option<&RecordId>) -> Self {
        match id {
            Some(id) => RowKey::Id(id.clone()),
            None => RowKey::New,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, RowKey::New)
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            RowKey::Id(id) => Some(id),
            RowKey::New => None,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => id.fmt(f),
            RowKey::New => f.write_str(NEW_RECORD_ID),
        }
    }
}

impl From<RecordId> for RowKey {
    fn from(id: RecordId) -> Self {
        RowKey::Id(id)
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Id(RecordId::Number(v))
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Id(RecordId::from(v))
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Id(RecordId::from(v))
    }
}

/// A dynamic field value.
///
/// # Example
///
/// ```
/// use gridview::Value;
///
/// assert_eq!(Value::from("Contoso").to_text(), "Contoso");
/// assert_eq!(Value::from(42).to_text(), "42");
/// assert_eq!(Value::Null.to_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    #[default]
    Null,
    Bool(bool),
    Number(i64),
    Float(f64),
    String(String),
    /// Anything else (arrays, objects), kept verbatim.
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Plain text form, as written into cells and edit inputs.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Json(v) => v.to_string(),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

fn is_false(v: &bool) -> bool {
    !*v
}

/// One record as owned by the host.
///
/// Field values are flattened next to `id` and `selected` when serialized,
/// so `{"id": 1, "name": "A"}` round-trips as expected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,

    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    /// A record without id (not yet persisted).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Builder-style field setter.
    pub fn set(mut self, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(attribute.into(), value.into());
        self
    }

    /// Builder-style selection flag.
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.fields.get(attribute)
    }

    /// Value of `attribute`, `Null` when absent.
    pub fn value(&self, attribute: &str) -> Value {
        self.fields.get(attribute).cloned().unwrap_or_default()
    }

    /// The key this record's row is stored under.
    pub fn key(&self) -> RowKey {
        RowKey::for_id(self.id.as_ref())
    }

    /// A copy with every entry of `patch` written over the fields.
    pub fn merged(&self, patch: &BTreeMap<String, Value>) -> Record {
        let mut record = self.clone();
        for (attribute, value) in patch {
            record.fields.insert(attribute.clone(), value.clone());
        }
        record
    }
}
