use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wishlist_core::RecordId;
use wishlist_lists::{Column, Field, Filter};

/// Raw value of a field plus the display text the store resolves for
/// list-valued fields (owner name, scope name, type name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: Option<String>,
    pub text: Option<String>,
}

impl FieldValue {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            text: None,
        }
    }
}

/// One row returned by a search, holding only the requested columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRow {
    pub id: RecordId,
    pub columns: BTreeMap<Field, FieldValue>,
}

impl SearchRow {
    pub fn get_value(&self, field: Field) -> Option<&str> {
        self.columns.get(&field).and_then(|v| v.value.as_deref())
    }

    pub fn get_text(&self, field: Field) -> Option<&str> {
        self.columns.get(&field).and_then(|v| v.text.as_deref())
    }
}

/// A loaded or freshly created record, edited in memory and then submitted.
///
/// `id` is `None` until the record has been submitted for the first time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub record_type: String,
    pub id: Option<RecordId>,
    fields: BTreeMap<Field, String>,
}

impl Record {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            id: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn get_field_value(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn set_field_value(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Record store operation error.
///
/// These are infrastructure errors; they surface to callers unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("record not found: {record_type} {id}")]
    RecordNotFound { record_type: String, id: RecordId },

    #[error("record type mismatch: expected '{expected}', found '{found}'")]
    RecordTypeMismatch { expected: String, found: String },

    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Record and search access for one hosted account.
///
/// Implementations must:
/// - return search rows in their own (stable) order, honouring at most the
///   first sorted column
/// - treat a missing `isinactive` field as active (`F`)
/// - assign a fresh id on the first `submit` of a created record
pub trait RecordStore: Send + Sync {
    /// Run a search and return every matching row with the requested columns.
    fn search(
        &self,
        record_type: &str,
        filters: &[Filter],
        columns: &[Column],
    ) -> Result<Vec<SearchRow>, StoreError>;

    /// Load a record for editing.
    fn load(&self, record_type: &str, id: &RecordId) -> Result<Record, StoreError>;

    /// Start a new, unsaved record.
    fn create(&self, record_type: &str) -> Result<Record, StoreError>;

    /// Persist a record and return its id.
    fn submit(&self, record: Record) -> Result<RecordId, StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn search(
        &self,
        record_type: &str,
        filters: &[Filter],
        columns: &[Column],
    ) -> Result<Vec<SearchRow>, StoreError> {
        (**self).search(record_type, filters, columns)
    }

    fn load(&self, record_type: &str, id: &RecordId) -> Result<Record, StoreError> {
        (**self).load(record_type, id)
    }

    fn create(&self, record_type: &str) -> Result<Record, StoreError> {
        (**self).create(record_type)
    }

    fn submit(&self, record: Record) -> Result<RecordId, StoreError> {
        (**self).submit(record)
    }
}
