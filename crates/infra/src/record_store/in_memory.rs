use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use chrono::Utc;

use wishlist_core::RecordId;
use wishlist_lists::query::FALSE;
use wishlist_lists::{Column, Field, Filter, SortDirection};

use super::r#trait::{FieldValue, Record, RecordStore, SearchRow, StoreError};

#[derive(Debug, Clone)]
struct StoredRow {
    record_type: String,
    fields: BTreeMap<Field, String>,
}

impl StoredRow {
    fn value(&self, id: u64, field: Field) -> Option<String> {
        match field {
            Field::InternalId => Some(id.to_string()),
            Field::IsInactive => Some(
                self.fields
                    .get(&field)
                    .cloned()
                    .unwrap_or_else(|| FALSE.to_string()),
            ),
            _ => self.fields.get(&field).cloned(),
        }
    }
}

#[derive(Debug, Default)]
struct Rows {
    next_id: u64,
    rows: BTreeMap<u64, StoredRow>,
}

/// In-memory record store.
///
/// Intended for tests/dev. Not optimized for performance. Ids are assigned
/// sequentially from 1; `created`/`lastmodified` are stamped as RFC 3339 UTC.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: RwLock<Rows>,
    labels: RwLock<HashMap<(Field, String), String>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the display text returned for a list-valued field value
    /// (e.g. owner `"7"` → `"Jane Doe"`).
    pub fn set_label(&self, field: Field, value: impl Into<String>, text: impl Into<String>) {
        if let Ok(mut labels) = self.labels.write() {
            labels.insert((field, value.into()), text.into());
        }
    }

    /// Insert a row directly, bypassing `create`/`submit`.
    ///
    /// Timestamps are only stamped when the caller leaves them out.
    pub fn insert<'a>(
        &self,
        record_type: &str,
        fields: impl IntoIterator<Item = (Field, &'a str)>,
    ) -> Result<RecordId, StoreError> {
        let mut row = StoredRow {
            record_type: record_type.to_string(),
            fields: fields
                .into_iter()
                .filter(|(f, _)| *f != Field::InternalId)
                .map(|(f, v)| (f, v.to_string()))
                .collect(),
        };
        let now = Utc::now().to_rfc3339();
        row.fields.entry(Field::Created).or_insert_with(|| now.clone());
        row.fields.entry(Field::LastModified).or_insert(now);

        let mut inner = self.write()?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, row);
        Ok(RecordId::from(id))
    }

    /// Raw view of a row regardless of filters (inactive rows included).
    pub fn get(&self, id: &RecordId) -> Option<Record> {
        let inner = self.inner.read().ok()?;
        let key = parse_key(id)?;
        let row = inner.rows.get(&key)?;
        let mut record = Record::new(row.record_type.clone());
        record.id = Some(id.clone());
        for (field, value) in &row.fields {
            record.set_field_value(*field, value.clone());
        }
        Some(record)
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Rows>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn label(&self, field: Field, value: &str) -> Option<String> {
        let labels = self.labels.read().ok()?;
        labels.get(&(field, value.to_string())).cloned()
    }
}

fn parse_key(id: &RecordId) -> Option<u64> {
    id.as_str().parse().ok()
}

/// Numeric when both sides are integers (ids, quantities), textual otherwise.
fn compare(a: Option<&String>, b: Option<&String>, direction: SortDirection) -> Ordering {
    let numeric = |v: Option<&String>| v.and_then(|v| v.parse::<u64>().ok());
    let ord = match (numeric(a), numeric(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        _ => a.cmp(&b),
    };
    match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
    }
}

impl RecordStore for InMemoryRecordStore {
    fn search(
        &self,
        record_type: &str,
        filters: &[Filter],
        columns: &[Column],
    ) -> Result<Vec<SearchRow>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut matched: Vec<(u64, &StoredRow)> = inner
            .rows
            .iter()
            .filter(|(_, row)| row.record_type == record_type)
            .filter(|(id, row)| {
                filters
                    .iter()
                    .all(|f| f.matches(row.value(**id, f.field).as_deref()))
            })
            .map(|(id, row)| (*id, row))
            .collect();

        if let Some((field, direction)) = columns
            .iter()
            .find_map(|c| c.sort.map(|direction| (c.field, direction)))
        {
            // Stable: ties keep id order.
            matched.sort_by(|(a_id, a), (b_id, b)| {
                compare(
                    a.value(*a_id, field).as_ref(),
                    b.value(*b_id, field).as_ref(),
                    direction,
                )
            });
        }

        Ok(matched
            .into_iter()
            .map(|(id, row)| SearchRow {
                id: RecordId::from(id),
                columns: columns
                    .iter()
                    .map(|c| {
                        let value = row.value(id, c.field);
                        let text = value.as_deref().and_then(|v| self.label(c.field, v));
                        (c.field, FieldValue { value, text })
                    })
                    .collect(),
            })
            .collect())
    }

    fn load(&self, record_type: &str, id: &RecordId) -> Result<Record, StoreError> {
        let not_found = || StoreError::RecordNotFound {
            record_type: record_type.to_string(),
            id: id.clone(),
        };
        let record = self.get(id).ok_or_else(not_found)?;
        if record.record_type != record_type {
            return Err(not_found());
        }
        Ok(record)
    }

    fn create(&self, record_type: &str) -> Result<Record, StoreError> {
        Ok(Record::new(record_type))
    }

    fn submit(&self, record: Record) -> Result<RecordId, StoreError> {
        let now = Utc::now().to_rfc3339();
        let mut inner = self.write()?;

        let key = match &record.id {
            Some(id) => {
                let key = parse_key(id).filter(|k| inner.rows.contains_key(k)).ok_or_else(|| {
                    StoreError::RecordNotFound {
                        record_type: record.record_type.clone(),
                        id: id.clone(),
                    }
                })?;
                let existing = &inner.rows[&key].record_type;
                if *existing != record.record_type {
                    return Err(StoreError::RecordTypeMismatch {
                        expected: existing.clone(),
                        found: record.record_type.clone(),
                    });
                }
                key
            }
            None => {
                inner.next_id += 1;
                inner.next_id
            }
        };

        let mut fields: BTreeMap<Field, String> = record
            .fields()
            .filter(|(f, _)| *f != Field::InternalId)
            .map(|(f, v)| (f, v.to_string()))
            .collect();
        let created = inner
            .rows
            .get(&key)
            .and_then(|row| row.fields.get(&Field::Created).cloned())
            .unwrap_or_else(|| now.clone());
        fields.insert(Field::Created, created);
        fields.insert(Field::LastModified, now);

        inner.rows.insert(
            key,
            StoredRow {
                record_type: record.record_type,
                fields,
            },
        );

        Ok(RecordId::from(key))
    }
}
