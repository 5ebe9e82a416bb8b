//! Column and filter descriptors for product list searches.
//!
//! These are plain data handed to the record store; the store decides how to
//! evaluate them.

use serde::{Deserialize, Serialize};

use wishlist_core::{RecordId, UserId};

/// Record type under which product lists are stored.
pub const PRODUCT_LIST_RECORD: &str = "productlist";

/// Persisted product list fields.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    InternalId,
    TemplateId,
    Name,
    Description,
    Owner,
    Scope,
    Type,
    Created,
    LastModified,
    IsInactive,
}

impl Field {
    /// Storage key of the field; also the column name accepted in sort tokens.
    pub fn key(&self) -> &'static str {
        match self {
            Field::InternalId => "internalid",
            Field::TemplateId => "templateid",
            Field::Name => "name",
            Field::Description => "description",
            Field::Owner => "owner",
            Field::Scope => "scope",
            Field::Type => "type",
            Field::Created => "created",
            Field::LastModified => "lastmodified",
            Field::IsInactive => "isinactive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "internalid" => Field::InternalId,
            "templateid" => Field::TemplateId,
            "name" => Field::Name,
            "description" => Field::Description,
            "owner" => Field::Owner,
            "scope" => Field::Scope,
            "type" => Field::Type,
            "created" => Field::Created,
            "lastmodified" => Field::LastModified,
            "isinactive" => Field::IsInactive,
            _ => return None,
        })
    }
}

/// Boolean field values as the store writes them.
pub const TRUE: &str = "T";
pub const FALSE: &str = "F";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A column to retrieve, optionally sorted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub field: Field,
    pub sort: Option<SortDirection>,
}

impl Column {
    pub fn new(field: Field) -> Self {
        Self { field, sort: None }
    }
}

/// The fixed set of columns retrieved for every product list search.
pub fn columns() -> Vec<Column> {
    [
        Field::InternalId,
        Field::TemplateId,
        Field::Name,
        Field::Description,
        Field::Owner,
        Field::Scope,
        Field::Type,
        Field::Created,
        Field::LastModified,
    ]
    .into_iter()
    .map(Column::new)
    .collect()
}

/// Parsed `"column:direction"` sort token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub column: String,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    fn default() -> Self {
        Self {
            column: Field::Name.key().to_string(),
            direction: SortDirection::Ascending,
        }
    }
}

impl SortOrder {
    /// Missing parts default to `name` and ascending; only an exact `DESC`
    /// sorts descending.
    pub fn parse(token: Option<&str>) -> Self {
        let mut parts = token.unwrap_or_default().split(':');
        let column = parts
            .next()
            .filter(|c| !c.is_empty())
            .unwrap_or(Field::Name.key());
        let direction = match parts.next() {
            Some("DESC") => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        Self {
            column: column.to_string(),
            direction,
        }
    }

    /// Mark the matching column as sorted. Unknown columns leave the set untouched.
    pub fn apply(&self, columns: &mut [Column]) {
        if let Some(column) = columns.iter_mut().find(|c| c.field.key() == self.column) {
            column.sort = Some(self.direction);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Is,
}

/// A search predicate on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub field: Field,
    pub operator: Operator,
    pub value: String,
}

impl Filter {
    pub fn is(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            operator: Operator::Is,
            value: value.into(),
        }
    }

    pub fn matches(&self, actual: Option<&str>) -> bool {
        match self.operator {
            Operator::Is => actual == Some(self.value.as_str()),
        }
    }
}

/// Active lists owned by `user`.
pub fn owned_active(user: UserId) -> Vec<Filter> {
    vec![
        Filter::is(Field::IsInactive, FALSE),
        Filter::is(Field::Owner, user.to_string()),
    ]
}

/// The owned, active list with the given id.
pub fn owned_by_id(user: UserId, id: &RecordId) -> Vec<Filter> {
    let mut filters = vec![Filter::is(Field::InternalId, id.as_str())];
    filters.extend(owned_active(user));
    filters
}

/// Owned, active lists of a given type.
pub fn owned_by_type(user: UserId, type_id: &str) -> Vec<Filter> {
    let mut filters = vec![Filter::is(Field::Type, type_id)];
    filters.extend(owned_active(user));
    filters
}
