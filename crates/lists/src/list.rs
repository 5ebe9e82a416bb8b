use serde::{Deserialize, Serialize};

use wishlist_core::RecordId;

use crate::template::ListTemplate;

/// `{id, name}` pair read from a list-valued field (owner, scope, type).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Catalog item referenced by a list line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDescriptor {
    pub internal_id: String,
    pub display_name: String,
    pub sku: Option<String>,
    /// Store-facing details (price, stock...), only present when the item search
    /// was asked to include store items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_details: Option<serde_json::Value>,
}

/// One line of a product list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListItem {
    pub internal_id: String,
    pub item: ItemDescriptor,
    pub quantity: u32,
}

/// Stored product list, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    pub internal_id: RecordId,
    pub template_id: Option<String>,
    pub name: String,
    /// Display form: stored newlines rendered as `<br>`.
    pub description: String,
    pub owner: Reference,
    pub scope_id: Option<String>,
    pub scope_name: Option<String>,
    pub type_id: Option<String>,
    pub type_name: Option<String>,
    pub created: Option<String>,
    pub last_modified: Option<String>,
    pub last_modified_date: String,
    pub items: Vec<ProductListItem>,
}

/// A list as returned to callers: either a stored record or a configured
/// template standing in for one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProductListEntry {
    Stored(ProductList),
    Template(ListTemplate),
}

impl ProductListEntry {
    pub fn template_id(&self) -> Option<&str> {
        match self {
            ProductListEntry::Stored(l) => l.template_id.as_deref(),
            ProductListEntry::Template(t) => t.template_id.as_deref(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ProductListEntry::Stored(l) => &l.name,
            ProductListEntry::Template(t) => t.name.as_deref().unwrap_or_default(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ProductListEntry::Stored(l) => &l.description,
            ProductListEntry::Template(t) => t.description.as_deref().unwrap_or_default(),
        }
    }

    pub fn scope_id(&self) -> Option<&str> {
        match self {
            ProductListEntry::Stored(l) => l.scope_id.as_deref(),
            ProductListEntry::Template(t) => t.scope_id.as_deref(),
        }
    }

    pub fn scope_name(&self) -> Option<&str> {
        match self {
            ProductListEntry::Stored(l) => l.scope_name.as_deref(),
            ProductListEntry::Template(t) => t.scope_name.as_deref(),
        }
    }

    pub fn type_id(&self) -> Option<&str> {
        match self {
            ProductListEntry::Stored(l) => l.type_id.as_deref(),
            ProductListEntry::Template(t) => t.type_id.as_deref(),
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match self {
            ProductListEntry::Stored(l) => l.type_name.as_deref(),
            ProductListEntry::Template(t) => t.type_name.as_deref(),
        }
    }

    /// Templates carry no lines.
    pub fn items(&self) -> &[ProductListItem] {
        match self {
            ProductListEntry::Stored(l) => &l.items,
            ProductListEntry::Template(_) => &[],
        }
    }

    pub fn is_stored(&self) -> bool {
        matches!(self, ProductListEntry::Stored(_))
    }
}

impl From<ProductList> for ProductListEntry {
    fn from(value: ProductList) -> Self {
        ProductListEntry::Stored(value)
    }
}

impl From<ListTemplate> for ProductListEntry {
    fn from(value: ListTemplate) -> Self {
        ProductListEntry::Template(value)
    }
}
