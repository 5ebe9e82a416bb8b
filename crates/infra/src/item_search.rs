//! Line-item search collaborator.
//!
//! Product list lines live in their own record type; the service only needs
//! them as an ordered, already-resolved sequence per list.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use wishlist_core::{RecordId, UserId};
use wishlist_lists::{ProductListItem, SortDirection};

use crate::record_store::StoreError;

/// Sort key for list lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ItemSort {
    Sku,
    DisplayName,
}

/// Sorting and paging of an item search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ItemSearchOptions {
    pub sort: ItemSort,
    pub order: SortDirection,
    /// `None` returns every line.
    pub page: Option<u32>,
}

impl ItemSearchOptions {
    /// Lines of a product list as attached by the list search: by SKU, ascending, unpaged.
    pub fn by_sku() -> Self {
        Self {
            sort: ItemSort::Sku,
            order: SortDirection::Ascending,
            page: None,
        }
    }
}

pub trait ItemSearch: Send + Sync {
    fn search(
        &self,
        owner: &str,
        list_id: &RecordId,
        include_store_items: bool,
        options: &ItemSearchOptions,
    ) -> Result<Vec<ProductListItem>, StoreError>;
}

impl<S> ItemSearch for Arc<S>
where
    S: ItemSearch + ?Sized,
{
    fn search(
        &self,
        owner: &str,
        list_id: &RecordId,
        include_store_items: bool,
        options: &ItemSearchOptions,
    ) -> Result<Vec<ProductListItem>, StoreError> {
        (**self).search(owner, list_id, include_store_items, options)
    }
}

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone)]
struct Line {
    owner: UserId,
    list_id: RecordId,
    item: ProductListItem,
}

/// In-memory item search for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryItemSearch {
    lines: RwLock<Vec<Line>>,
    store_details: RwLock<HashMap<String, serde_json::Value>>,
}

impl InMemoryItemSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, owner: UserId, list_id: RecordId, item: ProductListItem) {
        if let Ok(mut lines) = self.lines.write() {
            lines.push(Line {
                owner,
                list_id,
                item,
            });
        }
    }

    /// Store-facing details attached to an item when store items are included.
    pub fn set_store_details(&self, item_id: impl Into<String>, details: serde_json::Value) {
        if let Ok(mut map) = self.store_details.write() {
            map.insert(item_id.into(), details);
        }
    }
}

impl ItemSearch for InMemoryItemSearch {
    fn search(
        &self,
        owner: &str,
        list_id: &RecordId,
        include_store_items: bool,
        options: &ItemSearchOptions,
    ) -> Result<Vec<ProductListItem>, StoreError> {
        let lines = self
            .lines
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        let details = self
            .store_details
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;

        let mut items: Vec<ProductListItem> = lines
            .iter()
            .filter(|l| &l.list_id == list_id && l.owner.owns(Some(owner)))
            .map(|l| {
                let mut item = l.item.clone();
                item.item.store_details = if include_store_items {
                    details.get(&item.item.internal_id).cloned()
                } else {
                    None
                };
                item
            })
            .collect();

        items.sort_by(|a, b| {
            let ord = match options.sort {
                ItemSort::Sku => a.item.sku.cmp(&b.item.sku),
                ItemSort::DisplayName => a.item.display_name.cmp(&b.item.display_name),
            };
            match options.order {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        Ok(match options.page {
            None => items,
            Some(page) => items
                .into_iter()
                .skip(page.saturating_sub(1) as usize * PAGE_SIZE)
                .take(PAGE_SIZE)
                .collect(),
        })
    }
}
