//! Product list access object.
//!
//! Every operation runs synchronously to completion against the injected
//! collaborators; their failures surface unchanged.

use std::sync::Arc;

use wishlist_auth::{Session, ensure_owner, verify_session};
use wishlist_core::{RecordId, UserId};
use wishlist_lists::kind::{
    PREDEFINED_TYPE_NAME, REQUEST_A_QUOTE_TYPE_ID, SAVED_FOR_LATER_TYPE_ID, is_special_type,
};
use wishlist_lists::query::{self, PRODUCT_LIST_RECORD, TRUE};
use wishlist_lists::{
    Column, Field, Filter, ProductList, ProductListConfig, ProductListData, ProductListEntry,
    SortOrder, sanitize,
};

use super::error::ProductListError;
use super::normalize::normalize_row;
use crate::date_format::DateFormat;
use crate::export::Exporter;
use crate::item_search::{ItemSearch, ItemSearchOptions};
use crate::record_store::RecordStore;

pub type ProductListResult<T> = Result<T, ProductListError>;

/// Product list access object over a record store `S` and item search `I`.
pub struct ProductListService<S, I> {
    store: S,
    items: I,
    session: Arc<dyn Session>,
    config: ProductListConfig,
    date_format: DateFormat,
    exporter: Option<Exporter>,
}

impl<S, I> ProductListService<S, I>
where
    S: RecordStore,
    I: ItemSearch,
{
    pub fn new(store: S, items: I, session: Arc<dyn Session>, config: ProductListConfig) -> Self {
        Self {
            store,
            items,
            session,
            config,
            date_format: DateFormat::default(),
            exporter: None,
        }
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = Some(exporter);
        self
    }

    pub fn config(&self) -> &ProductListConfig {
        &self.config
    }

    /// Fails with `Unauthorized` when login is required and no session is active.
    pub fn verify_session(&self) -> ProductListResult<()> {
        verify_session(self.config.login_required, self.session.as_ref())?;
        Ok(())
    }

    /// Sanitize free text the way `create`/`update` persist it.
    pub fn sanitize(text: Option<&str>) -> String {
        sanitize(text)
    }

    /// Run a product list search and normalize every row.
    ///
    /// `order` is a `"column:direction"` token (default `name:ASC`). When
    /// `template_ids` is given, each row's template id is appended to it.
    /// Result order is the store's.
    pub fn search_helper(
        &self,
        filters: &[Filter],
        mut columns: Vec<Column>,
        include_store_items: bool,
        order: Option<&str>,
        mut template_ids: Option<&mut Vec<String>>,
    ) -> ProductListResult<Vec<ProductList>> {
        SortOrder::parse(order).apply(&mut columns);

        let rows = self.store.search(PRODUCT_LIST_RECORD, filters, &columns)?;
        let options = ItemSearchOptions::by_sku();

        let mut lists = Vec::with_capacity(rows.len());
        for row in &rows {
            let owner = row.get_value(Field::Owner).unwrap_or_default();
            let items = self
                .items
                .search(owner, &row.id, include_store_items, &options)?;
            let list = normalize_row(row, &self.date_format, items);

            if let (Some(ids), Some(template_id)) = (
                template_ids.as_deref_mut(),
                list.template_id.as_deref().filter(|t| !t.is_empty()),
            ) {
                ids.push(template_id.to_string());
            }
            lists.push(list);
        }

        Ok(lists)
    }

    /// The user's active list with the given id.
    pub fn get(&self, user: UserId, id: &RecordId) -> ProductListResult<ProductList> {
        self.verify_session()?;
        tracing::debug!(%user, %id, "get product list");

        self.search_helper(&query::owned_by_id(user, id), query::columns(), true, None, None)?
            .into_iter()
            .next()
            .ok_or(ProductListError::NotFound)
    }

    pub fn get_saved_for_later(&self, user: UserId) -> ProductListResult<ProductListEntry> {
        self.get_special_type(user, SAVED_FOR_LATER_TYPE_ID)
    }

    pub fn get_request_a_quote(&self, user: UserId) -> ProductListResult<ProductListEntry> {
        self.get_special_type(user, REQUEST_A_QUOTE_TYPE_ID)
    }

    /// The user's list of a well-known type, falling back to the first
    /// configured template of that type.
    pub fn get_special_type(&self, user: UserId, type_id: &str) -> ProductListResult<ProductListEntry> {
        self.verify_session()?;
        tracing::debug!(%user, type_id, "get special product list");

        let stored = self.search_helper(
            &query::owned_by_type(user, type_id),
            query::columns(),
            true,
            None,
            None,
        )?;
        if let Some(list) = stored.into_iter().next() {
            return Ok(list.into());
        }

        self.config
            .template_for_type(type_id)
            .map(|template| template.clone().with_lookup_defaults(type_id).into())
            .ok_or(ProductListError::NotFound)
    }

    /// All of the user's lists, with missing predefined templates synthesized.
    ///
    /// Single-list deployments only see predefined lists; otherwise the
    /// saved-for-later and request-a-quote lists are left out. With `export`
    /// set, the result is also mailed as a spreadsheet.
    pub fn search(
        &self,
        user: UserId,
        order: Option<&str>,
        export: bool,
    ) -> ProductListResult<Vec<ProductListEntry>> {
        tracing::debug!(%user, order, export, "search product lists");

        let mut template_ids = Vec::new();
        let stored = self.search_helper(
            &query::owned_active(user),
            query::columns(),
            false,
            order,
            Some(&mut template_ids),
        )?;
        let mut lists: Vec<ProductListEntry> = stored.into_iter().map(Into::into).collect();

        for template in &self.config.list_templates {
            let represented = template
                .template_id
                .as_ref()
                .is_some_and(|id| template_ids.contains(id));
            if represented {
                continue;
            }
            if !template.is_well_formed() {
                tracing::error!(
                    template_id = ?template.template_id,
                    name = ?template.name,
                    "wrong predefined product list, check backend configuration"
                );
                continue;
            }
            lists.push(template.clone().with_listing_defaults().into());
        }

        if self.config.is_single_list() {
            return Ok(lists
                .into_iter()
                .filter(|l| l.type_name() == Some(PREDEFINED_TYPE_NAME))
                .collect());
        }

        let lists: Vec<ProductListEntry> = lists
            .into_iter()
            .filter(|l| !is_special_type(l.type_id()))
            .collect();

        if export {
            self.export(user, &lists);
        }

        Ok(lists)
    }

    fn export(&self, user: UserId, lists: &[ProductListEntry]) {
        let Some(exporter) = &self.exporter else {
            tracing::warn!(%user, "product list export requested but no exporter is configured");
            return;
        };
        match exporter.export(lists) {
            Ok(file_id) => tracing::info!(%user, file_id = %file_id, "product list export sent"),
            Err(err) => tracing::warn!(%user, "product list export failed: {err:#}"),
        }
    }

    /// Create a list owned by `user` and return its id.
    pub fn create(&self, user: UserId, data: &ProductListData) -> ProductListResult<RecordId> {
        self.verify_session()?;

        let mut record = self.store.create(PRODUCT_LIST_RECORD)?;
        if let Some(template_id) = data.template_id() {
            record.set_field_value(Field::TemplateId, template_id);
        }
        if let Some(scope_id) = data.scope_id() {
            record.set_field_value(Field::Scope, scope_id);
        }
        if let Some(type_id) = data.type_id() {
            record.set_field_value(Field::Type, type_id);
        }
        if let Some(name) = data.name() {
            record.set_field_value(Field::Name, sanitize(Some(name)));
        }
        if let Some(description) = data.description() {
            record.set_field_value(Field::Description, sanitize(Some(description)));
        }
        record.set_field_value(Field::Owner, user.to_string());

        let id = self.store.submit(record)?;
        tracing::debug!(%user, %id, "created product list");
        Ok(id)
    }

    /// Overwrite the given fields of one of the user's lists.
    ///
    /// Absent fields keep their values, except the description which is always
    /// replaced (cleared when absent).
    pub fn update(&self, user: UserId, id: &RecordId, data: &ProductListData) -> ProductListResult<()> {
        self.verify_session()?;

        let mut record = self.store.load(PRODUCT_LIST_RECORD, id)?;
        ensure_owner(user, record.get_field_value(Field::Owner))?;

        if let Some(template_id) = data.template_id() {
            record.set_field_value(Field::TemplateId, template_id);
        }
        if let Some(scope_id) = data.scope_id() {
            record.set_field_value(Field::Scope, scope_id);
        }
        if let Some(type_id) = data.type_id() {
            record.set_field_value(Field::Type, type_id);
        }
        if let Some(name) = data.name() {
            record.set_field_value(Field::Name, sanitize(Some(name)));
        }
        record.set_field_value(Field::Description, sanitize(data.description()));

        self.store.submit(record)?;
        tracing::debug!(%user, %id, "updated product list");
        Ok(())
    }

    /// Deactivate one of the user's lists. The row is kept.
    pub fn delete(&self, user: UserId, id: &RecordId) -> ProductListResult<RecordId> {
        self.verify_session()?;

        let mut record = self.store.load(PRODUCT_LIST_RECORD, id)?;
        ensure_owner(user, record.get_field_value(Field::Owner))?;

        record.set_field_value(Field::IsInactive, TRUE);

        let id = self.store.submit(record)?;
        tracing::debug!(%user, %id, "deactivated product list");
        Ok(id)
    }
}
