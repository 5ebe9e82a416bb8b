//! Mapping of raw search rows to the display shape of a product list.

use wishlist_lists::{Field, ProductList, ProductListItem, Reference, to_display};

use crate::date_format::DateFormat;
use crate::record_store::SearchRow;

/// Build the display record for one search row and its already-fetched lines.
pub fn normalize_row(
    row: &SearchRow,
    date_format: &DateFormat,
    items: Vec<ProductListItem>,
) -> ProductList {
    let owned = |field| row.get_value(field).map(str::to_string);
    let text = |field| row.get_text(field).map(str::to_string);

    ProductList {
        internal_id: row.id.clone(),
        template_id: owned(Field::TemplateId),
        name: owned(Field::Name).unwrap_or_default(),
        description: to_display(row.get_value(Field::Description)),
        owner: Reference {
            id: owned(Field::Owner),
            name: text(Field::Owner),
        },
        scope_id: owned(Field::Scope),
        scope_name: text(Field::Scope),
        type_id: owned(Field::Type),
        type_name: text(Field::Type),
        created: owned(Field::Created),
        last_modified: owned(Field::LastModified),
        last_modified_date: date_format.format_raw(row.get_value(Field::LastModified)),
        items,
    }
}
