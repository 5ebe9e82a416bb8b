//! Product lists domain module.
//!
//! Business rules for wishlists, saved-for-later and request-a-quote lists,
//! implemented as deterministic domain logic (no IO, no HTTP, no storage).

pub mod config;
pub mod input;
pub mod kind;
pub mod list;
pub mod query;
pub mod sanitize;
pub mod template;

pub use config::ProductListConfig;
pub use input::ProductListData;
pub use list::{ItemDescriptor, ProductList, ProductListEntry, ProductListItem, Reference};
pub use query::{Column, Field, Filter, SortDirection, SortOrder};
pub use sanitize::{sanitize, to_display};
pub use template::ListTemplate;
