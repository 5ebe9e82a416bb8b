//! Infrastructure layer: record store, item search, export delivery and the
//! product list access object built on them.

pub mod date_format;
pub mod export;
pub mod item_search;
pub mod product_lists;
pub mod record_store;

mod integration_tests;

pub use date_format::DateFormat;
pub use product_lists::{ProductListError, ProductListService};
