//! Record/search store boundary.
//!
//! This module defines an infrastructure-facing abstraction over the hosted
//! platform's record and search API without making any storage assumptions.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use r#trait::{FieldValue, Record, RecordStore, SearchRow, StoreError};
