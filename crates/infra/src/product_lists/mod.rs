//! Product list access object: lookups, listing and mutations over an injected
//! record store.

pub mod error;
pub mod normalize;
pub mod service;

pub use error::ProductListError;
pub use service::ProductListService;
