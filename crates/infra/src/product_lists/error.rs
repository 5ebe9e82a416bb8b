use thiserror::Error;

use wishlist_core::DomainError;

use crate::record_store::StoreError;

/// Errors surfaced by [`super::ProductListService`].
///
/// `Unauthorized` and `NotFound` are the service's own outcomes; collaborator
/// failures pass through unchanged in `Store`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductListError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Access guard rejections. A guard that fails for any reason denies access;
/// an unusable identifier cannot name a stored list.
impl From<DomainError> for ProductListError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Unauthorized | DomainError::Validation(_) => ProductListError::Unauthorized,
            DomainError::NotFound | DomainError::InvalidId(_) => ProductListError::NotFound,
        }
    }
}
