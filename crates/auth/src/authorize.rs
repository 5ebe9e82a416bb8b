//! Access checks applied before touching user-owned product lists.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)

use wishlist_core::{DomainError, DomainResult, UserId};

use crate::Session;

/// Session gate: a login is required by configuration but none is active.
pub fn verify_session(login_required: bool, session: &dyn Session) -> DomainResult<()> {
    if login_required && !session.is_logged_in() {
        tracing::debug!("rejecting request: login required but no active session");
        return Err(DomainError::unauthorized());
    }
    Ok(())
}

/// Ownership gate for mutations: the loaded record's owner field must parse
/// to the acting user's id.
pub fn ensure_owner(user: UserId, raw_owner: Option<&str>) -> DomainResult<()> {
    if user.owns(raw_owner) {
        Ok(())
    } else {
        tracing::debug!(%user, owner = ?raw_owner, "rejecting mutation of a list owned by someone else");
        Err(DomainError::unauthorized())
    }
}
