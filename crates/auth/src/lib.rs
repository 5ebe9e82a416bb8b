//! `wishlist-auth` — session gate and record ownership checks.
//!
//! This crate is intentionally decoupled from HTTP and storage: the session is
//! an injected trait and ownership is decided from raw owner field values.

pub mod authorize;
pub mod session;

pub use authorize::{ensure_owner, verify_session};
pub use session::{Session, StaticSession};
