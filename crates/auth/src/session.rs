use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Identity/session collaborator: answers whether the current request carries
/// an authenticated shopper session.
pub trait Session: Send + Sync {
    fn is_logged_in(&self) -> bool;
}

impl<S> Session for Arc<S>
where
    S: Session + ?Sized,
{
    fn is_logged_in(&self) -> bool {
        (**self).is_logged_in()
    }
}

/// Session with a fixed (but switchable) login state, for tests/dev.
#[derive(Debug, Default)]
pub struct StaticSession {
    logged_in: AtomicBool,
}

impl StaticSession {
    pub fn logged_in() -> Self {
        Self {
            logged_in: AtomicBool::new(true),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            logged_in: AtomicBool::new(false),
        }
    }

    pub fn set_logged_in(&self, value: bool) {
        self.logged_in.store(value, Ordering::SeqCst);
    }
}

impl Session for StaticSession {
    fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }
}
