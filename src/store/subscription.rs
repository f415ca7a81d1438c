//! Handle returned by [`Store::subscribe`](crate::store::Store::subscribe).

use std::fmt;

/// Registration handle for one observer.
///
/// Dropping the handle does not remove the observer. Call
/// [`unsubscribe`](Subscription::unsubscribe) for that; calling it more than
/// once is a no-op.
///
/// An observer that owns a strong [`Store`](crate::store::Store) clone of
/// the store it watches keeps that store alive until it is unsubscribed; use
/// [`Store::downgrade`](crate::store::Store::downgrade) for such observers.
#[must_use = "dropping a Subscription keeps the observer registered; call `unsubscribe` to remove it"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Remove the observer from its store.
    pub fn unsubscribe(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Whether this handle still holds a registration.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
