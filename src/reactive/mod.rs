//! Reactive store primitives.
//!
//! A [`Writable`] holds one value and republishes it on every change. A
//! [`Derived`] is a read-only view computed from another store. Both are
//! read through the [`Readable`] trait.

pub mod derived;
pub mod writable;

use async_trait::async_trait;

pub use derived::Derived;
pub use writable::Writable;

/// A store whose value can be read and watched.
pub trait Readable<T>: Send + Sync {
    /// Current value.
    fn get(&self) -> T;

    /// Start watching the store for new publishes.
    fn subscribe(&self) -> Subscription<T>;
}

/// Source of change notifications behind a [`Subscription`].
#[async_trait]
pub(crate) trait Watch<T>: Send + Sync {
    /// Resolves once a value newer than the last seen one is published.
    /// Returns false when the store has been dropped.
    async fn changed(&mut self) -> bool;

    /// Latest published value.
    fn current(&self) -> T;
}

/// Handle returned by [`Readable::subscribe`].
///
/// Publishes that happen between two calls to [`Subscription::next`] are
/// coalesced; the subscriber always sees a complete, most recent value.
pub struct Subscription<T> {
    inner: Box<dyn Watch<T>>,
}

impl<T> Subscription<T> {
    pub(crate) fn new(inner: impl Watch<T> + 'static) -> Self {
        Self { inner: Box::new(inner) }
    }

    /// Latest published value.
    pub fn current(&self) -> T {
        self.inner.current()
    }

    /// Wait for the next publish and return the new value.
    ///
    /// Returns `None` once the underlying store is gone.
    pub async fn next(&mut self) -> Option<T> {
        if self.inner.changed().await {
            Some(self.inner.current())
        } else {
            None
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
