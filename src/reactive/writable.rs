//! Mutable store backed by a `tokio::sync::watch` channel.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use super::{Readable, Subscription, Watch};

/// A store holding a single value that is replaced as a whole on every publish.
#[derive(Clone)]
pub struct Writable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T: Clone + Send + Sync + 'static> Writable<T> {
    /// Create a store with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Compute the next value from the current one and publish it.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.tx.send_modify(|current| {
            let next = f(current);
            *current = next;
        });
    }

    /// Publish `value` only if `accept` returns true.
    ///
    /// `accept` runs while the channel's write lock is held, so no other
    /// publish can slip in between the check and the replacement.
    pub fn publish_if(&self, value: T, accept: impl FnOnce() -> bool) -> bool {
        self.tx.send_if_modified(|current| {
            if !accept() {
                return false;
            }
            *current = value;
            true
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Writable<T> {
    fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> Subscription<T> {
        Subscription::new(Receiver(self.tx.subscribe()))
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Writable").field("value", &*self.tx.borrow()).finish()
    }
}

struct Receiver<T>(watch::Receiver<T>);

#[async_trait]
impl<T: Clone + Send + Sync + 'static> Watch<T> for Receiver<T> {
    async fn changed(&mut self) -> bool {
        self.0.changed().await.is_ok()
    }

    fn current(&self) -> T {
        self.0.borrow().clone()
    }
}
