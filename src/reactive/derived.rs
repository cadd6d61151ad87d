//! Read-only stores computed from another store.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Readable, Subscription, Watch};

type Project<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;

/// Read-only view of another store.
///
/// The projection runs on every read of a new upstream value; results are
/// not cached, so a derived store over a constant source still produces a
/// fresh value per publish.
pub struct Derived<T> {
    inner: Arc<dyn Readable<T>>,
}

impl<T: Clone + Send + Sync + 'static> Derived<T> {
    /// Derive a store from `source` through `project`.
    pub fn new<S, R, F>(source: R, project: F) -> Self
    where
        S: Clone + Send + Sync + 'static,
        R: Readable<S> + 'static,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        let projection = Projection { source: Arc::new(source), project: Arc::new(project) };
        Self { inner: Arc::new(projection) }
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Clone + Send + Sync + 'static> Readable<T> for Derived<T> {
    fn get(&self) -> T {
        self.inner.get()
    }

    fn subscribe(&self) -> Subscription<T> {
        self.inner.subscribe()
    }
}

impl<T> std::fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Derived").finish_non_exhaustive()
    }
}

struct Projection<S, T> {
    source: Arc<dyn Readable<S>>,
    project: Project<S, T>,
}

impl<S, T> Readable<T> for Projection<S, T>
where
    S: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn get(&self) -> T {
        (self.project)(&self.source.get())
    }

    fn subscribe(&self) -> Subscription<T> {
        let source = self.source.subscribe();
        Subscription::new(Mapped { source, project: Arc::clone(&self.project) })
    }
}

struct Mapped<S, T> {
    source: Subscription<S>,
    project: Project<S, T>,
}

#[async_trait]
impl<S, T> Watch<T> for Mapped<S, T>
where
    S: Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    async fn changed(&mut self) -> bool {
        self.source.inner.changed().await
    }

    fn current(&self) -> T {
        (self.project)(&self.source.current())
    }
}
