use crate::errors::DocStoreResult;
use crate::store::BackingCollection;
use std::collections::HashSet;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface for managing a backing store.
///
/// A store owns named collections and their data. Implementations decide
/// where the data lives; the reference implementation keeps everything in
/// memory (see [`crate::store::memory::MemoryStore`]).
///
/// # Thread Safety
/// Implementers must be `Send + Sync` for safe use in concurrent contexts.
pub trait BackingStoreProvider: Send + Sync {
    /// Opens or creates the store.
    ///
    /// Must be called before any other store operation.
    fn open_or_create(&self) -> DocStoreResult<()>;

    /// Checks if the store is closed.
    fn is_closed(&self) -> DocStoreResult<bool>;

    /// Checks if a collection with the given name exists in the store.
    fn has_collection(&self, name: &str) -> DocStoreResult<bool>;

    /// Retrieves the names of all collections in the store.
    fn collection_names(&self) -> DocStoreResult<HashSet<String>>;

    /// Opens or creates a collection with the given name.
    fn open_collection(&self, name: &str) -> DocStoreResult<BackingCollection>;

    /// Removes a collection and all of its documents.
    fn drop_collection(&self, name: &str) -> DocStoreResult<()>;

    /// Commits all pending changes.
    ///
    /// For in-memory stores this is a no-op; persistent stores flush to disk.
    fn commit(&self) -> DocStoreResult<()>;

    /// Closes the store; subsequent operations fail.
    fn close(&self) -> DocStoreResult<()>;
}

/// A handle to a backing store.
///
/// Cloning is cheap; all clones share the same underlying store.
#[derive(Clone)]
pub struct BackingStore {
    inner: Arc<dyn BackingStoreProvider>,
}

impl BackingStore {
    /// Creates a new `BackingStore` from a provider implementation.
    pub fn new<T: BackingStoreProvider + 'static>(inner: T) -> Self {
        BackingStore {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for BackingStore {
    type Target = Arc<dyn BackingStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
