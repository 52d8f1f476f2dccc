use crate::doc_store::DocStore;
use crate::errors::DocStoreResult;
use crate::store::memory::MemoryStore;
use crate::store::BackingStore;

/// Builder for configuring and opening a [DocStore].
///
/// Without an explicit backend, `open()` falls back to the in-memory store.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::doc_store::DocStore;
/// use docstore::store::{memory::MemoryStore, BackingStore};
///
/// // in-memory database
/// let db = DocStore::builder().open()?;
///
/// // explicit backend
/// let db = DocStore::builder()
///     .backend(BackingStore::new(MemoryStore::new()))
///     .open()?;
/// ```
#[derive(Default)]
pub struct DocStoreBuilder {
    backend: Option<BackingStore>,
}

impl DocStoreBuilder {
    pub(crate) fn new() -> Self {
        DocStoreBuilder::default()
    }

    /// Sets the backing store implementation.
    pub fn backend(mut self, backend: BackingStore) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Opens the backing store and returns the database facade.
    pub fn open(self) -> DocStoreResult<DocStore> {
        let backing = self
            .backend
            .unwrap_or_else(|| BackingStore::new(MemoryStore::new()));
        backing.open_or_create()?;
        Ok(DocStore::new(backing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_defaults_to_memory_backend() {
        let db = DocStore::builder().open().unwrap();
        assert!(!db.is_closed().unwrap());
    }

    #[test]
    fn open_uses_the_given_backend() {
        let backend = BackingStore::new(MemoryStore::new());
        let db = DocStore::builder().backend(backend.clone()).open().unwrap();

        db.collection("users").unwrap();
        assert!(backend.has_collection("users").unwrap());
    }
}
