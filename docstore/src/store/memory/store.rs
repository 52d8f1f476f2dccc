use crate::common::{atomic, Atomic};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::store::memory::MemoryCollection;
use crate::store::{BackingCollection, BackingStoreProvider};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory backing store.
///
/// Keeps every collection entirely in memory; nothing survives the process.
/// Intended for tests and ephemeral workloads, and as the reference
/// implementation of the [`BackingStoreProvider`] contract.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<MemoryStoreInner>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        MemoryStore {
            inner: Arc::new(MemoryStoreInner {
                collections: atomic(HashMap::new()),
                closed: AtomicBool::new(false),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BackingStoreProvider for MemoryStore {
    fn open_or_create(&self) -> DocStoreResult<()> {
        self.inner.check_opened()?;
        log::debug!("Opened in-memory store");
        Ok(())
    }

    fn is_closed(&self) -> DocStoreResult<bool> {
        Ok(self.inner.closed.load(Ordering::Relaxed))
    }

    fn has_collection(&self, name: &str) -> DocStoreResult<bool> {
        self.inner.check_opened()?;
        Ok(self.inner.collections.read().contains_key(name))
    }

    fn collection_names(&self) -> DocStoreResult<HashSet<String>> {
        self.inner.check_opened()?;
        Ok(self.inner.collections.read().keys().cloned().collect())
    }

    fn open_collection(&self, name: &str) -> DocStoreResult<BackingCollection> {
        self.inner.check_opened()?;
        let mut collections = self.inner.collections.write();
        let collection = collections
            .entry(name.to_string())
            .or_insert_with(|| BackingCollection::new(MemoryCollection::new(name)));
        Ok(collection.clone())
    }

    fn drop_collection(&self, name: &str) -> DocStoreResult<()> {
        self.inner.check_opened()?;
        if let Some(collection) = self.inner.collections.write().remove(name) {
            collection.close()?;
        }
        Ok(())
    }

    fn commit(&self) -> DocStoreResult<()> {
        // nothing to flush for an in-memory store
        self.inner.check_opened()
    }

    fn close(&self) -> DocStoreResult<()> {
        if self.inner.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        for collection in self.inner.collections.read().values() {
            collection.close()?;
        }
        log::debug!("Closed in-memory store");
        Ok(())
    }
}

struct MemoryStoreInner {
    collections: Atomic<HashMap<String, BackingCollection>>,
    closed: AtomicBool,
}

impl MemoryStoreInner {
    fn check_opened(&self) -> DocStoreResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Store is closed");
            return Err(DocStoreError::new(
                "Store is closed",
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::FindOptions;
    use crate::doc;
    use crate::filter::all;

    #[test]
    fn open_collection_creates_on_demand() {
        let store = MemoryStore::new();
        store.open_or_create().unwrap();
        assert!(!store.has_collection("users").unwrap());

        let collection = store.open_collection("users").unwrap();
        assert_eq!(collection.name(), "users");
        assert!(store.has_collection("users").unwrap());
        assert!(store.collection_names().unwrap().contains("users"));
    }

    #[test]
    fn open_collection_returns_the_same_data() {
        let store = MemoryStore::new();
        let first = store.open_collection("users").unwrap();
        first.insert_one(doc! { name: "Alice" }).unwrap();

        let second = store.open_collection("users").unwrap();
        assert_eq!(second.size().unwrap(), 1);
    }

    #[test]
    fn drop_collection_discards_data() {
        let store = MemoryStore::new();
        let collection = store.open_collection("users").unwrap();
        collection.insert_one(doc! { name: "Alice" }).unwrap();

        store.drop_collection("users").unwrap();
        assert!(!store.has_collection("users").unwrap());

        // a freshly opened collection under the same name starts empty
        let collection = store.open_collection("users").unwrap();
        assert_eq!(collection.size().unwrap(), 0);
    }

    #[test]
    fn drop_unknown_collection_is_a_no_op() {
        let store = MemoryStore::new();
        assert!(store.drop_collection("missing").is_ok());
    }

    #[test]
    fn commit_is_a_no_op() {
        let store = MemoryStore::new();
        assert!(store.commit().is_ok());
    }

    #[test]
    fn close_propagates_to_collections() {
        let store = MemoryStore::new();
        let collection = store.open_collection("users").unwrap();
        store.close().unwrap();

        assert!(store.is_closed().unwrap());
        assert!(store.open_collection("users").is_err());
        assert!(collection
            .find(&all(), &FindOptions::default())
            .is_err());
        // closing twice is fine
        assert!(store.close().is_ok());
    }
}
