use crate::collection::{CollectionRegistry, DocCollection};
use crate::doc_store_builder::DocStoreBuilder;
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::repository::{Entity, ObjectRepository};
use crate::store::BackingStore;
use std::collections::HashSet;
use std::sync::Arc;

/// The main database instance.
///
/// `DocStore` is the entry point for all operations. It owns the backing
/// store and the collection-name registry, and hands out lifecycle-tracked
/// [DocCollection]s and typed [ObjectRepository]s.
///
/// Instances are cheap to clone and thread-safe; all clones share the same
/// underlying state. The backing store is closed when the last clone is
/// dropped, or explicitly with [`close`](DocStore::close).
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::doc;
/// use docstore::doc_store::DocStore;
/// use docstore::filter::field;
///
/// let db = DocStore::builder().open()?;
///
/// let users = db.collection("users")?;
/// users.create_one(doc! { name: "alice" })?;
///
/// let alice = users.read_one(field("name").eq("alice"), &Default::default())?;
/// db.close()?;
/// ```
#[derive(Clone)]
pub struct DocStore {
    inner: Arc<DocStoreInner>,
}

impl DocStore {
    /// Creates a new [DocStoreBuilder] for configuring and opening a database.
    pub fn builder() -> DocStoreBuilder {
        DocStoreBuilder::new()
    }

    pub(crate) fn new(backing: BackingStore) -> Self {
        DocStore {
            inner: Arc::new(DocStoreInner {
                backing,
                registry: CollectionRegistry::new(),
            }),
        }
    }

    /// Constructs the lifecycle wrapper for a named collection.
    ///
    /// At most one wrapper exists per name: a second call with the same name
    /// fails with a `Configuration` error. The underlying collection is
    /// created in the backing store if it does not exist yet.
    pub fn collection(&self, name: &str) -> DocStoreResult<DocCollection> {
        self.inner.collection(name)
    }

    /// Constructs a typed repository for entities of type `T`.
    ///
    /// The repository is backed by the collection named by
    /// `T::collection_name()`, constructed through the same registry as
    /// [`collection`](DocStore::collection) — so the name-uniqueness rule
    /// applies across both access styles.
    pub fn repository<T: Entity>(&self) -> DocStoreResult<ObjectRepository<T>> {
        let collection = self.inner.collection(&T::collection_name())?;
        Ok(ObjectRepository::new(collection))
    }

    /// Checks whether a collection exists in the backing store.
    pub fn has_collection(&self, name: &str) -> DocStoreResult<bool> {
        self.inner.backing.has_collection(name)
    }

    /// Returns the names of all collections in the backing store.
    pub fn collection_names(&self) -> DocStoreResult<HashSet<String>> {
        self.inner.backing.collection_names()
    }

    /// Drops a collection and all of its documents.
    ///
    /// The name is released from the registry, so a new wrapper may be
    /// constructed for it afterwards.
    pub fn drop_collection(&self, name: &str) -> DocStoreResult<()> {
        self.inner.registry.deregister(name);
        self.inner.backing.drop_collection(name)
    }

    /// Commits pending changes in the backing store.
    pub fn commit(&self) -> DocStoreResult<()> {
        self.inner.backing.commit()
    }

    /// Checks if the backing store is closed.
    pub fn is_closed(&self) -> DocStoreResult<bool> {
        self.inner.backing.is_closed()
    }

    /// Closes the backing store. Operations on handles fail afterwards.
    pub fn close(&self) -> DocStoreResult<()> {
        self.inner.backing.close()
    }
}

struct DocStoreInner {
    backing: BackingStore,
    registry: CollectionRegistry,
}

impl DocStoreInner {
    fn collection(&self, name: &str) -> DocStoreResult<DocCollection> {
        if name.trim().is_empty() {
            log::error!("Collection name cannot be empty");
            return Err(DocStoreError::new(
                "Collection name cannot be empty",
                ErrorKind::Configuration,
            ));
        }

        self.registry.register(name)?;
        match self.backing.open_collection(name) {
            Ok(backing_collection) => Ok(DocCollection::new(name, backing_collection)),
            Err(e) => {
                // the name stays free when the backing store refuses
                self.registry.deregister(name);
                Err(e)
            }
        }
    }
}

impl Drop for DocStoreInner {
    fn drop(&mut self) {
        if let Ok(false) = self.backing.is_closed() {
            if let Err(e) = self.backing.close() {
                log::warn!("Failed to close backing store on drop: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::FindOptions;
    use crate::doc;
    use crate::errors::ErrorKind;
    use crate::filter::all;

    fn open_store() -> DocStore {
        DocStore::builder().open().expect("store opens")
    }

    #[test]
    fn collection_roundtrip() {
        let db = open_store();
        let users = db.collection("users").unwrap();
        users.create_one(doc! { name: "alice" }).unwrap();
        assert_eq!(users.count(all(), &FindOptions::default()).unwrap(), 1);
        assert!(db.has_collection("users").unwrap());
        assert!(db.collection_names().unwrap().contains("users"));
    }

    #[test]
    fn duplicate_collection_name_fails() {
        let db = open_store();
        let _users = db.collection("users").unwrap();
        let result = db.collection("users");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::Configuration);
    }

    #[test]
    fn empty_collection_name_fails() {
        let db = open_store();
        let result = db.collection("  ");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::Configuration);
    }

    #[test]
    fn separate_stores_do_not_share_names() {
        let first = open_store();
        let second = open_store();
        first.collection("users").unwrap();
        // no process-wide state: the other instance is free to use the name
        assert!(second.collection("users").is_ok());
    }

    #[test]
    fn drop_collection_releases_the_name() {
        let db = open_store();
        let users = db.collection("users").unwrap();
        users.create_one(doc! { name: "alice" }).unwrap();

        db.drop_collection("users").unwrap();
        assert!(!db.has_collection("users").unwrap());

        let users = db.collection("users").unwrap();
        assert_eq!(users.count(all(), &FindOptions::default()).unwrap(), 0);
    }

    #[test]
    fn close_makes_handles_unusable() {
        let db = open_store();
        let users = db.collection("users").unwrap();
        db.close().unwrap();
        assert!(db.is_closed().unwrap());
        let result = users.create_one(doc! { name: "alice" });
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn clones_share_state() {
        let db = open_store();
        let clone = db.clone();
        db.collection("users").unwrap();
        // the registry travels with the clone
        assert!(clone.collection("users").is_err());
    }
}
