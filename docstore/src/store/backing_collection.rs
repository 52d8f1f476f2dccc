use crate::collection::{
    DeleteResult, DocId, Document, FindOptions, InsertManyOptions, InsertManyResult, UpdateOptions,
    UpdateResult,
};
use crate::errors::DocStoreResult;
use crate::filter::Filter;
use std::ops::Deref;
use std::sync::Arc;

/// Low-level interface to one named collection inside a backing store.
///
/// This is the narrow operation set the lifecycle wrapper depends on: insert,
/// find, replace, update, delete, count. Everything behind it — durability,
/// query execution, constraint enforcement — belongs to the backing store and
/// is opaque to the wrapper.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`; every operation is an independent
/// request-response exchange with the store.
pub trait BackingCollectionProvider: Send + Sync {
    /// Returns the name of this collection.
    fn name(&self) -> String;

    /// Inserts a single document and returns its assigned id.
    ///
    /// A fresh [DocId] is assigned when the document has none. Fails with
    /// `DuplicateKey` when the id or a declared unique field collides with an
    /// existing document.
    fn insert_one(&self, document: Document) -> DocStoreResult<DocId>;

    /// Inserts multiple documents with partial-success reporting.
    ///
    /// Per-document failures land in the result's write errors instead of
    /// failing the call; an ordered batch stops at the first failure.
    fn insert_many(
        &self,
        documents: Vec<Document>,
        options: &InsertManyOptions,
    ) -> DocStoreResult<InsertManyResult>;

    /// Returns the first document matching the filter, or `None`.
    fn find_one(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<Option<Document>>;

    /// Returns all documents matching the filter as an ordered sequence.
    fn find(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<Vec<Document>>;

    /// Replaces the full body of the first matching document.
    ///
    /// The matched document's `_id` is preserved; every other field is
    /// replaced by the given document.
    fn replace_one(
        &self,
        filter: &Filter,
        document: Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult>;

    /// Merges the given fields into the first matching document.
    ///
    /// Fields not present in `set_fields` are left untouched.
    fn update_one(
        &self,
        filter: &Filter,
        set_fields: &Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult>;

    /// Removes the first document matching the filter.
    fn delete_one(&self, filter: &Filter) -> DocStoreResult<DeleteResult>;

    /// Removes all documents matching the filter.
    fn delete_many(&self, filter: &Filter) -> DocStoreResult<DeleteResult>;

    /// Counts the documents matching the filter, honoring skip/limit.
    fn count(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<u64>;

    /// Declares a uniqueness constraint on a field.
    ///
    /// Fails with `DuplicateKey` when existing documents already violate it.
    fn ensure_unique(&self, field: &str) -> DocStoreResult<()>;

    /// Returns the total number of documents in the collection.
    fn size(&self) -> DocStoreResult<u64>;

    /// Closes the collection; subsequent operations fail.
    fn close(&self) -> DocStoreResult<()>;
}

/// A handle to a collection inside a backing store.
///
/// Cloning is cheap; all clones share the same underlying collection.
#[derive(Clone)]
pub struct BackingCollection {
    inner: Arc<dyn BackingCollectionProvider>,
}

impl BackingCollection {
    /// Creates a new `BackingCollection` from a provider implementation.
    pub fn new<T: BackingCollectionProvider + 'static>(inner: T) -> Self {
        BackingCollection {
            inner: Arc::new(inner),
        }
    }
}

impl Deref for BackingCollection {
    type Target = Arc<dyn BackingCollectionProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
