use crate::collection::{
    DeleteResult, DocId, Document, FindOptions, InsertManyOptions, InsertManyResult, UpdateOptions,
    UpdateResult,
};
use crate::common::{get_current_time_or_zero, Value, DOC_CREATED, DOC_MODIFIED};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::filter::{by_id, Filter};
use crate::store::BackingCollection;
use std::ops::Deref;
use std::sync::Arc;

/// A lifecycle-tracked document collection.
///
/// `DocCollection` wraps one named collection of a backing store and enforces
/// the internal-field invariants around an otherwise pass-through CRUD
/// interface:
///
/// * `_id`, `_created` and `_modified` are stripped from every caller-supplied
///   write payload, so callers cannot forge them.
/// * `_created` and `_modified` are stamped at creation (with equal values).
/// * `_modified` is refreshed on every accepted partial update.
///
/// Reads, counts, and deletes are forwarded to the backing store unmodified.
/// The wrapper holds no mutable state beyond the reference to its backing
/// collection and can be cloned and shared across threads freely.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::doc;
/// use docstore::doc_store::DocStore;
/// use docstore::filter::field;
///
/// let db = DocStore::builder().open()?;
/// let users = db.collection("users")?;
///
/// let id = users.create_one(doc! { name: "alice" })?;
/// let alice = users.read_one(field("name").eq("alice"), &Default::default())?;
/// ```
#[derive(Clone)]
pub struct DocCollection {
    inner: Arc<DocCollectionInner>,
}

impl DocCollection {
    pub(crate) fn new(name: &str, backing: BackingCollection) -> Self {
        DocCollection {
            inner: Arc::new(DocCollectionInner {
                name: name.to_string(),
                backing,
            }),
        }
    }
}

impl Deref for DocCollection {
    type Target = Arc<DocCollectionInner>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct DocCollectionInner {
    name: String,
    backing: BackingCollection,
}

impl DocCollectionInner {
    /// Returns the name of this collection.
    pub fn name(&self) -> String {
        self.name.clone()
    }

    /// Adds `document` to the collection and returns the assigned id.
    ///
    /// Internal fields in the payload are discarded; `_created` and
    /// `_modified` are stamped to the current time with equal values.
    ///
    /// # Errors
    ///
    /// Fails with `DuplicateKey` when a uniqueness constraint in the backing
    /// store is violated.
    pub fn create_one(&self, document: Document) -> DocStoreResult<DocId> {
        let safe = self.stamped_for_create(&document)?;
        self.backing.insert_one(safe)
    }

    /// Adds `documents` to the collection.
    ///
    /// Stripping and stamping are applied to each element independently.
    /// Which indices succeeded is reported through the backing store's
    /// bulk-insert contract in the returned [InsertManyResult].
    pub fn create_many(
        &self,
        documents: Vec<Document>,
        options: &InsertManyOptions,
    ) -> DocStoreResult<InsertManyResult> {
        let mut safe_documents = Vec::with_capacity(documents.len());
        for document in &documents {
            safe_documents.push(self.stamped_for_create(document)?);
        }
        self.backing.insert_many(safe_documents, options)
    }

    /// Reads the first document that matches `filter`, or `None`.
    pub fn read_one(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> DocStoreResult<Option<Document>> {
        self.backing.find_one(&filter, options)
    }

    /// Reads all documents that match `filter` as an ordered sequence.
    pub fn read_many(
        &self,
        filter: Filter,
        options: &FindOptions,
    ) -> DocStoreResult<Vec<Document>> {
        self.backing.find(&filter, options)
    }

    /// Replaces the full body of the first document matching `filter`.
    ///
    /// Internal fields in the payload are discarded and the replacement goes
    /// down without timestamps: the replaced document keeps its `_id` and
    /// nothing else. Use [`update_one`](Self::update_one) to refresh
    /// `_modified`.
    pub fn replace_one(
        &self,
        filter: Filter,
        document: Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        let safe = document.without_reserved_fields();
        self.backing.replace_one(&filter, safe, options)
    }

    /// Updates the first document matching `filter` with the fields present
    /// in `update`, leaving unspecified fields untouched.
    ///
    /// Internal fields in the payload are discarded; `_modified` is stamped
    /// to the current time. `_created` is never altered.
    pub fn update_one(
        &self,
        filter: Filter,
        update: Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        let mut safe = update.without_reserved_fields();
        safe.put(DOC_MODIFIED, Value::U64(get_current_time_or_zero()))?;
        self.backing.update_one(&filter, &safe, options)
    }

    /// Deletes the first document that matches `filter`.
    pub fn delete_one(&self, filter: Filter) -> DocStoreResult<DeleteResult> {
        self.backing.delete_one(&filter)
    }

    /// Deletes all documents that match `filter`.
    pub fn delete_many(&self, filter: Filter) -> DocStoreResult<DeleteResult> {
        self.backing.delete_many(&filter)
    }

    /// Counts the documents that match `filter`.
    pub fn count(&self, filter: Filter, options: &FindOptions) -> DocStoreResult<u64> {
        self.backing.count(&filter, options)
    }

    /// Pops the first document that matches `filter`.
    ///
    /// Equivalent to a read followed by a delete of the read document's id,
    /// as two separate store calls: a concurrent caller can read the same
    /// document before either delete runs, and the loser's delete removes
    /// nothing.
    pub fn pop_one(&self, filter: Filter) -> DocStoreResult<Option<Document>> {
        match self.backing.find_one(&filter, &FindOptions::default())? {
            Some(document) => {
                let id = document.doc_id().ok_or_else(|| {
                    log::error!(
                        "Document from collection '{}' has no id; cannot pop",
                        self.name
                    );
                    DocStoreError::new(
                        "Document from backing store has no id",
                        ErrorKind::BackingStore,
                    )
                })?;
                self.backing.delete_one(&by_id(id))?;
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    /// Declares a uniqueness constraint on `field` in the backing collection.
    pub fn ensure_unique(&self, field: &str) -> DocStoreResult<()> {
        self.backing.ensure_unique(field)
    }

    /// Returns the total number of documents in the collection.
    pub fn size(&self) -> DocStoreResult<u64> {
        self.backing.size()
    }

    fn stamped_for_create(&self, document: &Document) -> DocStoreResult<Document> {
        let mut safe = document.without_reserved_fields();
        // creation and modification time start out equal
        let time = get_current_time_or_zero();
        safe.put(DOC_CREATED, Value::U64(time))?;
        safe.put(DOC_MODIFIED, Value::U64(time))?;
        Ok(safe)
    }
}
