use crate::collection::{
    DeleteResult, DocCollection, DocId, Document, FindOptions, InsertManyOptions, InsertManyResult,
    UpdateOptions, UpdateResult,
};
use crate::errors::DocStoreResult;
use crate::filter::Filter;
use crate::repository::Entity;
use std::marker::PhantomData;

/// A type-safe view over a [DocCollection].
///
/// `ObjectRepository` converts entities to documents on the way in and back
/// on the way out; every operation delegates to the underlying collection,
/// which owns all lifecycle stamping and internal-field stripping.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::doc_store::DocStore;
/// use docstore::filter::field;
///
/// let db = DocStore::builder().open()?;
/// let users = db.repository::<User>()?;
///
/// users.insert(&User { username: "alice".into() })?;
/// let alice = users.find_one(field("username").eq("alice"), &Default::default())?;
/// ```
pub struct ObjectRepository<T: Entity> {
    collection: DocCollection,
    _marker: PhantomData<T>,
}

impl<T: Entity> ObjectRepository<T> {
    pub(crate) fn new(collection: DocCollection) -> Self {
        ObjectRepository {
            collection,
            _marker: PhantomData,
        }
    }

    /// Inserts an entity and returns its assigned id.
    pub fn insert(&self, entity: &T) -> DocStoreResult<DocId> {
        self.collection.create_one(entity.to_document()?)
    }

    /// Inserts multiple entities with partial-success reporting.
    pub fn insert_many(
        &self,
        entities: &[T],
        options: &InsertManyOptions,
    ) -> DocStoreResult<InsertManyResult> {
        let mut documents = Vec::with_capacity(entities.len());
        for entity in entities {
            documents.push(entity.to_document()?);
        }
        self.collection.create_many(documents, options)
    }

    /// Finds the first entity matching the filter.
    pub fn find_one(&self, filter: Filter, options: &FindOptions) -> DocStoreResult<Option<T>> {
        match self.collection.read_one(filter, options)? {
            Some(document) => Ok(Some(T::from_document(&document)?)),
            None => Ok(None),
        }
    }

    /// Finds all entities matching the filter.
    pub fn find(&self, filter: Filter, options: &FindOptions) -> DocStoreResult<Vec<T>> {
        let documents = self.collection.read_many(filter, options)?;
        documents.iter().map(T::from_document).collect()
    }

    /// Replaces the first matching stored document with the given entity.
    pub fn replace_one(
        &self,
        filter: Filter,
        entity: &T,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        self.collection
            .replace_one(filter, entity.to_document()?, options)
    }

    /// Applies the fields of `update` to the first matching stored document.
    pub fn update_one(
        &self,
        filter: Filter,
        update: Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        self.collection.update_one(filter, update, options)
    }

    /// Deletes the first entity matching the filter.
    pub fn delete_one(&self, filter: Filter) -> DocStoreResult<DeleteResult> {
        self.collection.delete_one(filter)
    }

    /// Deletes all entities matching the filter.
    pub fn delete_many(&self, filter: Filter) -> DocStoreResult<DeleteResult> {
        self.collection.delete_many(filter)
    }

    /// Counts the entities matching the filter.
    pub fn count(&self, filter: Filter, options: &FindOptions) -> DocStoreResult<u64> {
        self.collection.count(filter, options)
    }

    /// Reads and deletes the first entity matching the filter.
    pub fn pop_one(&self, filter: Filter) -> DocStoreResult<Option<T>> {
        match self.collection.pop_one(filter)? {
            Some(document) => Ok(Some(T::from_document(&document)?)),
            None => Ok(None),
        }
    }

    /// Declares a uniqueness constraint on a field of this entity's collection.
    pub fn ensure_unique(&self, field: &str) -> DocStoreResult<()> {
        self.collection.ensure_unique(field)
    }

    /// Returns the underlying document collection.
    pub fn document_collection(&self) -> &DocCollection {
        &self.collection
    }
}

impl<T: Entity> Clone for ObjectRepository<T> {
    fn clone(&self) -> Self {
        ObjectRepository {
            collection: self.collection.clone(),
            _marker: PhantomData,
        }
    }
}
