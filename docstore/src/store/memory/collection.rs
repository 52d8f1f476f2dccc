use crate::collection::{
    DeleteResult, DocId, Document, FindOptions, InsertManyOptions, InsertManyResult, UpdateOptions,
    UpdateResult, WriteError,
};
use crate::common::{atomic, Atomic, SortOrder, DOC_ID};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::filter::Filter;
use crate::store::BackingCollectionProvider;
use crossbeam_skiplist::SkipMap;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-memory collection implementation backed by a concurrent skip list.
///
/// Documents are keyed by [DocId], so plain iteration yields ascending id
/// order — which, with snowflake ids, is insertion/time order. Uniqueness
/// constraints declared with `ensure_unique` are enforced with a full scan on
/// every write.
///
/// # Characteristics
/// - **Thread-Safe**: can be cloned and shared across threads; writes are
///   serialized by a collection-wide lock
/// - **Ordered**: O(log n) keyed operations, in-order iteration
/// - **Volatile**: all data is lost when the store goes away
#[derive(Clone)]
pub struct MemoryCollection {
    inner: Arc<MemoryCollectionInner>,
}

impl MemoryCollection {
    pub(crate) fn new(name: &str) -> Self {
        MemoryCollection {
            inner: Arc::new(MemoryCollectionInner::new(name)),
        }
    }
}

impl BackingCollectionProvider for MemoryCollection {
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    fn insert_one(&self, document: Document) -> DocStoreResult<DocId> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;
        self.inner.insert_unlocked(document)
    }

    fn insert_many(
        &self,
        documents: Vec<Document>,
        options: &InsertManyOptions,
    ) -> DocStoreResult<InsertManyResult> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        let mut inserted = BTreeMap::new();
        let mut write_errors = Vec::new();
        for (index, document) in documents.into_iter().enumerate() {
            match self.inner.insert_unlocked(document) {
                Ok(id) => {
                    inserted.insert(index, id);
                }
                Err(e) => {
                    write_errors.push(WriteError::new(index, e.kind().clone(), e.message()));
                    if options.is_ordered() {
                        break;
                    }
                }
            }
        }
        Ok(InsertManyResult::new(inserted, write_errors))
    }

    fn find_one(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<Option<Document>> {
        let _guard = self.inner.write_lock.read();
        self.inner.check_opened()?;
        let options = options.clone().limit(1);
        Ok(self.inner.find_unlocked(filter, &options)?.into_iter().next())
    }

    fn find(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<Vec<Document>> {
        let _guard = self.inner.write_lock.read();
        self.inner.check_opened()?;
        self.inner.find_unlocked(filter, options)
    }

    fn replace_one(
        &self,
        filter: &Filter,
        document: Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        match self.inner.first_match_unlocked(filter)? {
            Some((id, old)) => {
                // the matched document's id survives; everything else is replaced
                let mut new_doc = document;
                new_doc.put(DOC_ID, id)?;
                self.inner.check_unique(&new_doc, Some(id))?;
                let modified = new_doc != old;
                self.inner.backing_map.insert(id, new_doc);
                Ok(UpdateResult::new(1, modified as u64))
            }
            None if options.is_insert_if_absent() => {
                let id = self.inner.insert_unlocked(document)?;
                Ok(UpdateResult::upserted(id))
            }
            None => Ok(UpdateResult::new(0, 0)),
        }
    }

    fn update_one(
        &self,
        filter: &Filter,
        set_fields: &Document,
        options: &UpdateOptions,
    ) -> DocStoreResult<UpdateResult> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        match self.inner.first_match_unlocked(filter)? {
            Some((id, old)) => {
                let mut updated = old.clone();
                updated.merge(set_fields);
                if updated == old {
                    return Ok(UpdateResult::new(1, 0));
                }
                self.inner.check_unique(&updated, Some(id))?;
                self.inner.backing_map.insert(id, updated);
                Ok(UpdateResult::new(1, 1))
            }
            None if options.is_insert_if_absent() => {
                let id = self.inner.insert_unlocked(set_fields.clone())?;
                Ok(UpdateResult::upserted(id))
            }
            None => Ok(UpdateResult::new(0, 0)),
        }
    }

    fn delete_one(&self, filter: &Filter) -> DocStoreResult<DeleteResult> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        match self.inner.first_match_unlocked(filter)? {
            Some((id, _)) => {
                self.inner.backing_map.remove(&id);
                Ok(DeleteResult::new(1))
            }
            None => Ok(DeleteResult::new(0)),
        }
    }

    fn delete_many(&self, filter: &Filter) -> DocStoreResult<DeleteResult> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        let mut matched = Vec::new();
        for entry in self.inner.backing_map.iter() {
            if filter.apply(entry.value())? {
                matched.push(*entry.key());
            }
        }

        let mut deleted = 0;
        for id in matched {
            if self.inner.backing_map.remove(&id).is_some() {
                deleted += 1;
            }
        }
        Ok(DeleteResult::new(deleted))
    }

    fn count(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<u64> {
        let _guard = self.inner.write_lock.read();
        self.inner.check_opened()?;
        Ok(self.inner.find_unlocked(filter, options)?.len() as u64)
    }

    fn ensure_unique(&self, field: &str) -> DocStoreResult<()> {
        let _guard = self.inner.write_lock.write();
        self.inner.check_opened()?;

        // existing documents must already satisfy the constraint
        let mut seen = BTreeSet::new();
        for entry in self.inner.backing_map.iter() {
            let value = entry.value().get(field);
            if value.is_null() {
                continue;
            }
            if !seen.insert(value) {
                log::error!(
                    "Cannot declare unique constraint on '{}': duplicate values exist in '{}'",
                    field,
                    self.inner.name
                );
                return Err(DocStoreError::new(
                    &format!(
                        "Cannot declare unique constraint on '{}': duplicate values exist",
                        field
                    ),
                    ErrorKind::DuplicateKey,
                ));
            }
        }

        self.inner.unique_fields.write().insert(field.to_string());
        Ok(())
    }

    fn size(&self) -> DocStoreResult<u64> {
        self.inner.check_opened()?;
        Ok(self.inner.backing_map.len() as u64)
    }

    fn close(&self) -> DocStoreResult<()> {
        self.inner.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}

struct MemoryCollectionInner {
    name: String,
    backing_map: SkipMap<DocId, Document>,
    unique_fields: Atomic<HashSet<String>>,
    write_lock: RwLock<()>,
    closed: AtomicBool,
}

impl MemoryCollectionInner {
    fn new(name: &str) -> Self {
        MemoryCollectionInner {
            name: name.to_string(),
            backing_map: SkipMap::new(),
            unique_fields: atomic(HashSet::new()),
            write_lock: RwLock::new(()),
            closed: AtomicBool::new(false),
        }
    }

    fn check_opened(&self) -> DocStoreResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("Collection {} is closed", self.name);
            return Err(DocStoreError::new(
                &format!("Collection {} is closed", self.name),
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    // callers hold the write lock
    fn insert_unlocked(&self, mut document: Document) -> DocStoreResult<DocId> {
        let id = document.id();
        if self.backing_map.contains_key(&id) {
            log::error!("Document already exists with id {}", id);
            return Err(DocStoreError::new(
                &format!("Document already exists with id {}", id),
                ErrorKind::DuplicateKey,
            ));
        }
        self.check_unique(&document, Some(id))?;
        self.backing_map.insert(id, document);
        Ok(id)
    }

    fn first_match_unlocked(&self, filter: &Filter) -> DocStoreResult<Option<(DocId, Document)>> {
        for entry in self.backing_map.iter() {
            if filter.apply(entry.value())? {
                return Ok(Some((*entry.key(), entry.value().clone())));
            }
        }
        Ok(None)
    }

    fn find_unlocked(&self, filter: &Filter, options: &FindOptions) -> DocStoreResult<Vec<Document>> {
        let mut matched = Vec::new();
        for entry in self.backing_map.iter() {
            if filter.apply(entry.value())? {
                matched.push(entry.value().clone());
            }
        }

        if let Some((field, order)) = &options.sort_by {
            matched.sort_by(|a, b| {
                let ordering = a.get(field).cmp(&b.get(field));
                match order {
                    SortOrder::Ascending => ordering,
                    SortOrder::Descending => ordering.reverse(),
                }
            });
        }

        let skip = options.skip.unwrap_or(0) as usize;
        let mut result: Vec<Document> = matched.into_iter().skip(skip).collect();
        if let Some(limit) = options.limit {
            result.truncate(limit as usize);
        }
        Ok(result)
    }

    // unique checks are a full scan over the collection
    fn check_unique(&self, document: &Document, exclude: Option<DocId>) -> DocStoreResult<()> {
        let unique_fields = self.unique_fields.read();
        for field in unique_fields.iter() {
            let value = document.get(field);
            if value.is_null() {
                continue;
            }
            for entry in self.backing_map.iter() {
                if exclude == Some(*entry.key()) {
                    continue;
                }
                if entry.value().get(field) == value {
                    log::error!(
                        "Unique constraint violated on field '{}' in collection '{}'",
                        field,
                        self.name
                    );
                    return Err(DocStoreError::new(
                        &format!("Unique constraint violated on field '{}'", field),
                        ErrorKind::DuplicateKey,
                    ));
                }
            }
        }
        Ok(())
    }
}
