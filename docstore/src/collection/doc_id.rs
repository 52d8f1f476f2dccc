use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use crate::ID_GENERATOR;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};

static ID_TOO_LARGE_ERROR: Lazy<DocStoreError> = Lazy::new(|| {
    DocStoreError::new(
        &format!(
            "DocId validation error: id value must be less than 10^19 ({})",
            10u64.pow(19)
        ),
        ErrorKind::InvalidId,
    )
});

static ID_TOO_SMALL_ERROR: Lazy<DocStoreError> = Lazy::new(|| {
    DocStoreError::new(
        &format!(
            "DocId validation error: id value must be greater than or equal to 10^18 ({})",
            10u64.pow(18)
        ),
        ErrorKind::InvalidId,
    )
});

static MAX_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(19));
static MIN_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(18));

/// A unique identifier for documents in a collection.
///
/// Each document is uniquely identified by a `DocId` stored in its `_id`
/// field. The id is assigned by the backing store during insertion if the
/// document does not already carry one; callers never choose ids for new
/// documents — the lifecycle wrapper strips caller-supplied `_id` fields
/// before they reach the store.
///
/// # ID Generation
///
/// Ids come from a Snowflake-style generator producing 64-bit values in the
/// range [10^18, 10^19), which gives uniqueness without central coordination
/// and approximate timestamp ordering, so iteration in id order follows
/// insertion order.
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy, serde::Deserialize, serde::Serialize)]
pub struct DocId {
    id_value: u64,
}

impl DocId {
    /// Generates a new unique `DocId` from the process-wide generator.
    pub fn new() -> Self {
        let id_value = ID_GENERATOR.get_id();
        DocId { id_value }
    }

    /// Creates a `DocId` from a specific value.
    ///
    /// The value must be within the valid range [10^18, 10^19). Useful when
    /// an id has been transported out-of-band (e.g. through a web request)
    /// and needs to be turned back into a `DocId`.
    pub fn create_id(id_value: u64) -> DocStoreResult<DocId> {
        DocId::valid_id(id_value)?;
        Ok(DocId { id_value })
    }

    /// Gets the numeric value of this id.
    pub fn id_value(&self) -> u64 {
        self.id_value
    }

    pub(crate) fn valid_id(id_value: u64) -> DocStoreResult<bool> {
        if id_value >= *MAX_VALUE {
            log::error!("Id value is too large");
            return Err(ID_TOO_LARGE_ERROR.clone());
        } else if id_value < *MIN_VALUE {
            log::error!("Id value is too small");
            return Err(ID_TOO_SMALL_ERROR.clone());
        }

        Ok(true)
    }
}

impl Default for DocId {
    fn default() -> Self {
        DocId::new()
    }
}

impl Debug for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.id_value)
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.id_value)
    }
}
