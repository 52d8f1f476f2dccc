use crate::collection::doc_id::DocId;
use crate::common::{Value, DOC_CREATED, DOC_ID, DOC_MODIFIED, RESERVED_FIELDS};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use itertools::Itertools;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// Represents a document in a collection.
///
/// Documents are composed of key-value pairs. The key is always a [String]
/// and the value is a [Value]. Keys are stored in sorted order.
///
/// Below fields are reserved and owned exclusively by the store; they are
/// stripped from every caller-supplied write payload before it reaches the
/// backing store.
///
/// * `_id` - The unique identifier of the document, assigned by the backing
///   store during insertion.
/// * `_created` - The creation time of the document, set once.
/// * `_modified` - The last modification time of the document.
///
/// # Examples
///
/// ```ignore
/// let mut doc = Document::new();
/// doc.put("name", "Alice")?;
/// doc.put("age", 30)?;
/// assert_eq!(doc.get("name"), Value::from("Alice"));
///
/// // or with the macro
/// let doc = doc! { name: "Alice", age: 30 };
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, serde::Deserialize, serde::Serialize)]
pub struct Document {
    data: BTreeMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: BTreeMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this document.
    ///
    /// If the key already exists, its value is replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The key is empty
    /// * The key is `_id` and the value is not a [DocId]
    pub fn put<T: Into<Value>>(&mut self, key: impl Into<String>, value: T) -> DocStoreResult<()> {
        let key = key.into();
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DocStoreError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // validate the _id field
        if key == DOC_ID && !value.is_doc_id() {
            log::error!("Document id is a store assigned field and cannot be set manually");
            return Err(DocStoreError::new(
                "Document id is a store assigned field and cannot be set manually",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key, value);
        Ok(())
    }

    /// Returns the [Value] associated with the specified key, or [Value::Null]
    /// if this document contains no mapping for the key.
    pub fn get(&self, key: &str) -> Value {
        match self.data.get(key) {
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }

    /// Removes the mapping for the specified key, returning the previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Checks if the document contains the specified key.
    pub fn has_field(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the [DocId] of this document.
    ///
    /// If the document does not have an `_id` field yet, a fresh [DocId] is
    /// generated and set on the document.
    pub fn id(&mut self) -> DocId {
        if let Some(Value::DocId(id)) = self.data.get(DOC_ID) {
            *id
        } else {
            // if _id field is not populated already, create a new id
            // and set it in the document
            let doc_id = DocId::new();
            self.data.insert(DOC_ID.to_string(), Value::DocId(doc_id));
            doc_id
        }
    }

    /// Returns the [DocId] of this document without assigning one when absent.
    pub fn doc_id(&self) -> Option<DocId> {
        match self.data.get(DOC_ID) {
            Some(Value::DocId(id)) => Some(*id),
            _ => None,
        }
    }

    /// Checks if the document has an `_id` field.
    pub fn has_id(&self) -> bool {
        self.data.contains_key(DOC_ID)
    }

    /// Returns the creation time of the document in millis since epoch, if set.
    pub fn created_at(&self) -> Option<u64> {
        self.get(DOC_CREATED).as_u64()
    }

    /// Returns the last modification time of the document in millis since epoch, if set.
    pub fn modified_at(&self) -> Option<u64> {
        self.get(DOC_MODIFIED).as_u64()
    }

    /// Returns a copy of this document with all reserved fields removed.
    ///
    /// Caller-supplied `_id`, `_created` and `_modified` values are discarded
    /// silently; the store owns those fields.
    pub fn without_reserved_fields(&self) -> Document {
        let mut safe = self.clone();
        for field in RESERVED_FIELDS {
            safe.data.remove(field);
        }
        safe
    }

    /// Merges all fields of `other` into this document, replacing existing values.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.iter() {
            self.data.insert(key.clone(), value.clone());
        }
    }

    /// Iterates over the fields of the document in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.data.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.data
                .iter()
                .map(|(key, value)| format!("{}: {}", key, value))
                .join(", ")
        )
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Strips the surrounding quotes that `stringify!` leaves on string-literal
/// keys in the [`doc!`](crate::doc) macro.
pub fn normalize(key: &str) -> String {
    key.trim_matches('"').to_string()
}

/// Creates a [Document] from key-value pairs.
///
/// Keys can be bare identifiers or string literals; values can be literals,
/// parenthesized expressions, nested documents, or arrays.
///
/// # Examples
///
/// ```ignore
/// let doc = doc! {
///     name: "Alice",
///     age: 30,
///     address: {
///         city: "New York",
///         zip: 10001
///     },
///     tags: ["admin", "user"]
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::collection::Document::new()
    };

    // match a document with key value pairs
    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put($crate::collection::normalize(stringify!($key)), $crate::doc_value!($value))
                    .expect(&format!("Failed to put value {} in document", stringify!($value)));
            )*
            doc
        }
    };
}

/// Helper macro to convert values for the [`doc!`](crate::doc) macro.
/// Handles nested documents, arrays, and expressions.
#[macro_export]
macro_rules! doc_value {
    // match a nested document
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    // match an array of values
    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    // match an expression (variable, literal, arithmetic in parens, etc.)
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
