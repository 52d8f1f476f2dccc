use std::cmp::Ordering;
use std::fmt::Display;

use crate::collection::{DocId, Document};
use crate::common::{Value, DOC_ID};
use crate::errors::DocStoreResult;

use super::{Filter, FilterProvider};

/// Creates a filter that matches all documents.
pub fn all() -> Filter {
    Filter::new(AllFilter)
}

/// Creates a filter that matches the document with the given id.
pub fn by_id(id: DocId) -> Filter {
    Filter::new(ByIdFilter { id })
}

/// A filter that matches every document in the collection.
///
/// Used as the default filter when no condition is needed.
pub(crate) struct AllFilter;

impl FilterProvider for AllFilter {
    fn apply(&self, _entry: &Document) -> DocStoreResult<bool> {
        Ok(true)
    }
}

impl Display for AllFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AllFilter")
    }
}

/// A filter that matches a document by its `_id` field.
pub(crate) struct ByIdFilter {
    id: DocId,
}

impl FilterProvider for ByIdFilter {
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        Ok(entry.get(DOC_ID) == Value::DocId(self.id))
    }
}

impl Display for ByIdFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(_id == {})", self.id)
    }
}

/// A filter that matches documents where a field equals a specific value.
pub(crate) struct EqualsFilter {
    field_name: String,
    field_value: Value,
}

impl EqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        EqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl FilterProvider for EqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        Ok(entry.get(&self.field_name) == self.field_value)
    }
}

impl Display for EqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} == {})", self.field_name, self.field_value)
    }
}

/// A filter that matches documents where a field does not equal a specific value.
///
/// Documents missing the field carry [Value::Null] for it, which differs from
/// every non-null target, so they match.
pub(crate) struct NotEqualsFilter {
    field_name: String,
    field_value: Value,
}

impl NotEqualsFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value) -> Self {
        NotEqualsFilter {
            field_name,
            field_value,
        }
    }
}

impl FilterProvider for NotEqualsFilter {
    #[inline]
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        Ok(entry.get(&self.field_name) != self.field_value)
    }
}

impl Display for NotEqualsFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} != {})", self.field_name, self.field_value)
    }
}

/// Relational comparison applied by [ComparisonFilter].
#[derive(Clone, Copy)]
pub(crate) enum ComparisonMode {
    Greater,
    GreaterEqual,
    Lesser,
    LesserEqual,
}

impl ComparisonMode {
    fn symbol(&self) -> &'static str {
        match self {
            ComparisonMode::Greater => ">",
            ComparisonMode::GreaterEqual => ">=",
            ComparisonMode::Lesser => "<",
            ComparisonMode::LesserEqual => "<=",
        }
    }
}

/// A filter that matches documents where a field compares against a value.
///
/// Only values of the same comparable family are ordered against each other:
/// numbers against numbers, strings against strings, ids against ids. A
/// missing field or a cross-family comparison never matches.
pub(crate) struct ComparisonFilter {
    field_name: String,
    field_value: Value,
    mode: ComparisonMode,
}

impl ComparisonFilter {
    #[inline]
    pub(crate) fn new(field_name: String, field_value: Value, mode: ComparisonMode) -> Self {
        ComparisonFilter {
            field_name,
            field_value,
            mode,
        }
    }

    fn compare(a: &Value, b: &Value) -> Option<Ordering> {
        let same_family = (a.is_number() && b.is_number())
            || (matches!(a, Value::String(_)) && matches!(b, Value::String(_)))
            || (a.is_doc_id() && b.is_doc_id());
        if same_family {
            Some(a.cmp(b))
        } else {
            None
        }
    }
}

impl FilterProvider for ComparisonFilter {
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        let value = entry.get(&self.field_name);
        let ordering = match Self::compare(&value, &self.field_value) {
            Some(ordering) => ordering,
            None => return Ok(false),
        };

        let matches = match self.mode {
            ComparisonMode::Greater => ordering == Ordering::Greater,
            ComparisonMode::GreaterEqual => ordering != Ordering::Less,
            ComparisonMode::Lesser => ordering == Ordering::Less,
            ComparisonMode::LesserEqual => ordering != Ordering::Greater,
        };
        Ok(matches)
    }
}

impl Display for ComparisonFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {} {})",
            self.field_name,
            self.mode.symbol(),
            self.field_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::filter::field;

    #[test]
    fn all_matches_everything() {
        assert!(all().apply(&doc! {}).unwrap());
        assert!(all().apply(&doc! { name: "Alice" }).unwrap());
    }

    #[test]
    fn by_id_matches_only_that_document() {
        let mut doc = doc! { name: "Alice" };
        let id = doc.id();
        assert!(by_id(id).apply(&doc).unwrap());
        assert!(!by_id(DocId::new()).apply(&doc).unwrap());
    }

    #[test]
    fn equals_matches_exact_value() {
        let doc = doc! { name: "Alice", age: 30 };
        assert!(field("name").eq("Alice").apply(&doc).unwrap());
        assert!(!field("name").eq("Bob").apply(&doc).unwrap());
        // integer widths do not matter
        assert!(field("age").eq(30u64).apply(&doc).unwrap());
    }

    #[test]
    fn equals_on_missing_field_matches_null() {
        let doc = doc! { name: "Alice" };
        assert!(field("missing").eq(Value::Null).apply(&doc).unwrap());
        assert!(!field("missing").eq("x").apply(&doc).unwrap());
    }

    #[test]
    fn not_equals() {
        let doc = doc! { name: "Alice" };
        assert!(field("name").ne("Bob").apply(&doc).unwrap());
        assert!(!field("name").ne("Alice").apply(&doc).unwrap());
        // missing field differs from any non-null value
        assert!(field("missing").ne("x").apply(&doc).unwrap());
    }

    #[test]
    fn comparisons_on_numbers() {
        let doc = doc! { age: 30 };
        assert!(field("age").gt(18).apply(&doc).unwrap());
        assert!(field("age").gte(30).apply(&doc).unwrap());
        assert!(field("age").lt(31).apply(&doc).unwrap());
        assert!(field("age").lte(30).apply(&doc).unwrap());
        assert!(!field("age").gt(30).apply(&doc).unwrap());
        assert!(!field("age").lt(30).apply(&doc).unwrap());
    }

    #[test]
    fn comparisons_on_strings() {
        let doc = doc! { name: "bob" };
        assert!(field("name").gt("alice").apply(&doc).unwrap());
        assert!(field("name").lt("carol").apply(&doc).unwrap());
    }

    #[test]
    fn comparisons_never_match_across_families() {
        let doc = doc! { name: "bob" };
        assert!(!field("name").gt(10).apply(&doc).unwrap());
        // missing field never matches a range
        assert!(!field("missing").lt(10).apply(&doc).unwrap());
    }
}
