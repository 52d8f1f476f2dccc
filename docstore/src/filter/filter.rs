use crate::collection::Document;
use crate::errors::DocStoreResult;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

use super::{AndFilter, NotFilter, OrFilter};

/// Trait for implementing filters.
///
/// A `FilterProvider` decides whether a document matches a filter condition.
/// The backing store evaluates filters by applying them to candidate
/// documents — there is no index acceleration at this layer.
pub trait FilterProvider: Send + Sync + Display {
    /// Applies the filter to a document and returns whether it matches.
    fn apply(&self, entry: &Document) -> DocStoreResult<bool>;
}

/// A query filter for selecting documents from a collection.
///
/// Filters are created with the fluent API and combined with logical
/// operators:
///
/// ```rust,ignore
/// use docstore::filter::{all, by_id, field};
///
/// let adults = field("age").gte(18);
/// let active_adults = adults.and(field("status").eq("active"));
/// let everything = all();
/// let this_one = by_id(id);
/// ```
#[derive(Clone)]
pub struct Filter {
    inner: Arc<dyn FilterProvider>,
}

impl Filter {
    /// Creates a new `Filter` from a provider implementation.
    pub fn new<T: FilterProvider + 'static>(inner: T) -> Self {
        Filter {
            inner: Arc::new(inner),
        }
    }

    /// Applies the filter to a document.
    pub fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        self.inner.apply(entry)
    }

    /// Combines this filter with another using logical AND.
    pub fn and(self, other: Filter) -> Filter {
        Filter::new(AndFilter::new(vec![self, other]))
    }

    /// Combines this filter with another using logical OR.
    pub fn or(self, other: Filter) -> Filter {
        Filter::new(OrFilter::new(vec![self, other]))
    }

    /// Negates this filter.
    pub fn not(self) -> Filter {
        Filter::new(NotFilter::new(self))
    }
}

impl Deref for Filter {
    type Target = Arc<dyn FilterProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

#[cfg(test)]
mod tests {
    use crate::doc;
    use crate::filter::field;

    #[test]
    fn combinators_compose() {
        let doc = doc! { name: "Alice", age: 30 };

        let filter = field("name").eq("Alice").and(field("age").gt(18));
        assert!(filter.apply(&doc).unwrap());

        let filter = field("name").eq("Bob").or(field("age").eq(30));
        assert!(filter.apply(&doc).unwrap());

        let filter = field("name").eq("Alice").not();
        assert!(!filter.apply(&doc).unwrap());
    }

    #[test]
    fn filters_display_their_shape() {
        let filter = field("age").gt(18).and(field("name").eq("Alice"));
        let text = format!("{}", filter);
        assert!(text.contains("age"));
        assert!(text.contains("name"));
    }
}
