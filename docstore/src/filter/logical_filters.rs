use itertools::Itertools;
use std::fmt::Display;

use crate::collection::Document;
use crate::errors::DocStoreResult;

use super::{Filter, FilterProvider};

/// Creates a filter matching documents that satisfy all of the given filters.
pub fn and(filters: Vec<Filter>) -> Filter {
    Filter::new(AndFilter::new(filters))
}

/// Creates a filter matching documents that satisfy any of the given filters.
pub fn or(filters: Vec<Filter>) -> Filter {
    Filter::new(OrFilter::new(filters))
}

/// Creates a filter matching documents that do not satisfy the given filter.
pub fn not(filter: Filter) -> Filter {
    Filter::new(NotFilter::new(filter))
}

/// Matches documents that satisfy every child filter; short-circuits on the
/// first non-match.
pub(crate) struct AndFilter {
    filters: Vec<Filter>,
}

impl AndFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        AndFilter { filters }
    }
}

impl FilterProvider for AndFilter {
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        for filter in &self.filters {
            if !filter.apply(entry)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Display for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})",
            self.filters.iter().map(|it| it.to_string()).join(" && ")
        )
    }
}

/// Matches documents that satisfy at least one child filter; short-circuits
/// on the first match.
pub(crate) struct OrFilter {
    filters: Vec<Filter>,
}

impl OrFilter {
    pub(crate) fn new(filters: Vec<Filter>) -> Self {
        OrFilter { filters }
    }
}

impl FilterProvider for OrFilter {
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        for filter in &self.filters {
            if filter.apply(entry)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl Display for OrFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({})",
            self.filters.iter().map(|it| it.to_string()).join(" || ")
        )
    }
}

/// Matches documents that do not satisfy the wrapped filter.
pub(crate) struct NotFilter {
    filter: Filter,
}

impl NotFilter {
    pub(crate) fn new(filter: Filter) -> Self {
        NotFilter { filter }
    }
}

impl FilterProvider for NotFilter {
    fn apply(&self, entry: &Document) -> DocStoreResult<bool> {
        Ok(!self.filter.apply(entry)?)
    }
}

impl Display for NotFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "!({})", self.filter)
    }
}
