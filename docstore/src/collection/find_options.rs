use crate::common::SortOrder;

/// Options for controlling find and count operations.
///
/// `FindOptions` allows you to specify sorting and pagination for query
/// results. It supports method chaining for convenient configuration.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::collection::FindOptions;
/// use docstore::common::SortOrder;
///
/// let options = FindOptions::new()
///     .sort_by("age", SortOrder::Descending)
///     .skip(10)
///     .limit(20);
///
/// // or the convenience functions
/// let options = order_by("name", SortOrder::Ascending);
/// let options = skip_by(5);
/// let options = limit_to(100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub(crate) sort_by: Option<(String, SortOrder)>,
    pub(crate) skip: Option<u64>,
    pub(crate) limit: Option<u64>,
}

impl FindOptions {
    /// Creates a new `FindOptions` with default settings.
    pub fn new() -> Self {
        FindOptions::default()
    }

    /// Sorts results by a field.
    pub fn sort_by(mut self, field_name: &str, sort_order: SortOrder) -> Self {
        self.sort_by = Some((field_name.to_string(), sort_order));
        self
    }

    /// Skips the first `skip` results.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Limits the number of results to `limit`.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Creates `FindOptions` with sorting by a field.
pub fn order_by(field_name: &str, sort_order: SortOrder) -> FindOptions {
    FindOptions::new().sort_by(field_name, sort_order)
}

/// Creates `FindOptions` that skips a number of results.
///
/// Useful for pagination: skip the first N results and process the remaining.
pub fn skip_by(skip: u64) -> FindOptions {
    FindOptions::new().skip(skip)
}

/// Creates `FindOptions` that limits the number of results.
///
/// Combined with skip for pagination: skip(10).limit(20) returns results 11-30.
pub fn limit_to(limit: u64) -> FindOptions {
    FindOptions::new().limit(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_options_default() {
        let options = FindOptions::default();
        assert!(options.sort_by.is_none());
        assert!(options.skip.is_none());
        assert!(options.limit.is_none());
    }

    #[test]
    fn test_find_options_chaining() {
        let options = FindOptions::new()
            .sort_by("age", SortOrder::Descending)
            .skip(10)
            .limit(20);
        assert_eq!(
            options.sort_by,
            Some(("age".to_string(), SortOrder::Descending))
        );
        assert_eq!(options.skip, Some(10));
        assert_eq!(options.limit, Some(20));
    }

    #[test]
    fn test_convenience_functions() {
        let options = order_by("name", SortOrder::Ascending);
        assert_eq!(
            options.sort_by,
            Some(("name".to_string(), SortOrder::Ascending))
        );

        let options = skip_by(5);
        assert_eq!(options.skip, Some(5));

        let options = limit_to(100);
        assert_eq!(options.limit, Some(100));
    }
}
