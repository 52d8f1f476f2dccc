/// Options for controlling bulk insert operations.
///
/// Ordered inserts (the default) stop at the first failing document;
/// unordered inserts continue past failures and report them all in the
/// [`InsertManyResult`](crate::collection::InsertManyResult).
#[derive(Debug, Clone)]
pub struct InsertManyOptions {
    ordered: bool,
}

impl InsertManyOptions {
    pub fn new(ordered: bool) -> Self {
        Self { ordered }
    }

    /// Returns whether the batch stops at the first failure.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}

impl Default for InsertManyOptions {
    fn default() -> Self {
        Self { ordered: true }
    }
}

/// Creates `InsertManyOptions` that continue past failing documents.
pub fn unordered() -> InsertManyOptions {
    InsertManyOptions::new(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_ordered() {
        assert!(InsertManyOptions::default().is_ordered());
    }

    #[test]
    fn test_unordered() {
        assert!(!unordered().is_ordered());
    }
}
