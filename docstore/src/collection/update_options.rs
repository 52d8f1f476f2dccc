/// Options for controlling replace and partial-update operations.
///
/// # Examples
///
/// ```rust,ignore
/// use docstore::collection::UpdateOptions;
///
/// // Insert the payload as a new document if nothing matches
/// let options = docstore::collection::insert_if_absent();
///
/// // Custom options
/// let options = UpdateOptions::new(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    insert_if_absent: bool,
}

impl UpdateOptions {
    /// Creates a new `UpdateOptions` with specified behavior.
    ///
    /// # Arguments
    ///
    /// * `insert_if_absent` - If true, insert the payload as a new document
    ///   when no document matches the filter
    pub fn new(insert_if_absent: bool) -> Self {
        Self { insert_if_absent }
    }

    /// Returns whether to insert if no matching document is found.
    pub fn is_insert_if_absent(&self) -> bool {
        self.insert_if_absent
    }
}

/// Creates `UpdateOptions` with insert-if-absent behavior.
///
/// If no document matches the filter, the payload is inserted as a new document.
pub fn insert_if_absent() -> UpdateOptions {
    UpdateOptions::new(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_options_new() {
        let options = UpdateOptions::new(true);
        assert!(options.is_insert_if_absent());

        let options = UpdateOptions::new(false);
        assert!(!options.is_insert_if_absent());
    }

    #[test]
    fn test_update_options_default() {
        let options = UpdateOptions::default();
        assert!(!options.is_insert_if_absent());
    }

    #[test]
    fn test_insert_if_absent() {
        let options = insert_if_absent();
        assert!(options.is_insert_if_absent());
    }
}
