use crate::common::{atomic, Atomic};
use crate::errors::{DocStoreError, DocStoreResult, ErrorKind};
use std::collections::HashSet;

/// Registry of collection names owned by a single database instance.
///
/// Every [`DocCollection`](crate::collection::DocCollection) is constructed
/// through this registry, which guarantees that at most one wrapper exists
/// per collection name. The registry is explicit state owned by the database
/// facade — not hidden process-wide static state — so construction stays
/// deterministic and testable in isolation.
#[derive(Clone)]
pub struct CollectionRegistry {
    names: Atomic<HashSet<String>>,
}

impl CollectionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        CollectionRegistry {
            names: atomic(HashSet::new()),
        }
    }

    /// Registers a collection name.
    ///
    /// Fails with a `Configuration` error when the name is already
    /// registered; a second wrapper bound to the same collection would let
    /// two call sites disagree about lifecycle stamping.
    pub fn register(&self, name: &str) -> DocStoreResult<()> {
        let mut names = self.names.write();
        if names.contains(name) {
            log::error!("Collection '{}' already exists", name);
            return Err(DocStoreError::new(
                &format!("Collection '{}' already exists", name),
                ErrorKind::Configuration,
            ));
        }
        names.insert(name.to_string());
        Ok(())
    }

    /// Removes a name from the registry.
    ///
    /// Returns `true` if the name was registered.
    pub fn deregister(&self, name: &str) -> bool {
        self.names.write().remove(name)
    }

    /// Checks if a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.read().contains(name)
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_contains() {
        let registry = CollectionRegistry::new();
        assert!(registry.is_empty());
        registry.register("users").unwrap();
        assert!(registry.contains("users"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_duplicate_fails() {
        let registry = CollectionRegistry::new();
        registry.register("users").unwrap();
        let result = registry.register("users");
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::Configuration);
    }

    #[test]
    fn deregister_frees_the_name() {
        let registry = CollectionRegistry::new();
        registry.register("users").unwrap();
        assert!(registry.deregister("users"));
        assert!(!registry.contains("users"));
        // the name can be registered again
        assert!(registry.register("users").is_ok());
    }

    #[test]
    fn deregister_unknown_name_returns_false() {
        let registry = CollectionRegistry::new();
        assert!(!registry.deregister("missing"));
    }

    #[test]
    fn registries_are_independent() {
        let first = CollectionRegistry::new();
        let second = CollectionRegistry::new();
        first.register("users").unwrap();
        // no hidden static state: a fresh registry accepts the same name
        assert!(second.register("users").is_ok());
    }
}
