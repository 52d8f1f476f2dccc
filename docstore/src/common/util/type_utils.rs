use parking_lot::RwLock;
use std::sync::Arc;

/// Shared mutable state guarded by a poison-free read-write lock.
pub type Atomic<T> = Arc<RwLock<T>>;

/// Wraps a value in an [`Atomic`].
pub fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_read_write() {
        let value = atomic(41);
        assert_eq!(*value.read(), 41);
        *value.write() += 1;
        assert_eq!(*value.read(), 42);
    }

    #[test]
    fn atomic_is_shared() {
        let value = atomic(String::from("a"));
        let clone = value.clone();
        clone.write().push('b');
        assert_eq!(*value.read(), "ab");
    }
}
