//! Key-Value store wrapper with automatic serialization.

use crate::{CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`.
#[derive(Debug)]
pub struct Cache<S> {
    store: S,
}

impl<S: KeyValueStore> Cache<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes do not decode as `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let lines: Option<Vec<StoredLine>> = cache.get("luxe-nails:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache, replacing whatever was stored.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("luxe-nails:cart", &lines)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = luxe_cache::cache_key!("luxe-nails", "cart");
/// assert_eq!(key, "luxe-nails:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: String,
        quantity: u32,
    }

    #[test]
    fn test_typed_get_set() {
        let cache = Cache::new(MemoryStore::new());
        let entries = vec![Entry {
            id: "a".into(),
            quantity: 3,
        }];

        cache.set("entries", &entries).unwrap();
        let loaded: Option<Vec<Entry>> = cache.get("entries").unwrap();
        assert_eq!(loaded, Some(entries));
    }

    #[test]
    fn test_missing_key_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let loaded: Option<Vec<Entry>> = cache.get("missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_malformed_value_is_error() {
        let store = MemoryStore::new();
        store.set("entries", b"{not json").unwrap();
        let cache = Cache::new(store);

        let result: Result<Option<Vec<Entry>>, _> = cache.get("entries");
        assert!(matches!(result, Err(CacheError::SerializeError(_))));
    }

    #[test]
    fn test_cache_key_macro() {
        assert_eq!(cache_key!("luxe-nails", "cart"), "luxe-nails:cart");
        assert_eq!(cache_key!("shop", "cart", 42), "shop:cart:42");
    }
}
