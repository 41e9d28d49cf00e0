//! Concurrent in-memory cache

use dashmap::DashMap;
use std::hash::Hash;

/// Unbounded key/value cache safe to share between tasks.
#[derive(Debug)]
pub struct SimpleCache<K: Eq + Hash, V> {
    entries: DashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> SimpleCache<K, V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&self, key: K, make: F) -> V {
        self.entries.entry(key).or_insert_with(make).value().clone()
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl<K: Eq + Hash, V: Clone> Default for SimpleCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_insert_with_computes_once() {
        let cache: SimpleCache<String, usize> = SimpleCache::new();
        let mut calls = 0;
        let first = cache.get_or_insert_with("a".into(), || {
            calls += 1;
            1
        });
        let second = cache.get_or_insert_with("a".into(), || {
            calls += 1;
            2
        });
        assert_eq!((first, second, calls), (1, 1, 1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = SimpleCache::new();
        cache.insert(1, "one");
        cache.insert(2, "two");
        assert_eq!(cache.remove(&1), Some("one"));
        assert_eq!(cache.get(&1), None);
        cache.clear();
        assert!(cache.is_empty());
    }
}
