//! Packed array representation for small maps.

use std::sync::Arc;

/// Maximum number of entries before promotion to the trie.
pub(crate) const MAX_ENTRIES: usize = 9;

/// A map of up to [`MAX_ENTRIES`] entries stored as a packed pair array.
///
/// Lookups are linear scans with key equality; writes copy the array. The
/// array is `Arc`-shared so cloning the map stays O(1).
pub(crate) struct ArrayMap<K, V> {
    entries: Arc<Vec<(K, V)>>,
}

impl<K, V> ArrayMap<K, V> {
    /// Creates an empty array map.
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
        }
    }

    /// Returns the number of entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the packed entries in insertion order.
    pub(crate) fn entries(&self) -> &[(K, V)] {
        &self.entries
    }
}

impl<K: Eq, V> ArrayMap<K, V> {
    /// Returns the stored pair for `key`, if any.
    pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.entries
            .iter()
            .find(|(k, _)| *k == *key)
            .map(|(k, v)| (k, v))
    }
}

impl<K: Eq + Clone, V: PartialEq + Clone> ArrayMap<K, V> {
    /// Inserts a binding, returning the updated copy.
    ///
    /// Returns `None` when the map is full and the key absent — the caller
    /// rebuilds the entries into a trie instead.
    pub(crate) fn insert(&self, key: K, value: V) -> Option<Self> {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            if self.entries[pos].1 == value {
                return Some(self.clone());
            }
            let mut entries = (*self.entries).clone();
            entries[pos].1 = value;
            return Some(Self {
                entries: Arc::new(entries),
            });
        }
        if self.entries.len() < MAX_ENTRIES {
            let mut entries = (*self.entries).clone();
            entries.push((key, value));
            return Some(Self {
                entries: Arc::new(entries),
            });
        }
        None
    }
}

impl<K: Eq + Clone, V: Clone> ArrayMap<K, V> {
    /// Removes a key, preserving the relative order of the remaining
    /// entries. An absent key yields a clone of `self`.
    pub(crate) fn remove(&self, key: &K) -> Self {
        match self.entries.iter().position(|(k, _)| *k == *key) {
            None => self.clone(),
            Some(pos) => {
                let mut entries = (*self.entries).clone();
                entries.remove(pos);
                Self {
                    entries: Arc::new(entries),
                }
            }
        }
    }
}

// Manual impl: sharing the array never requires cloning keys or values.
impl<K, V> Clone for ArrayMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}
