//! Public persistent map facade.

use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::hamt::Hamt;
use crate::iter::{Iter, Keys, Values};
use crate::small::{ArrayMap, MAX_ENTRIES};

/// Pair counts up to this build the packed-array representation when
/// constructing from a fixed set of pairs.
const SMALL_FROM: usize = MAX_ENTRIES - 1;

/// Persistent hash map.
///
/// Every write returns a new map sharing structure with `self`; the old
/// value stays valid and unchanged. Cloning is O(1). Small maps live in a
/// packed entry array and promote to a hash array-mapped trie when an
/// insert would create a tenth entry.
pub struct HashTrieMap<K, V> {
    repr: Repr<K, V>,
}

enum Repr<K, V> {
    Small(ArrayMap<K, V>),
    Trie(Hamt<K, V>),
}

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> HashTrieMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repr: Repr::Small(ArrayMap::new()),
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Small(small) => small.len(),
            Repr::Trie(trie) => trie.len(),
        }
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        match &self.repr {
            Repr::Small(small) => Iter::small(small.entries()),
            Repr::Trie(trie) => Iter::trie(trie.root(), trie.len()),
        }
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

// ---------------------------------------------------------------------------
// Read operations — K: Hash + Eq
// ---------------------------------------------------------------------------

impl<K: Hash + Eq, V> HashTrieMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key-value pair for `key`.
    #[must_use]
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        match &self.repr {
            Repr::Small(small) => small.get_key_value(key),
            Repr::Trie(trie) => trie.entry(key).map(|entry| (&entry.key, &entry.value)),
        }
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get_key_value(key).is_some()
    }
}

impl<K, V: PartialEq> HashTrieMap<K, V> {
    /// Returns `true` if some binding holds the given value.
    ///
    /// Linear in the size of the map.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool {
        self.iter().any(|(_, stored)| stored == value)
    }
}

// ---------------------------------------------------------------------------
// Write operations — K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: PartialEq + Clone> HashTrieMap<K, V> {
    /// Inserts a binding, returning the updated map.
    ///
    /// Inserting a binding that is already present returns a map sharing
    /// all of its structure with `self`.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        match &self.repr {
            Repr::Small(small) => match small.insert(key.clone(), value.clone()) {
                Some(small) => Self {
                    repr: Repr::Small(small),
                },
                // Overflow: rebuild every entry into an empty trie, then
                // insert the new pair there.
                None => {
                    let mut trie = Hamt::new();
                    for (k, v) in small.entries() {
                        trie = trie.insert(k.clone(), v.clone());
                    }
                    Self {
                        repr: Repr::Trie(trie.insert(key, value)),
                    }
                }
            },
            Repr::Trie(trie) => Self {
                repr: Repr::Trie(trie.insert(key, value)),
            },
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> HashTrieMap<K, V> {
    /// Removes a key, returning the updated map.
    ///
    /// Removing an absent key returns a map sharing all of its structure
    /// with `self`.
    #[must_use]
    pub fn remove(&self, key: &K) -> Self {
        match &self.repr {
            Repr::Small(small) => Self {
                repr: Repr::Small(small.remove(key)),
            },
            Repr::Trie(trie) => Self {
                repr: Repr::Trie(trie.remove(key)),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

// Manual impl: both representations share storage without cloning entries.
impl<K, V> Clone for HashTrieMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            repr: match &self.repr {
                Repr::Small(small) => Repr::Small(small.clone()),
                Repr::Trie(trie) => Repr::Trie(trie.clone()),
            },
        }
    }
}

impl<K, V> Default for HashTrieMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashTrieMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for HashTrieMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for HashTrieMap<K, V> {}

impl<K: Hash + Eq, V> ops::Index<&K> for HashTrieMap<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq + Clone> FromIterator<(K, V)> for HashTrieMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map = map.insert(key, value);
        }
        map
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq + Clone, const N: usize> From<[(K, V); N]>
    for HashTrieMap<K, V>
{
    /// Builds a map from a fixed set of pairs: up to eight pairs stay in
    /// the packed-array representation, more build the trie directly.
    fn from(pairs: [(K, V); N]) -> Self {
        if N <= SMALL_FROM {
            return pairs.into_iter().collect();
        }
        let mut trie = Hamt::new();
        for (key, value) in pairs {
            trie = trie.insert(key, value);
        }
        Self {
            repr: Repr::Trie(trie),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a HashTrieMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Test-only structural introspection
// ---------------------------------------------------------------------------

#[cfg(test)]
impl<K, V> HashTrieMap<K, V> {
    /// Returns the trie engine when the map has promoted past the packed
    /// array representation.
    pub(crate) fn as_trie(&self) -> Option<&Hamt<K, V>> {
        match &self.repr {
            Repr::Small(_) => None,
            Repr::Trie(trie) => Some(trie),
        }
    }
}
