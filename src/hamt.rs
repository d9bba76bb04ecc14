//! Internal persistent trie engine behind the map facade.

use std::hash::Hash;
use std::sync::Arc;

use crate::hash::stored_hash;
use crate::node::{Entry, Node};
use crate::ops::get::get_recursive;
use crate::ops::insert::{insert_recursive, singleton};
use crate::ops::remove::{remove_recursive, RemoveOutcome};

/// Persistent hash array-mapped trie.
///
/// Writes return a new trie sharing all untouched nodes with `self`.
pub(crate) struct Hamt<K, V> {
    root: Option<Arc<Node<K, V>>>,
    size: usize,
}

impl<K, V> Hamt<K, V> {
    /// Creates an empty trie.
    pub(crate) const fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Returns the number of key-value pairs.
    pub(crate) const fn len(&self) -> usize {
        self.size
    }

    /// Returns the root node for iteration.
    pub(crate) fn root(&self) -> Option<&Arc<Node<K, V>>> {
        self.root.as_ref()
    }
}

impl<K: Hash + Eq, V> Hamt<K, V> {
    /// Returns the stored entry for `key`, if any.
    pub(crate) fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        let root = self.root.as_deref()?;
        get_recursive(root, stored_hash(key), key, 0)
    }
}

impl<K: Hash + Eq + Clone, V: PartialEq + Clone> Hamt<K, V> {
    /// Inserts a binding, returning the rewritten trie.
    ///
    /// When the exact binding is already present the returned trie shares
    /// its root with `self` by reference.
    pub(crate) fn insert(&self, key: K, value: V) -> Self {
        let entry = Entry {
            hash: stored_hash(&key),
            key,
            value,
        };
        match &self.root {
            None => Self {
                root: Some(singleton(0, entry)),
                size: 1,
            },
            Some(root) => {
                let outcome = insert_recursive(root, entry, 0);
                Self {
                    root: Some(outcome.node),
                    size: self.size + usize::from(outcome.inserted),
                }
            }
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Hamt<K, V> {
    /// Removes a key, returning the rewritten trie.
    ///
    /// An absent key yields a clone of `self` (same root, by reference).
    pub(crate) fn remove(&self, key: &K) -> Self {
        let Some(root) = &self.root else {
            return self.clone();
        };
        match remove_recursive(root, stored_hash(key), key, 0) {
            RemoveOutcome::NotFound => self.clone(),
            RemoveOutcome::Removed { node } => Self {
                root: node,
                size: self.size - 1,
            },
        }
    }
}

// Manual impl: sharing the root never requires cloning keys or values.
impl<K, V> Clone for Hamt<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

// ---------------------------------------------------------------------------
// Test-only structural introspection
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) use census::Census;
