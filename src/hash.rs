//! Key hashing for the map trie.
//!
//! The trie consumes a 32-bit hash in 5-bit chunks. The raw hash is biased
//! by 31 before storage so that a key whose raw hash is zero still carries a
//! nonzero stored hash, and so that collision patterns stay stable across
//! representations of the same map.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Computes the raw 32-bit hash of a key using the standard hasher.
#[must_use]
pub(crate) fn raw_hash<K: Hash + ?Sized>(key: &K) -> u32 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as u32
}

/// Computes the stored hash: `31 + raw`, wrapping.
#[must_use]
pub(crate) fn stored_hash<K: Hash + ?Sized>(key: &K) -> u32 {
    raw_hash(key).wrapping_add(31)
}
