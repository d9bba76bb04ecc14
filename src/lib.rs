//! Persistent map and vector built on 32-way tries.
//!
//! Both containers are **persistent**: every write operation returns a new
//! value sharing almost all of its structure with the old one, and the old
//! value stays observable and unchanged. Nodes are shared through [`Arc`],
//! so cloning a container is O(1) and values may cross threads.
//!
//! [`HashTrieMap`] is a hash array-mapped trie (HAMT) keyed by 5-bit chunks
//! of a 32-bit key hash, with three node shapes: bitmap-compressed nodes for
//! sparse fan-out, full-width 32-slot nodes for dense fan-out, and collision
//! chains for keys sharing a full hash. Maps of up to nine entries use a
//! packed array representation and promote to the trie on overflow.
//!
//! [`Vector`] is a 32-way radix trie over element indices with a tail
//! buffer holding the last up-to-32 elements, so appends touch the tree
//! only once every 32 pushes.
//!
//! # Key properties
//!
//! - **Persistence**: writes never mutate published values
//! - **Structural sharing**: path-copying writes, O(log₃₂ n) node clones
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"
//! - Steindorfer & Vinju, 2015 — "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - hypirion — "Understanding Clojure's Persistent Vectors"
//!
//! [`Arc`]: std::sync::Arc

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod hamt;
mod hash;
mod map;
mod node;
mod ops;
mod small;
mod vector;

pub mod iter;

#[cfg(test)]
mod tests;

pub use map::HashTrieMap;
pub use vector::Vector;
