//! Map trie node types and bitmap helpers.

use std::sync::Arc;

use smallvec::SmallVec;

/// Bits per trie level (5 → 32-way branching).
pub(crate) const BITS_PER_LEVEL: u32 = 5;

/// Fan-out of every trie level.
pub(crate) const FANOUT: usize = 1 << BITS_PER_LEVEL;

/// A bitmap node holding this many slots grows into a dense node on the
/// next insert that would add a slot.
pub(crate) const PROMOTE_AT: usize = 16;

/// A dense node left with fewer than this many children after a removal
/// shrinks back to a bitmap node.
pub(crate) const DEMOTE_BELOW: usize = 8;

/// A key-value pair together with the stored hash of its key.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    /// Stored 32-bit hash of the key.
    pub hash: u32,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

/// One packed cell of a bitmap node.
///
/// Each set bit of the bitmap owns exactly one slot: either an inline
/// key-value entry or a link to a deeper subtree.
#[derive(Clone)]
pub(crate) enum Slot<K, V> {
    /// Inline key-value entry.
    Entry(Entry<K, V>),
    /// Link to a child node one level deeper.
    Link(Arc<Node<K, V>>),
}

/// Map trie node.
///
/// Three shapes keep the tree canonical under arbitrary insert/delete
/// sequences:
/// - [`Bitmap`](Self::Bitmap) — bitmap-compressed node for sparse fan-out
/// - [`Dense`](Self::Dense) — full-width 32-slot node for dense fan-out
/// - [`Collision`](Self::Collision) — linear chain for full-hash collisions
#[derive(Clone)]
pub(crate) enum Node<K, V> {
    /// Bitmap-compressed node.
    ///
    /// Invariant: `slots.len() == bitmap.count_ones()`, slots stored in
    /// bit-position order.
    Bitmap {
        /// Bitmap of occupied positions.
        bitmap: u32,
        /// Packed slots, one per set bit.
        slots: SmallVec<[Slot<K, V>; 4]>,
    },
    /// Full-width node indexed directly by the 5-bit hash chunk.
    ///
    /// Invariant: `len` equals the number of `Some` children and never
    /// drops below [`DEMOTE_BELOW`] between operations.
    Dense {
        /// Number of present children.
        len: u32,
        /// Child per chunk value; children are always nodes, never entries.
        children: Box<[Option<Arc<Node<K, V>>>; FANOUT]>,
    },
    /// Leaf chain for keys sharing an identical stored hash.
    ///
    /// Invariant: `entries` is non-empty.
    Collision {
        /// The shared stored hash.
        hash: u32,
        /// Colliding entries in insertion order.
        entries: SmallVec<[Entry<K, V>; 2]>,
    },
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash chunk at the given bit shift.
#[inline]
#[must_use]
pub(crate) const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1F
}

/// Returns the single-bit mask for the given chunk (0..31).
#[inline]
#[must_use]
pub(crate) const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the packed index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub(crate) const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

/// Allocates an empty 32-slot child array.
#[must_use]
pub(crate) fn empty_children<K, V>() -> Box<[Option<Arc<Node<K, V>>>; FANOUT]> {
    Box::new(std::array::from_fn(|_| None))
}
