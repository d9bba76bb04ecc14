//! Removal operation — path-copy delete with shape demotion.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::node::{self, Entry, Node, Slot};

/// Outcome of a recursive remove.
pub(crate) enum RemoveOutcome<K, V> {
    /// Key was not found — the subtree is unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the rewritten subtree, or `None` when the subtree
        /// became empty and the parent should unlink the slot.
        node: Option<Arc<Node<K, V>>>,
    },
}

/// Removes `key` from the subtree rooted at `node` via path copy.
pub(crate) fn remove_recursive<K, V>(
    node: &Arc<Node<K, V>>,
    hash: u32,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    match node.as_ref() {
        Node::Bitmap { bitmap, slots } => remove_from_bitmap(*bitmap, slots, hash, key, shift),
        Node::Dense { len, children } => remove_from_dense(*len, children, hash, key, shift),
        Node::Collision {
            hash: node_hash,
            entries,
        } => remove_from_collision(*node_hash, entries, hash, key),
    }
}

// ---------------------------------------------------------------------------
// Bitmap node remove
// ---------------------------------------------------------------------------

fn remove_from_bitmap<K, V>(
    bitmap: u32,
    slots: &SmallVec<[Slot<K, V>; 4]>,
    hash: u32,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let frag = node::fragment(hash, shift);
    let bit = node::mask(frag);

    if bitmap & bit == 0 {
        return RemoveOutcome::NotFound;
    }

    let pos = node::index(bitmap, bit);
    match &slots[pos] {
        Slot::Entry(entry) => {
            if entry.hash != hash || entry.key != *key {
                return RemoveOutcome::NotFound;
            }
            RemoveOutcome::Removed {
                node: drop_slot(bitmap, slots, bit, pos),
            }
        }
        Slot::Link(child) => {
            match remove_recursive(child, hash, key, shift + node::BITS_PER_LEVEL) {
                RemoveOutcome::NotFound => RemoveOutcome::NotFound,
                RemoveOutcome::Removed { node: Some(child) } => {
                    let mut slots = slots.clone();
                    slots[pos] = Slot::Link(child);
                    RemoveOutcome::Removed {
                        node: Some(Arc::new(Node::Bitmap { bitmap, slots })),
                    }
                }
                RemoveOutcome::Removed { node: None } => RemoveOutcome::Removed {
                    node: drop_slot(bitmap, slots, bit, pos),
                },
            }
        }
    }
}

/// Clears `bit` and elides the slot at `pos`, or dissolves the node when
/// that was its sole slot.
fn drop_slot<K, V>(
    bitmap: u32,
    slots: &SmallVec<[Slot<K, V>; 4]>,
    bit: u32,
    pos: usize,
) -> Option<Arc<Node<K, V>>>
where
    K: Clone,
    V: Clone,
{
    if bitmap == bit {
        return None;
    }
    let mut slots = slots.clone();
    slots.remove(pos);
    Some(Arc::new(Node::Bitmap {
        bitmap: bitmap & !bit,
        slots,
    }))
}

// ---------------------------------------------------------------------------
// Dense node remove
// ---------------------------------------------------------------------------

fn remove_from_dense<K, V>(
    len: u32,
    children: &[Option<Arc<Node<K, V>>>; node::FANOUT],
    hash: u32,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    let frag = node::fragment(hash, shift) as usize;
    let Some(child) = &children[frag] else {
        return RemoveOutcome::NotFound;
    };

    match remove_recursive(child, hash, key, shift + node::BITS_PER_LEVEL) {
        RemoveOutcome::NotFound => RemoveOutcome::NotFound,
        RemoveOutcome::Removed { node: Some(child) } => {
            let mut children = Box::new(children.clone());
            children[frag] = Some(child);
            RemoveOutcome::Removed {
                node: Some(Arc::new(Node::Dense { len, children })),
            }
        }
        RemoveOutcome::Removed { node: None } => {
            let remaining = len - 1;
            if (remaining as usize) < node::DEMOTE_BELOW {
                return RemoveOutcome::Removed {
                    node: demote_to_bitmap(children, frag),
                };
            }
            let mut children = Box::new(children.clone());
            children[frag] = None;
            RemoveOutcome::Removed {
                node: Some(Arc::new(Node::Dense {
                    len: remaining,
                    children,
                })),
            }
        }
    }
}

/// Packs the surviving children of a dense node into a bitmap node.
///
/// Children are visited in chunk order so the packed layout agrees with
/// the bitmap.
fn demote_to_bitmap<K, V>(
    children: &[Option<Arc<Node<K, V>>>; node::FANOUT],
    removed: usize,
) -> Option<Arc<Node<K, V>>> {
    let mut bitmap = 0;
    let mut slots = SmallVec::new();
    for (chunk, child) in children.iter().enumerate() {
        if chunk == removed {
            continue;
        }
        if let Some(child) = child {
            bitmap |= node::mask(chunk as u32);
            slots.push(Slot::Link(Arc::clone(child)));
        }
    }
    if slots.is_empty() {
        return None;
    }
    Some(Arc::new(Node::Bitmap { bitmap, slots }))
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_from_collision<K, V>(
    node_hash: u32,
    entries: &SmallVec<[Entry<K, V>; 2]>,
    hash: u32,
    key: &K,
) -> RemoveOutcome<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    if hash != node_hash {
        return RemoveOutcome::NotFound;
    }

    let Some(pos) = entries.iter().position(|e| e.key == *key) else {
        return RemoveOutcome::NotFound;
    };

    if entries.len() == 1 {
        return RemoveOutcome::Removed { node: None };
    }

    let mut entries = entries.clone();
    entries.remove(pos);
    RemoveOutcome::Removed {
        node: Some(Arc::new(Node::Collision {
            hash: node_hash,
            entries,
        })),
    }
}
