//! Insertion operation — path-copy insert with shape promotion.

use std::sync::Arc;

use smallvec::{smallvec, SmallVec};

use crate::node::{self, Entry, Node, Slot};

/// Outcome of a recursive insert.
pub(crate) struct InsertOutcome<K, V> {
    /// Root of the rewritten subtree. When the binding was already present
    /// with an equal value this is the original node, shared by reference.
    pub node: Arc<Node<K, V>>,
    /// `true` if a new key was added, `false` if an existing binding was
    /// updated or left alone.
    pub inserted: bool,
}

/// Builds a one-entry bitmap node for `entry` at the given shift.
pub(crate) fn singleton<K, V>(shift: u32, entry: Entry<K, V>) -> Arc<Node<K, V>> {
    Arc::new(Node::Bitmap {
        bitmap: node::mask(node::fragment(entry.hash, shift)),
        slots: smallvec![Slot::Entry(entry)],
    })
}

/// Inserts `entry` into the subtree rooted at `node` via path copy.
pub(crate) fn insert_recursive<K, V>(
    node: &Arc<Node<K, V>>,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: PartialEq + Clone,
{
    match node.as_ref() {
        Node::Bitmap { bitmap, slots } => {
            insert_into_bitmap(node, *bitmap, slots, entry, shift)
        }
        Node::Dense { len, children } => {
            insert_into_dense(node, *len, children, entry, shift)
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => insert_into_collision(node, *node_hash, entries, entry, shift),
    }
}

// ---------------------------------------------------------------------------
// Bitmap node insert
// ---------------------------------------------------------------------------

fn insert_into_bitmap<K, V>(
    original: &Arc<Node<K, V>>,
    bitmap: u32,
    slots: &SmallVec<[Slot<K, V>; 4]>,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: PartialEq + Clone,
{
    let frag = node::fragment(entry.hash, shift);
    let bit = node::mask(frag);

    if bitmap & bit == 0 {
        if slots.len() < node::PROMOTE_AT {
            // Room left → splice the new entry into the packed array.
            let new_bitmap = bitmap | bit;
            let at = node::index(new_bitmap, bit);
            let mut slots = slots.clone();
            slots.insert(at, Slot::Entry(entry));
            return InsertOutcome {
                node: Arc::new(Node::Bitmap {
                    bitmap: new_bitmap,
                    slots,
                }),
                inserted: true,
            };
        }
        return InsertOutcome {
            node: promote_to_dense(bitmap, slots, entry, shift),
            inserted: true,
        };
    }

    let pos = node::index(bitmap, bit);
    match &slots[pos] {
        Slot::Link(child) => {
            let outcome = insert_recursive(child, entry, shift + node::BITS_PER_LEVEL);
            if Arc::ptr_eq(&outcome.node, child) {
                // Subtree untouched → this node is untouched too.
                return InsertOutcome {
                    node: Arc::clone(original),
                    inserted: outcome.inserted,
                };
            }
            let mut slots = slots.clone();
            slots[pos] = Slot::Link(outcome.node);
            InsertOutcome {
                node: Arc::new(Node::Bitmap { bitmap, slots }),
                inserted: outcome.inserted,
            }
        }
        Slot::Entry(existing) => {
            if existing.key == entry.key {
                if existing.value == entry.value {
                    // Exact binding already present.
                    return InsertOutcome {
                        node: Arc::clone(original),
                        inserted: false,
                    };
                }
                let mut slots = slots.clone();
                slots[pos] = Slot::Entry(entry);
                return InsertOutcome {
                    node: Arc::new(Node::Bitmap { bitmap, slots }),
                    inserted: false,
                };
            }
            // Two distinct keys meet at this chunk → push both one level
            // deeper, or into a collision chain when the full hashes match.
            let subtree = merge_entries(existing.clone(), entry, shift + node::BITS_PER_LEVEL);
            let mut slots = slots.clone();
            slots[pos] = Slot::Link(subtree);
            InsertOutcome {
                node: Arc::new(Node::Bitmap { bitmap, slots }),
                inserted: true,
            }
        }
    }
}

/// Rebuilds a full bitmap node as a dense node, adding `entry`.
///
/// Every existing slot becomes a child: links move over as-is, inline
/// entries become one-entry bitmap nodes one level deeper. The chunk for
/// the new entry is free because its bit was clear in the bitmap.
fn promote_to_dense<K, V>(
    bitmap: u32,
    slots: &[Slot<K, V>],
    entry: Entry<K, V>,
    shift: u32,
) -> Arc<Node<K, V>>
where
    K: Clone,
    V: Clone,
{
    let mut children = node::empty_children();
    let mut cursor = 0;
    for chunk in 0..node::FANOUT as u32 {
        if bitmap & node::mask(chunk) != 0 {
            children[chunk as usize] = Some(match &slots[cursor] {
                Slot::Link(child) => Arc::clone(child),
                Slot::Entry(existing) => {
                    singleton(shift + node::BITS_PER_LEVEL, existing.clone())
                }
            });
            cursor += 1;
        }
    }
    let frag = node::fragment(entry.hash, shift);
    children[frag as usize] = Some(singleton(shift + node::BITS_PER_LEVEL, entry));
    Arc::new(Node::Dense {
        len: bitmap.count_ones() + 1,
        children,
    })
}

/// Builds the smallest subtree distinguishing two entries below `shift`.
///
/// Descends level by level while the hash chunks still agree; equal full
/// hashes short-circuit into a collision chain.
fn merge_entries<K, V>(e1: Entry<K, V>, e2: Entry<K, V>, shift: u32) -> Arc<Node<K, V>> {
    if e1.hash == e2.hash {
        return Arc::new(Node::Collision {
            hash: e1.hash,
            entries: smallvec![e1, e2],
        });
    }

    let f1 = node::fragment(e1.hash, shift);
    let f2 = node::fragment(e2.hash, shift);

    if f1 == f2 {
        let child = merge_entries(e1, e2, shift + node::BITS_PER_LEVEL);
        Arc::new(Node::Bitmap {
            bitmap: node::mask(f1),
            slots: smallvec![Slot::Link(child)],
        })
    } else {
        let (lo, hi) = if f1 < f2 { (e1, e2) } else { (e2, e1) };
        Arc::new(Node::Bitmap {
            bitmap: node::mask(f1) | node::mask(f2),
            slots: smallvec![Slot::Entry(lo), Slot::Entry(hi)],
        })
    }
}

// ---------------------------------------------------------------------------
// Dense node insert
// ---------------------------------------------------------------------------

fn insert_into_dense<K, V>(
    original: &Arc<Node<K, V>>,
    len: u32,
    children: &[Option<Arc<Node<K, V>>>; node::FANOUT],
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: PartialEq + Clone,
{
    let frag = node::fragment(entry.hash, shift) as usize;

    match &children[frag] {
        None => {
            let mut children = Box::new(children.clone());
            children[frag] = Some(singleton(shift + node::BITS_PER_LEVEL, entry));
            InsertOutcome {
                node: Arc::new(Node::Dense {
                    len: len + 1,
                    children,
                }),
                inserted: true,
            }
        }
        Some(child) => {
            let outcome = insert_recursive(child, entry, shift + node::BITS_PER_LEVEL);
            if Arc::ptr_eq(&outcome.node, child) {
                return InsertOutcome {
                    node: Arc::clone(original),
                    inserted: outcome.inserted,
                };
            }
            let mut children = Box::new(children.clone());
            children[frag] = Some(outcome.node);
            InsertOutcome {
                node: Arc::new(Node::Dense { len, children }),
                inserted: outcome.inserted,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

fn insert_into_collision<K, V>(
    original: &Arc<Node<K, V>>,
    node_hash: u32,
    entries: &SmallVec<[Entry<K, V>; 2]>,
    entry: Entry<K, V>,
    shift: u32,
) -> InsertOutcome<K, V>
where
    K: Eq + Clone,
    V: PartialEq + Clone,
{
    if entry.hash != node_hash {
        // The chain sits at an interior position the new hash diverges
        // from: wrap it in a bitmap node at this level and insert there.
        let wrapper = Arc::new(Node::Bitmap {
            bitmap: node::mask(node::fragment(node_hash, shift)),
            slots: smallvec![Slot::Link(Arc::clone(original))],
        });
        return insert_recursive(&wrapper, entry, shift);
    }

    if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
        if entries[pos].value == entry.value {
            return InsertOutcome {
                node: Arc::clone(original),
                inserted: false,
            };
        }
        let mut entries = entries.clone();
        entries[pos] = entry;
        return InsertOutcome {
            node: Arc::new(Node::Collision {
                hash: node_hash,
                entries,
            }),
            inserted: false,
        };
    }

    let mut entries = entries.clone();
    entries.push(entry);
    InsertOutcome {
        node: Arc::new(Node::Collision {
            hash: node_hash,
            entries,
        }),
        inserted: true,
    }
}
