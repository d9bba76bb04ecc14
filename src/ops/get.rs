//! Lookup operation — traverses the trie to find a key.

use crate::node::{self, Node};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns the stored entry if found, so callers can project either the
/// value or the key-value pair.
pub(crate) fn get_recursive<'a, K, V>(
    node: &'a Node<K, V>,
    hash: u32,
    key: &K,
    shift: u32,
) -> Option<&'a node::Entry<K, V>>
where
    K: Eq,
{
    match node {
        Node::Bitmap { bitmap, slots } => {
            let frag = node::fragment(hash, shift);
            let bit = node::mask(frag);

            if bitmap & bit == 0 {
                return None;
            }
            match &slots[node::index(*bitmap, bit)] {
                node::Slot::Entry(entry) => {
                    if entry.hash == hash && entry.key == *key {
                        Some(entry)
                    } else {
                        None
                    }
                }
                node::Slot::Link(child) => {
                    get_recursive(child, hash, key, shift + node::BITS_PER_LEVEL)
                }
            }
        }
        Node::Dense { children, .. } => {
            let frag = node::fragment(hash, shift);
            children[frag as usize]
                .as_deref()
                .and_then(|child| get_recursive(child, hash, key, shift + node::BITS_PER_LEVEL))
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return None;
            }
            // Linear search through collision entries.
            entries.iter().find(|entry| entry.key == *key)
        }
    }
}
