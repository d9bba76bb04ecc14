use std::hash::{Hash, Hasher};

use crate::HashTrieMap;

/// A key type with a controllable hash value for testing hash collisions.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CollidingKey {
    id: u32,
    forced_hash: u64,
}

impl CollidingKey {
    const fn new(id: u32, hash: u64) -> Self {
        Self {
            id,
            forced_hash: hash,
        }
    }
}

impl Hash for CollidingKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.forced_hash.hash(state);
    }
}

/// Three distinct keys with a constant hash: all retrievable, removable
/// one by one down to the empty map.
#[test]
fn constant_hash_three_keys() {
    let k1 = CollidingKey::new(1, 0xDEAD_BEEF);
    let k2 = CollidingKey::new(2, 0xDEAD_BEEF);
    let k3 = CollidingKey::new(3, 0xDEAD_BEEF);

    let map = HashTrieMap::new()
        .insert(k1.clone(), "first")
        .insert(k2.clone(), "second")
        .insert(k3.clone(), "third");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&k1), Some(&"first"));
    assert_eq!(map.get(&k2), Some(&"second"));
    assert_eq!(map.get(&k3), Some(&"third"));

    let map = map.remove(&k2);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"first"));
    assert_eq!(map.get(&k2), None);
    assert_eq!(map.get(&k3), Some(&"third"));

    let map = map.remove(&k1).remove(&k3);
    assert!(map.is_empty());
}

/// Overwriting inside a collision chain replaces only that binding.
#[test]
fn overwrite_in_collision_chain() {
    let k1 = CollidingKey::new(1, 0xBBBB);
    let k2 = CollidingKey::new(2, 0xBBBB);

    let map = HashTrieMap::new()
        .insert(k1.clone(), 10)
        .insert(k2.clone(), 20)
        .insert(k1.clone(), 11);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&11));
    assert_eq!(map.get(&k2), Some(&20));
}

/// A chain shrunk to a single entry still answers lookups, accepts new
/// colliding keys, and vanishes when its last entry goes.
#[test]
fn chain_shrinks_to_one_entry() {
    let k1 = CollidingKey::new(1, 0xAAAA);
    let k2 = CollidingKey::new(2, 0xAAAA);

    let map = HashTrieMap::new().insert(k1.clone(), 1).insert(k2.clone(), 2);
    let map = map.remove(&k1);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&k2), Some(&2));

    let map = map.insert(k1.clone(), 3);
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&3));

    let map = map.remove(&k1).remove(&k2);
    assert!(map.is_empty());
}

/// A key with a different hash landing on a collision chain's position
/// diverges the tree without losing the chain.
#[test]
fn diverging_key_meets_chain() {
    let c1 = CollidingKey::new(1, 0xCAFE);
    let c2 = CollidingKey::new(2, 0xCAFE);

    let mut map = HashTrieMap::new().insert(c1.clone(), 100).insert(c2.clone(), 200);

    // A spread of other hashes, some of which must share the chain's
    // leading chunks at various depths.
    let others: Vec<CollidingKey> = (0..64)
        .map(|i| CollidingKey::new(1000 + i, u64::from(i)))
        .collect();
    for (i, key) in others.iter().enumerate() {
        map = map.insert(key.clone(), i as i32);
    }

    assert_eq!(map.len(), 66);
    assert_eq!(map.get(&c1), Some(&100));
    assert_eq!(map.get(&c2), Some(&200));
    for (i, key) in others.iter().enumerate() {
        assert_eq!(map.get(key), Some(&(i as i32)));
    }
}

/// Collision chains interleaved with plain keys under heavy traffic.
#[test]
fn chains_among_plain_keys() {
    let mut map = HashTrieMap::new();
    for i in 0_u32..300 {
        // Five keys per forced hash: sixty chains of five.
        map = map.insert(CollidingKey::new(i, u64::from(i / 5)), i);
    }
    assert_eq!(map.len(), 300);

    for i in 0_u32..300 {
        assert_eq!(map.get(&CollidingKey::new(i, u64::from(i / 5))), Some(&i));
    }

    // Remove the middle key of every chain.
    for chain in 0_u32..60 {
        map = map.remove(&CollidingKey::new(chain * 5 + 2, u64::from(chain)));
    }
    assert_eq!(map.len(), 240);
    for i in 0_u32..300 {
        let expected = if i % 5 == 2 { None } else { Some(&i) };
        assert_eq!(map.get(&CollidingKey::new(i, u64::from(i / 5))), expected);
    }
}
