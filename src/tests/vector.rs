use crate::Vector;

#[test]
fn empty_vector() {
    let vector: Vector<i32> = Vector::new();
    assert_eq!(vector.len(), 0);
    assert!(vector.is_empty());
    assert_eq!(vector.get(0), None);
    assert_eq!(vector.first(), None);
    assert_eq!(vector.last(), None);
    assert_eq!(vector.iter().count(), 0);
    vector.check_invariants();
}

/// Thirty-three elements straddle the first tail push.
#[test]
fn tail_boundary() {
    let vector: Vector<i32> = (1..=33).collect();
    assert_eq!(vector.len(), 33);
    assert_eq!(vector.get(31), Some(&32));
    assert_eq!(vector.get(32), Some(&33));
    assert_eq!(vector.get(33), None);

    let collected: Vec<i32> = vector.iter().copied().collect();
    assert_eq!(collected, (1..=33).collect::<Vec<_>>());
    vector.check_invariants();
}

/// Overwrite deep in the tree leaves every other index alone.
#[test]
fn set_in_tree() {
    let vector: Vector<i32> = (1..=64).collect();
    let updated = vector.set(60, 100);

    assert_eq!(updated.get(60), Some(&100));
    for i in 0..64 {
        if i != 60 {
            assert_eq!(updated.get(i), Some(&(i as i32 + 1)), "index {i} changed");
        }
    }
    updated.check_invariants();
}

#[test]
fn set_in_tail() {
    let vector: Vector<i32> = (0..40).collect();
    let updated = vector.set(35, -1);
    assert_eq!(updated.get(35), Some(&-1));
    assert_eq!(updated.get(34), Some(&34));
    assert_eq!(vector.get(35), Some(&35));
}

#[test]
fn set_then_get_everywhere() {
    let mut vector: Vector<usize> = (0..200).collect();
    for i in 0..200 {
        vector = vector.set(i, i + 1000);
    }
    for i in 0..200 {
        assert_eq!(vector.get(i), Some(&(i + 1000)));
    }
    vector.check_invariants();
}

/// Appends keep every earlier prefix readable at each length.
#[test]
fn growth_keeps_prefixes() {
    let mut vector = Vector::new();
    for n in 0_usize..1024 {
        vector = vector.push(n + 1);
        assert_eq!(vector.len(), n + 1);
        for i in 0..=n {
            assert_eq!(vector.get(i), Some(&(i + 1)), "lost index {i} at size {}", n + 1);
        }
        if (n + 1) % 32 == 0 {
            vector.check_invariants();
        }
    }
    assert_eq!(vector.len(), 1024);
}

/// Pushing past 1056 elements adds a root level.
#[test]
fn growth_across_root_levels() {
    let mut vector = Vector::new();
    for i in 0_u32..2080 {
        vector = vector.push(i);
    }
    assert_eq!(vector.len(), 2080);
    for i in 0_u32..2080 {
        assert_eq!(vector.get(i as usize), Some(&i));
    }
    vector.check_invariants();

    let collected: Vec<u32> = vector.iter().copied().collect();
    assert_eq!(collected, (0..2080).collect::<Vec<_>>());
}

/// Iteration yields `get(0), get(1), …` in order.
#[test]
fn iterator_fidelity() {
    for size in [0_usize, 1, 31, 32, 33, 64, 100, 1056] {
        let vector: Vector<usize> = (0..size).collect();
        let via_iter: Vec<usize> = vector.iter().copied().collect();
        let via_get: Vec<usize> = (0..size).map(|i| *vector.get(i).unwrap()).collect();
        assert_eq!(via_iter, via_get, "size {size}");
        assert_eq!(vector.iter().len(), size);
    }
}

#[test]
fn contains_and_contains_all() {
    let vector: Vector<i32> = (0..100).collect();
    assert!(vector.contains(&0));
    assert!(vector.contains(&99));
    assert!(!vector.contains(&100));

    assert!(vector.contains_all(&[3, 50, 97]));
    assert!(!vector.contains_all(&[3, 500]));
    assert!(vector.contains_all(&[]));
}

#[test]
fn first_and_last() {
    let vector: Vector<i32> = (5..40).collect();
    assert_eq!(vector.first(), Some(&5));
    assert_eq!(vector.last(), Some(&39));
}

#[test]
fn index_operator() {
    let vector: Vector<i32> = (0..50).collect();
    assert_eq!(vector[49], 49);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn index_out_of_range_panics() {
    let vector: Vector<i32> = (0..10).collect();
    let _ = vector[10];
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn set_out_of_range_panics() {
    let vector: Vector<i32> = (0..10).collect();
    let _ = vector.set(10, 0);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn set_on_empty_panics() {
    let vector: Vector<i32> = Vector::new();
    let _ = vector.set(0, 0);
}

#[test]
fn equality() {
    let a: Vector<i32> = (0..100).collect();
    let b: Vector<i32> = (0..100).collect();
    let c = b.set(3, -3);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, (0..99).collect::<Vector<i32>>());
}
