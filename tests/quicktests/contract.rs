use balanced_map::{AvlTree, ErrorKind, OrderedMap, Treap};
use quickcheck_macros::quickcheck;

use std::collections::{HashMap, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a map and a `HashMap`.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of keys in the map. Returns `false` as
/// soon as the sequence of keys or the size disagree.
fn do_ops<M>(ops: &[Op<i8, i8>], tree: &mut M, map: &mut HashMap<i8, i8>) -> bool
where
    M: OrderedMap<i8, i8>,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                if tree.insert(*k, *v).is_ok() {
                    assert!(map.insert(*k, *v).is_none());
                }
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k).ok(), map.remove(k));
            }
        }

        let keys: Vec<_> = tree.keys().copied().collect();
        if keys.len() != map.len() || tree.size() != map.len() {
            return false;
        }
        if !keys.windows(2).all(|pair| pair[0] < pair[1]) {
            return false;
        }
    }

    true
}

fn fuzz<M: OrderedMap<i8, i8>>(ops: &[Op<i8, i8>], mut tree: M) -> bool {
    init_logging();
    let mut map = HashMap::new();

    do_ops(ops, &mut tree, &mut map) && map.iter().all(|(key, value)| tree.get(key).ok() == Some(value))
}

#[quickcheck]
fn fuzz_multiple_operations_avl(ops: Vec<Op<i8, i8>>) -> bool {
    fuzz(&ops, AvlTree::new())
}

#[quickcheck]
fn fuzz_multiple_operations_treap(ops: Vec<Op<i8, i8>>, seed: u64) -> bool {
    fuzz(&ops, Treap::with_seed(seed))
}

fn contains<M: OrderedMap<i8, i8>>(xs: &[i8], mut tree: M) -> bool {
    for x in xs {
        let _ = tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.get(x).ok() == Some(x) && tree.has(x))
}

#[quickcheck]
fn contains_avl(xs: Vec<i8>) -> bool {
    contains(&xs, AvlTree::new())
}

#[quickcheck]
fn contains_treap(xs: Vec<i8>, seed: u64) -> bool {
    contains(&xs, Treap::with_seed(seed))
}

fn contains_not<M: OrderedMap<i8, i8>>(xs: Vec<i8>, nots: Vec<i8>, mut tree: M) -> bool {
    for x in &xs {
        let _ = tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.has(x) && matches!(tree.get(x).unwrap_err().kind(), ErrorKind::KeyNotFound))
}

#[quickcheck]
fn contains_not_avl(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    contains_not(xs, nots, AvlTree::new())
}

#[quickcheck]
fn contains_not_treap(xs: Vec<i8>, nots: Vec<i8>, seed: u64) -> bool {
    contains_not(xs, nots, Treap::with_seed(seed))
}

fn with_deletions<M: OrderedMap<i8, i8>>(xs: Vec<i8>, deletes: Vec<i8>, mut tree: M) -> bool {
    for x in &xs {
        let _ = tree.insert(*x, *x);
    }
    for delete in &deletes {
        let _ = tree.remove(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }
    let still_present: HashSet<_> = still_present.into_iter().collect();

    deletes.iter().all(|x| !tree.has(x))
        && still_present.iter().all(|x| tree.has(x))
        && tree.size() == still_present.len()
}

#[quickcheck]
fn with_deletions_avl(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    with_deletions(xs, deletes, AvlTree::new())
}

#[quickcheck]
fn with_deletions_treap(xs: Vec<i8>, deletes: Vec<i8>, seed: u64) -> bool {
    with_deletions(xs, deletes, Treap::with_seed(seed))
}

/// Inserting a fresh key and removing it again gives back the same entries.
fn round_trip<M: OrderedMap<i8, i8>>(xs: Vec<i8>, x: i8, v: i8, mut tree: M) -> bool {
    for k in &xs {
        let _ = tree.insert(*k, k.wrapping_mul(3));
    }
    if tree.has(&x) {
        return true;
    }
    let snapshot = |tree: &M| -> Vec<(i8, i8)> {
        tree.keys().map(|k| (*k, *tree.get(k).unwrap())).collect()
    };
    let before = snapshot(&tree);

    tree.insert(x, v).unwrap();
    let removed = tree.remove(&x).unwrap();

    removed == v && snapshot(&tree) == before
}

#[quickcheck]
fn round_trip_avl(xs: Vec<i8>, x: i8, v: i8) -> bool {
    round_trip(xs, x, v, AvlTree::new())
}

#[quickcheck]
fn round_trip_treap(xs: Vec<i8>, x: i8, v: i8, seed: u64) -> bool {
    round_trip(xs, x, v, Treap::with_seed(seed))
}

/// Lookups never change what the map holds.
fn lookups_are_pure<M: OrderedMap<i8, i8>>(xs: Vec<i8>, probes: Vec<i8>, mut tree: M) -> bool {
    for x in &xs {
        let _ = tree.insert(*x, *x);
    }
    let before: Vec<_> = tree.keys().copied().collect();
    let size = tree.size();

    for probe in &probes {
        let _ = tree.get(probe);
        let _ = tree.has(probe);
    }

    tree.size() == size && tree.keys().copied().collect::<Vec<_>>() == before
}

#[quickcheck]
fn lookups_are_pure_avl(xs: Vec<i8>, probes: Vec<i8>) -> bool {
    lookups_are_pure(xs, probes, AvlTree::new())
}

#[quickcheck]
fn lookups_are_pure_treap(xs: Vec<i8>, probes: Vec<i8>, seed: u64) -> bool {
    lookups_are_pure(xs, probes, Treap::with_seed(seed))
}
