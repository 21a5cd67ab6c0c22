//! Fixed scenarios through the public API only.

use std::cmp::Ordering;

use balanced_map::{AvlTree, ErrorKind, OrderedMap, ScriptedPriorities, Treap};

use crate::init_logging;

#[test]
fn avl_ascending_inserts_balance_at_two() {
    init_logging();
    let mut tree = AvlTree::new();
    for key in [1, 2, 3] {
        tree.insert(key, key).unwrap();
    }

    assert_eq!(tree.height(), 1);
    assert_eq!(tree.height_of(&2).unwrap(), 1);
    assert_eq!(tree.height_of(&1).unwrap(), 0);
    assert_eq!(tree.height_of(&3).unwrap(), 0);
    assert_eq!(tree.balance_of(&2).unwrap(), 0);
}

#[test]
fn avl_remove_root_of_three() {
    let mut tree = AvlTree::new();
    for key in [1, 2, 3] {
        tree.insert(key, key * 10).unwrap();
    }

    assert_eq!(tree.remove(&2).unwrap(), 20);
    assert_eq!(tree.size(), 2);
    // 1 replaced 2 and keeps 3 as its right child.
    assert_eq!(tree.height_of(&1).unwrap(), 1);
    assert_eq!(tree.balance_of(&1).unwrap(), -1);
    assert_eq!(tree.to_string(), "{1: 10, 3: 30}");
}

#[test]
fn treap_higher_priority_becomes_root() {
    init_logging();
    let mut tree = Treap::with_priorities(ScriptedPriorities::new(vec![10, 20]));
    tree.insert("a", 1).unwrap();
    tree.insert("b", 2).unwrap();

    assert_eq!(tree.priority_of(&"b").unwrap(), 20);
    assert_eq!(tree.left_priority(&"b").unwrap(), Some(10));
    assert_eq!(tree.right_priority(&"b").unwrap(), None);
    assert_eq!(tree.left_priority(&"a").unwrap(), None);
}

fn duplicate_insert_is_rejected<M: OrderedMap<&'static str, i32>>(mut map: M) {
    map.insert("x", 1).unwrap();
    map.insert("y", 2).unwrap();

    let err = map.insert("x", 3).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::DuplicateKey));
    assert_eq!(map.size(), 2);
    assert_eq!(map.get(&"x").unwrap(), &1);
}

#[test]
fn duplicate_insert_is_rejected_by_both() {
    duplicate_insert_is_rejected(AvlTree::new());
    duplicate_insert_is_rejected(Treap::new());
}

fn unordered_keys_are_rejected<M: OrderedMap<f64, ()>>(mut map: M) {
    map.insert(0.5, ()).unwrap();

    assert!(matches!(map.insert(f64::NAN, ()).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(matches!(map.get(&f64::NAN).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(!map.has(&f64::NAN));
    assert_eq!(map.keys().collect::<Vec<_>>(), [&0.5]);
}

#[test]
fn unordered_keys_are_rejected_by_both() {
    unordered_keys_are_rejected(AvlTree::new());
    unordered_keys_are_rejected(Treap::new());
}

/// A key that can be ordered against itself but, when `wild` is set, not
/// against any other key.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Tagged {
    id: i32,
    wild: bool,
}

impl Tagged {
    fn tame(id: i32) -> Self {
        Self { id, wild: false }
    }
}

impl PartialOrd for Tagged {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.wild || other.wild {
            None
        } else {
            self.id.partial_cmp(&other.id)
        }
    }
}

fn key_unordered_against_stored_keys_is_rejected<M: OrderedMap<Tagged, i32>>(mut map: M) {
    for id in 0..20 {
        map.insert(Tagged::tame(id), id).unwrap();
    }
    let before: Vec<_> = map.keys().copied().collect();
    let wild = Tagged { id: 5, wild: true };

    assert!(matches!(map.insert(wild, 0).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(matches!(map.put(&wild, 0).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(matches!(map.remove(&wild).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(matches!(map.get(&wild).unwrap_err().kind(), ErrorKind::InvalidKey));
    assert!(!map.has(&wild));

    assert_eq!(map.size(), 20);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), before);
    assert_eq!(map.get(&Tagged::tame(5)).unwrap(), &5);
}

#[test]
fn key_unordered_against_stored_keys_is_rejected_by_both() {
    init_logging();
    key_unordered_against_stored_keys_is_rejected(AvlTree::new());
    key_unordered_against_stored_keys_is_rejected(Treap::with_seed(11));
}

#[test]
fn put_requires_existing_key() {
    let mut tree = Treap::with_seed(0);
    assert!(matches!(tree.put(&1, "one").unwrap_err().kind(), ErrorKind::KeyNotFound));

    tree.insert(1, "uno").unwrap();
    assert_eq!(tree.put(&1, "one").unwrap(), "uno");
    assert_eq!(tree.to_string(), "{1: one}");
}
