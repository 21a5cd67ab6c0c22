//! The contract every balancing strategy in this crate satisfies.

use crate::error::Result;

/// An ordered key-value map with logarithmic lookup, insertion, and removal.
///
/// Unlike [`std::collections::BTreeMap`], inserting an existing key and
/// updating a missing one are errors rather than silent overwrites: use
/// [`insert`](OrderedMap::insert) to add and [`put`](OrderedMap::put) to
/// update. A failed call never changes the map.
///
/// Keys are validated before use: a key that is not ordered against itself
/// (e.g. `f64::NAN`) fails with [`ErrorKind::InvalidKey`][crate::ErrorKind::InvalidKey],
/// except in [`has`](OrderedMap::has) where it is simply not present.
///
/// # Examples
///
/// ```
/// use balanced_map::{AvlTree, ErrorKind, OrderedMap};
///
/// fn count_words<M: OrderedMap<String, usize>>(map: &mut M, text: &str) {
///     for word in text.split_whitespace() {
///         let word = word.to_string();
///         match map.get(&word) {
///             Ok(&count) => {
///                 map.put(&word, count + 1).unwrap();
///             }
///             Err(_) => map.insert(word, 1).unwrap(),
///         }
///     }
/// }
///
/// let mut map = AvlTree::new();
/// count_words(&mut map, "b a b");
///
/// assert_eq!(map.get(&"b".to_string()).unwrap(), &2);
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["a", "b"]);
/// assert!(matches!(
///     map.remove(&"c".to_string()).unwrap_err().kind(),
///     ErrorKind::KeyNotFound
/// ));
/// ```
pub trait OrderedMap<K, V> {
    /// The ascending key iterator returned by [`keys`](OrderedMap::keys).
    type Keys<'a>: Iterator<Item = &'a K>
    where
        Self: 'a,
        K: 'a;

    /// Adds a new key. Fails with `DuplicateKey` if it is already present.
    fn insert(&mut self, key: K, value: V) -> Result<()>;

    /// Replaces the value of an existing key and returns the previous one.
    /// Fails with `KeyNotFound` if the key is absent.
    fn put(&mut self, key: &K, value: V) -> Result<V>;

    /// Returns the value stored at `key`. Fails with `KeyNotFound` if absent.
    fn get(&self, key: &K) -> Result<&V>;

    /// Whether `key` is present.
    fn has(&self, key: &K) -> bool;

    /// Removes `key` and returns its value. Fails with `KeyNotFound` if
    /// absent.
    fn remove(&mut self, key: &K) -> Result<V>;

    /// The number of keys in the map.
    fn size(&self) -> usize;

    /// A fresh in-order walk over the keys, in ascending order.
    fn keys(&self) -> Self::Keys<'_>;
}
