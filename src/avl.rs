//! A height-balanced BST (an AVL tree). For every node, the heights of its two
//! subtrees differ by at most one, which bounds the height of the whole tree
//! by roughly `1.44 lg N`.
//!
//! # Examples
//!
//! ```
//! use balanced_map::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.has(&1));
//!
//! tree.insert(1, 2).unwrap();
//! assert_eq!(tree.get(&1).unwrap(), &2);
//!
//! // Updating an existing key goes through `put`...
//! assert_eq!(tree.put(&1, 3).unwrap(), 2);
//! assert_eq!(tree.get(&1).unwrap(), &3);
//!
//! // ...because inserting it again is an error.
//! assert!(tree.insert(1, 4).is_err());
//!
//! // Removing a key returns its value.
//! assert_eq!(tree.remove(&1).unwrap(), 3);
//! assert!(!tree.has(&1));
//! ```

use std::fmt;

use crate::error::{ErrorKind, Result};
use crate::map::OrderedMap;
use crate::node::{self, BinaryNode, Link};

/// A self-balancing Binary Search Tree that keeps every node's subtrees
/// within one level of each other.
pub struct AvlTree<K, V> {
    root: Link<Node<K, V>>,
    size: usize,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for AvlTree<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

impl<K, V> fmt::Debug for AvlTree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvlTree")
            .field("size", &self.size)
            .field("root", &self.root.as_deref())
            .finish()
    }
}

impl<K, V> fmt::Display for AvlTree<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::iter::fmt_entries(self.iter(), f)
    }
}

impl<K, V> AvlTree<K, V> {
    /// Generate a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of keys in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The height of the tree: `0` for a single node and `-1` when empty.
    pub fn height(&self) -> isize {
        height(self.root.as_deref())
    }

    /// Iterates over the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_map::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(tree.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(crate::iter::Iter::new(self.root.as_deref(), self.size))
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(crate::iter::Iter::new(self.root.as_deref(), self.size))
    }
}

impl<K: PartialOrd, V> AvlTree<K, V> {
    /// Inserts a new key and rebalances every node on the path back up to
    /// the root.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` if the key is already present, `InvalidKey` if it
    /// cannot be ordered. The tree is unchanged in both cases.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        node::insert(&mut self.root, key, value, |key, value| {
            Box::new(Node::new(key, value))
        })?;
        self.size += 1;
        debug!("avl: inserted, size {}", self.size);
        Ok(())
    }

    /// Replaces the value stored at an existing key and returns the old one.
    /// The shape of the tree does not change.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, `InvalidKey` if it cannot be
    /// ordered.
    pub fn put(&mut self, key: &K, value: V) -> Result<V> {
        node::replace(&mut self.root, key, value)
    }

    /// Returns the value stored at `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, `InvalidKey` if it cannot be
    /// ordered.
    pub fn get(&self, key: &K) -> Result<&V> {
        Ok(self.find(key)?.value())
    }

    /// Whether `key` is present. A key that cannot be ordered is never
    /// present.
    pub fn has(&self, key: &K) -> bool {
        matches!(node::search(self.root.as_deref(), key), Ok(Some(_)))
    }

    /// Removes `key` and returns its value. A node with two children is
    /// replaced by its predecessor.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, `InvalidKey` if it cannot be
    /// ordered. The tree is unchanged in both cases.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let value = node::remove(&mut self.root, key)?;
        self.size -= 1;
        debug!("avl: removed, size {}", self.size);
        Ok(value)
    }

    /// The height of the node holding `key`. Leaves have height `0`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn height_of(&self, key: &K) -> Result<isize> {
        Ok(self.find(key)?.height)
    }

    /// The balance factor (left height minus right height) of the node
    /// holding `key`. Always in `-1..=1`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn balance_of(&self, key: &K) -> Result<isize> {
        Ok(self.find(key)?.balance_factor())
    }

    fn find(&self, key: &K) -> Result<&Node<K, V>> {
        node::search(self.root.as_deref(), key)?.ok_or_else(|| ErrorKind::KeyNotFound.into())
    }
}

impl<K: PartialOrd, V> OrderedMap<K, V> for AvlTree<K, V> {
    type Keys<'a> = Keys<'a, K, V>
    where
        Self: 'a,
        K: 'a;

    fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.insert(key, value)
    }

    fn put(&mut self, key: &K, value: V) -> Result<V> {
        self.put(key, value)
    }

    fn get(&self, key: &K) -> Result<&V> {
        self.get(key)
    }

    fn has(&self, key: &K) -> bool {
        self.has(key)
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        self.remove(key)
    }

    fn size(&self) -> usize {
        self.size()
    }

    fn keys(&self) -> Self::Keys<'_> {
        self.keys()
    }
}

impl<'a, K, V> IntoIterator for &'a AvlTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

tree_iterators!(Node);

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<Node<K, V>>,
    right: Link<Node<K, V>>,

    /// How many edges are on the longest path from this node down to a leaf.
    /// A node with no children has a height of 0.
    height: isize,
}

/// Height of a possibly empty subtree. Empty subtrees have height -1.
fn height<K, V>(node: Option<&Node<K, V>>) -> isize {
    node.map_or(-1, |n| n.height)
}

impl<K, V> Clone for Node<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            left: self.left.clone(),
            right: self.right.clone(),
            height: self.height,
        }
    }
}

impl<K, V> fmt::Debug for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("height", &self.height)
            .field("value", &self.value)
            .field("left", &self.left.as_deref())
            .field("right", &self.right.as_deref())
            .finish()
    }
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 0,
        }
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(self.left.as_deref()).max(height(self.right.as_deref())) + 1;
    }

    /// The height of the left subtree minus the height of the right subtree.
    /// Positive means left-heavy.
    fn balance_factor(&self) -> isize {
        height(self.left.as_deref()) - height(self.right.as_deref())
    }
}

impl<K, V> BinaryNode for Node<K, V> {
    type Key = K;
    type Value = V;

    const STRATEGY: &'static str = "avl";

    fn key(&self) -> &K {
        &self.key
    }

    fn value(&self) -> &V {
        &self.value
    }

    fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    fn into_value(self) -> V {
        self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn left_link(&mut self) -> &mut Link<Self> {
        &mut self.left
    }

    fn right_link(&mut self) -> &mut Link<Self> {
        &mut self.right
    }

    fn refresh(&mut self) {
        self.fix_height();
    }

    /// Balances a subtree using the heights of the children. See
    /// [the Wikipedia page][wiki] for the four cases.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Rebalancing
    fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let balanced = match self.balance_factor() {
            factor if factor > 1 => {
                // Left-right case: straighten the left child out first.
                if self.left().map_or(0, Node::balance_factor) < 0 {
                    self.left = self.left.take().map(node::rotate_left);
                }
                node::rotate_right(self)
            }
            factor if factor < -1 => {
                // Right-left case.
                if self.right().map_or(0, Node::balance_factor) > 0 {
                    self.right = self.right.take().map(node::rotate_right);
                }
                node::rotate_left(self)
            }
            _ => self,
        };

        // After balancing, assert that we've restored/maintained the AVL invariant.
        if cfg!(debug_assertions) {
            let left_height = height(balanced.left());
            let right_height = height(balanced.right());
            assert_eq!(balanced.height, left_height.max(right_height) + 1);
            assert!((left_height - right_height).abs() <= 1);
        }
        balanced
    }
}
