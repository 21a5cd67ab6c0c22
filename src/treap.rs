//! A randomized BST (a treap). Every node draws a random priority when it is
//! created and the tree keeps priorities in max-heap order: no child
//! outranks its parent. Since the shape is then the one a plain BST would get
//! from inserting the keys in decreasing priority order, the expected height
//! is `O(lg N)` regardless of the order keys actually arrive in.
//!
//! Two treaps holding the same keys can have different shapes. Use
//! [`Treap::with_seed`] or [`Treap::with_priorities`] when the shape has to be
//! reproducible.
//!
//! # Examples
//!
//! ```
//! use balanced_map::treap::Treap;
//!
//! let mut tree = Treap::new();
//!
//! tree.insert("b", 2).unwrap();
//! tree.insert("a", 1).unwrap();
//! assert_eq!(tree.get(&"a").unwrap(), &1);
//!
//! assert_eq!(tree.remove(&"b").unwrap(), 2);
//! assert_eq!(tree.keys().collect::<Vec<_>>(), [&"a"]);
//! ```

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{ErrorKind, Result};
use crate::map::OrderedMap;
use crate::node::{self, BinaryNode, Link};
use crate::priority::PrioritySource;

/// A self-balancing Binary Search Tree that orders nodes by key and, along
/// each root-to-leaf path, by decreasing random priority.
pub struct Treap<K, V, P = StdRng> {
    root: Link<Node<K, V>>,
    size: usize,
    priorities: P,
}

impl<K, V> Default for Treap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, P> Clone for Treap<K, V, P>
where
    K: Clone,
    V: Clone,
    P: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
            priorities: self.priorities.clone(),
        }
    }
}

impl<K, V, P> fmt::Debug for Treap<K, V, P>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Treap")
            .field("size", &self.size)
            .field("root", &self.root.as_deref())
            .finish()
    }
}

impl<K, V, P> fmt::Display for Treap<K, V, P>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::iter::fmt_entries(self.iter(), f)
    }
}

impl<K, V> Treap<K, V> {
    /// Generate a new, empty `Treap` whose priorities come from a generator
    /// seeded by the operating system.
    pub fn new() -> Self {
        Self::with_priorities(StdRng::from_entropy())
    }

    /// Generate a new, empty `Treap` whose priorities come from a generator
    /// with the given seed. Trees built with the same seed and the same
    /// operations have the same shape.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_priorities(StdRng::seed_from_u64(seed))
    }
}

impl<K, V, P> Treap<K, V, P> {
    /// Generate a new, empty `Treap` that draws one priority from `priorities`
    /// for every inserted key.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_map::{ScriptedPriorities, Treap};
    ///
    /// // The second key outranks the first, so it ends up at the root.
    /// let mut tree = Treap::with_priorities(ScriptedPriorities::new(vec![10, 20]));
    /// tree.insert('a', ()).unwrap();
    /// tree.insert('b', ()).unwrap();
    ///
    /// assert_eq!(tree.priority_of(&'b').unwrap(), 20);
    /// assert_eq!(tree.left_priority(&'b').unwrap(), Some(10));
    /// ```
    pub fn with_priorities(priorities: P) -> Self {
        Self {
            root: None,
            size: 0,
            priorities,
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

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(crate::iter::Iter::new(self.root.as_deref(), self.size))
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(crate::iter::Iter::new(self.root.as_deref(), self.size))
    }
}

impl<K: PartialOrd, V, P: PrioritySource> Treap<K, V, P> {
    /// Inserts a new key with a freshly drawn priority and rotates it up
    /// past any ancestors it outranks.
    ///
    /// # Errors
    ///
    /// `DuplicateKey` if the key is already present, `InvalidKey` if it
    /// cannot be ordered. The tree is unchanged in both cases and no
    /// priority is drawn.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let priorities = &mut self.priorities;
        node::insert(&mut self.root, key, value, |key, value| {
            Box::new(Node::new(key, value, priorities.next_priority()))
        })?;
        self.size += 1;
        debug!("treap: inserted, size {}", self.size);
        Ok(())
    }
}

impl<K: PartialOrd, V, P> Treap<K, V, P> {
    /// Inserts a new key with the given priority instead of drawing one.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Treap::insert).
    pub fn insert_with_priority(&mut self, key: K, value: V, priority: u32) -> Result<()> {
        node::insert(&mut self.root, key, value, |key, value| {
            Box::new(Node::new(key, value, priority))
        })?;
        self.size += 1;
        debug!("treap: inserted with priority {}, size {}", priority, self.size);
        Ok(())
    }

    /// Replaces the value stored at an existing key and returns the old one.
    /// Neither the shape nor the priority changes.
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
    /// replaced by its predecessor, which is then rotated down below any
    /// child that outranks it.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent, `InvalidKey` if it cannot be
    /// ordered. The tree is unchanged in both cases.
    pub fn remove(&mut self, key: &K) -> Result<V> {
        let value = node::remove(&mut self.root, key)?;
        self.size -= 1;
        debug!("treap: removed, size {}", self.size);
        Ok(value)
    }

    /// The priority of the node holding `key`.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn priority_of(&self, key: &K) -> Result<u32> {
        Ok(self.find(key)?.priority)
    }

    /// The priority of the left child of the node holding `key`, if it has
    /// one.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn left_priority(&self, key: &K) -> Result<Option<u32>> {
        Ok(self.find(key)?.left().map(|n| n.priority))
    }

    /// The priority of the right child of the node holding `key`, if it has
    /// one.
    ///
    /// # Errors
    ///
    /// `KeyNotFound` if the key is absent.
    pub fn right_priority(&self, key: &K) -> Result<Option<u32>> {
        Ok(self.find(key)?.right().map(|n| n.priority))
    }

    fn find(&self, key: &K) -> Result<&Node<K, V>> {
        node::search(self.root.as_deref(), key)?.ok_or_else(|| ErrorKind::KeyNotFound.into())
    }
}

impl<K: PartialOrd, V, P: PrioritySource> OrderedMap<K, V> for Treap<K, V, P> {
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

impl<'a, K, V, P> IntoIterator for &'a Treap<K, V, P> {
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

    /// Fixed at creation. Rotations move the node but never change this.
    priority: u32,
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
            priority: self.priority,
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
            .field("priority", &self.priority)
            .field("value", &self.value)
            .field("left", &self.left.as_deref())
            .field("right", &self.right.as_deref())
            .finish()
    }
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, priority: u32) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            priority,
        }
    }
}

impl<K, V> BinaryNode for Node<K, V> {
    type Key = K;
    type Value = V;

    const STRATEGY: &'static str = "treap";

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

    /// Priorities don't depend on position so there is nothing to recompute.
    fn refresh(&mut self) {}

    /// Rotates up whichever child outranks this node, preferring the higher
    /// ranked child when both do, and then repeats the check on this node in
    /// its new position.
    ///
    /// After an insertion only the child on the insertion path can outrank
    /// its parent and the demoted node already outranks its new children, so
    /// this is a single rotation. Predecessor splicing can put a low priority
    /// node above two higher ones; then the node keeps sinking until it is
    /// below every node that outranks it.
    fn rebalance(self: Box<Self>) -> Box<Self> {
        let left = self.left().map(|n| n.priority);
        let right = self.right().map(|n| n.priority);
        let balanced = match (left, right) {
            (Some(l), r) if l > self.priority && r.map_or(true, |r| l >= r) => {
                let mut new_root = node::rotate_right(self);
                new_root.right = new_root.right.take().map(Node::rebalance);
                new_root
            }
            (_, Some(r)) if r > self.priority => {
                let mut new_root = node::rotate_left(self);
                new_root.left = new_root.left.take().map(Node::rebalance);
                new_root
            }
            _ => self,
        };

        if cfg!(debug_assertions) {
            if let Some(left) = balanced.left() {
                assert!(left.priority <= balanced.priority);
            }
            if let Some(right) = balanced.right() {
                assert!(right.priority <= balanced.priority);
            }
        }
        balanced
    }
}
