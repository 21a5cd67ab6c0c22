//! Lazy in-order traversal shared by both trees.
//!
//! The walk keeps an explicit stack of the ancestors still to be visited, so
//! it does `O(height)` work up front and amortized `O(1)` per step. Every call
//! to `keys`/`iter` on a map starts a fresh walk.

use std::fmt;
use std::iter::FusedIterator;

use crate::node::BinaryNode;

pub(crate) struct Iter<'a, N> {
    stack: Vec<&'a N>,
    remaining: usize,
}

impl<'a, N> Clone for Iter<'a, N> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, N: BinaryNode> Iter<'a, N> {
    pub(crate) fn new(root: Option<&'a N>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Pushes `link` and all of its left descendants. The last one pushed is
    /// the smallest key not yet visited.
    fn push_left_spine(&mut self, mut link: Option<&'a N>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a, N: BinaryNode> Iterator for Iter<'a, N> {
    type Item = (&'a N::Key, &'a N::Value);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N: BinaryNode> ExactSizeIterator for Iter<'a, N> {}
impl<'a, N: BinaryNode> FusedIterator for Iter<'a, N> {}

/// Writes entries as `{k1: v1, k2: v2}`.
pub(crate) fn fmt_entries<'a, K, V, I>(entries: I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    f.write_str("{")?;
    for (i, (key, value)) in entries.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    f.write_str("}")
}

/// Declares the public `Keys` and `Iter` iterators of a tree module as thin
/// wrappers around [`Iter`] over that module's node type.
macro_rules! tree_iterators {
    ($node:ident) => {
        /// An iterator over the keys of a map, in ascending order.
        ///
        /// This `struct` is created by the `keys` method on the map.
        pub struct Keys<'a, K, V>(crate::iter::Iter<'a, $node<K, V>>);

        impl<'a, K, V> Clone for Keys<'a, K, V> {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<'a, K, V> Iterator for Keys<'a, K, V> {
            type Item = &'a K;

            fn next(&mut self) -> Option<&'a K> {
                self.0.next().map(|(key, _)| key)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}
        impl<'a, K, V> ::std::iter::FusedIterator for Keys<'a, K, V> {}

        /// An iterator over the entries of a map, in ascending key order.
        ///
        /// This `struct` is created by the `iter` method on the map.
        pub struct Iter<'a, K, V>(crate::iter::Iter<'a, $node<K, V>>);

        impl<'a, K, V> Clone for Iter<'a, K, V> {
            fn clone(&self) -> Self {
                Self(self.0.clone())
            }
        }

        impl<'a, K, V> Iterator for Iter<'a, K, V> {
            type Item = (&'a K, &'a V);

            fn next(&mut self) -> Option<(&'a K, &'a V)> {
                self.0.next()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
        impl<'a, K, V> ::std::iter::FusedIterator for Iter<'a, K, V> {}
    };
}
