//! This crate exposes two self-balancing Binary Search Trees (BSTs) behind
//! one ordered-map contract, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! a key, the value associated with it, and will sometimes have child
//! `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`, so both trees here keep their height at
//! `O(lg N)`:
//!
//! - [`AvlTree`] keeps the heights of every node's subtrees within one of
//!   each other. The bound is guaranteed.
//! - [`Treap`] gives every node a random priority and keeps the priorities in
//!   max-heap order. The bound holds in expectation whatever the insertion
//!   order.
//!
//! Both restore their invariant with the same two rotations and remove a
//! node with two children by splicing in its predecessor (the largest key of
//! its left subtree). They only differ in what drives the rotations.
//!
//! # Examples
//!
//! ```
//! use balanced_map::{AvlTree, ErrorKind, OrderedMap, Treap};
//!
//! fn fill<M: OrderedMap<i32, &'static str>>(map: &mut M) {
//!     map.insert(2, "two").unwrap();
//!     map.insert(1, "one").unwrap();
//!     map.insert(3, "three").unwrap();
//! }
//!
//! let mut avl = AvlTree::new();
//! let mut treap = Treap::with_seed(7);
//! fill(&mut avl);
//! fill(&mut treap);
//!
//! assert_eq!(avl.keys().collect::<Vec<_>>(), treap.keys().collect::<Vec<_>>());
//! assert!(matches!(avl.insert(1, "uno").unwrap_err().kind(), ErrorKind::DuplicateKey));
//! assert_eq!(treap.remove(&2).unwrap(), "two");
//! assert_eq!(treap.to_string(), "{1: one, 3: three}");
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

#[macro_use]
mod iter;
mod node;

pub mod avl;
pub mod error;
pub mod map;
pub mod priority;
pub mod treap;

pub use avl::AvlTree;
pub use error::{Error, ErrorKind, Result};
pub use map::OrderedMap;
pub use priority::{PrioritySource, ScriptedPriorities};
pub use treap::Treap;
