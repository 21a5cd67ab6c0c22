//! Node plumbing shared by both trees.
//!
//! Each tree owns its root as a [`Link`] and every node owns its two child
//! links, so a subtree always has exactly one owner. The recursive
//! operations here take a link, descend by key, and on the way back up ask
//! the node type to restore its own invariant through
//! [`BinaryNode::rebalance`]. Errors are only raised on the way down, before
//! anything has been moved, so a failed call never leaves a half-rebalanced
//! tree behind.

use std::cmp::Ordering;
use std::mem;

use crate::error::{ErrorKind, Result};

/// An owned, possibly empty, subtree.
pub(crate) type Link<N> = Option<Box<N>>;

/// What both balancing strategies need to expose for the shared descent,
/// rotation, and splicing code to work on them.
pub(crate) trait BinaryNode: Sized {
    type Key;
    type Value;

    /// Name used when logging rotations.
    const STRATEGY: &'static str;

    fn key(&self) -> &Self::Key;
    fn value(&self) -> &Self::Value;
    fn value_mut(&mut self) -> &mut Self::Value;
    fn into_value(self) -> Self::Value;

    fn left(&self) -> Option<&Self>;
    fn right(&self) -> Option<&Self>;
    fn left_link(&mut self) -> &mut Link<Self>;
    fn right_link(&mut self) -> &mut Link<Self>;

    /// Recomputes whatever this node derives from its children. Called on a
    /// node after its children were swapped out by a rotation.
    fn refresh(&mut self);

    /// Restores the balancing invariant at this node, assuming both children
    /// already satisfy it, and returns the new subtree root.
    fn rebalance(self: Box<Self>) -> Box<Self>;
}

/// Compares two keys, rejecting pairs that have no order.
pub(crate) fn compare<K: PartialOrd>(key: &K, other: &K) -> Result<Ordering> {
    key.partial_cmp(other)
        .ok_or_else(|| ErrorKind::InvalidKey.into())
}

/// A key is usable only if it is ordered against itself. This rejects things
/// like `f64::NAN` before they reach the tree.
pub(crate) fn validate<K: PartialOrd>(key: &K) -> Result<()> {
    match key.partial_cmp(key) {
        Some(Ordering::Equal) => Ok(()),
        _ => Err(ErrorKind::InvalidKey.into()),
    }
}

/// Finds the node holding `key`, if any.
pub(crate) fn search<'a, N>(mut link: Option<&'a N>, key: &N::Key) -> Result<Option<&'a N>>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    validate(key)?;
    while let Some(node) = link {
        link = match compare(key, node.key())? {
            Ordering::Less => node.left(),
            Ordering::Equal => return Ok(Some(node)),
            Ordering::Greater => node.right(),
        };
    }
    Ok(None)
}

/// Mutable version of [`search`].
pub(crate) fn search_mut<'a, N>(mut link: &'a mut Link<N>, key: &N::Key) -> Result<Option<&'a mut N>>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    validate(key)?;
    while let Some(node) = link {
        match compare(key, node.key())? {
            Ordering::Less => link = node.left_link(),
            Ordering::Equal => return Ok(Some(&mut **node)),
            Ordering::Greater => link = node.right_link(),
        }
    }
    Ok(None)
}

/// Replaces the value stored at `key`, returning the old one.
pub(crate) fn replace<N>(root: &mut Link<N>, key: &N::Key, value: N::Value) -> Result<N::Value>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    match search_mut(root, key)? {
        Some(node) => Ok(mem::replace(node.value_mut(), value)),
        None => Err(ErrorKind::KeyNotFound.into()),
    }
}

/// Inserts a new leaf built by `make` and rebalances every ancestor on the
/// way back up. `make` is only called once the key is known to be absent.
pub(crate) fn insert<N, F>(root: &mut Link<N>, key: N::Key, value: N::Value, make: F) -> Result<()>
where
    N: BinaryNode,
    N::Key: PartialOrd,
    F: FnOnce(N::Key, N::Value) -> Box<N>,
{
    validate(&key)?;
    insert_at(root, key, value, make)
}

fn insert_at<N, F>(link: &mut Link<N>, key: N::Key, value: N::Value, make: F) -> Result<()>
where
    N: BinaryNode,
    N::Key: PartialOrd,
    F: FnOnce(N::Key, N::Value) -> Box<N>,
{
    match link {
        None => {
            *link = Some(make(key, value));
            return Ok(());
        }
        Some(node) => match compare(&key, node.key())? {
            Ordering::Less => insert_at(node.left_link(), key, value, make)?,
            Ordering::Equal => return Err(ErrorKind::DuplicateKey.into()),
            Ordering::Greater => insert_at(node.right_link(), key, value, make)?,
        },
    }
    rebalance(link);
    Ok(())
}

/// Removes the node holding `key` and rebalances every ancestor on the way
/// back up.
pub(crate) fn remove<N>(root: &mut Link<N>, key: &N::Key) -> Result<N::Value>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    validate(key)?;
    remove_at(root, key)
}

fn remove_at<N>(link: &mut Link<N>, key: &N::Key) -> Result<N::Value>
where
    N: BinaryNode,
    N::Key: PartialOrd,
{
    let value = match link {
        None => return Err(ErrorKind::KeyNotFound.into()),
        Some(node) => match compare(key, node.key())? {
            Ordering::Less => remove_at(node.left_link(), key)?,
            Ordering::Greater => remove_at(node.right_link(), key)?,
            Ordering::Equal => {
                let target = link.take().expect("Matched node is present");
                let (replacement, value) = splice(target);
                *link = replacement;
                value
            }
        },
    };
    rebalance(link);
    Ok(value)
}

/// Unlinks `target` from its children and returns what should take its
/// place along with its value.
///
/// With two children the replacement is the predecessor (the largest node of
/// the left subtree). It is first detached from the left subtree, which is
/// rebalanced on the way, and then given `target`'s remaining left subtree and
/// untouched right subtree. The caller rebalances the replacement itself.
fn splice<N: BinaryNode>(mut target: Box<N>) -> (Link<N>, N::Value) {
    let replacement = match (target.left_link().take(), target.right_link().take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (rest, mut predecessor) = detach_max(left);
            *predecessor.left_link() = rest;
            *predecessor.right_link() = Some(right);
            Some(predecessor)
        }
    };
    (replacement, (*target).into_value())
}

/// Splits the largest node off of a subtree. Returns the rebalanced remainder
/// and the detached node, whose own links are left for the caller to set.
fn detach_max<N: BinaryNode>(mut node: Box<N>) -> (Link<N>, Box<N>) {
    match node.right_link().take() {
        None => {
            let rest = node.left_link().take();
            (rest, node)
        }
        Some(right) => {
            let (rest, max) = detach_max(right);
            *node.right_link() = rest;
            (Some(node.rebalance()), max)
        }
    }
}

/// Rebalances the subtree in `link` in place.
fn rebalance<N: BinaryNode>(link: &mut Link<N>) {
    if let Some(node) = link.take() {
        *link = Some(node.rebalance());
    }
}

/// Rotate `old_root` to the right. This moves the left child up vertically and `old_root` down
/// vertically. As such, it must only be called when there _is_ a left child.
///
/// ## Panics
///
/// When called on a node without a left child.
///
/// # Diagram
///
/// ```text
///      old_root              new_root
///       /     \              /     \
///   new_root   z   rotate ->  x    old_root
///    /  \                           /  \
///   x    y                         y    z
/// ```
pub(crate) fn rotate_right<N: BinaryNode>(mut old_root: Box<N>) -> Box<N> {
    let mut new_root = old_root.left_link().take().expect("Rotate right => left child");
    *old_root.left_link() = new_root.right_link().take();
    // The demoted node is now a child of `new_root` so it has to be fixed first.
    old_root.refresh();
    *new_root.right_link() = Some(old_root);
    new_root.refresh();

    trace!("{}: rotated right", N::STRATEGY);
    new_root
}

/// Mirror of [`rotate_right`]: moves the right child up.
///
/// ## Panics
///
/// When called on a node without a right child.
pub(crate) fn rotate_left<N: BinaryNode>(mut old_root: Box<N>) -> Box<N> {
    let mut new_root = old_root.right_link().take().expect("Rotate left => right child");
    *old_root.right_link() = new_root.left_link().take();
    old_root.refresh();
    *new_root.left_link() = Some(old_root);
    new_root.refresh();

    trace!("{}: rotated left", N::STRATEGY);
    new_root
}
