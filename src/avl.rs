//! The height-balancing core shared by [`AvlMap`] and [`IntervalMultiMap`].
//!
//! All functions operate on subtrees stored in an [`Arena`], addressed by the
//! [`NodeIndex`] of the subtree root, and return the index of the (possibly
//! new) subtree root for the caller to store in the parent's child slot.
//!
//! [`AvlMap`]: crate::AvlMap
//! [`IntervalMultiMap`]: crate::IntervalMultiMap

use std::cmp::Ordering;

use log::trace;

use crate::{arena::Arena, index::NodeIndex};

/// Child pointers and AVL height embedded in every tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) left: Option<NodeIndex>,
    pub(crate) right: Option<NodeIndex>,

    /// The node's AVL height.
    ///
    /// A leaf has a height of 1, an absent child a height of 0.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree of up to 5.78*10⁷⁶ entries.
    pub(crate) height: u8,
}

impl Default for Links {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// A node type that can be balanced by the functions in this module.
pub(crate) trait AvlNode: Sized {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;

    /// Order the search key of `self` against the search key of `other`.
    fn cmp_key(&self, other: &Self) -> Ordering;

    /// Recompute any per-subtree augmentation of the node at `idx` from its
    /// own payload and its (already up-to-date) children.
    fn refresh(_arena: &mut Arena<Self>, _idx: NodeIndex) {}
}

pub(crate) fn height<N>(arena: &Arena<N>, n: Option<NodeIndex>) -> u8
where
    N: AvlNode,
{
    n.map(|v| arena[v].links().height).unwrap_or_default()
}

/// Compute the "balance factor" of the subtree rooted at `idx`.
///
/// Returns the subtree height skew, which is a negative number when left
/// heavy, and a positive number when right heavy.
pub(crate) fn balance<N>(arena: &Arena<N>, idx: NodeIndex) -> i8
where
    N: AvlNode,
{
    let links = arena[idx].links();

    // Correctness: the height is a u8, the maximal value of which fits in an
    // i16 without truncation or sign inversion.
    (height(arena, links.right) as i16 - height(arena, links.left) as i16) as i8
}

/// Recompute the height and augmentation of the node at `idx`.
pub(crate) fn update<N>(arena: &mut Arena<N>, idx: NodeIndex)
where
    N: AvlNode,
{
    let links = arena[idx].links();
    let h = 1 + height(arena, links.left).max(height(arena, links.right));
    arena[idx].links_mut().height = h;

    N::refresh(arena, idx);
}

/// Left rotate the given subtree rooted at `x` around the pivot point `P`,
/// returning the index of `P`.
///
/// ```text
///
///      x
///     / \                               P
///    1   P         Rotate Left        /   \
///       / \      --------------->    x     y
///      2   y                        / \   / \
///         / \                      1   2 3   4
///        3   4
/// ```
///
/// # Panics
///
/// Panics if `x` has no right child (cannot be rotated).
pub(crate) fn rotate_left<N>(arena: &mut Arena<N>, x: NodeIndex) -> NodeIndex
where
    N: AvlNode,
{
    let p = arena[x]
        .links()
        .right
        .expect("left rotation requires a right child");

    let moved = arena[p].links_mut().left.replace(x);
    arena[x].links_mut().right = moved;

    // x is now a child of p, and must be updated first.
    update(arena, x);
    update(arena, p);

    p
}

/// Right rotate the given subtree rooted at `y` around the pivot point `P`,
/// returning the index of `P`.
///
/// ```text
///          y
///         / \                           P
///        P   4     Rotate Right       /   \
///       / \      --------------->    x     y
///      x   3                        / \   / \
///     / \                          1   2 3   4
///    1   2
/// ```
///
/// # Panics
///
/// Panics if `y` has no left child (cannot be rotated).
pub(crate) fn rotate_right<N>(arena: &mut Arena<N>, y: NodeIndex) -> NodeIndex
where
    N: AvlNode,
{
    let p = arena[y]
        .links()
        .left
        .expect("right rotation requires a left child");

    let moved = arena[p].links_mut().right.replace(y);
    arena[y].links_mut().left = moved;

    update(arena, y);
    update(arena, p);

    p
}

/// Update the node at `idx` after the node at `inserted` was added to one of
/// its subtrees, and rebalance if necessary.
///
/// The rotation case is chosen by comparing the inserted key against the key
/// of the child on the heavy side.
pub(crate) fn rebalance_after_insert<N>(
    arena: &mut Arena<N>,
    idx: NodeIndex,
    inserted: NodeIndex,
) -> NodeIndex
where
    N: AvlNode,
{
    update(arena, idx);

    let links = *arena[idx].links();
    let root = match balance(arena, idx) {
        // Left-heavy
        ..=-2 => {
            let left = links.left.expect("left-heavy node has a left child");
            match arena[inserted].cmp_key(&arena[left]) {
                Ordering::Less => {
                    trace!("insert rebalance: left-left at {idx:?}");
                    rotate_right(arena, idx)
                }
                Ordering::Greater => {
                    trace!("insert rebalance: left-right at {idx:?}");
                    let left = rotate_left(arena, left);
                    arena[idx].links_mut().left = Some(left);
                    rotate_right(arena, idx)
                }
                Ordering::Equal => unreachable!("inserted leaf cannot unbalance its parent"),
            }
        }
        // Right-heavy
        2.. => {
            let right = links.right.expect("right-heavy node has a right child");
            match arena[inserted].cmp_key(&arena[right]) {
                Ordering::Greater => {
                    trace!("insert rebalance: right-right at {idx:?}");
                    rotate_left(arena, idx)
                }
                Ordering::Less => {
                    trace!("insert rebalance: right-left at {idx:?}");
                    let right = rotate_right(arena, right);
                    arena[idx].links_mut().right = Some(right);
                    rotate_left(arena, idx)
                }
                Ordering::Equal => unreachable!("inserted leaf cannot unbalance its parent"),
            }
        }
        -1..=1 => idx,
    };

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1.
    debug_assert!(balance(arena, root).abs() <= 1);

    root
}

/// Update the node at `idx` after a node was unlinked from one of its
/// subtrees, and rebalance if necessary.
///
/// With no inserted key to compare against, the rotation case is chosen by
/// the balance factor of the child on the heavy side.
pub(crate) fn rebalance_after_remove<N>(arena: &mut Arena<N>, idx: NodeIndex) -> NodeIndex
where
    N: AvlNode,
{
    update(arena, idx);

    let links = *arena[idx].links();
    let root = match balance(arena, idx) {
        ..=-2 => {
            let left = links.left.expect("left-heavy node has a left child");
            if balance(arena, left) <= 0 {
                trace!("remove rebalance: left-left at {idx:?}");
                rotate_right(arena, idx)
            } else {
                trace!("remove rebalance: left-right at {idx:?}");
                let left = rotate_left(arena, left);
                arena[idx].links_mut().left = Some(left);
                rotate_right(arena, idx)
            }
        }
        2.. => {
            let right = links.right.expect("right-heavy node has a right child");
            if balance(arena, right) >= 0 {
                trace!("remove rebalance: right-right at {idx:?}");
                rotate_left(arena, idx)
            } else {
                trace!("remove rebalance: right-left at {idx:?}");
                let right = rotate_right(arena, right);
                arena[idx].links_mut().right = Some(right);
                rotate_left(arena, idx)
            }
        }
        -1..=1 => idx,
    };

    // Invariant: the absolute difference between tree heights ("balance
    // factor") cannot exceed 1 after removing a value.
    debug_assert!(balance(arena, root).abs() <= 1);

    root
}

/// Detach the minimum (left-most) node from the subtree rooted at `root`.
///
/// Returns the new root of the remaining subtree (if any) and the index of the
/// detached node. The detached node has no children on return, and the
/// remaining subtree is rebalanced along the descent path.
pub(crate) fn extract_min<N>(
    arena: &mut Arena<N>,
    root: NodeIndex,
) -> (Option<NodeIndex>, NodeIndex)
where
    N: AvlNode,
{
    match arena[root].links().left {
        Some(left) => {
            let (left, min) = extract_min(arena, left);
            arena[root].links_mut().left = left;
            (Some(rebalance_after_remove(arena, root)), min)
        }
        None => {
            // The root is the end of the left edge. Its right subtree (if any)
            // takes its place.
            let right = arena[root].links_mut().right.take();
            (right, root)
        }
    }
}

/// Detach the node at `idx` from its children, returning the root of the
/// subtree that must replace it in the parent.
///
/// The node itself stays allocated (with no children) for the caller to free.
///
/// This node may have 0, 1 or 2 child node(s):
///
/// ```text
///                          +----------+
///                          |  parent  |
///                          +----------+
///                                |
///                                v
///                          +----------+
///                     +----|   idx    |----+
///                     |    +----------+    |
///                     |                    |
///                     v                    v
///               +-----------+       +------------+
///               |   left    |       |   right    |
///               +-----------+       +------------+
/// ```
///
/// With a single child, the child replaces the node. With two children, the
/// in-order successor (the minimum of the right subtree) is detached and
/// moved into the vacated position, taking over both subtrees.
pub(crate) fn unlink<N>(arena: &mut Arena<N>, idx: NodeIndex) -> Option<NodeIndex>
where
    N: AvlNode,
{
    let links = arena[idx].links_mut();
    let (left, right) = (links.left.take(), links.right.take());

    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(left), Some(right)) => {
            let (right, successor) = extract_min(arena, right);

            let links = arena[successor].links_mut();
            debug_assert!(links.left.is_none());
            debug_assert!(links.right.is_none());

            links.left = Some(left);
            links.right = right;

            Some(rebalance_after_remove(arena, successor))
        }
    }
}
