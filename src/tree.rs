use std::cmp::Ordering;

use log::debug;

use crate::{
    arena::Arena,
    avl,
    index::NodeIndex,
    interval::Interval,
    iter::{RefIter, Stab},
    node::IntervalNode,
};

/// An interval multi-map answering point stabbing queries.
///
/// Each `(interval, value)` pair is stored in a height-balanced (AVL) tree
/// keyed by the interval's lower bound, with one tree node per distinct lower
/// bound. Within a node, values are grouped by upper bound. The same interval
/// may be inserted any number of times, with the same or different values.
///
/// Every node tracks the largest upper bound within its subtree, which allows
/// [`IntervalMultiMap::stab()`] to skip subtrees that cannot contain the query
/// point.
///
/// # Bound Ordering
///
/// The [`Ord`] implementation of `R` must be a strict total order. Floating
/// point bounds can be stored by wrapping them in a totally ordered type, or by
/// scaling them to integers.
#[derive(Debug, Clone)]
pub struct IntervalMultiMap<R, V> {
    arena: Arena<IntervalNode<R, V>>,
    root: Option<NodeIndex>,

    /// The number of `(interval, value)` pairs stored.
    len: usize,
}

impl<R, V> Default for IntervalMultiMap<R, V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<R, V> IntervalMultiMap<R, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty map with room for `capacity` distinct lower bounds
    /// before the node arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// The number of `(interval, value)` pairs in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of tree nodes, equal to the number of distinct lower bounds.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Remove all entries, dropping every stored bound and value.
    pub fn clear(&mut self) {
        debug!(
            "clearing interval map with {} nodes, {} values",
            self.arena.len(),
            self.len
        );
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }
}

impl<R, V> IntervalMultiMap<R, V>
where
    R: Ord + Clone,
{
    /// Store `value` against `interval`.
    ///
    /// Values inserted against an interval that already holds values are
    /// appended, and are yielded after them.
    pub fn insert(&mut self, interval: Interval<R>, value: V) {
        let (root, _) = insert_recurse(&mut self.arena, self.root, interval, value);
        self.root = Some(root);
        self.len += 1;
    }

    /// Remove a single instance of `value` stored against `interval`,
    /// returning it.
    ///
    /// If `value` was inserted against `interval` more than once, only the
    /// earliest instance is removed. Removing a pair that does not exist is a
    /// no-op and returns [`None`].
    pub fn remove(&mut self, interval: &Interval<R>, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let (root, removed) = remove_recurse(&mut self.arena, self.root, interval, value);
        self.root = root;

        if removed.is_some() {
            self.len -= 1;
        }

        removed
    }

    /// Append a reference to every value whose interval contains `point` to
    /// `out`.
    ///
    /// An interval `[begin, end)` contains `point` when
    /// `begin <= point < end`. Existing contents of `out` are kept.
    pub fn collect_query_values<'a>(&'a self, point: &R, out: &mut Vec<&'a V>) {
        out.extend(self.stab(point).map(|(_, v)| v));
    }

    /// Return references to every value whose interval contains `point`.
    pub fn query(&self, point: &R) -> Vec<&V> {
        let mut out = vec![];
        self.collect_query_values(point, &mut out);
        out
    }

    /// Lazily yield every `(interval, value)` pair whose interval contains
    /// `point`, ordered by lower bound, then upper bound.
    pub fn stab(&self, point: &R) -> Stab<'_, R, V> {
        Stab::new(&self.arena, self.root, point.clone())
    }

    /// Iterate over all `(interval, value)` pairs, ordered by lower bound, then
    /// upper bound.
    pub fn iter(&self) -> impl Iterator<Item = (Interval<&R>, &V)> {
        RefIter::new(&self.arena, self.root).flat_map(|n| n.entries())
    }

    /// The height of the tree, where an empty tree has height 0 and a single
    /// node tree has height 1.
    pub fn height(&self) -> usize {
        avl::height(&self.arena, self.root) as usize
    }
}

/// Insert `value` into the subtree rooted at `node`, returning the new subtree
/// root and the index of the newly allocated node (if the lower bound was new).
fn insert_recurse<R, V>(
    arena: &mut Arena<IntervalNode<R, V>>,
    node: Option<NodeIndex>,
    interval: Interval<R>,
    value: V,
) -> (NodeIndex, Option<NodeIndex>)
where
    R: Ord + Clone,
{
    let Some(idx) = node else {
        let idx = arena.alloc(IntervalNode::new(interval, value));
        return (idx, Some(idx));
    };

    let links = arena[idx].links;
    let inserted = match interval.begin.cmp(arena[idx].start()) {
        Ordering::Less => {
            let (left, inserted) = insert_recurse(arena, links.left, interval, value);
            arena[idx].links.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = insert_recurse(arena, links.right, interval, value);
            arena[idx].links.right = Some(right);
            inserted
        }
        Ordering::Equal => {
            arena[idx].push(interval.end, value);
            None
        }
    };

    match inserted {
        Some(new) => (avl::rebalance_after_insert(arena, idx, new), inserted),
        None => {
            // The structure is unchanged, but the new upper bound may extend
            // the subtree max of this node and its ancestors.
            avl::update(arena, idx);
            (idx, None)
        }
    }
}

/// Remove `value` stored against `interval` from the subtree rooted at `node`,
/// returning the new subtree root (if any remains) and the removed value.
fn remove_recurse<R, V>(
    arena: &mut Arena<IntervalNode<R, V>>,
    node: Option<NodeIndex>,
    interval: &Interval<R>,
    value: &V,
) -> (Option<NodeIndex>, Option<V>)
where
    R: Ord + Clone,
    V: PartialEq,
{
    let Some(idx) = node else {
        return (None, None);
    };

    // No interval in this subtree ends at the requested upper bound.
    if *arena[idx].subtree_max() < interval.end {
        return (Some(idx), None);
    }

    let links = arena[idx].links;
    let removed = match interval.begin.cmp(arena[idx].start()) {
        Ordering::Less => {
            let (left, removed) = remove_recurse(arena, links.left, interval, value);
            arena[idx].links.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_recurse(arena, links.right, interval, value);
            arena[idx].links.right = right;
            removed
        }
        Ordering::Equal => {
            let Some(removed) = arena[idx].remove(&interval.end, value) else {
                return (Some(idx), None);
            };

            if !arena[idx].is_empty() {
                avl::update(arena, idx);
                return (Some(idx), Some(removed));
            }

            // The node holds no more values and is removed from the tree.
            let replacement = avl::unlink(arena, idx);
            let node = arena.free(idx);
            debug_assert!(node.is_empty());

            return (replacement, Some(removed));
        }
    };

    if removed.is_none() {
        return (Some(idx), None);
    }

    (Some(avl::rebalance_after_remove(arena, idx)), removed)
}
