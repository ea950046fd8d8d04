use std::{
    cmp::Ordering,
    collections::{btree_map, BTreeMap},
    ops::Bound,
};

use crate::{
    arena::Arena,
    avl::{AvlNode, Links},
    index::NodeIndex,
    interval::Interval,
};

/// A node of an [`IntervalMultiMap`], holding every interval that shares the
/// lower bound `start`.
///
/// [`IntervalMultiMap`]: crate::IntervalMultiMap
#[derive(Debug, Clone)]
pub(crate) struct IntervalNode<R, V> {
    pub(crate) links: Links,

    /// The lower bound shared by all intervals in this node, and the search
    /// key of the tree.
    start: R,

    /// The maximum upper bound of all intervals for the subtree rooted at this
    /// [`IntervalNode`].
    subtree_max: R,

    /// Values keyed by the upper bound of the interval they were inserted
    /// with.
    ///
    /// Never empty while the node is linked into a tree.
    ends: BTreeMap<R, Vec<V>>,
}

impl<R, V> IntervalNode<R, V>
where
    R: Clone,
{
    pub(crate) fn new(interval: Interval<R>, value: V) -> Self
    where
        R: Ord,
    {
        Self {
            links: Links::default(),
            subtree_max: interval.end.clone(),
            start: interval.begin,
            ends: BTreeMap::from([(interval.end, vec![value])]),
        }
    }
}

impl<R, V> IntervalNode<R, V> {
    pub(crate) fn start(&self) -> &R {
        &self.start
    }

    pub(crate) fn subtree_max(&self) -> &R {
        &self.subtree_max
    }

    /// Returns true when the node holds no values and must be unlinked.
    pub(crate) fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// The number of values held across all upper bounds.
    #[cfg(test)]
    pub(crate) fn value_count(&self) -> usize {
        self.ends.values().map(Vec::len).sum()
    }

    /// All `(interval, value)` pairs held by this node, ordered by upper bound.
    pub(crate) fn entries(&self) -> impl Iterator<Item = (Interval<&R>, &V)> {
        self.ends.iter().flat_map(move |(end, values)| {
            values.iter().map(move |v| {
                let interval = Interval {
                    begin: &self.start,
                    end,
                };
                (interval, v)
            })
        })
    }
}

impl<R, V> IntervalNode<R, V>
where
    R: Ord,
{
    /// Add `value` under the upper bound `end`.
    pub(crate) fn push(&mut self, end: R, value: V) {
        self.ends.entry(end).or_default().push(value);
    }

    /// Remove a single instance of `value` stored under the upper bound `end`,
    /// dropping the bound entirely once it holds no values.
    pub(crate) fn remove(&mut self, end: &R, value: &V) -> Option<V>
    where
        V: PartialEq,
    {
        let bucket = self.ends.get_mut(end)?;
        let pos = bucket.iter().position(|v| v == value)?;
        let v = bucket.remove(pos);

        if bucket.is_empty() {
            self.ends.remove(end);
        }

        Some(v)
    }

    /// The upper bounds in this node that lie strictly after `point`, and
    /// their values.
    ///
    /// Every interval in this node contains `point` when `start <= point` and
    /// it is yielded here.
    pub(crate) fn ends_after<'a>(&'a self, point: &R) -> btree_map::Range<'a, R, Vec<V>> {
        self.ends
            .range::<R, _>((Bound::Excluded(point), Bound::Unbounded))
    }
}

impl<R, V> AvlNode for IntervalNode<R, V>
where
    R: Ord + Clone,
{
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.start.cmp(&other.start)
    }

    /// Set the subtree max of the node at `idx` to the largest of its own
    /// upper bounds and the subtree max of each child.
    fn refresh(arena: &mut Arena<Self>, idx: NodeIndex) {
        let n = &arena[idx];

        let new_max = [n.links.left, n.links.right]
            .into_iter()
            .flatten()
            .map(|v| arena[v].subtree_max())
            .chain(n.ends.keys().next_back())
            .max()
            .cloned();

        if let Some(new_max) = new_max {
            arena[idx].subtree_max = new_max;
        }
    }
}
