use std::{collections::btree_map, fmt::Debug, slice};

use crate::{arena::Arena, index::NodeIndex, interval::Interval, node::IntervalNode};

/// An [`Iterator`] yielding every interval (and its value) that contains a
/// query point.
///
/// Intervals are yielded ordered by their lower bound, then by their upper
/// bound. Values sharing an interval are yielded in insertion order.
///
/// Subtrees whose maximum upper bound does not exceed the query point are
/// never visited, and neither is the right subtree of any node with a lower
/// bound greater than or equal to the point.
///
/// Returned by [`IntervalMultiMap::stab()`](crate::IntervalMultiMap::stab).
pub struct Stab<'a, R, V> {
    arena: &'a Arena<IntervalNode<R, V>>,
    point: R,

    /// Nodes left to visit, the next to be visited last.
    stack: Vec<NodeIndex>,

    /// The upper bounds of the node currently being yielded from, and the
    /// lower bound they share.
    ends: Option<(&'a R, btree_map::Range<'a, R, Vec<V>>)>,

    /// The values of the interval currently being yielded from.
    bucket: Option<(Interval<&'a R>, slice::Iter<'a, V>)>,
}

impl<R, V> Debug for Stab<'_, R, V>
where
    R: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stab")
            .field("point", &self.point)
            .field("stack", &self.stack)
            .finish_non_exhaustive()
    }
}

impl<'a, R, V> Stab<'a, R, V>
where
    R: Ord,
{
    pub(crate) fn new(
        arena: &'a Arena<IntervalNode<R, V>>,
        root: Option<NodeIndex>,
        point: R,
    ) -> Self {
        let mut this = Self {
            arena,
            point,
            stack: vec![],
            ends: None,
            bucket: None,
        };

        this.push_subtree(root);

        this
    }

    /// Push the left spine of `subtree_root`, stopping at the first subtree
    /// that ends at or before the query point.
    fn push_subtree(&mut self, subtree_root: Option<NodeIndex>) {
        let mut ptr = subtree_root;

        while let Some(idx) = ptr {
            let n = &self.arena[idx];
            if &self.point >= n.subtree_max() {
                break;
            }

            self.stack.push(idx);
            ptr = n.links.left;
        }
    }

    /// Pop nodes until one holding intervals that may contain the point is
    /// found, returning its lower bound and its upper bounds after the point.
    fn next_node(&mut self) -> Option<(&'a R, btree_map::Range<'a, R, Vec<V>>)> {
        let arena = self.arena;

        loop {
            let n = &arena[self.stack.pop()?];

            // This node, and the entire right subtree, begin after the point.
            if n.start() > &self.point {
                continue;
            }

            // Intervals in the right subtree begin after this node, and
            // containment is inclusive of the lower bound, so only descend
            // right when a later start can still be <= point.
            if n.start() < &self.point {
                self.push_subtree(n.links.right);
            }

            return Some((n.start(), n.ends_after(&self.point)));
        }
    }
}

impl<'a, R, V> Iterator for Stab<'a, R, V>
where
    R: Ord,
{
    type Item = (Interval<&'a R>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((interval, values)) = &mut self.bucket {
                if let Some(v) = values.next() {
                    return Some((*interval, v));
                }
                self.bucket = None;
            }

            if let Some((start, ends)) = &mut self.ends {
                if let Some((end, values)) = ends.next() {
                    let interval = Interval { begin: *start, end };
                    self.bucket = Some((interval, values.iter()));
                    continue;
                }
                self.ends = None;
            }

            self.ends = Some(self.next_node()?);
        }
    }
}
