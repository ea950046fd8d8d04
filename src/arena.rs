use std::ops::{Index, IndexMut};

use crate::index::NodeIndex;

#[derive(Debug, Clone)]
enum Slot<N> {
    Occupied(N),
    /// An unused slot, linking to the next vacant slot (if any).
    Vacant(Option<NodeIndex>),
}

/// A contiguous store of tree nodes addressed by [`NodeIndex`].
///
/// Freed slots are chained into a free list and reused by later allocations,
/// so a tree that sees churn does not grow without bound.
///
/// The arena is the sole owner of every node. Dropping (or clearing) the arena
/// drops each live node exactly once.
#[derive(Debug, Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Slot<N>>,

    /// Head of the vacant slot list.
    free: Option<NodeIndex>,

    /// Number of occupied slots.
    len: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<N> Arena<N> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: None,
            len: 0,
        }
    }

    /// Store `node`, returning the handle to its slot.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds the maximum number of nodes
    /// addressable by a [`NodeIndex`].
    pub(crate) fn alloc(&mut self, node: N) -> NodeIndex {
        self.len += 1;

        if let Some(idx) = self.free {
            let slot = &mut self.slots[idx.index()];
            self.free = match slot {
                Slot::Vacant(next) => *next,
                Slot::Occupied(_) => unreachable!("free list links occupied slot"),
            };
            *slot = Slot::Occupied(node);
            return idx;
        }

        assert!(
            self.slots.len() <= NodeIndex::MAX,
            "reached maximum number of nodes"
        );

        let idx = NodeIndex::new(self.slots.len());
        self.slots.push(Slot::Occupied(node));
        idx
    }

    /// Release the slot at `idx`, returning ownership of the node it held.
    ///
    /// # Panics
    ///
    /// Panics if `idx` does not refer to a live node.
    pub(crate) fn free(&mut self, idx: NodeIndex) -> N {
        let slot = std::mem::replace(&mut self.slots[idx.index()], Slot::Vacant(self.free));
        match slot {
            Slot::Occupied(node) => {
                self.free = Some(idx);
                self.len -= 1;
                node
            }
            Slot::Vacant(_) => panic!("double free of {idx:?}"),
        }
    }

    /// The number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Drop all nodes and reset the free list.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<N> Index<NodeIndex> for Arena<N> {
    type Output = N;

    fn index(&self, idx: NodeIndex) -> &Self::Output {
        match &self.slots[idx.index()] {
            Slot::Occupied(v) => v,
            Slot::Vacant(_) => panic!("access to vacant slot {idx:?}"),
        }
    }
}

impl<N> IndexMut<NodeIndex> for Arena<N> {
    fn index_mut(&mut self, idx: NodeIndex) -> &mut Self::Output {
        match &mut self.slots[idx.index()] {
            Slot::Occupied(v) => v,
            Slot::Vacant(_) => panic!("access to vacant slot {idx:?}"),
        }
    }
}
