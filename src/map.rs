use std::cmp::Ordering;

use log::debug;

use crate::{
    arena::Arena,
    avl::{self, AvlNode, Links},
    index::NodeIndex,
    iter::RefIter,
};

#[derive(Debug, Clone)]
pub(crate) struct MapNode<K, V> {
    links: Links,
    key: K,
    value: V,
}

impl<K, V> MapNode<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            links: Links::default(),
            key,
            value,
        }
    }
}

impl<K, V> AvlNode for MapNode<K, V>
where
    K: Ord,
{
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// A height-balanced (AVL) ordered map with unique keys.
///
/// All nodes are held in a contiguous arena owned by the map; one node is
/// allocated per key. Lookups, inserts and removals are `O(log n)`.
///
/// # Key Ordering
///
/// The [`Ord`] implementation of `K` must be a strict total order. A
/// non-conforming implementation does not cause memory unsafety, but lookups
/// may miss and the tree may become unbalanced.
#[derive(Debug, Clone)]
pub struct AvlMap<K, V> {
    arena: Arena<MapNode<K, V>>,
    root: Option<NodeIndex>,
}

impl<K, V> Default for AvlMap<K, V> {
    fn default() -> Self {
        Self {
            arena: Arena::default(),
            root: None,
        }
    }
}

impl<K, V> AvlMap<K, V> {
    /// Construct an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct an empty map with room for `capacity` keys before the node
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// The number of keys (and nodes) in the map.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all entries, dropping every key and value.
    pub fn clear(&mut self) {
        debug!("clearing avl map with {} nodes", self.arena.len());
        self.arena.clear();
        self.root = None;
    }
}

impl<K, V> AvlMap<K, V>
where
    K: Ord,
{
    /// Insert `value` under `key`, returning true if the key was not already
    /// present.
    ///
    /// If `key` already exists, the map is left unchanged: the existing value
    /// is retained and `value` is dropped. Use [`AvlMap::get_mut()`] to update
    /// the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let (root, inserted) = insert_recurse(&mut self.arena, self.root, key, value);
        self.root = Some(root);
        inserted.is_some()
    }

    /// Remove `key` from the map, returning the value it held.
    ///
    /// Removing a key that does not exist is a no-op and returns [`None`].
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let root = self.root?;
        let (root, removed) = remove_recurse(&mut self.arena, root, key);
        self.root = root;
        removed
    }

    /// Return a reference to the value stored for `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|idx| &self.arena[idx].value)
    }

    /// Return a mutable reference to the value stored for `key`, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.find(key).map(|idx| &mut self.arena[idx].value)
    }

    /// The height of the tree, where an empty tree has height 0 and a single
    /// node tree has height 1.
    pub fn height(&self) -> usize {
        avl::height(&self.arena, self.root) as usize
    }

    /// Iterate over all `(key, value)` pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        RefIter::new(&self.arena, self.root).map(|v| (&v.key, &v.value))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    fn find(&self, key: &K) -> Option<NodeIndex> {
        let mut ptr = self.root;

        while let Some(idx) = ptr {
            let n = &self.arena[idx];
            ptr = match key.cmp(&n.key) {
                Ordering::Less => n.links.left,
                Ordering::Equal => return Some(idx),
                Ordering::Greater => n.links.right,
            };
        }

        None
    }
}

/// Insert `key` into the subtree rooted at `node`, returning the new subtree
/// root and the index of the newly allocated node (if the key was new).
fn insert_recurse<K, V>(
    arena: &mut Arena<MapNode<K, V>>,
    node: Option<NodeIndex>,
    key: K,
    value: V,
) -> (NodeIndex, Option<NodeIndex>)
where
    K: Ord,
{
    let idx = match node {
        Some(v) => v,
        None => {
            let idx = arena.alloc(MapNode::new(key, value));
            return (idx, Some(idx));
        }
    };

    let links = arena[idx].links;
    let inserted = match key.cmp(&arena[idx].key) {
        Ordering::Less => {
            let (left, inserted) = insert_recurse(arena, links.left, key, value);
            arena[idx].links.left = Some(left);
            inserted
        }
        Ordering::Greater => {
            let (right, inserted) = insert_recurse(arena, links.right, key, value);
            arena[idx].links.right = Some(right);
            inserted
        }
        // The key exists: keep the existing value.
        Ordering::Equal => return (idx, None),
    };

    match inserted {
        Some(new) => (avl::rebalance_after_insert(arena, idx, new), inserted),
        // The tree structure has not been modified, so it does not require
        // rebalancing.
        None => (idx, None),
    }
}

/// Remove `key` from the subtree rooted at `idx`, returning the new subtree
/// root (if any remains) and the removed value.
fn remove_recurse<K, V>(
    arena: &mut Arena<MapNode<K, V>>,
    idx: NodeIndex,
    key: &K,
) -> (Option<NodeIndex>, Option<V>)
where
    K: Ord,
{
    let links = arena[idx].links;
    let removed = match key.cmp(&arena[idx].key) {
        Ordering::Less => {
            let Some(left) = links.left else {
                return (Some(idx), None);
            };
            let (left, removed) = remove_recurse(arena, left, key);
            arena[idx].links.left = left;
            removed
        }
        Ordering::Greater => {
            let Some(right) = links.right else {
                return (Some(idx), None);
            };
            let (right, removed) = remove_recurse(arena, right, key);
            arena[idx].links.right = right;
            removed
        }
        Ordering::Equal => {
            let replacement = avl::unlink(arena, idx);
            let node = arena.free(idx);

            // Invariant: the freed node held the key being removed.
            debug_assert!(node.key == *key);

            return (replacement, Some(node.value));
        }
    };

    if removed.is_none() {
        return (Some(idx), None);
    }

    (Some(avl::rebalance_after_remove(arena, idx)), removed)
}
