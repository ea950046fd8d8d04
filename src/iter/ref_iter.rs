use crate::{arena::Arena, avl::AvlNode, index::NodeIndex};

/// An in-order walk over every node reachable from a subtree root.
#[derive(Debug)]
pub(crate) struct RefIter<'a, N> {
    arena: &'a Arena<N>,
    stack: Vec<NodeIndex>,
}

impl<'a, N> RefIter<'a, N>
where
    N: AvlNode,
{
    pub(crate) fn new(arena: &'a Arena<N>, root: Option<NodeIndex>) -> Self {
        let mut this = Self {
            arena,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        this.push_subtree(root);

        this
    }

    fn push_subtree(&mut self, subtree_root: Option<NodeIndex>) {
        let mut ptr = subtree_root;

        while let Some(idx) = ptr {
            self.stack.push(idx);
            ptr = self.arena[idx].links().left;
        }
    }
}

impl<'a, N> Iterator for RefIter<'a, N>
where
    N: AvlNode,
{
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let v = &self.arena[idx];

        // Descend down the left side of the right hand child of this node, if
        // any.
        self.push_subtree(v.links().right);

        Some(v)
    }
}
