use proptest::prelude::*;

use crate::{
    arena::Arena,
    avl::{self, AvlNode},
    index::NodeIndex,
    interval::Interval,
};

const RANGE_MAX: usize = 20;

/// Generate arbitrary (always valid) intervals with a lower bound from
/// [0..[`RANGE_MAX`]) and a length of at least 1.
pub(crate) fn arbitrary_interval() -> impl Strategy<Value = Interval<usize>> {
    (0..RANGE_MAX, 1..RANGE_MAX).prop_map(|(start, len)| Interval::new(start, start + len))
}

/// The maximum height of an AVL tree containing `n` nodes.
///
/// The sparsest AVL tree of height `h` holds `m(h) = m(h-1) + m(h-2) + 1`
/// nodes.
pub(crate) fn max_avl_height(n: usize) -> usize {
    let (mut prev, mut cur) = (0_usize, 1_usize);
    let mut h = 0;

    while cur <= n {
        h += 1;
        (prev, cur) = (cur, cur + prev + 1);
    }

    h
}

/// Assert the AVL invariants hold for every node reachable from `root`,
/// returning the number of nodes visited.
///
///   * Left children order before their parent, right children after.
///   * Each node's height is one more than its tallest child.
///   * No node has a balance factor outside of [-1, 1].
///
pub(crate) fn validate_avl<N>(arena: &Arena<N>, root: Option<NodeIndex>) -> usize
where
    N: AvlNode,
{
    let mut stack = root.into_iter().collect::<Vec<_>>();
    let mut count = 0;

    while let Some(idx) = stack.pop() {
        count += 1;

        let n = &arena[idx];
        let links = n.links();

        if let Some(left) = links.left {
            assert!(arena[left].cmp_key(n).is_lt());
            stack.push(left);
        }
        if let Some(right) = links.right {
            assert!(arena[right].cmp_key(n).is_gt());
            stack.push(right);
        }

        let want = 1 + avl::height(arena, links.left).max(avl::height(arena, links.right));
        assert_eq!(links.height, want, "stale height at {idx:?}");
        assert!(
            avl::balance(arena, idx).abs() <= 1,
            "unbalanced node at {idx:?}"
        );
    }

    assert_eq!(count, arena.len(), "unreachable nodes in arena");

    count
}

#[test]
fn test_max_avl_height() {
    assert_eq!(max_avl_height(0), 0);
    assert_eq!(max_avl_height(1), 1);
    assert_eq!(max_avl_height(2), 2);
    assert_eq!(max_avl_height(3), 2);
    assert_eq!(max_avl_height(4), 3);
    assert_eq!(max_avl_height(7), 4);
    assert_eq!(max_avl_height(12), 5);
}
