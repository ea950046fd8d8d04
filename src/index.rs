use std::fmt;

/// A handle to a node slot within an [`Arena`](crate::arena::Arena).
///
/// Handles are only ever held by the arena owner and the parent node that
/// links to the slot; they are never handed out to callers.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeIndex(u32);

impl NodeIndex {
    /// The largest slot index an arena may hand out.
    pub(crate) const MAX: usize = u32::MAX as usize - 1;

    #[inline]
    pub(crate) fn new(x: usize) -> Self {
        debug_assert!(x <= Self::MAX);
        Self(x as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeIndex({})", self.0)
    }
}
