//! Arena-backed, height-balanced (AVL) trees.
//!
//! This crate provides two collections sharing a single AVL balancing core:
//!
//!   * [`AvlMap`]: an ordered map with unique keys.
//!   * [`IntervalMultiMap`]: a multi-map from half-open intervals to values,
//!     answering "which intervals contain this point?" (stabbing) queries in
//!     `O(log n + k)` time.
//!
//! Tree nodes are stored in a contiguous arena owned by each collection and
//! are linked by index rather than by pointer. Dropping or clearing a
//! collection releases every node, and every value, exactly once.
//!
//! # Example
//!
//! ```rust
//! use stabtree::{Interval, IntervalMultiMap};
//!
//! let mut t = IntervalMultiMap::new();
//! t.insert(Interval::new(0, 10), "a");
//! t.insert(Interval::new(5, 15), "b");
//! t.insert(Interval::new(10, 20), "c");
//!
//! let mut got = t.query(&10);
//! got.sort();
//! assert_eq!(got, [&"b", &"c"]);
//!
//! assert_eq!(t.remove(&Interval::new(5, 15), &"b"), Some("b"));
//! assert_eq!(t.query(&10), [&"c"]);
//! ```
//!
//! ```rust
//! use stabtree::AvlMap;
//!
//! let mut m = AvlMap::new();
//! assert!(m.insert(42, "bananas"));
//!
//! // Duplicate keys are ignored, retaining the existing value.
//! assert!(!m.insert(42, "platanos"));
//! assert_eq!(m.get(&42), Some(&"bananas"));
//! ```

mod arena;
mod avl;
mod index;
mod interval;
mod iter;
mod map;
mod node;
mod tree;

#[cfg(test)]
mod test_utils;

pub use interval::Interval;
pub use iter::Stab;
pub use map::AvlMap;
pub use tree::IntervalMultiMap;
