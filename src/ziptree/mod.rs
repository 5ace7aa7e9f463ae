//! A zip tree: a binary search tree on keys that is also a max-heap on a
//! randomly drawn rank.
//!
//! Ranks come from a geometric distribution, which keeps the expected depth
//! of every key logarithmic without any global rebalancing. Insertion
//! restores heap order with rotations on the way back up; removal replaces
//! the node with the *zip* of its two subtrees.
//!
//! ```text
//!              8:3                      ranks supplied explicitly:
//!             /                         (5,2) (3,1) (8,3) (1,0) (4,1)
//!          5:2
//!         /
//!      3:1
//!     /   \
//!   1:0   4:1
//! ```
//!
//! Every operation walks the tree with an explicit stack, so an adversarial
//! sequence of explicit ranks degrades to linear time but never overflows
//! the call stack.

mod node;
mod tree;

pub use tree::{
    Iter,
    ZipTree,
};
