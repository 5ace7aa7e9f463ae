//! Randomized ordered maps.
//!
//! Two interchangeable structures with expected `O(log n)` insert, lookup and
//! removal over totally ordered keys, neither of which ever rebalances
//! globally:
//!
//! - [`SkipList`], a multi-level linked list whose node levels are drawn per
//!   key. Re-inserting a present key keeps the first value.
//! - [`ZipTree`], a binary search tree heap-ordered on a random rank, kept in
//!   shape by rotations on insert and zips on removal. Re-inserting a present
//!   key replaces the value.
//!
//! Both draw their randomness from a [`LevelGenerator`] owned by the
//! instance. The default [`GeometricalLevelGenerator`] supports a keyed mode,
//! where the draw is a pure function of the key, and a stream mode with one
//! evolving sequence. Keyed draws need `K: Hash`; the list always draws per
//! key, the tree only through [`ZipTree::insert_keyed`].
//!
//! ```
//! use cesium_ordmap::{SkipList, ZipTree};
//!
//! let mut list = SkipList::new();
//! list.insert(2, "two");
//! list.insert(2, "deux");
//! assert_eq!(list.get(&2), Some(&"two"));
//!
//! let mut tree = ZipTree::new();
//! tree.insert(2, "two");
//! tree.insert(2, "deux");
//! assert_eq!(tree.get(&2), Some(&"deux"));
//!
//! let mut copy = SkipList::new();
//! copy.extend_from_tree(&tree);
//! assert_eq!(copy.get(&2), Some(&"deux"));
//! ```
//!
//! Neither structure is synchronized; share them behind your own lock.

/// Validated construction parameters and their defaults.
pub mod config;
pub mod errs;
/// Geometric level and rank generation.
pub mod level_generator;
/// A probabilistic multi-level linked ordered map.
pub mod skiplist;
/// A randomized binary search tree ordered map.
pub mod ziptree;

pub use config::Config;
pub use errs::{
    Error,
    Result,
};
pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
    Seeding,
};
pub use skiplist::SkipList;
pub use ziptree::ZipTree;
