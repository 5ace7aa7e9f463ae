//! A skiplist implementation which allows faster random access than a standard
//! linked list.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! ```text
//! Level 2:  HEAD ────────────────► 20 ─────────────────► NIL
//! Level 1:  HEAD ────────► 10 ───► 20 ─────────► 50 ───► NIL
//! Level 0:  HEAD ──► 5 ──► 10 ───► 20 ──► 30 ──► 50 ───► NIL
//! ```
//!
//! Nodes live in a slab arena and link to each other through stable handles.
//! By default a node's level is a pure function of its key (see
//! [`Seeding::Keyed`]), so the same key set always produces the same lanes.
//! Re-inserting a key that is already present leaves the stored value alone.
//!
//! [`Seeding::Keyed`]: crate::level_generator::Seeding::Keyed

mod list;
mod skipnode;

pub use list::{
    Iter,
    SkipList,
};
