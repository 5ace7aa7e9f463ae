// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

/// A node in the skip list. `forward[i]` is the arena handle of the next node
/// participating in level `i`, so a node on level `n` has `n + 1` links.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) forward: Vec<Option<usize>>,
}

impl<K, V> SkipNode<K, V> {
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        SkipNode {
            key,
            value,
            forward: vec![None; level + 1],
        }
    }

    pub(crate) fn level(&self) -> usize {
        self.forward.len() - 1
    }
}
