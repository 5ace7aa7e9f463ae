// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    borrow::Borrow,
    fmt,
    hash::Hash,
    iter::FusedIterator,
};

use slab::Slab;
use tracing::{
    instrument,
    trace,
};

use super::skipnode::SkipNode;
use crate::{
    config::{
        Config,
        MAX_LEVEL_LIMIT,
    },
    errs::Result,
    level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    },
    ziptree::ZipTree,
};

/// The node a search stopped at on a given level. The head sentinel has no
/// key or value, so it is not stored in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pred {
    Head,
    Node(usize),
}

/// An ordered map over a multi-level linked list.
///
/// Lookups, insertions and removals are expected `O(log n)`. Nodes are
/// promoted to higher levels by the `LevelGenerator` `G`, which by default
/// derives the level from the key itself.
///
/// Inserting a key that is already present is a no-op: the first value
/// stays.
pub struct SkipList<K, V, G = GeometricalLevelGenerator> {
    arena: Slab<SkipNode<K, V>>,
    /// Entry points for every level up to the maximum.
    head: Vec<Option<usize>>,
    /// Highest level with a non-empty head link, 0 when empty.
    level: usize,
    generator: G,
}

impl<K, V> SkipList<K, V> {
    /// An empty list with [`Config::default`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// # Panics
    ///
    /// Panics if the configuration does not pass [`Config::validate`].
    pub fn with_config(config: Config) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid skip list config: {}", err);
        }
        Self::with_generator(GeometricalLevelGenerator::new(
            config.total(),
            config.p(),
            config.seeding(),
        ))
    }

    pub fn try_with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let generator =
            GeometricalLevelGenerator::try_new(config.total(), config.p(), config.seeding())?;
        Ok(Self::with_generator(generator))
    }
}

impl<K, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, G: LevelGenerator> SkipList<K, V, G> {
    /// An empty list with one lane per level of `generator`, capped at
    /// `MAX_LEVEL_LIMIT + 1` lanes. The lanes are allocated up front, and
    /// draws above the cap land on the top lane.
    pub fn with_generator(generator: G) -> Self {
        SkipList {
            arena: Slab::new(),
            head: vec![None; generator.total().clamp(1, MAX_LEVEL_LIMIT + 1)],
            level: 0,
            generator,
        }
    }
}

impl<K, V, G> SkipList<K, V, G> {
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// The highest level currently populated.
    pub fn level(&self) -> usize {
        self.level
    }

    /// The highest level a node can be promoted to.
    pub fn max_level(&self) -> usize {
        self.head.len() - 1
    }

    /// Number of nodes linked on `level`. This walks the lane, so it is
    /// linear in the lane's length.
    pub fn len_at_level(&self, level: usize) -> usize {
        if level > self.level {
            return 0;
        }
        let mut count = 0;
        let mut cursor = self.head[level];
        while let Some(idx) = cursor {
            count += 1;
            cursor = self.arena[idx].forward[level];
        }
        count
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.head.iter_mut().for_each(|link| *link = None);
        self.level = 0;
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.arena,
            next: self.head[0],
            remaining: self.arena.len(),
        }
    }

    fn next_of(&self, pred: Pred, level: usize) -> Option<usize> {
        match pred {
            | Pred::Head => self.head[level],
            | Pred::Node(idx) => self.arena[idx].forward[level],
        }
    }

    fn set_next(&mut self, pred: Pred, level: usize, to: Option<usize>) {
        match pred {
            | Pred::Head => self.head[level] = to,
            | Pred::Node(idx) => self.arena[idx].forward[level] = to,
        }
    }
}

impl<K: Ord, V, G> SkipList<K, V, G> {
    /// Walks down from the highest populated level, recording the last node
    /// before `key` on every level into `update`. Returns the handle of the
    /// node holding `key`, if any.
    fn search<Q>(&self, key: &Q, mut update: Option<&mut [Pred]>) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut current = Pred::Head;
        for i in (0..=self.level).rev() {
            while let Some(next) = self.next_of(current, i) {
                let next_key: &Q = self.arena[next].key.borrow();
                if next_key < key {
                    current = Pred::Node(next);
                } else {
                    break;
                }
            }
            if let Some(update) = update.as_deref_mut() {
                update[i] = current;
            }
        }

        self.next_of(current, 0).filter(|&idx| {
            let found: &Q = self.arena[idx].key.borrow();
            found == key
        })
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        self.search(key, None).map(|idx| &self.arena[idx].value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let idx = self.search(key, None)?;
        Some(&mut self.arena[idx].value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        self.search(key, None).is_some()
    }

    /// Removes `key` from every level it participates in and returns its
    /// value. Removing an absent key changes nothing.
    #[instrument(level = "trace", skip_all)]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut update = vec![Pred::Head; self.head.len()];
        let idx = self.search(key, Some(&mut update[..]))?;

        // a node is only linked on its own levels, so the first predecessor
        // that skips it marks the end of its lanes
        for (i, pred) in update.iter().enumerate().take(self.level + 1) {
            if self.next_of(*pred, i) != Some(idx) {
                break;
            }
            let next = self.arena[idx].forward[i];
            self.set_next(*pred, i, next);
        }

        let previous = self.level;
        while self.level > 0 && self.head[self.level].is_none() {
            self.level -= 1;
        }
        if self.level != previous {
            trace!(from = previous, to = self.level, "lowered list level");
        }

        Some(self.arena.remove(idx).value)
    }
}

impl<K: Ord + Hash, V, G: LevelGenerator> SkipList<K, V, G> {
    /// Inserts `key` if it is absent and returns `true`. If `key` is already
    /// present the list is left untouched, including the stored value, and
    /// `false` is returned.
    #[instrument(level = "trace", skip_all)]
    pub fn insert(&mut self, key: K, value: V) -> bool {
        // levels above the current one keep the head as their predecessor
        let mut update = vec![Pred::Head; self.head.len()];
        if self.search(&key, Some(&mut update[..])).is_some() {
            trace!("key already present, keeping the stored value");
            return false;
        }

        let new_level = self.generator.random_for(&key).min(self.max_level());
        if new_level > self.level {
            trace!(from = self.level, to = new_level, "raised list level");
            self.level = new_level;
        }

        let idx = self.arena.insert(SkipNode::new(key, value, new_level));
        for (i, pred) in update.iter().enumerate().take(new_level + 1) {
            let next = self.next_of(*pred, i);
            self.arena[idx].forward[i] = next;
            self.set_next(*pred, i, Some(idx));
        }
        true
    }

    /// Inserts every entry of `tree` in ascending key order, following this
    /// list's duplicate-key and level policy.
    pub fn extend_from_tree<T>(&mut self, tree: &ZipTree<K, V, T>)
    where
        K: Clone,
        V: Clone, {
        self.extend(tree.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K: Ord + Hash, V, G: LevelGenerator> Extend<(K, V)> for SkipList<K, V, G> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord + Hash, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = SkipList::new();
        list.extend(iter);
        list
    }
}

impl<K: fmt::Debug, V: fmt::Debug, G> fmt::Debug for SkipList<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, G> IntoIterator for &'a SkipList<K, V, G> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`SkipList`], following the level 0 lane.
pub struct Iter<'a, K, V> {
    arena: &'a Slab<SkipNode<K, V>>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let node = &arena[self.next?];
        self.next = node.forward[0];
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
