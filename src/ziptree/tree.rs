// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::Hash,
    iter::FusedIterator,
    mem,
};

use tracing::{
    instrument,
    trace,
};

use super::node::{
    release,
    Link,
    Node,
};
use crate::{
    level_generator::{
        GeometricalLevelGenerator,
        LevelGenerator,
    },
    skiplist::SkipList,
};

/// Which child of its parent a detached node came from.
#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// An ordered map over a randomized binary search tree.
///
/// Keys are kept in search-tree order and ranks in max-heap order. Ranks are
/// drawn from `G`, a stream generator by default, or supplied by the caller
/// through [`ZipTree::insert_with_rank`].
///
/// Inserting a key that is already present replaces its value; rank and
/// shape stay as they are.
pub struct ZipTree<K, V, G = GeometricalLevelGenerator> {
    root: Link<K, V>,
    len: usize,
    generator: G,
}

impl<K, V> ZipTree<K, V> {
    /// An empty tree drawing uncapped ranks from an entropy seeded stream.
    pub fn new() -> Self {
        Self::with_generator(GeometricalLevelGenerator::stream(usize::MAX))
    }
}

impl<K, V> Default for ZipTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, G> ZipTree<K, V, G> {
    pub fn with_generator(generator: G) -> Self {
        ZipTree {
            root: None,
            len: 0,
            generator,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root_rank(&self) -> Option<usize> {
        self.root.as_ref().map(|node| node.rank)
    }

    /// Number of nodes on the longest root-to-leaf path, 0 when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node<K, V>, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()]
                .into_iter()
                .flatten()
            {
                stack.push((child, depth + 1));
            }
        }
        height
    }

    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }

    /// Iterates over the entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.len)
    }
}

impl<K: Ord, V, G> ZipTree<K, V, G> {
    fn find<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut link = &self.root;
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                | Ordering::Less => link = &node.left,
                | Ordering::Greater => link = &node.right,
                | Ordering::Equal => return Some(&**node),
            }
        }
        None
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        self.find(key).map(|node| &node.value)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut node = self.root.as_deref_mut()?;
        loop {
            match key.cmp(node.key.borrow()) {
                | Ordering::Less => node = node.left.as_deref_mut()?,
                | Ordering::Greater => node = node.right.as_deref_mut()?,
                | Ordering::Equal => return Some(&mut node.value),
            }
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        self.find(key).is_some()
    }

    /// Number of edges between the root and `key`, or `None` if the key is
    /// not in the tree.
    pub fn depth<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut depth = 0;
        let mut link = &self.root;
        while let Some(node) = link {
            match key.cmp(node.key.borrow()) {
                | Ordering::Less => link = &node.left,
                | Ordering::Greater => link = &node.right,
                | Ordering::Equal => return Some(depth),
            }
            depth += 1;
        }
        None
    }

    /// Inserts `key` with an explicit `rank`, bypassing the generator.
    ///
    /// The new node is placed at the bottom of the tree and rotated up while
    /// its rank is strictly greater than its parent's. If `key` is already
    /// present, only its value is replaced and the old value is returned.
    #[instrument(level = "trace", skip_all, fields(rank = rank))]
    pub fn insert_with_rank(&mut self, key: K, value: V, rank: usize) -> Option<V> {
        // nodes on the search path are detached from their parents on the way
        // down and reattached, rotating where needed, on the way up
        let mut path: Vec<(Box<Node<K, V>>, Side)> = Vec::new();
        let mut link = self.root.take();
        let (mut subtree, previous) = loop {
            match link {
                | None => break (Node::new(key, value, rank), None),
                | Some(mut node) => match key.cmp(&node.key) {
                    | Ordering::Less => {
                        link = node.left.take();
                        path.push((node, Side::Left));
                    },
                    | Ordering::Greater => {
                        link = node.right.take();
                        path.push((node, Side::Right));
                    },
                    | Ordering::Equal => {
                        let previous = mem::replace(&mut node.value, value);
                        break (node, Some(previous));
                    },
                },
            }
        };

        let mut rotations = 0usize;
        while let Some((mut parent, side)) = path.pop() {
            let promote = subtree.rank > parent.rank;
            subtree = match side {
                | Side::Left => {
                    parent.left = Some(subtree);
                    if promote {
                        rotations += 1;
                        parent.rotate_right()
                    } else {
                        parent
                    }
                },
                | Side::Right => {
                    parent.right = Some(subtree);
                    if promote {
                        rotations += 1;
                        parent.rotate_left()
                    } else {
                        parent
                    }
                },
            };
        }
        self.root = Some(subtree);

        if previous.is_none() {
            self.len += 1;
            trace!(rotations, "inserted new key");
        }
        previous
    }

    /// Removes `key` and returns its value, replacing its node with the zip
    /// of its two subtrees. Removing an absent key changes nothing.
    #[instrument(level = "trace", skip_all)]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized, {
        let mut path: Vec<(Box<Node<K, V>>, Side)> = Vec::new();
        let mut link = self.root.take();
        let (mut subtree, removed) = loop {
            match link {
                | None => break (None, None),
                | Some(mut node) => match key.cmp(node.key.borrow()) {
                    | Ordering::Less => {
                        link = node.left.take();
                        path.push((node, Side::Left));
                    },
                    | Ordering::Greater => {
                        link = node.right.take();
                        path.push((node, Side::Right));
                    },
                    | Ordering::Equal => {
                        let Node {
                            value, left, right, ..
                        } = *node;
                        break (zip(left, right), Some(value));
                    },
                },
            }
        };

        while let Some((mut parent, side)) = path.pop() {
            match side {
                | Side::Left => parent.left = subtree,
                | Side::Right => parent.right = subtree,
            }
            subtree = Some(parent);
        }
        self.root = subtree;

        if removed.is_some() {
            self.len -= 1;
            trace!(len = self.len, "removed key");
        }
        removed
    }
}

impl<K: Ord, V, G: LevelGenerator> ZipTree<K, V, G> {
    /// Inserts `key` with the next rank of the generator's sequence. The key
    /// takes no part in the draw. See [`ZipTree::insert_with_rank`].
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let rank = self.generator.random();
        self.insert_with_rank(key, value, rank)
    }

    /// Inserts `key` with a rank the generator derives from the key, so a
    /// keyed generator hands every key the same rank across trees.
    pub fn insert_keyed(&mut self, key: K, value: V) -> Option<V>
    where
        K: Hash, {
        let rank = self.generator.random_for(&key);
        self.insert_with_rank(key, value, rank)
    }

    /// Inserts every entry of `list` in ascending key order, following this
    /// tree's overwrite and rank policy.
    pub fn extend_from_list<T>(&mut self, list: &SkipList<K, V, T>)
    where
        K: Clone,
        V: Clone, {
        self.extend(list.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Merges two subtrees where every key of `x` is less than every key of `y`.
///
/// The root with the higher rank wins, `x` on ties, and the merge carries on
/// into the winner's child facing the other subtree.
fn zip<K, V>(mut x: Link<K, V>, mut y: Link<K, V>) -> Link<K, V> {
    let mut root = None;
    let mut cursor = &mut root;
    loop {
        match (x, y) {
            | (None, rest) | (rest, None) => {
                *cursor = rest;
                return root;
            },
            | (Some(mut small), Some(mut large)) => {
                if small.rank < large.rank {
                    y = large.left.take();
                    x = Some(small);
                    cursor = &mut cursor.insert(large).left;
                } else {
                    x = small.right.take();
                    y = Some(large);
                    cursor = &mut cursor.insert(small).right;
                }
            },
        }
    }
}

impl<K: Ord, V, G: LevelGenerator> Extend<(K, V)> for ZipTree<K, V, G> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for ZipTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = ZipTree::new();
        tree.extend(iter);
        tree
    }
}

impl<K, V, G> Drop for ZipTree<K, V, G> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<K: fmt::Debug, V: fmt::Debug, G> fmt::Debug for ZipTree<K, V, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, G> IntoIterator for &'a ZipTree<K, V, G> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`ZipTree`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: &'a Link<K, V>, len: usize) -> Self {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut link: &'a Link<K, V>) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.descend_left(&node.right);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}
