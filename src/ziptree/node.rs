// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) rank: usize,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, rank: usize) -> Box<Self> {
        Box::new(Node {
            key,
            value,
            rank,
            left: None,
            right: None,
        })
    }

    /// Promotes the left child to the root of this subtree. The child's right
    /// subtree becomes the old root's left subtree.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            | Some(mut pivot) => {
                self.left = pivot.right.take();
                pivot.right = Some(self);
                pivot
            },
            | None => self,
        }
    }

    /// Mirror of [`Node::rotate_right`].
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            | Some(mut pivot) => {
                self.right = pivot.left.take();
                pivot.left = Some(self);
                pivot
            },
            | None => self,
        }
    }
}

/// Frees a subtree without recursing, so degenerate trees drop safely.
pub(crate) fn release<K, V>(link: Link<K, V>) {
    let mut stack: Vec<Box<Node<K, V>>> = link.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(link: &Link<u32, ()>) -> Option<u32> {
        link.as_ref().map(|n| n.key)
    }

    #[test]
    fn test_rotate_right() {
        //      4           2
        //     / \         / \
        //    2   5  =>   1   4
        //   / \             / \
        //  1   3           3   5
        let mut root = Node::new(4, (), 0);
        let mut pivot = Node::new(2, (), 1);
        pivot.left = Some(Node::new(1, (), 0));
        pivot.right = Some(Node::new(3, (), 0));
        root.left = Some(pivot);
        root.right = Some(Node::new(5, (), 0));

        let root = root.rotate_right();
        assert_eq!(root.key, 2);
        assert_eq!(key_of(&root.left), Some(1));
        let right = root.right.as_ref().unwrap();
        assert_eq!(right.key, 4);
        assert_eq!(key_of(&right.left), Some(3));
        assert_eq!(key_of(&right.right), Some(5));
    }

    #[test]
    fn test_rotate_left() {
        let mut root = Node::new(1, (), 0);
        let mut pivot = Node::new(3, (), 1);
        pivot.left = Some(Node::new(2, (), 0));
        root.right = Some(pivot);

        let root = root.rotate_left();
        assert_eq!(root.key, 3);
        let left = root.left.as_ref().unwrap();
        assert_eq!(left.key, 1);
        assert_eq!(key_of(&left.right), Some(2));
        assert!(root.right.is_none());
    }

    #[test]
    fn test_rotate_without_pivot() {
        let root = Node::new(1, (), 0).rotate_right().rotate_left();
        assert_eq!(root.key, 1);
    }

    #[test]
    fn test_release_chain() {
        let mut root: Link<u32, ()> = None;
        for key in 0..100_000 {
            let mut node = Node::new(key, (), 0);
            node.left = root.take();
            root = Some(node);
        }
        release(root);
    }
}
