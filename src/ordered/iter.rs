use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::{Balance, Tree, VertexId, VertexRef};
use crate::util::Side;

/// An in-order iterator over the elements of a [`Tree`], smallest first.
///
/// Keeps a stack holding the path of vertices whose left subtree is being visited, so it never
/// recurses.
pub struct Iter<'a, T, B: Balance> {
    tree: &'a Tree<T, B>,
    stack: Vec<VertexId>,
    remaining: usize,
}

impl<'a, T, B: Balance> Iter<'a, T, B> {
    fn new(tree: &'a Tree<T, B>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root_id());
        iter
    }

    fn push_left_spine(&mut self, mut cursor: Option<VertexId>) {
        while let Some(vertex) = cursor {
            self.stack.push(vertex);
            cursor = self.tree.child(vertex, Side::Left);
        }
    }
}

impl<'a, T, B: Balance> Iterator for Iter<'a, T, B> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.stack.pop()?;
        self.push_left_spine(self.tree.child(vertex, Side::Right));
        self.remaining -= 1;
        Some(&self.tree.vertex_at(vertex).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, B: Balance> ExactSizeIterator for Iter<'a, T, B> {}
impl<'a, T, B: Balance> FusedIterator for Iter<'a, T, B> {}

impl<'a, T, B: Balance> IntoIterator for &'a Tree<T, B> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, B: Balance> Tree<T, B> {
    /// Iterates over the elements in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::AvlTree;
    ///
    /// let tree: AvlTree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter::new(self)
    }

    /// Visits every vertex level by level, left to right within a level.
    pub fn bfs<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(VertexRef<'a, T, B>),
    {
        let mut queue: VecDeque<VertexId> = self.root_id().into_iter().collect();
        while let Some(vertex) = queue.pop_front() {
            queue.extend(self.child(vertex, Side::Left));
            queue.extend(self.child(vertex, Side::Right));
            visit(VertexRef::new(self, vertex));
        }
    }

    /// Visits every vertex before its subtrees, left subtree first.
    pub fn dfs_pre_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(VertexRef<'a, T, B>),
    {
        let mut stack: Vec<VertexId> = self.root_id().into_iter().collect();
        while let Some(vertex) = stack.pop() {
            stack.extend(self.child(vertex, Side::Right));
            stack.extend(self.child(vertex, Side::Left));
            visit(VertexRef::new(self, vertex));
        }
    }

    /// Visits every vertex between its left and right subtrees, i.e. in element order.
    pub fn dfs_in_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(VertexRef<'a, T, B>),
    {
        let mut stack = Vec::new();
        let mut cursor = self.root_id();
        loop {
            while let Some(vertex) = cursor {
                stack.push(vertex);
                cursor = self.child(vertex, Side::Left);
            }
            let Some(vertex) = stack.pop() else {
                break;
            };
            visit(VertexRef::new(self, vertex));
            cursor = self.child(vertex, Side::Right);
        }
    }

    /// Visits every vertex after both of its subtrees, left subtree first.
    pub fn dfs_post_order<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(VertexRef<'a, T, B>),
    {
        // A reversed "vertex, right, left" pre-order is a "left, right, vertex" post-order.
        let mut stack: Vec<VertexId> = self.root_id().into_iter().collect();
        let mut order = Vec::with_capacity(self.len());
        while let Some(vertex) = stack.pop() {
            order.push(vertex);
            stack.extend(self.child(vertex, Side::Left));
            stack.extend(self.child(vertex, Side::Right));
        }
        for vertex in order.into_iter().rev() {
            visit(VertexRef::new(self, vertex));
        }
    }
}
