//! The ordered-tree engine every tree in this crate is built on.
//!
//! A [`Tree`] stores its vertices in an arena and links them with [`VertexId`]s, so parent
//! back-references are plain indices instead of pointers. The engine knows how to search, insert
//! a new leaf, splice out a vertex with at most one child, and rotate. What happens *after* one of
//! those structural edits is up to the tree's [`Balance`] strategy:
//!
//! * [`Unbalanced`] does nothing. The tree is a plain Binary Search Tree whose shape depends on
//!   insertion order.
//! * [`Avl`][crate::avl::Avl] keeps subtree heights and rotates whenever a vertex's children
//!   differ in height by more than one.
//! * [`RedBlack`][crate::red_black::RedBlack] colors vertices and recolors/rotates to keep every
//!   root-to-leaf path with the same number of black vertices.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::ordered::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.search(&1).is_none());
//!
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.len(), 3);
//! assert_eq!(tree.root().map(|root| *root.element()), Ok(2));
//!
//! // Deleting an element returns it.
//! assert_eq!(tree.delete(&2), Some(2));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

mod fmt;
mod iter;
mod vertex;

pub use iter::Iter;
pub use vertex::{VertexId, VertexRef};

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::mem;

use log::{debug, trace};
use slab::Slab;

use crate::error::TreeError;
use crate::util::Side;
use crate::validate::{self, Violation};

/// A plain Binary Search Tree. Its shape is whatever the insertion order makes it.
pub type OrderedTree<T> = Tree<T, Unbalanced>;

/// A balancing discipline plugged into a [`Tree`].
///
/// The engine performs every structural edit itself and then calls back into the strategy so it
/// can restore its own invariant. Strategies only ever rotate through the engine.
pub trait Balance: Sized {
    /// Bookkeeping stored in every vertex (a height, a color, or nothing).
    type Meta: Clone + PartialEq + std::fmt::Debug;

    /// Human readable name used in errors.
    const NAME: &'static str;

    /// Whether users may call [`Tree::rotate_left`] and [`Tree::rotate_right`].
    const ROTATABLE: bool;

    /// When deleting a vertex with only a left child, whether to still swap with the in-order
    /// predecessor (instead of splicing the vertex directly). Vertices with two children are
    /// always swapped.
    const SWAP_WITH_LEFT_CHILD: bool;

    /// The bookkeeping for a freshly inserted leaf.
    fn fresh() -> Self::Meta;

    /// Called right after `vertex` was attached as a new leaf.
    fn on_inserted<T>(tree: &mut Tree<T, Self>, vertex: VertexId);

    /// Called right after a vertex carrying `removed` was spliced out of the tree.
    fn on_deleted<T>(tree: &mut Tree<T, Self>, removed: Self::Meta, spliced: Spliced);

    /// Called after every rotation. `lowered` is the old subtree root and `raised` is its child
    /// that took its place.
    fn on_rotated<T>(_tree: &mut Tree<T, Self>, _lowered: VertexId, _raised: VertexId) {}

    /// The height of the subtree rooted at `vertex`; `-1` for an empty subtree.
    fn height<T>(tree: &Tree<T, Self>, vertex: Option<VertexId>) -> isize {
        tree.measure_height(vertex)
    }

    /// Writes the label a vertex gets in the tree's string form.
    fn fmt_label<T: std::fmt::Display>(
        vertex: &VertexRef<'_, T, Self>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", vertex.element())
    }

    /// Checks the strategy's own invariant over the whole tree.
    fn check<T>(_tree: &Tree<T, Self>) -> Result<(), Violation> {
        Ok(())
    }
}

/// No balancing at all. Users may rotate these trees however they like.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unbalanced;

impl Balance for Unbalanced {
    type Meta = ();

    const NAME: &'static str = "ordered";
    const ROTATABLE: bool = true;
    const SWAP_WITH_LEFT_CHILD: bool = false;

    fn fresh() -> Self::Meta {}

    fn on_inserted<T>(_tree: &mut Tree<T, Self>, _vertex: VertexId) {}

    fn on_deleted<T>(_tree: &mut Tree<T, Self>, _removed: Self::Meta, _spliced: Spliced) {}
}

/// Where the tree was reconnected after a vertex was spliced out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spliced {
    /// The removed vertex's parent, `None` if the removed vertex was the root.
    pub parent: Option<VertexId>,
    /// The child that took the removed vertex's place, if it had one.
    pub child: Option<VertexId>,
    /// Which link of `parent` the removed vertex hung from (and `child` now hangs from). Only
    /// meaningful when `parent` is `Some`.
    pub side: Side,
}

pub(crate) struct Vertex<T, M> {
    pub(crate) element: T,
    pub(crate) parent: Option<VertexId>,
    pub(crate) left: Option<VertexId>,
    pub(crate) right: Option<VertexId>,
    pub(crate) meta: M,
}

impl<T: Clone, M: Clone> Clone for Vertex<T, M> {
    fn clone(&self) -> Self {
        Self {
            element: self.element.clone(),
            parent: self.parent,
            left: self.left,
            right: self.right,
            meta: self.meta.clone(),
        }
    }
}

impl<T, M> Vertex<T, M> {
    pub(crate) fn child(&self, side: Side) -> Option<VertexId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<VertexId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A Binary Search Tree over a totally ordered element type, balanced by `B`.
///
/// Duplicates are allowed and are routed to the left of equal elements.
pub struct Tree<T, B: Balance = Unbalanced> {
    vertices: Slab<Vertex<T, B::Meta>>,
    root: Option<VertexId>,
    // Only meaningful until the next delete or clear.
    last_inserted: Option<VertexId>,
    balance: PhantomData<B>,
}

impl<T, B: Balance> Default for Tree<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, B> Clone for Tree<T, B>
where
    T: Clone,
    B: Balance,
{
    fn clone(&self) -> Self {
        // Links are arena keys and cloning the arena keeps every key, so no relinking is needed.
        Self {
            vertices: self.vertices.clone(),
            root: self.root,
            last_inserted: self.last_inserted,
            balance: PhantomData,
        }
    }
}

impl<T, B: Balance> Tree<T, B> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            vertices: Slab::new(),
            root: None,
            last_inserted: None,
            balance: PhantomData,
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the tree has no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every element, leaving an empty tree. Every element is dropped, so this is `O(n)`.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.root = None;
        self.last_inserted = None;
    }

    /// The root vertex of the tree.
    ///
    /// # Errors
    ///
    /// [`TreeError::Empty`] if there are no vertices.
    pub fn root(&self) -> Result<VertexRef<'_, T, B>, TreeError> {
        self.root
            .map(|root| VertexRef::new(self, root))
            .ok_or(TreeError::Empty)
    }

    /// Looks up a vertex by its handle. Handles stay valid across rotations but a deleted
    /// vertex's handle may later be reused by another vertex.
    pub fn vertex(&self, id: VertexId) -> Option<VertexRef<'_, T, B>> {
        self.vertices
            .contains(id.0)
            .then(|| VertexRef::new(self, id))
    }

    /// The vertex created by the most recent [`insert`][Self::insert]. Deleting or clearing
    /// forgets it.
    pub fn last_inserted(&self) -> Option<VertexRef<'_, T, B>> {
        self.last_inserted.map(|id| VertexRef::new(self, id))
    }

    /// The height of the tree: the number of edges on the longest root-to-leaf path, or `-1` for
    /// an empty tree.
    pub fn height(&self) -> isize {
        B::height(self, self.root)
    }

    /// Inserts the element into the tree. Elements equal to an existing element are placed in its
    /// left subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(2);
    /// tree.insert(3);
    ///
    /// // The AVL tree rotated `2` up to the root.
    /// assert_eq!(tree.root().map(|root| *root.element()), Ok(2));
    /// assert_eq!(tree.last_inserted().map(|v| *v.element()), Some(3));
    /// ```
    pub fn insert(&mut self, element: T)
    where
        T: Ord,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(current) = cursor {
            parent = Some(current);
            side = match element.cmp(&self.vertex_at(current).element) {
                Ordering::Less | Ordering::Equal => Side::Left,
                Ordering::Greater => Side::Right,
            };
            cursor = self.child(current, side);
        }

        let id = VertexId(self.vertices.insert(Vertex {
            element,
            parent,
            left: None,
            right: None,
            meta: B::fresh(),
        }));
        match parent {
            Some(parent) => *self.vertex_mut(parent).child_mut(side) = Some(id),
            None => self.root = Some(id),
        }
        self.last_inserted = Some(id);
        debug!("{} tree: inserted {:?} under {:?}", B::NAME, id, parent);

        B::on_inserted(self, id);
    }

    /// Finds the first vertex on the search path whose element equals `element`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::ordered::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// let three = tree.search(&3).unwrap();
    /// assert_eq!(three.parent().map(|p| *p.element()), Some(5));
    /// assert!(tree.search(&42).is_none());
    /// ```
    pub fn search(&self, element: &T) -> Option<VertexRef<'_, T, B>>
    where
        T: Ord,
    {
        self.find(element).map(|id| VertexRef::new(self, id))
    }

    /// Whether an element equal to `element` is in the tree.
    pub fn contains(&self, element: &T) -> bool
    where
        T: Ord,
    {
        self.find(element).is_some()
    }

    /// Deletes one element equal to `element` and returns it. If the tree has no such element,
    /// nothing happens.
    ///
    /// A vertex with two children isn't unlinked itself: it trades elements with its in-order
    /// predecessor, which has at most one child, and the predecessor's vertex is spliced out
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::red_black::RedBlackTree;
    ///
    /// let mut tree: RedBlackTree<_> = (1..=10).collect();
    ///
    /// assert_eq!(tree.delete(&4), Some(4));
    /// assert_eq!(tree.delete(&4), None);
    /// assert_eq!(tree.len(), 9);
    /// ```
    pub fn delete(&mut self, element: &T) -> Option<T>
    where
        T: Ord,
    {
        let target = self.find(element)?;
        let doomed = match (self.child(target, Side::Left), self.child(target, Side::Right)) {
            (Some(left), right) if right.is_some() || B::SWAP_WITH_LEFT_CHILD => {
                let predecessor = self.rightmost(left);
                self.swap_elements(target, predecessor);
                predecessor
            }
            _ => target,
        };

        let (removed, spliced) = self.splice(doomed);
        self.last_inserted = None;
        debug!("{} tree: spliced out {:?} ({:?})", B::NAME, doomed, spliced);

        B::on_deleted(self, removed.meta, spliced);
        Some(removed.element)
    }

    /// Rotates left around `vertex`: its right child takes its place and `vertex` becomes that
    /// child's left child. Nothing happens if `vertex` has no right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    Option<parent>            Option<parent>
    ///      /                         /
    ///   vertex                     q
    ///    /  \                     / \
    ///   x    q      rotate ->  vertex z
    ///       / \                 / \
    ///      y   z               x   y
    /// ```
    ///
    /// # Errors
    ///
    /// * [`TreeError::IllegalRotation`] on self-balancing trees. Only their own fixup may rotate.
    /// * [`TreeError::UnknownVertex`] if `vertex` isn't in this tree.
    pub fn rotate_left(&mut self, vertex: VertexId) -> Result<(), TreeError> {
        self.rotate_for_user(vertex, Side::Left)
    }

    /// Rotates right around `vertex`: its left child takes its place and `vertex` becomes that
    /// child's right child. Nothing happens if `vertex` has no left child.
    ///
    /// # Errors
    ///
    /// Same as [`rotate_left`][Self::rotate_left].
    pub fn rotate_right(&mut self, vertex: VertexId) -> Result<(), TreeError> {
        self.rotate_for_user(vertex, Side::Right)
    }

    /// Checks every invariant of the tree: element order, parent links, the element count, and
    /// the balancing strategy's own invariant.
    ///
    /// # Errors
    ///
    /// The first [`Violation`] found.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: Ord,
    {
        validate::structure(self)?;
        B::check(self)
    }

    fn rotate_for_user(&mut self, vertex: VertexId, toward: Side) -> Result<(), TreeError> {
        if !B::ROTATABLE {
            return Err(TreeError::IllegalRotation { strategy: B::NAME });
        }
        if !self.vertices.contains(vertex.0) {
            return Err(TreeError::UnknownVertex(vertex));
        }
        self.rotate(vertex, toward);
        Ok(())
    }

    fn find(&self, element: &T) -> Option<VertexId>
    where
        T: Ord,
    {
        let mut cursor = self.root;
        while let Some(current) = cursor {
            cursor = match element.cmp(&self.vertex_at(current).element) {
                Ordering::Less => self.child(current, Side::Left),
                Ordering::Equal => return Some(current),
                Ordering::Greater => self.child(current, Side::Right),
            };
        }
        None
    }

    /// Unlinks a vertex with at most one child, moving that child into its place.
    fn splice(&mut self, vertex: VertexId) -> (Vertex<T, B::Meta>, Spliced) {
        let doomed = self.vertex_at(vertex);
        debug_assert!(
            doomed.left.is_none() || doomed.right.is_none(),
            "Only vertices with at most one child can be spliced."
        );
        let parent = doomed.parent;
        let child = doomed.left.or(doomed.right);
        let side = parent.map_or(Side::Left, |parent| self.side_of(parent, vertex));

        self.replace(parent, vertex, child);
        let removed = self.vertices.remove(vertex.0);
        (removed, Spliced { parent, child, side })
    }

    /// Moves `vertex`'s child on the `toward.opposite()` side up into `vertex`'s place, lowering
    /// `vertex` toward `toward`. Returns whether anything moved.
    pub(crate) fn rotate(&mut self, vertex: VertexId, toward: Side) -> bool {
        let rising = toward.opposite();
        let Some(raised) = self.child(vertex, rising) else {
            return false;
        };
        trace!("{} tree: rotating {:?} toward {:?}", B::NAME, vertex, toward);

        let parent = self.parent(vertex);
        let inner = self.child(raised, toward);

        self.replace(parent, vertex, Some(raised));

        *self.vertex_mut(vertex).child_mut(rising) = inner;
        if let Some(inner) = inner {
            self.vertex_mut(inner).parent = Some(vertex);
        }

        *self.vertex_mut(raised).child_mut(toward) = Some(vertex);
        self.vertex_mut(vertex).parent = Some(raised);

        B::on_rotated(self, vertex, raised);
        true
    }

    /// Points whatever referenced `old` (its parent's link, or the root) at `new`.
    fn replace(&mut self, parent: Option<VertexId>, old: VertexId, new: Option<VertexId>) {
        match parent {
            Some(parent) => {
                let side = self.side_of(parent, old);
                *self.vertex_mut(parent).child_mut(side) = new;
            }
            None => self.root = new,
        }
        if let Some(new) = new {
            self.vertex_mut(new).parent = parent;
        }
    }

    fn swap_elements(&mut self, a: VertexId, b: VertexId) {
        if let Some((a, b)) = self.vertices.get2_mut(a.0, b.0) {
            mem::swap(&mut a.element, &mut b.element);
        }
    }

    /// The last vertex in the in-order traversal of the subtree rooted at `vertex`.
    fn rightmost(&self, mut vertex: VertexId) -> VertexId {
        while let Some(right) = self.child(vertex, Side::Right) {
            vertex = right;
        }
        vertex
    }

    /// Counts levels instead of recursing so degenerate (list shaped) trees can't overflow the
    /// stack.
    pub(crate) fn measure_height(&self, vertex: Option<VertexId>) -> isize {
        let mut level: VecDeque<VertexId> = vertex.into_iter().collect();
        let mut height = -1;
        while !level.is_empty() {
            height += 1;
            for _ in 0..level.len() {
                if let Some(current) = level.pop_front() {
                    let current = self.vertex_at(current);
                    level.extend(current.left);
                    level.extend(current.right);
                }
            }
        }
        height
    }

    pub(crate) fn root_id(&self) -> Option<VertexId> {
        self.root
    }

    pub(crate) fn vertex_at(&self, id: VertexId) -> &Vertex<T, B::Meta> {
        &self.vertices[id.0]
    }

    fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<T, B::Meta> {
        &mut self.vertices[id.0]
    }

    pub(crate) fn meta(&self, id: VertexId) -> &B::Meta {
        &self.vertex_at(id).meta
    }

    pub(crate) fn meta_mut(&mut self, id: VertexId) -> &mut B::Meta {
        &mut self.vertex_mut(id).meta
    }

    pub(crate) fn parent(&self, id: VertexId) -> Option<VertexId> {
        self.vertex_at(id).parent
    }

    pub(crate) fn child(&self, id: VertexId, side: Side) -> Option<VertexId> {
        self.vertex_at(id).child(side)
    }

    /// Which link of `parent` holds `child`.
    pub(crate) fn side_of(&self, parent: VertexId, child: VertexId) -> Side {
        if self.child(parent, Side::Left) == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }
}

impl<T, B> PartialEq for Tree<T, B>
where
    T: PartialEq,
    B: Balance,
{
    /// Trees are equal when they have the same shape with equal elements (and equal heights or
    /// colors) in every position.
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        let mut pending = vec![(self.root, other.root)];
        while let Some(pair) = pending.pop() {
            match pair {
                (None, None) => {}
                (Some(mine), Some(theirs)) => {
                    let mine = self.vertex_at(mine);
                    let theirs = other.vertex_at(theirs);
                    if mine.element != theirs.element || mine.meta != theirs.meta {
                        return false;
                    }
                    pending.push((mine.left, theirs.left));
                    pending.push((mine.right, theirs.right));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T, B> Eq for Tree<T, B>
where
    T: Eq,
    B: Balance,
{
}

impl<T: Ord, B: Balance> FromIterator<T> for Tree<T, B> {
    /// Builds a tree by inserting the elements in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord, B: Balance> Extend<T> for Tree<T, B> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a multiset.
    /// This way we can ensure that after a random smattering of inserts
    /// and deletes we have the same elements in both.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut OrderedTree<T>, counts: &mut BTreeMap<T, usize>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    bst.insert(x.clone());
                    *counts.entry(x.clone()).or_default() += 1;
                }
                Op::Remove(x) => {
                    let expected = match counts.get_mut(x) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                counts.remove(x);
                            }
                            Some(x.clone())
                        }
                        None => None,
                    };
                    assert_eq!(bst.delete(x), expected);
                }
                Op::Iter => {
                    let expected: Vec<_> = counts
                        .iter()
                        .flat_map(|(x, count)| std::iter::repeat(x).take(*count))
                        .collect();
                    assert!(bst.iter().eq(expected));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = OrderedTree::new();
            let mut counts = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut counts);
            tree.validate().is_ok()
                && tree.len() == counts.values().sum::<usize>()
                && counts.keys().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_sorted(xs: Vec<i8>) -> bool {
            let tree: OrderedTree<_> = xs.iter().copied().collect();
            let mut sorted = xs;
            sorted.sort_unstable();

            tree.iter().copied().eq(sorted)
        }
    }
}
