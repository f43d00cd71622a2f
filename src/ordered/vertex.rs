use super::{Balance, Tree};
use crate::util::Side;

/// A handle to a vertex stored in a [`Tree`].
///
/// Handles are arena keys: they survive rotations (which only relink vertices) but not the
/// deletion of the vertex they name. After a delete, a stale handle may be handed out again to a
/// newly inserted vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

/// A borrowed view of one vertex of a [`Tree`], which can be used to walk the tree.
pub struct VertexRef<'a, T, B: Balance> {
    tree: &'a Tree<T, B>,
    id: VertexId,
}

impl<'a, T, B: Balance> Clone for VertexRef<'a, T, B> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T, B: Balance> Copy for VertexRef<'a, T, B> {}

impl<'a, T, B: Balance> VertexRef<'a, T, B> {
    pub(crate) fn new(tree: &'a Tree<T, B>, id: VertexId) -> Self {
        Self { tree, id }
    }

    /// The handle of this vertex, e.g. for [`Tree::rotate_left`].
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The element stored in this vertex.
    pub fn element(&self) -> &'a T {
        &self.tree.vertex_at(self.id).element
    }

    /// Whether this vertex has a left child.
    pub fn has_left(&self) -> bool {
        self.left().is_some()
    }

    /// Whether this vertex has a right child.
    pub fn has_right(&self) -> bool {
        self.right().is_some()
    }

    /// Whether this vertex has a parent, i.e. isn't the root.
    pub fn has_parent(&self) -> bool {
        self.parent().is_some()
    }

    /// The left child, if any.
    pub fn left(&self) -> Option<Self> {
        self.child(Side::Left)
    }

    /// The right child, if any.
    pub fn right(&self) -> Option<Self> {
        self.child(Side::Right)
    }

    /// The parent, if any.
    pub fn parent(&self) -> Option<Self> {
        self.tree.parent(self.id).map(|id| Self::new(self.tree, id))
    }

    /// The child on the given side, if any.
    pub fn child(&self, side: Side) -> Option<Self> {
        self.tree.child(self.id, side).map(|id| Self::new(self.tree, id))
    }

    /// The number of edges between this vertex and the leaf farthest below it. Leaves have a
    /// height of `0`.
    pub fn height(&self) -> isize {
        B::height(self.tree, Some(self.id))
    }

    /// The height of the left subtree minus the height of the right subtree.
    pub fn balance(&self) -> isize {
        B::height(self.tree, self.tree.child(self.id, Side::Left))
            - B::height(self.tree, self.tree.child(self.id, Side::Right))
    }

    /// The number of edges between this vertex and the root.
    pub fn depth(&self) -> usize {
        std::iter::successors(self.tree.parent(self.id), |&id| self.tree.parent(id)).count()
    }

    pub(crate) fn meta(&self) -> &'a B::Meta {
        self.tree.meta(self.id)
    }
}
