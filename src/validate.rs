//! Whole-tree invariant checks, used by [`Tree::validate`].
//!
//! Every check walks the tree with an explicit stack so even a degenerate tree can be validated.

use crate::ordered::{Balance, Tree, VertexId};
use crate::util::Side;

/// An invariant that a tree failed to uphold.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// An in-order traversal found this vertex's element smaller than its predecessor's.
    #[error("vertex {0:?} is out of order")]
    Order(VertexId),
    /// A child's parent link doesn't point back at the vertex holding it (or the root has a
    /// parent).
    #[error("vertex {0:?} has a broken parent link")]
    ParentLink(VertexId),
    /// The vertices reachable from the root don't match the tree's element count.
    #[error("{reachable} vertices are reachable but the tree holds {len}")]
    Size {
        /// Vertices reachable from the root.
        reachable: usize,
        /// The tree's element count.
        len: usize,
    },
    /// A cached AVL height doesn't match the heights of the vertex's children.
    #[error("vertex {vertex:?} caches height {cached} but its height is {actual}")]
    StaleHeight {
        /// The offending vertex.
        vertex: VertexId,
        /// The stored height.
        cached: isize,
        /// The height computed from its children.
        actual: isize,
    },
    /// The heights of a vertex's subtrees differ by more than one.
    #[error("vertex {vertex:?} has balance {balance}")]
    Unbalanced {
        /// The offending vertex.
        vertex: VertexId,
        /// Height of the left subtree minus height of the right subtree.
        balance: isize,
    },
    /// A Red-Black root must be black.
    #[error("the root {0:?} is red")]
    RedRoot(VertexId),
    /// A red vertex has a red child.
    #[error("red vertex {0:?} has a red child")]
    RedRed(VertexId),
    /// Two paths from the root down to an empty link cross a different number of black vertices.
    #[error("paths through vertex {vertex:?} have {found} black vertices instead of {expected}")]
    BlackHeight {
        /// The vertex at the end of the offending path.
        vertex: VertexId,
        /// The black height of the first path checked.
        expected: usize,
        /// The black height of this path.
        found: usize,
    },
}

/// Checks the invariants shared by every tree: ordering, parent links, and element count.
pub(crate) fn structure<T: Ord, B: Balance>(tree: &Tree<T, B>) -> Result<(), Violation> {
    if let Some(root) = tree.root_id() {
        if tree.parent(root).is_some() {
            return Err(Violation::ParentLink(root));
        }
    }

    let mut reachable = 0;
    let mut previous: Option<&T> = None;
    let mut stack = Vec::new();
    let mut cursor = tree.root_id();
    loop {
        while let Some(vertex) = cursor {
            for side in [Side::Left, Side::Right] {
                if let Some(child) = tree.child(vertex, side) {
                    if tree.parent(child) != Some(vertex) {
                        return Err(Violation::ParentLink(child));
                    }
                }
            }
            stack.push(vertex);
            cursor = tree.child(vertex, Side::Left);
        }
        let Some(vertex) = stack.pop() else {
            break;
        };

        let element = &tree.vertex_at(vertex).element;
        if previous.map_or(false, |previous| previous > element) {
            return Err(Violation::Order(vertex));
        }
        previous = Some(element);
        reachable += 1;

        cursor = tree.child(vertex, Side::Right);
    }

    if reachable != tree.len() {
        return Err(Violation::Size {
            reachable,
            len: tree.len(),
        });
    }
    Ok(())
}

/// Every vertex of the tree, parents before children.
pub(crate) fn vertices<T, B: Balance>(tree: &Tree<T, B>) -> Vec<VertexId> {
    let mut order = Vec::with_capacity(tree.len());
    let mut stack: Vec<VertexId> = tree.root_id().into_iter().collect();
    while let Some(vertex) = stack.pop() {
        order.push(vertex);
        stack.extend(tree.child(vertex, Side::Left));
        stack.extend(tree.child(vertex, Side::Right));
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered::OrderedTree;

    #[test]
    fn valid_trees_pass() {
        let tree: OrderedTree<_> = [5, 2, 8, 2, 9, 1].into_iter().collect();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(OrderedTree::<u8>::new().validate(), Ok(()));
    }

    #[test]
    fn user_rotations_keep_order() {
        let mut tree: OrderedTree<_> = (0..20).collect();
        for element in [3, 10, 17] {
            let id = tree.search(&element).unwrap().id();
            tree.rotate_left(id).unwrap();
            assert_eq!(tree.validate(), Ok(()));
        }
    }

    #[test]
    fn vertices_lists_parents_first() {
        let tree: OrderedTree<_> = [2, 1, 3].into_iter().collect();
        let order = vertices(&tree);

        assert_eq!(order.len(), 3);
        assert_eq!(order[0], tree.root().unwrap().id());
    }

    #[test]
    fn violations_describe_themselves() {
        let size = Violation::Size {
            reachable: 2,
            len: 3,
        };
        assert_eq!(
            size.to_string(),
            "2 vertices are reachable but the tree holds 3"
        );
    }
}
