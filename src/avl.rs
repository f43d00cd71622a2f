//! An AVL tree: an ordered tree where the heights of every vertex's two subtrees differ by at most
//! one, which keeps the height of the whole tree below roughly `1.44 * lg(N + 2)`.
//!
//! Each vertex caches its height. After inserting or deleting, the tree walks from the edited spot
//! up to the root recomputing heights, and rotates wherever a vertex became unbalanced.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::avl::AvlTree;
//!
//! let mut tree: AvlTree<_> = (1..=7).collect();
//!
//! // Inserting in order still produces a perfectly balanced tree.
//! let root = tree.root().unwrap();
//! assert_eq!(*root.element(), 4);
//! assert_eq!(root.height(), 2);
//!
//! // Users can't rotate an AVL tree; only its own rebalancing may.
//! let id = root.id();
//! assert!(tree.rotate_left(id).is_err());
//! ```

use log::trace;

use crate::ordered::{Balance, Spliced, Tree, VertexId, VertexRef};
use crate::util::Side;
use crate::validate::{self, Violation};

/// An ordered tree balanced by [`Avl`].
pub type AvlTree<T> = Tree<T, Avl>;

/// The AVL balancing discipline. Each vertex stores the height of its subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Avl;

impl Balance for Avl {
    /// The height of the vertex's subtree. Leaves have height `0`.
    type Meta = isize;

    const NAME: &'static str = "AVL";
    const ROTATABLE: bool = false;
    const SWAP_WITH_LEFT_CHILD: bool = true;

    fn fresh() -> Self::Meta {
        0
    }

    fn on_inserted<T>(tree: &mut Tree<T, Self>, vertex: VertexId) {
        rebalance(tree, Some(vertex));
    }

    fn on_deleted<T>(tree: &mut Tree<T, Self>, _removed: Self::Meta, spliced: Spliced) {
        rebalance(tree, spliced.parent);
    }

    fn on_rotated<T>(tree: &mut Tree<T, Self>, lowered: VertexId, raised: VertexId) {
        // The lowered vertex is now the raised one's child so it has to go first.
        fix_height(tree, lowered);
        fix_height(tree, raised);
    }

    fn height<T>(tree: &Tree<T, Self>, vertex: Option<VertexId>) -> isize {
        vertex.map_or(-1, |vertex| *tree.meta(vertex))
    }

    fn fmt_label<T: std::fmt::Display>(
        vertex: &VertexRef<'_, T, Self>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(
            f,
            "{} {}/{}",
            vertex.element(),
            vertex.height(),
            vertex.balance()
        )
    }

    fn check<T>(tree: &Tree<T, Self>) -> Result<(), Violation> {
        // Children are checked before their parents so a stale height is reported where it is
        // wrong instead of at every ancestor.
        for vertex in validate::vertices(tree).into_iter().rev() {
            let actual = 1 + child_height(tree, vertex, Side::Left)
                .max(child_height(tree, vertex, Side::Right));
            let cached = *tree.meta(vertex);
            if cached != actual {
                return Err(Violation::StaleHeight {
                    vertex,
                    cached,
                    actual,
                });
            }

            let balance = balance_factor(tree, vertex);
            if balance.abs() > 1 {
                return Err(Violation::Unbalanced { vertex, balance });
            }
        }
        Ok(())
    }
}

/// Walks from `cursor` up to the root, fixing heights and rotating unbalanced vertices.
///
/// See https://en.wikipedia.org/wiki/AVL_tree#Rebalancing for terminology.
fn rebalance<T>(tree: &mut Tree<T, Avl>, mut cursor: Option<VertexId>) {
    while let Some(vertex) = cursor {
        fix_height(tree, vertex);

        match balance_factor(tree, vertex) {
            // Right heavy.
            -2 => {
                let right = tree
                    .child(vertex, Side::Right)
                    .expect("A right heavy vertex has a right child.");
                if balance_factor(tree, right) == 1 {
                    trace!("AVL tree: right-left case at {:?}", vertex);
                    tree.rotate(right, Side::Right);
                }
                tree.rotate(vertex, Side::Left);
            }
            // Left heavy.
            2 => {
                let left = tree
                    .child(vertex, Side::Left)
                    .expect("A left heavy vertex has a left child.");
                if balance_factor(tree, left) == -1 {
                    trace!("AVL tree: left-right case at {:?}", vertex);
                    tree.rotate(left, Side::Left);
                }
                tree.rotate(vertex, Side::Right);
            }
            _ => {}
        }

        if cfg!(debug_assertions) {
            // `vertex` may have been rotated down but its subtree is balanced either way.
            let parent = tree.parent(vertex).unwrap_or(vertex);
            assert!(
                balance_factor(tree, vertex).abs() <= 1,
                "Rebalanced vertex {:?} must have balance in -1..=1.",
                vertex
            );
            assert!(
                balance_factor(tree, parent).abs() <= 2,
                "Parent {:?} of a rebalanced vertex is off by at most 2.",
                parent
            );
        }

        // After a rotation this is the vertex that took `vertex`'s place, so the walk still ends
        // at the root.
        cursor = tree.parent(vertex);
    }
}

/// Adjusts the height of `vertex` to be the max of its children's heights + 1.
fn fix_height<T>(tree: &mut Tree<T, Avl>, vertex: VertexId) {
    let height =
        1 + child_height(tree, vertex, Side::Left).max(child_height(tree, vertex, Side::Right));
    *tree.meta_mut(vertex) = height;
}

fn child_height<T>(tree: &Tree<T, Avl>, vertex: VertexId, side: Side) -> isize {
    Avl::height(tree, tree.child(vertex, side))
}

/// The height of the left subtree minus the height of the right subtree.
fn balance_factor<T>(tree: &Tree<T, Avl>, vertex: VertexId) -> isize {
    child_height(tree, vertex, Side::Left) - child_height(tree, vertex, Side::Right)
}
