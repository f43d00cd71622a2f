//! This crate exposes a family of self-balancing Binary Search Trees (BSTs)
//! mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. BSTs are typically defined
//! recursively using the notion of a vertex. A vertex stores an element and
//! will sometimes have child vertices. The most important invariants of a BST are:
//!
//! 1. For every vertex in a BST, all the vertices in its left subtree have an
//!    element less than or equal to its own element.
//! 2. For every vertex in a BST, all the vertices in its right subtree have an
//!    element greater than or equal to its own element.
//!
//! > Note that some vertices have no children. These vertices are called "leaves".
//!
//! Searching for an element takes `O(height)` (where `height` is defined as the longest
//! path from the root to a leaf). Inserting in sorted order makes a plain BST as tall as it has
//! elements, so the trees here can rebalance themselves with _rotations_: local relinkings of a
//! parent and child that keep the elements in order but change the tree's shape.
//!
//! ## Balancing disciplines
//!
//! All trees share one engine, [`ordered::Tree`], which performs the structural edits. The second
//! type parameter picks what happens after each edit:
//!
//! * [`ordered::OrderedTree`] never rebalances and lets users rotate it by hand.
//! * [`avl::AvlTree`] keeps the heights of every vertex's subtrees within one of each other.
//! * [`red_black::RedBlackTree`] colors vertices red or black and keeps the number of black
//!   vertices on every root-to-leaf path equal.
//!
//! Both self-balancing trees keep their height in `O(lg N)`.
//!
//! ```
//! use balanced_bst::{avl::AvlTree, ordered::OrderedTree, red_black::RedBlackTree};
//!
//! let plain: OrderedTree<_> = (0..100).collect();
//! let avl: AvlTree<_> = (0..100).collect();
//! let red_black: RedBlackTree<_> = (0..100).collect();
//!
//! assert_eq!(plain.height(), 99);
//! assert!(avl.height() <= 9);
//! assert!(red_black.height() <= 13);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod avl;
pub mod error;
pub mod ordered;
pub mod red_black;
pub mod validate;

mod util;

pub use error::TreeError;
pub use util::Side;
pub use validate::Violation;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
