//! A Red-Black tree: an ordered tree whose vertices are colored so that
//!
//! 1. the root is black,
//! 2. a red vertex never has a red child, and
//! 3. every path from the root down to an empty link crosses the same number of black vertices.
//!
//! Together these keep the height below `2 * lg(N + 1)`. Inserting and deleting recolor vertices
//! and rotate to restore the invariant, doing `O(1)` work per level on the way up.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::red_black::{Color, RedBlackTree};
//!
//! let tree: RedBlackTree<_> = [10, 20, 30].into_iter().collect();
//!
//! let root = tree.root().unwrap();
//! assert_eq!((*root.element(), root.color()), (20, Color::Black));
//! assert_eq!(root.left().map(|v| v.color()), Some(Color::Red));
//! assert_eq!(root.right().map(|v| v.color()), Some(Color::Red));
//! ```

use std::fmt;

use log::trace;

use crate::ordered::{Balance, Spliced, Tree, VertexId, VertexRef};
use crate::util::Side;
use crate::validate::Violation;

/// An ordered tree balanced by [`RedBlack`].
pub type RedBlackTree<T> = Tree<T, RedBlack>;

/// The color of a Red-Black vertex. Empty links count as black.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red vertices don't count toward black heights.
    Red,
    /// Black vertices count toward black heights.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Red => write!(f, "R"),
            Self::Black => write!(f, "B"),
        }
    }
}

/// The Red-Black balancing discipline. Each vertex stores a [`Color`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RedBlack;

impl Balance for RedBlack {
    type Meta = Color;

    const NAME: &'static str = "Red-Black";
    const ROTATABLE: bool = false;
    const SWAP_WITH_LEFT_CHILD: bool = true;

    fn fresh() -> Self::Meta {
        Color::Red
    }

    fn on_inserted<T>(tree: &mut Tree<T, Self>, vertex: VertexId) {
        fix_insert(tree, vertex);
    }

    fn on_deleted<T>(tree: &mut Tree<T, Self>, removed: Self::Meta, spliced: Spliced) {
        if removed == Color::Red || is_red(tree, spliced.child) {
            // Painting the replacement black gives back the black vertex the path lost (and a
            // removed red vertex never took one away).
            trace!("Red-Black tree: deleted next to a red vertex");
            if let Some(child) = spliced.child {
                *tree.meta_mut(child) = Color::Black;
            }
            return;
        }

        // A black vertex was removed and replaced by a black one (or by nothing), so every path
        // through the replacement is one black vertex short.
        let short = match (spliced.child, spliced.parent) {
            (Some(child), _) => Slot::Vertex(child),
            (None, Some(parent)) => Slot::Empty {
                parent,
                side: spliced.side,
            },
            (None, None) => return,
        };
        fix_delete(tree, short);
    }

    fn fmt_label<T: fmt::Display>(
        vertex: &VertexRef<'_, T, Self>,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}{{{}}}", vertex.color(), vertex.element())
    }

    fn check<T>(tree: &Tree<T, Self>) -> Result<(), Violation> {
        let Some(root) = tree.root_id() else {
            return Ok(());
        };
        if color(tree, Some(root)) == Color::Red {
            return Err(Violation::RedRoot(root));
        }

        // (vertex, black vertices above it)
        let mut stack = vec![(root, 0)];
        let mut expected = None;
        while let Some((vertex, above)) = stack.pop() {
            let vertex_color = color(tree, Some(vertex));
            let through = above + usize::from(vertex_color == Color::Black);

            for side in [Side::Left, Side::Right] {
                match tree.child(vertex, side) {
                    Some(child) => {
                        if vertex_color == Color::Red && color(tree, Some(child)) == Color::Red {
                            return Err(Violation::RedRed(vertex));
                        }
                        stack.push((child, through));
                    }
                    None => match expected {
                        None => expected = Some(through),
                        Some(expected) if expected != through => {
                            return Err(Violation::BlackHeight {
                                vertex,
                                expected,
                                found: through,
                            });
                        }
                        Some(_) => {}
                    },
                }
            }
        }
        Ok(())
    }
}

impl<'a, T> VertexRef<'a, T, RedBlack> {
    /// The color of this vertex.
    pub fn color(&self) -> Color {
        *self.meta()
    }
}

/// A position that is one black vertex short: either a real vertex or the empty link left behind
/// by a removed black leaf. The empty link is treated as a black leaf without ever allocating
/// one.
#[derive(Clone, Copy, Debug)]
enum Slot {
    Vertex(VertexId),
    Empty { parent: VertexId, side: Side },
}

impl Slot {
    fn parent<T>(self, tree: &Tree<T, RedBlack>) -> Option<VertexId> {
        match self {
            Self::Vertex(vertex) => tree.parent(vertex),
            Self::Empty { parent, .. } => Some(parent),
        }
    }

    /// Which side of `parent` this slot is on.
    fn side<T>(self, tree: &Tree<T, RedBlack>, parent: VertexId) -> Side {
        match self {
            Self::Vertex(vertex) => tree.side_of(parent, vertex),
            Self::Empty { side, .. } => side,
        }
    }
}

/// Empty links are black.
fn color<T>(tree: &Tree<T, RedBlack>, vertex: Option<VertexId>) -> Color {
    vertex.map_or(Color::Black, |vertex| *tree.meta(vertex))
}

fn is_red<T>(tree: &Tree<T, RedBlack>, vertex: Option<VertexId>) -> bool {
    color(tree, vertex) == Color::Red
}

fn paint<T>(tree: &mut Tree<T, RedBlack>, vertex: VertexId, color: Color) {
    *tree.meta_mut(vertex) = color;
}

/// Restores the invariant after `vertex` was inserted as a red leaf. The only possible violation
/// is `vertex` (or, after recoloring, an ancestor) being red with a red parent.
fn fix_insert<T>(tree: &mut Tree<T, RedBlack>, mut vertex: VertexId) {
    loop {
        let Some(parent) = tree.parent(vertex) else {
            trace!("Red-Black insert case 1: {:?} is the root", vertex);
            paint(tree, vertex, Color::Black);
            return;
        };
        if !is_red(tree, Some(parent)) {
            trace!("Red-Black insert case 2: parent of {:?} is black", vertex);
            return;
        }

        let grandparent = tree
            .parent(parent)
            .expect("A red parent is never the root.");
        let parent_side = tree.side_of(grandparent, parent);
        let uncle = tree.child(grandparent, parent_side.opposite());

        if let Some(uncle) = uncle.filter(|&uncle| is_red(tree, Some(uncle))) {
            trace!("Red-Black insert case 3: uncle of {:?} is red", vertex);
            paint(tree, parent, Color::Black);
            paint(tree, uncle, Color::Black);
            paint(tree, grandparent, Color::Red);
            vertex = grandparent;
            continue;
        }

        let mut parent = parent;
        if tree.side_of(parent, vertex) != parent_side {
            trace!("Red-Black insert case 4: {:?} is an inner grandchild", vertex);
            tree.rotate(parent, parent_side);
            // The old parent is now `vertex`'s child on the outer side.
            parent = vertex;
        }

        trace!("Red-Black insert case 5: rotating at {:?}", grandparent);
        paint(tree, parent, Color::Black);
        paint(tree, grandparent, Color::Red);
        tree.rotate(grandparent, parent_side.opposite());
        return;
    }
}

/// Restores the black heights after the paths through `short` lost a black vertex.
fn fix_delete<T>(tree: &mut Tree<T, RedBlack>, mut short: Slot) {
    loop {
        let Some(parent) = short.parent(tree) else {
            trace!("Red-Black delete case 1: reached the root");
            return;
        };
        let side = short.side(tree, parent);
        let away = side.opposite();

        // The other side of `parent` has at least one more black vertex than this one, so it
        // can't be empty.
        let mut sibling = tree
            .child(parent, away)
            .expect("The sibling of a short slot exists.");

        if is_red(tree, Some(sibling)) {
            trace!("Red-Black delete case 2: sibling {:?} is red", sibling);
            paint(tree, sibling, Color::Black);
            paint(tree, parent, Color::Red);
            tree.rotate(parent, side);
            sibling = tree
                .child(parent, away)
                .expect("A red sibling has two black children.");
        }

        // The nephew next to `short` is on the same side as it; the far one is across.
        let near = tree.child(sibling, side);
        let far = tree.child(sibling, away);

        if !is_red(tree, near) && !is_red(tree, far) {
            if is_red(tree, Some(parent)) {
                trace!("Red-Black delete case 4: parent {:?} is red", parent);
                paint(tree, sibling, Color::Red);
                paint(tree, parent, Color::Black);
                return;
            }
            trace!("Red-Black delete case 3: all black around {:?}", parent);
            paint(tree, sibling, Color::Red);
            short = Slot::Vertex(parent);
            continue;
        }

        if !is_red(tree, far) {
            trace!("Red-Black delete case 5: near nephew of {:?} is red", parent);
            let near = near.expect("The near nephew is red so it exists.");
            paint(tree, sibling, Color::Red);
            paint(tree, near, Color::Black);
            tree.rotate(sibling, away);
            sibling = near;
        }

        trace!("Red-Black delete case 6: far nephew of {:?} is red", parent);
        let far = tree
            .child(sibling, away)
            .expect("The far nephew is red so it exists.");
        let parent_color = color(tree, Some(parent));
        paint(tree, sibling, parent_color);
        paint(tree, parent, Color::Black);
        paint(tree, far, Color::Black);
        tree.rotate(parent, side);
        return;
    }
}
