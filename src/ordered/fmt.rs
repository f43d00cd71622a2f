use std::fmt;

use super::{Balance, Tree, VertexId, VertexRef};
use crate::util::Side;

/// Drawn in front of a left child that has a right sibling below it.
const LEFT_BRANCH: &str = "├─›";
/// Drawn in front of a left child that is its parent's only child.
const LAST_LEFT: &str = "└─›";
/// Drawn in front of a right child.
const LAST_RIGHT: &str = "└─»";

impl<'a, T, B> fmt::Display for VertexRef<'a, T, B>
where
    T: fmt::Display,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        B::fmt_label(self, f)
    }
}

/// Draws the tree one vertex per line, children indented below their parent:
///
/// ```text
/// 4
/// ├─›2
/// │  ├─›1
/// │  └─»3
/// └─»6
///    └─»7
/// ```
impl<T, B> fmt::Display for Tree<T, B>
where
    T: fmt::Display,
    B: Balance,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root_id() else {
            return Ok(());
        };

        // (vertex, indentation, connector) in the order they are drawn.
        let mut stack: Vec<(VertexId, String, &str)> = vec![(root, String::new(), "")];
        while let Some((vertex, indent, connector)) = stack.pop() {
            writeln!(f, "{indent}{connector}{}", VertexRef::new(self, vertex))?;

            let below = match connector {
                "" => String::new(),
                LEFT_BRANCH => format!("{indent}│  "),
                _ => format!("{indent}   "),
            };
            match (self.child(vertex, Side::Left), self.child(vertex, Side::Right)) {
                (Some(left), Some(right)) => {
                    stack.push((right, below.clone(), LAST_RIGHT));
                    stack.push((left, below, LEFT_BRANCH));
                }
                (Some(left), None) => stack.push((left, below, LAST_LEFT)),
                (None, Some(right)) => stack.push((right, below, LAST_RIGHT)),
                (None, None) => {}
            }
        }
        Ok(())
    }
}

impl<'a, T, B> fmt::Debug for VertexRef<'a, T, B>
where
    T: fmt::Debug,
    B: Balance,
{
    /// Shows the neighbours as handles so formatting never descends into the subtree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vertex")
            .field("id", &self.id())
            .field("element", self.element())
            .field("meta", self.meta())
            .field("parent", &self.parent().map(|v| v.id()))
            .field("left", &self.left().map(|v| v.id()))
            .field("right", &self.right().map(|v| v.id()))
            .finish()
    }
}

impl<T, B> fmt::Debug for Tree<T, B>
where
    T: fmt::Debug,
    B: Balance,
{
    /// Lists the vertices in pre-order, root first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut vertices = Vec::with_capacity(self.len());
        self.dfs_pre_order(|vertex| vertices.push(vertex));

        f.debug_struct("Tree")
            .field("strategy", &B::NAME)
            .field("len", &self.len())
            .field("vertices", &vertices)
            .finish()
    }
}
