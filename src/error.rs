//! Errors returned by the tree API.

use crate::ordered::VertexId;

/// Errors returned by the public [`Tree`][crate::ordered::Tree] API.
///
/// Looking up or deleting an element that isn't in the tree is not an error: those operations
/// return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The tree has no vertices so there is no root to hand out.
    #[error("the tree is empty and has no root")]
    Empty,
    /// Rotations on a self-balancing tree are only performed by its own fixup.
    #[error("{strategy} trees cannot be rotated by their users")]
    IllegalRotation {
        /// The balancing discipline that refused the rotation.
        strategy: &'static str,
    },
    /// The handle doesn't name a vertex currently stored in the tree.
    #[error("no vertex {0:?} in this tree")]
    UnknownVertex(VertexId),
}
