//! Node-layer errors.
//!
//! These mirror the `DOMException` names scripts observe. Host adapters
//! propagate them unchanged.

use crate::{NodeId, NodeKind};

/// A node-layer precondition failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// [`IndexSizeError`](https://webidl.spec.whatwg.org/#indexsizeerror):
    /// an offset outside `[0, length]`.
    #[error("IndexSizeError: offset {offset} is outside [0, {length}]")]
    IndexSize {
        /// Requested offset, in UTF-16 code units. Negative when a script
        /// passed a negative value.
        offset: i64,
        /// Length of the node's data at the time of the call.
        length: usize,
    },

    /// [`HierarchyRequestError`](https://webidl.spec.whatwg.org/#hierarchyrequesterror)
    #[error("HierarchyRequestError: {0}")]
    HierarchyRequest(&'static str),

    /// [`NotFoundError`](https://webidl.spec.whatwg.org/#notfounderror):
    /// the node is unknown or not where the operation expects it.
    #[error("NotFoundError: node {0} not found")]
    NotFound(NodeId),

    /// The operation does not apply to this kind of node.
    #[error("InvalidNodeTypeError: expected {expected} node, found {found}")]
    InvalidNodeType {
        /// What the operation needs.
        expected: &'static str,
        /// What it got.
        found: NodeKind,
    },
}
