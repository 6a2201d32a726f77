//! Host document errors.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised by a [`DomHost`](crate::DomHost) when the host page refuses
/// an operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomError {
    #[error("Node {0} is not known to this document")]
    UnknownNode(NodeId),

    #[error("Node {0} is not attached to the document")]
    Detached(NodeId),

    #[error("Node {reference} is not a child of {parent}")]
    NotAChild { parent: NodeId, reference: NodeId },

    #[error("Inserting {node} into {parent} would create a cycle")]
    HierarchyRequest { parent: NodeId, node: NodeId },

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("Host script error: {0}")]
    Script(String),
}
