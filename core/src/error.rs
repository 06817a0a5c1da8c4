use thiserror::Error;

/// Errors raised by traversal queries.
///
/// Mutations never fail: removing an absent vertex or edge is a no-op.
/// Only the traversals have preconditions, and they report them here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError<V> {
    /// No directed path leads from `origin` to `destination`.
    #[error("vertices '{origin}' and '{destination}' are not connected")]
    Unreachable { origin: V, destination: V },

    /// A traversal was started from a vertex the graph does not hold.
    #[error("vertex '{vertex}' not found")]
    VertexNotFound { vertex: V },
}

/// Result alias for traversal queries over vertices of type `V`.
pub type Result<T, V> = std::result::Result<T, GraphError<V>>;
