use core::fmt;

/// Result alias for `splatter`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the partitioning primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The graph has no nodes.
    EmptyGraph,

    /// Invalid number of partitions requested.
    ///
    /// Seed sampling needs `1 <= k <= n` distinct nodes.
    InvalidPartitionCount {
        /// Requested partition count.
        requested: usize,
        /// Number of nodes in the graph.
        n_nodes: usize,
    },

    /// An assignment's length does not match the graph's node count.
    AssignmentMismatch {
        /// Expected length (node count).
        expected: usize,
        /// Found length.
        found: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyGraph => write!(f, "graph has no nodes"),
            Error::InvalidPartitionCount { requested, n_nodes } => {
                write!(f, "cannot draw {requested} seeds from {n_nodes} nodes")
            }
            Error::AssignmentMismatch { expected, found } => {
                write!(
                    f,
                    "assignment length mismatch: expected {expected}, found {found}"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
