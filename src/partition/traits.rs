//! Graph partitioning traits.

use crate::error::Result;
use petgraph::graph::UnGraph;

/// Trait for algorithms that assign every node of a graph to a partition.
pub trait GraphPartitioning {
    /// Partition a graph.
    ///
    /// Returns a total mapping from node index to partition id in `[0, k)`.
    fn partition<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>>;

    /// The number of partitions this algorithm produces.
    fn partition_count(&self) -> usize;
}
