//! Splatter partitioning of undirected graphs.
//!
//! Given a graph and a partition count `k`, assign every node a partition id
//! in `[0, k)` so that nodes are more densely connected inside their
//! partition than expected by chance.
//!
//! ## The Modularity Objective
//!
//! Partition quality is scored with **modularity** Q:
//!
//! ```text
//! Q = Σ_c [ L_c / m  −  ( d_c / 2m )² ]
//! ```
//!
//! Where:
//! - m = number of edges
//! - L_c = edges inside community c
//! - d_c = sum of degrees of the nodes in community c
//!
//! **Intuition**: for each community we add (actual internal edge fraction) -
//! (internal edge fraction expected in a random graph with the same degree
//! sequence). A good partition has Q > 0.
//!
//! ## The Algorithm
//!
//! Splatter partitioning is a randomized two-phase heuristic:
//!
//! 1. **Seed & spread**: sample `k` distinct seed nodes, one per partition,
//!    then grow all partitions simultaneously by breadth-first label
//!    spreading. Frontiers take round-robin turns claiming unassigned
//!    neighbors, so regions expand at roughly equal radius; nodes left in
//!    unseeded components get uniform random ids.
//!
//! 2. **Refine**: greedily move individual nodes into whichever other
//!    partition most improves modularity, sweeping until a full pass makes
//!    no move or a pass cap is hit. Size-1 partitions are protected from
//!    depletion.
//!
//! This is a fast, memory-light heuristic for small-to-medium graphs, not a
//! globally optimal modularity maximizer: different random draws can reach
//! different local optima.
//!
//! ## Usage
//!
//! ```rust
//! use petgraph::graph::UnGraph;
//! use splatter::{GraphPartitioning, Splatter};
//!
//! // Two triangles joined by a bridge.
//! let mut graph = UnGraph::<(), ()>::new_undirected();
//! let nodes: Vec<_> = (0..6).map(|_| graph.add_node(())).collect();
//! for (u, v) in [(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)] {
//!     graph.add_edge(nodes[u], nodes[v], ());
//! }
//!
//! let splatter = Splatter::new(2).with_seed(42);
//! let labels = splatter.partition(&graph).unwrap();
//! // labels[i] = partition id for node i, in [0, 2)
//! assert_eq!(labels.len(), 6);
//! ```
//!
//! ## References
//!
//! - Newman & Girvan (2004). "Finding and evaluating community structure
//!   in networks."

mod modularity;
mod refine;
mod splatter;
mod traits;

pub use modularity::modularity;
pub use splatter::Splatter;
pub use traits::GraphPartitioning;
