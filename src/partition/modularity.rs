//! Modularity scoring for graph partitions.
//!
//! Modularity compares the number of edges inside each community to the
//! number expected in a random graph with the same degree sequence:
//!
//! ```text
//! Q = Σ_c [ L_c / m  −  ( d_c / 2m )² ]
//! ```
//!
//! Where:
//! - m = number of edges
//! - L_c = edges with both endpoints in community c
//! - d_c = sum of degrees of the nodes in community c
//!
//! A partition with Q > 0 has denser internal connectivity than chance.
//! Single-node communities contribute no internal edges, only the expected
//! term. A graph with no edges scores 0.
//!
//! Scoring is a full recomputation per call, O(|V| + |E|). The refiner calls
//! it once per trial move, which is fine at the graph sizes this crate
//! targets (hundreds to low thousands of nodes).

use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use std::cmp::Ordering;

/// Internal unweighted view of a simple graph.
///
/// Built once per partitioning call. Parallel edges are collapsed and
/// self-loops dropped, so every algorithm downstream sees a simple graph.
/// Nodes are addressed by `NodeIndex::index()` in `0..n`.
pub(crate) struct SimpleGraph {
    /// Node count.
    pub(crate) n: usize,
    /// Adjacency lists, sorted ascending.
    pub(crate) adj: Vec<Vec<usize>>,
    /// Edge list with `u < v`, deduplicated.
    pub(crate) edges: Vec<(usize, usize)>,
    /// Degree of each node.
    pub(crate) degrees: Vec<f64>,
}

impl SimpleGraph {
    pub(crate) fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Self {
        let n = graph.node_count();

        let mut edges: Vec<(usize, usize)> = graph
            .edge_references()
            .filter_map(|e| {
                let i = e.source().index();
                let j = e.target().index();
                match i.cmp(&j) {
                    Ordering::Less => Some((i, j)),
                    Ordering::Greater => Some((j, i)),
                    // Self-loop: absent in a simple graph.
                    Ordering::Equal => None,
                }
            })
            .collect();
        edges.sort_unstable();
        edges.dedup();

        let mut adj = vec![Vec::new(); n];
        let mut degrees = vec![0.0; n];
        for &(u, v) in &edges {
            adj[u].push(v);
            adj[v].push(u);
            degrees[u] += 1.0;
            degrees[v] += 1.0;
        }
        for list in &mut adj {
            list.sort_unstable();
        }

        Self {
            n,
            adj,
            edges,
            degrees,
        }
    }

    /// Modularity of `labels` over this graph.
    ///
    /// `labels` must have length `n`; ids need not be contiguous.
    pub(crate) fn modularity(&self, labels: &[usize]) -> f64 {
        debug_assert_eq!(labels.len(), self.n);
        self.score(|node| labels[node])
    }

    /// Modularity as if `node` were reassigned to `target`, without mutating
    /// the assignment.
    ///
    /// Numerically identical to reassigning and calling [`Self::modularity`].
    pub(crate) fn modularity_with_move(
        &self,
        labels: &[usize],
        node: usize,
        target: usize,
    ) -> f64 {
        debug_assert_eq!(labels.len(), self.n);
        self.score(|i| if i == node { target } else { labels[i] })
    }

    fn score(&self, label: impl Fn(usize) -> usize) -> f64 {
        let m = self.edges.len() as f64;
        if m == 0.0 {
            return 0.0;
        }

        let n_communities = (0..self.n).map(|i| label(i) + 1).max().unwrap_or(0);
        let mut internal = vec![0.0; n_communities];
        let mut community_degrees = vec![0.0; n_communities];

        for node in 0..self.n {
            community_degrees[label(node)] += self.degrees[node];
        }
        for &(u, v) in &self.edges {
            if label(u) == label(v) {
                internal[label(u)] += 1.0;
            }
        }

        internal
            .iter()
            .zip(&community_degrees)
            .map(|(&l_c, &d_c)| l_c / m - (d_c / (2.0 * m)).powi(2))
            .sum()
    }
}

/// Modularity of a partition assignment over a graph.
///
/// `labels[i]` is the partition id of the node with index `i`. Returns
/// [`Error::EmptyGraph`] for a graph with no nodes and
/// [`Error::AssignmentMismatch`] when the assignment's length differs from
/// the node count.
///
/// # Example
///
/// ```rust
/// use petgraph::graph::UnGraph;
/// use splatter::modularity;
///
/// let mut graph = UnGraph::<(), ()>::new_undirected();
/// let a = graph.add_node(());
/// let b = graph.add_node(());
/// graph.add_edge(a, b, ());
///
/// // One community holding the whole graph always scores 0.
/// let q = modularity(&graph, &[0, 0]).unwrap();
/// assert!(q.abs() < 1e-12);
/// ```
pub fn modularity<N, E>(graph: &UnGraph<N, E>, labels: &[usize]) -> Result<f64> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }
    if labels.len() != n {
        return Err(Error::AssignmentMismatch {
            expected: n,
            found: labels.len(),
        });
    }
    Ok(SimpleGraph::from_graph(graph).modularity(labels))
}
