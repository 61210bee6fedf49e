//! Splatter partitioning: seeded breadth-first label spreading.
//!
//! Picks `k` distinct seed nodes at random, gives each its own partition id,
//! and grows the partitions outward in a simultaneous multi-source BFS.
//! Partitions claim unassigned neighbors in round-robin turns, one claim per
//! turn, so concurrently growing regions stay at roughly equal radius and a
//! node reachable from several frontiers goes to whichever partition's turn
//! comes first, never to a numeric priority.
//!
//! Components no seed lands in are untouched by the spreading loop; each of
//! their nodes falls back to an independently drawn uniform partition id.
//! This can produce disconnected, low-quality partitions inside such
//! components, which the refinement stage may or may not repair.

use std::collections::VecDeque;

use petgraph::graph::UnGraph;
use rand::prelude::*;
use tracing::{debug, trace};

use super::modularity::SimpleGraph;
use super::refine::{refine, RefineOptions};
use super::traits::GraphPartitioning;
use crate::error::{Error, Result};

const UNASSIGNED: usize = usize::MAX;

/// Splatter graph partitioning.
///
/// Seeds `k` random nodes, spreads their partition ids outward breadth-first
/// until every reachable node is claimed, then greedily refines the
/// assignment with single-node moves that raise modularity.
///
/// Two runs with different random draws may legitimately produce different
/// partitions; fix the seed for reproducible output.
#[derive(Debug, Clone)]
pub struct Splatter {
    /// Number of partitions.
    k: usize,
    /// Random seed.
    seed: Option<u64>,
    /// Maximum refinement passes.
    max_passes: usize,
    /// Minimum modularity gain for a move to be applied.
    min_gain: f64,
    /// Restrict refinement scans to border nodes.
    border_scan: bool,
    /// Restrict move targets to partitions present among a node's neighbors.
    neighbor_targets: bool,
}

impl Splatter {
    /// Create a new splatter partitioner producing `k` partitions.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            seed: None,
            max_passes: 10,
            min_gain: 0.0,
            border_scan: false,
            neighbor_targets: false,
        }
    }

    /// Set random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the maximum number of refinement passes.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    /// Set the minimum modularity gain a move must clear to be applied.
    ///
    /// `0.0` (the default) accepts any strict improvement; a small positive
    /// margin such as `0.01` avoids churn from negligible gains.
    pub fn with_min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Restrict refinement scans to nodes bordering another partition.
    pub fn with_border_scan(mut self, border_scan: bool) -> Self {
        self.border_scan = border_scan;
        self
    }

    /// Trial only partitions present among a node's neighbors instead of
    /// all `k - 1` others.
    pub fn with_neighbor_targets(mut self, neighbor_targets: bool) -> Self {
        self.neighbor_targets = neighbor_targets;
        self
    }

    fn refine_options(&self) -> RefineOptions {
        RefineOptions {
            max_passes: self.max_passes,
            min_gain: self.min_gain,
            border_scan: self.border_scan,
            neighbor_targets: self.neighbor_targets,
        }
    }
}

impl GraphPartitioning for Splatter {
    fn partition<N, E>(&self, graph: &UnGraph<N, E>) -> Result<Vec<usize>> {
        let n = graph.node_count();
        if n == 0 {
            return Err(Error::EmptyGraph);
        }
        if self.k < 1 || self.k > n {
            return Err(Error::InvalidPartitionCount {
                requested: self.k,
                n_nodes: n,
            });
        }

        let g = SimpleGraph::from_graph(graph);

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let seeds = rand::seq::index::sample(&mut rng, n, self.k).into_vec();
        debug!(k = self.k, ?seeds, "sampled seed nodes");

        let mut labels = spread(&g, &seeds, self.k, &mut rng);
        let modularity = refine(&g, &mut labels, self.k, &self.refine_options());
        debug!(modularity, "refinement complete");

        Ok(labels)
    }

    fn partition_count(&self) -> usize {
        self.k
    }
}

/// Multi-source breadth-first spreading from `seeds`.
///
/// Each partition keeps a frontier queue, initially just its seed. On a
/// partition's turn, frontier nodes with no unassigned neighbor left are
/// popped; the first node with one claims exactly one neighbor (assigning it
/// and enqueueing it) and stays at the front for its remaining neighbors. A
/// full cycle over all partitions with no claim means every reachable node
/// is assigned; whatever remains lies in unseeded components and draws a
/// uniform random partition id.
fn spread<R: Rng>(g: &SimpleGraph, seeds: &[usize], k: usize, rng: &mut R) -> Vec<usize> {
    let mut labels = vec![UNASSIGNED; g.n];
    let mut queues: Vec<VecDeque<usize>> = Vec::with_capacity(k);
    for (partition, &seed) in seeds.iter().enumerate() {
        labels[seed] = partition;
        queues.push(VecDeque::from([seed]));
    }

    let mut remaining = g.n - seeds.len();
    while remaining > 0 {
        let mut claimed = false;
        for partition in 0..k {
            while let Some(&head) = queues[partition].front() {
                let next = g.adj[head]
                    .iter()
                    .copied()
                    .find(|&nb| labels[nb] == UNASSIGNED);
                match next {
                    Some(nb) => {
                        labels[nb] = partition;
                        queues[partition].push_back(nb);
                        remaining -= 1;
                        claimed = true;
                        trace!(node = nb, partition, via = head, "claimed by spreading");
                        break;
                    }
                    None => {
                        let _ = queues[partition].pop_front();
                    }
                }
            }
        }
        if !claimed {
            break;
        }
    }

    if remaining > 0 {
        debug!(remaining, "assigning unreached nodes at random");
        for label in labels.iter_mut().filter(|l| **l == UNASSIGNED) {
            *label = rng.random_range(0..k);
        }
    }

    labels
}
