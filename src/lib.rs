//! # splatter
//!
//! Randomized partitioning of undirected graphs: seed `k` nodes, spread
//! partition labels outward breadth-first, then greedily refine the
//! assignment toward higher modularity.
//!
//! The entry point is [`Splatter`], configured builder-style and invoked
//! through the [`GraphPartitioning`] trait. [`modularity`] scores any
//! assignment; [`metrics`] compares two assignments; [`dataset`] ships the
//! karate club benchmark graph.

pub mod dataset;
/// Error types used across `splatter`.
pub mod error;
pub mod metrics;
pub mod partition;


pub use dataset::karate_club;
pub use error::{Error, Result};
pub use metrics::{ari, nmi};
pub use partition::{modularity, GraphPartitioning, Splatter};
