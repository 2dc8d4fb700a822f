/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Exact enumeration and statistical estimation of the number of simple
//! paths between two nodes of an undirected graph.
//!
//! The crate provides two independent algorithms on top of a shared
//! bitmask-based graph representation ([`BitGraph`](graph::BitGraph)):
//!
//! * [`PathEnumerator`](enumerate::PathEnumerator) lists every simple path
//!   between two nodes using an iterative depth-first search with an
//!   explicit stack, so arbitrarily deep searches never overflow the
//!   machine stack. The enumeration order is deterministic (depth first,
//!   lowest-indexed neighbor first).
//!
//! * [`CountEstimator`](estimate::CountEstimator) estimates the *number*
//!   of such paths without listing them, using sequential importance
//!   sampling over self-avoiding random walks (Roberts & Kroese, 2007)
//!   averaged over independent bootstrap passes; passes can be run in
//!   parallel with [`ParCountEstimator`](estimate::ParCountEstimator).
//!
//! Graphs enter the crate as dense symmetric 0/1 adjacency matrices
//! ([`AdjacencyMatrix`](graph::AdjacencyMatrix)), from which the bitmask
//! representation is derived once and then shared immutably by both
//! algorithms.
//!
//! # Examples
//!
//! ```
//! use dsi_progress_logger::no_logging;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use st_paths::prelude::*;
//!
//! // The complete graph on four nodes.
//! let matrix = AdjacencyMatrix::banded(4, 3);
//! let graph = BitGraph::new(&matrix);
//!
//! // There are five simple paths from node 0 to node 3.
//! let mut enumerator = PathEnumerator::new(&graph);
//! let paths = enumerator.paths(0, 3, no_logging![])?;
//! assert_eq!(paths.len(), 5);
//!
//! // The estimator approximates the same count.
//! let mut estimator = CountEstimator::new(&graph, SmallRng::seed_from_u64(0));
//! let estimate = estimator.estimate(0, 3, 1000, 10, no_logging![])?;
//! assert!((estimate - 5.0).abs() < 1.0);
//! # Ok::<(), st_paths::graph::InvalidVertex>(())
//! ```

pub mod enumerate;
pub mod estimate;
pub mod graph;

pub mod prelude {
    pub use crate::enumerate::PathEnumerator;
    pub use crate::estimate::{CountEstimator, ParCountEstimator, Trial};
    pub use crate::graph::{AdjacencyMatrix, BitGraph, GraphError, InvalidVertex, NodeSet};
}
