/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph representations shared by the path algorithms.
//!
//! Graphs are undirected, unweighted and simple, and enter the crate as
//! dense symmetric 0/1 [adjacency matrices](AdjacencyMatrix). All
//! algorithms run on the derived bitmask representation ([`BitGraph`]),
//! which stores one neighbor mask per node and supports constant-time
//! (per word) membership tests and unvisited-neighbor computations.
//!
//! Malformed raw input is rejected where it enters the system: matrices
//! built programmatically through [`AdjacencyMatrix::add_edge`] are
//! symmetric and loopless by construction, while
//! [`AdjacencyMatrix::from_rows`] validates arbitrary data and fails with
//! a [`GraphError`] describing the first problem found.

pub mod adjacency;
pub mod bit_graph;

pub use adjacency::AdjacencyMatrix;
pub use bit_graph::{BitGraph, NodeSet};

use thiserror::Error;

/// Errors arising while building an adjacency matrix from raw data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A row has a different number of entries than the number of rows.
    #[error("Row {row} has {len} entries in a matrix with {n} rows")]
    NotSquare { row: usize, len: usize, n: usize },

    /// An entry is neither 0 nor 1.
    #[error("Entry ({row}, {col}) is {value}, expected 0 or 1")]
    BadEntry { row: usize, col: usize, value: u8 },

    /// The matrix differs from its transpose.
    #[error("The matrix is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },
}

/// A node index passed to an algorithm is out of range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Node {vertex} is out of range for a graph with {num_nodes} nodes")]
pub struct InvalidVertex {
    /// The offending index.
    pub vertex: usize,
    /// The number of nodes of the graph.
    pub num_nodes: usize,
}
