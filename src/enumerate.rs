/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Exhaustive enumeration of the simple paths between two nodes.

use std::ops::ControlFlow::{self, Continue};

use dsi_progress_logger::ProgressLog;
use no_break::NoBreak;

use crate::graph::{BitGraph, InvalidVertex, NodeSet};

/// An iterative depth-first enumerator of the simple paths between two
/// nodes.
///
/// The search keeps an explicit stack of frames instead of recursing, so
/// it does not need a large machine stack even on graphs with very long
/// paths. Each frame holds the mask of candidate neighbors of the
/// corresponding node on the current path that have not been tried yet;
/// candidates are expanded lowest index first, which fixes a
/// deterministic emission order: repeated enumerations of the same graph
/// produce the identical sequence of paths.
///
/// The number of simple paths can be exponential in the number of nodes,
/// so a full enumeration on a dense graph may be infeasible; the
/// callback-based [`for_each_path`](Self::for_each_path) method makes it
/// possible to interrupt the search early by returning
/// [`Break`](ControlFlow::Break).
///
/// The enumerator can be reused for several searches on the same graph;
/// allocations are recycled across calls.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use st_paths::enumerate::PathEnumerator;
/// use st_paths::graph::{AdjacencyMatrix, BitGraph};
///
/// // The complete graph on four nodes.
/// let graph = BitGraph::new(&AdjacencyMatrix::banded(4, 3));
/// let paths = PathEnumerator::new(&graph).paths(0, 3, no_logging![])?;
///
/// assert_eq!(
///     paths,
///     vec![
///         vec![0, 1, 2, 3],
///         vec![0, 1, 3],
///         vec![0, 2, 1, 3],
///         vec![0, 2, 3],
///         vec![0, 3],
///     ],
/// );
/// # Ok::<(), st_paths::graph::InvalidVertex>(())
/// ```
pub struct PathEnumerator<'a> {
    graph: &'a BitGraph,
    /// The nodes on the current root-to-frontier walk.
    path: Vec<usize>,
    /// The set of nodes on `path`.
    visited: NodeSet,
    /// One frame per element of `path`: the neighbors of `path[i]` still
    /// to be tried. Storing only the candidate mask avoids duplicating
    /// the node, which is already on the path.
    stack: Vec<NodeSet>,
}

impl<'a> PathEnumerator<'a> {
    /// Creates a new enumerator on the given graph.
    pub fn new(graph: &'a BitGraph) -> Self {
        Self {
            graph,
            path: Vec::with_capacity(16),
            visited: NodeSet::new(graph.num_nodes()),
            stack: Vec::with_capacity(16),
        }
    }

    fn check(&self, node: usize) -> Result<(), InvalidVertex> {
        if node < self.graph.num_nodes() {
            Ok(())
        } else {
            Err(InvalidVertex {
                vertex: node,
                num_nodes: self.graph.num_nodes(),
            })
        }
    }

    /// Enumerates the simple paths from `start` to `end`, invoking
    /// `callback` on each path as it is discovered.
    ///
    /// Paths are emitted in depth-first order, expanding the
    /// lowest-indexed untried neighbor first. If the callback returns
    /// [`Break`](ControlFlow::Break), the enumeration stops and the
    /// break value is returned; a completed enumeration returns
    /// [`Continue`](ControlFlow::Continue).
    ///
    /// If `start == end` the single emitted path is `[start]`; if no path
    /// exists the callback is never invoked.
    pub fn for_each_path<E, C: FnMut(&[usize]) -> ControlFlow<E>>(
        &mut self,
        start: usize,
        end: usize,
        mut callback: C,
    ) -> Result<ControlFlow<E>, InvalidVertex> {
        self.check(start)?;
        self.check(end)?;
        self.reset();

        self.path.push(start);
        if start == end {
            return Ok(callback(&self.path));
        }

        self.visited.insert(start);
        self.stack
            .push(self.graph.unvisited_successors(start, &self.visited));

        while let Some(available) = self.stack.last_mut() {
            let Some(neighbor) = available.pop_first() else {
                // No candidates left: backtrack.
                self.stack.pop();
                if let Some(node) = self.path.pop() {
                    self.visited.remove(node);
                }
                continue;
            };

            if neighbor == end {
                // The target completes the path and is never extended
                // further, nor marked as visited: other branches may
                // reach it again.
                self.path.push(neighbor);
                let flow = callback(&self.path);
                self.path.pop();
                if flow.is_break() {
                    return Ok(flow);
                }
            } else if !self.visited.contains(neighbor) {
                self.visited.insert(neighbor);
                self.path.push(neighbor);
                self.stack
                    .push(self.graph.unvisited_successors(neighbor, &self.visited));
            }
            // A visited neighbor is an ancestor on the current path:
            // a simple path cannot revisit it.
        }

        Ok(Continue(()))
    }

    /// Returns all simple paths from `start` to `end`, in discovery
    /// order.
    pub fn paths(
        &mut self,
        start: usize,
        end: usize,
        pl: &mut impl ProgressLog,
    ) -> Result<Vec<Vec<usize>>, InvalidVertex> {
        pl.item_name("path");
        pl.expected_updates(None);
        pl.start(format!("Enumerating ({start}, {end})-paths..."));

        let mut paths = Vec::new();
        self.for_each_path(start, end, |path| {
            paths.push(path.to_vec());
            pl.light_update();
            Continue(())
        })?
        .continue_value_no_break();

        pl.done();
        log::debug!("Found {} ({start}, {end})-paths", paths.len());
        Ok(paths)
    }

    /// Clears the search state so the enumerator can be reused.
    pub fn reset(&mut self) {
        self.path.clear();
        self.visited.clear();
        self.stack.clear();
    }
}
