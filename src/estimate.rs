/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Monte Carlo estimation of the number of simple paths between two
//! nodes.
//!
//! The estimator implements the sequential-importance-sampling scheme of
//! Roberts and Kroese, [“Estimating the number of *s*-*t*
//! paths in a graph”](https://doi.org/10.7155/jgaa.00142), *J. Graph
//! Algorithms Appl.*, 12(1):195–214, 2007. A trial is a self-avoiding
//! random walk that chooses uniformly among the unvisited neighbors of
//! the current node; a walk reaching the target generates its path with
//! probability *g* equal to the product of the inverse branching
//! factors along the walk, so 1/*g* is an unbiased estimator of the
//! number of paths, and walks stuck in a dead end contribute zero.
//! Averages over many trials are themselves averaged over independent
//! bootstrap passes, which reduces the variance of the returned value
//! but leaves its expectation unchanged.

use std::marker::PhantomData;

use dsi_progress_logger::{ConcurrentProgressLog, ProgressLog};
use kahan::KahanSum;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::graph::{BitGraph, InvalidVertex, NodeSet};

/// The outcome of a single self-avoiding random-walk trial.
#[derive(Debug, Clone, PartialEq)]
pub enum Trial {
    /// The walk reached the target. `weight` is the probability with
    /// which this particular path was generated; its inverse is an
    /// unbiased single-trial estimate of the number of paths.
    ///
    /// The path itself is returned for inspection only: the estimator
    /// arithmetic uses just the weight.
    Arrived { path: Vec<usize>, weight: f64 },
    /// The walk reached a node with no unvisited neighbors before
    /// reaching the target. This is a zero-weight observation, not an
    /// error.
    DeadEnd,
}

/// Runs one self-avoiding random walk from `start` towards `end`.
fn sample(graph: &BitGraph, rng: &mut impl Rng, start: usize, end: usize) -> Trial {
    let mut path = vec![start];
    if start == end {
        return Trial::Arrived { path, weight: 1.0 };
    }

    let mut visited = NodeSet::new(graph.num_nodes());
    visited.insert(start);
    let mut weight = 1.0;
    let mut current = start;

    loop {
        let candidates = graph.unvisited_successors(current, &visited);
        // The branching factor counts unvisited neighbors only, and is
        // recorded before the uniform choice.
        let branching = candidates.len();
        if branching == 0 {
            return Trial::DeadEnd;
        }
        let next = candidates
            .nth(rng.random_range(0..branching))
            .expect("the rank is smaller than the number of candidates");
        weight /= branching as f64;
        visited.insert(next);
        path.push(next);
        if next == end {
            return Trial::Arrived { path, weight };
        }
        current = next;
    }
}

/// Runs `trials` trials and returns the average of the inverse weights
/// of the successful ones.
fn run_pass(graph: &BitGraph, rng: &mut impl Rng, start: usize, end: usize, trials: usize) -> f64 {
    let mut sum = KahanSum::<f64>::new();
    for _ in 0..trials {
        if let Trial::Arrived { weight, .. } = sample(graph, rng, start, end) {
            sum += weight.recip();
        }
    }
    sum.sum() / trials as f64
}

fn check(graph: &BitGraph, node: usize) -> Result<(), InvalidVertex> {
    if node < graph.num_nodes() {
        Ok(())
    } else {
        Err(InvalidVertex {
            vertex: node,
            num_nodes: graph.num_nodes(),
        })
    }
}

/// A sequential importance-sampling estimator of the number of simple
/// paths between two nodes.
///
/// The random source is injected at construction, so trials are
/// independently seedable and deterministic under test.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use st_paths::estimate::CountEstimator;
/// use st_paths::graph::{AdjacencyMatrix, BitGraph};
///
/// // The complete graph on four nodes has five (0, 3)-paths.
/// let graph = BitGraph::new(&AdjacencyMatrix::banded(4, 3));
/// let mut estimator = CountEstimator::new(&graph, SmallRng::seed_from_u64(0));
/// let estimate = estimator.estimate(0, 3, 1000, 10, no_logging![])?;
///
/// assert!((estimate - 5.0).abs() < 1.0);
/// # Ok::<(), st_paths::graph::InvalidVertex>(())
/// ```
pub struct CountEstimator<'a, R: Rng> {
    graph: &'a BitGraph,
    rng: R,
}

impl<'a, R: Rng> CountEstimator<'a, R> {
    /// Creates an estimator on the given graph using the given random
    /// source.
    pub fn new(graph: &'a BitGraph, rng: R) -> Self {
        Self { graph, rng }
    }

    /// Performs a single self-avoiding random-walk trial from `start`
    /// towards `end`.
    ///
    /// If `start == end` the trial always arrives with the singleton
    /// path `[start]` and weight 1.
    pub fn sample_path(&mut self, start: usize, end: usize) -> Result<Trial, InvalidVertex> {
        check(self.graph, start)?;
        check(self.graph, end)?;
        Ok(sample(self.graph, &mut self.rng, start, end))
    }

    /// Estimates the number of simple paths from `start` to `end`.
    ///
    /// Runs `passes` independent repetitions of `trials_per_pass` trials
    /// each and returns the arithmetic mean of the per-pass estimates.
    /// The expectation of the result is the exact number of paths for
    /// any choice of the parameters; its variance shrinks as their
    /// product grows.
    ///
    /// # Panics
    ///
    /// Panics if `trials_per_pass` or `passes` is zero.
    pub fn estimate(
        &mut self,
        start: usize,
        end: usize,
        trials_per_pass: usize,
        passes: usize,
        pl: &mut impl ProgressLog,
    ) -> Result<f64, InvalidVertex> {
        check(self.graph, start)?;
        check(self.graph, end)?;
        assert!(trials_per_pass > 0, "trials_per_pass must be positive");
        assert!(passes > 0, "passes must be positive");

        pl.item_name("pass");
        pl.expected_updates(Some(passes));
        pl.start(format!(
            "Estimating the number of ({start}, {end})-paths ({trials_per_pass} trials per pass)..."
        ));

        let mut total = KahanSum::<f64>::new();
        for _ in 0..passes {
            total += run_pass(self.graph, &mut self.rng, start, end, trials_per_pass);
            pl.update();
        }
        pl.done();

        Ok(total.sum() / passes as f64)
    }
}

/// A pass-parallel version of [`CountEstimator`].
///
/// Each pass runs as an independent Rayon task with a private random
/// stream derived from the base seed and the pass index, so there is no
/// shared mutable state between trials. Per-pass estimates are collected
/// in pass order and reduced by a single-threaded compensated sum: for a
/// fixed seed the result is identical across runs, whatever the number
/// of threads or their scheduling.
///
/// # Examples
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use st_paths::estimate::ParCountEstimator;
/// use st_paths::graph::{AdjacencyMatrix, BitGraph};
///
/// let graph = BitGraph::new(&AdjacencyMatrix::banded(4, 3));
/// let estimator: ParCountEstimator = ParCountEstimator::new(&graph, 0);
/// let estimate = estimator.estimate(0, 3, 1000, 10, no_logging![])?;
///
/// assert!((estimate - 5.0).abs() < 1.0);
/// # Ok::<(), st_paths::graph::InvalidVertex>(())
/// ```
pub struct ParCountEstimator<'a, R: Rng + SeedableRng = SmallRng> {
    graph: &'a BitGraph,
    seed: u64,
    _rng: PhantomData<R>,
}

impl<'a, R: Rng + SeedableRng> ParCountEstimator<'a, R> {
    /// Creates an estimator on the given graph; `seed` determines the
    /// per-pass random streams.
    pub fn new(graph: &'a BitGraph, seed: u64) -> Self {
        Self {
            graph,
            seed,
            _rng: PhantomData,
        }
    }

    /// Estimates the number of simple paths from `start` to `end`,
    /// running passes in parallel.
    ///
    /// See [`CountEstimator::estimate`] for the meaning of the
    /// parameters.
    ///
    /// # Panics
    ///
    /// Panics if `trials_per_pass` or `passes` is zero.
    pub fn estimate(
        &self,
        start: usize,
        end: usize,
        trials_per_pass: usize,
        passes: usize,
        pl: &mut impl ConcurrentProgressLog,
    ) -> Result<f64, InvalidVertex> {
        check(self.graph, start)?;
        check(self.graph, end)?;
        assert!(trials_per_pass > 0, "trials_per_pass must be positive");
        assert!(passes > 0, "passes must be positive");

        pl.item_name("pass");
        pl.expected_updates(Some(passes));
        pl.start(format!(
            "Estimating the number of ({start}, {end})-paths ({trials_per_pass} trials per pass)..."
        ));

        let graph = self.graph;
        let seed = self.seed;
        let estimates = (0..passes)
            .into_par_iter()
            .map_with(pl.clone(), |pl, pass| {
                // seed_from_u64 runs the seed through SplitMix64, so
                // consecutive pass seeds yield decorrelated streams.
                let mut rng = R::seed_from_u64(seed.wrapping_add(pass as u64));
                let estimate = run_pass(graph, &mut rng, start, end, trials_per_pass);
                pl.update();
                estimate
            })
            .collect::<Vec<_>>();
        pl.done();

        let mut total = KahanSum::<f64>::new();
        for estimate in estimates {
            total += estimate;
        }
        Ok(total.sum() / passes as f64)
    }
}
