/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::ops::Index;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::GraphError;

/// A dense symmetric 0/1 adjacency matrix stored as a flat vector in
/// row-major order.
///
/// The matrix represents an undirected, unweighted, simple graph on nodes
/// `0..n`. Matrices built through [`add_edge`](Self::add_edge) are
/// symmetric with a zero diagonal by construction; arbitrary external
/// data must go through [`from_rows`](Self::from_rows), which validates
/// shape, entries, and symmetry. Self-loops are not part of any simple
/// path, so diagonal entries are always ignored.
///
/// # Examples
///
/// ```
/// use st_paths::graph::AdjacencyMatrix;
///
/// let mut matrix = AdjacencyMatrix::new(3);
/// matrix.add_edge(0, 1);
/// matrix.add_edge(1, 2);
///
/// assert!(matrix[(0, 1)] && matrix[(1, 0)]);
/// assert!(!matrix[(0, 2)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    data: Box<[bool]>,
    n: usize,
}

impl AdjacencyMatrix {
    /// Creates an *n* × *n* matrix with no edges.
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![false; n * n].into_boxed_slice(),
            n,
        }
    }

    /// Returns the number of nodes of the graph (the order of the matrix).
    pub fn num_nodes(&self) -> usize {
        self.n
    }

    /// Adds the undirected edge (`u`, `v`), setting both entries.
    ///
    /// Adding a self-loop has no effect: the diagonal stays zero.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is out of range.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(
            u < self.n && v < self.n,
            "Edge ({u}, {v}) is out of range for a matrix of order {}",
            self.n
        );
        if u == v {
            return;
        }
        self.data[u * self.n + v] = true;
        self.data[v * self.n + u] = true;
    }

    /// Builds a matrix from rows of 0/1 entries.
    ///
    /// The number of entries of each row must be equal to the number of
    /// rows, every entry must be 0 or 1, and the matrix must be
    /// symmetric. Diagonal entries are accepted but ignored.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GraphError> {
        let n = rows.len();
        let mut data = vec![false; n * n].into_boxed_slice();
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(GraphError::NotSquare {
                    row: i,
                    len: row.len(),
                    n,
                });
            }
            for (j, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => {
                        if i != j {
                            data[i * n + j] = true;
                        }
                    }
                    _ => {
                        return Err(GraphError::BadEntry {
                            row: i,
                            col: j,
                            value,
                        })
                    }
                }
            }
        }
        for i in 0..n {
            for j in 0..i {
                if data[i * n + j] != data[j * n + i] {
                    return Err(GraphError::Asymmetric { row: i, col: j });
                }
            }
        }
        Ok(Self { data, n })
    }

    /// Creates a band matrix connecting each node to all nodes at index
    /// distance at most `eps`.
    ///
    /// With `eps = 1` this is the path graph on `n` nodes; with
    /// `eps >= n - 1` it is the complete graph.
    pub fn banded(n: usize, eps: usize) -> Self {
        let mut matrix = Self::new(n);
        for i in 0..n {
            for j in i + 1..n.min(i + eps + 1) {
                matrix.add_edge(i, j);
            }
        }
        matrix
    }

    /// Creates an Erdős–Rényi random graph: each unordered pair of nodes
    /// becomes an edge independently with probability `p`.
    ///
    /// The graph is a deterministic function of `n`, `p`, and `seed`.
    /// Note that the graph may have isolated nodes.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not in [0..1].
    pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1], got {p}");
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut matrix = Self::new(n);
        for i in 0..n {
            for j in i + 1..n {
                if rng.random_bool(p) {
                    matrix.add_edge(i, j);
                }
            }
        }
        matrix
    }
}

impl Index<(usize, usize)> for AdjacencyMatrix {
    type Output = bool;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.n + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut matrix = AdjacencyMatrix::new(4);
        matrix.add_edge(0, 3);
        assert!(matrix[(0, 3)]);
        assert!(matrix[(3, 0)]);
        assert!(!matrix[(0, 1)]);
    }

    #[test]
    fn test_self_loops_are_ignored() {
        let mut matrix = AdjacencyMatrix::new(3);
        matrix.add_edge(1, 1);
        assert!(!matrix[(1, 1)]);

        let matrix = AdjacencyMatrix::from_rows(&[[1, 1, 0], [1, 0, 1], [0, 1, 1]]).unwrap();
        assert!(!matrix[(0, 0)]);
        assert!(!matrix[(2, 2)]);
        assert!(matrix[(0, 1)]);
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        assert_eq!(
            AdjacencyMatrix::from_rows(&[vec![0, 1], vec![1, 0, 0]]),
            Err(GraphError::NotSquare {
                row: 1,
                len: 3,
                n: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_bad_entries() {
        assert_eq!(
            AdjacencyMatrix::from_rows(&[[0, 2], [2, 0]]),
            Err(GraphError::BadEntry {
                row: 0,
                col: 1,
                value: 2
            })
        );
    }

    #[test]
    fn test_from_rows_rejects_asymmetric_matrices() {
        assert_eq!(
            AdjacencyMatrix::from_rows(&[[0, 1], [0, 0]]),
            Err(GraphError::Asymmetric { row: 1, col: 0 })
        );
    }

    #[test]
    fn test_banded() {
        let matrix = AdjacencyMatrix::banded(5, 2);
        assert!(matrix[(0, 1)]);
        assert!(matrix[(0, 2)]);
        assert!(!matrix[(0, 3)]);
        assert!(matrix[(3, 4)]);
        assert!(!matrix[(2, 2)]);
    }

    #[test]
    fn test_erdos_renyi_is_symmetric_and_reproducible() {
        let g0 = AdjacencyMatrix::erdos_renyi(16, 0.3, 42);
        let g1 = AdjacencyMatrix::erdos_renyi(16, 0.3, 42);
        assert_eq!(g0, g1);
        for i in 0..16 {
            assert!(!g0[(i, i)]);
            for j in 0..16 {
                assert_eq!(g0[(i, j)], g0[(j, i)]);
            }
        }
    }
}
