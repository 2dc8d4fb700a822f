/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::AdjacencyMatrix;

const BITS: usize = usize::BITS as usize;

/// A graph stored as one neighbor bitmask per node.
///
/// Bit *j* of the mask of node *i* is set iff the edge (*i*, *j*) is
/// present; the diagonal of the source matrix is ignored, so no mask ever
/// contains its own node. Masks are sequences of `usize` words, so there
/// is no limit on the number of nodes; graphs with at most
/// `usize::BITS` nodes could use a single word per mask, but this
/// implementation does not special-case them.
///
/// The structure is immutable after construction and can be shared
/// freely between algorithms and threads.
///
/// # Examples
///
/// ```
/// use st_paths::graph::{AdjacencyMatrix, BitGraph};
///
/// let mut matrix = AdjacencyMatrix::new(3);
/// matrix.add_edge(0, 1);
/// matrix.add_edge(1, 2);
/// let graph = BitGraph::new(&matrix);
///
/// assert_eq!(graph.degree(1), 2);
/// assert!(graph.has_edge(0, 1));
/// assert!(!graph.has_edge(0, 2));
/// assert_eq!(graph.successors(1).iter().collect::<Vec<_>>(), vec![0, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct BitGraph {
    /// `num_nodes` rows of `row_words` words each, in row-major order.
    masks: Box<[usize]>,
    row_words: usize,
    num_nodes: usize,
}

impl BitGraph {
    /// Derives the bitmask representation from an adjacency matrix.
    pub fn new(matrix: &AdjacencyMatrix) -> Self {
        let num_nodes = matrix.num_nodes();
        let row_words = num_nodes.div_ceil(BITS);
        let mut masks = vec![0; num_nodes * row_words].into_boxed_slice();
        for i in 0..num_nodes {
            let row = &mut masks[i * row_words..(i + 1) * row_words];
            for j in 0..num_nodes {
                if i != j && matrix[(i, j)] {
                    row[j / BITS] |= 1 << (j % BITS);
                }
            }
        }
        Self {
            masks,
            row_words,
            num_nodes,
        }
    }

    /// Returns the number of nodes of the graph.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Returns the words of the neighbor mask of `node`.
    fn mask(&self, node: usize) -> &[usize] {
        &self.masks[node * self.row_words..(node + 1) * self.row_words]
    }

    /// Returns whether the edge (`u`, `v`) is present.
    ///
    /// # Panics
    ///
    /// Panics if `u` or `v` is out of range.
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        assert!(
            v < self.num_nodes,
            "Node {v} is out of range for a graph with {} nodes",
            self.num_nodes
        );
        self.mask(u)[v / BITS] & 1 << (v % BITS) != 0
    }

    /// Returns the degree of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.mask(node).iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns the set of neighbors of `node`.
    pub fn successors(&self, node: usize) -> NodeSet {
        NodeSet {
            words: self.mask(node).to_vec().into_boxed_slice(),
        }
    }

    /// Returns the set of neighbors of `node` not contained in `visited`.
    ///
    /// This is the wordwise and-not of the neighbor mask with the visited
    /// set, the operation driving both the exhaustive search and the
    /// self-avoiding random walks.
    ///
    /// # Panics
    ///
    /// Panics if `visited` was created with a smaller capacity than the
    /// number of nodes of the graph.
    pub fn unvisited_successors(&self, node: usize, visited: &NodeSet) -> NodeSet {
        NodeSet {
            words: self
                .mask(node)
                .iter()
                .zip(&visited.words[..self.row_words])
                .map(|(&mask, &visited)| mask & !visited)
                .collect(),
        }
    }
}

/// A fixed-capacity set of node indices stored as a sequence of words.
///
/// Bit *i* of the word sequence denotes membership of node *i*. The type
/// backs both the visited sets and the per-frame candidate masks of the
/// path algorithms, which need cheap insertion and removal, lowest-member
/// extraction, and uniform selection by rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSet {
    words: Box<[usize]>,
}

impl NodeSet {
    /// Creates an empty set able to hold nodes in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(BITS)].into_boxed_slice(),
        }
    }

    /// Adds `node` to the set.
    ///
    /// # Panics
    ///
    /// Panics if `node` exceeds the capacity of the set.
    pub fn insert(&mut self, node: usize) {
        self.words[node / BITS] |= 1 << (node % BITS);
    }

    /// Removes `node` from the set.
    ///
    /// # Panics
    ///
    /// Panics if `node` exceeds the capacity of the set.
    pub fn remove(&mut self, node: usize) {
        self.words[node / BITS] &= !(1 << (node % BITS));
    }

    /// Returns whether the set contains `node`.
    pub fn contains(&self, node: usize) -> bool {
        self.words
            .get(node / BITS)
            .is_some_and(|word| word & 1 << (node % BITS) != 0)
    }

    /// Returns the number of nodes in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Removes all nodes from the set.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Removes and returns the smallest node in the set, if any.
    pub fn pop_first(&mut self) -> Option<usize> {
        for (i, word) in self.words.iter_mut().enumerate() {
            if *word != 0 {
                let bit = word.trailing_zeros() as usize;
                *word &= *word - 1;
                return Some(i * BITS + bit);
            }
        }
        None
    }

    /// Returns the `k`-th smallest node in the set, if any.
    pub fn nth(&self, mut k: usize) -> Option<usize> {
        for (i, &word) in self.words.iter().enumerate() {
            let ones = word.count_ones() as usize;
            if k < ones {
                let mut word = word;
                for _ in 0..k {
                    word &= word - 1;
                }
                return Some(i * BITS + word.trailing_zeros() as usize);
            }
            k -= ones;
        }
        None
    }

    /// Returns an iterator over the nodes of the set in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            words: &self.words,
            word_index: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The iterator returned by [`NodeSet::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    words: &'a [usize],
    word_index: usize,
    current: usize,
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.current == 0 {
            self.word_index += 1;
            if self.word_index >= self.words.len() {
                return None;
            }
            self.current = self.words[self.word_index];
        }
        let bit = self.current.trailing_zeros() as usize;
        self.current &= self.current - 1;
        Some(self.word_index * BITS + bit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_set_basic_ops() {
        let mut set = NodeSet::new(10);
        assert!(set.is_empty());
        set.insert(3);
        set.insert(7);
        set.insert(3);
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(!set.contains(4));
        set.remove(3);
        assert!(!set.contains(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_node_set_pop_first() {
        let mut set = NodeSet::new(200);
        set.insert(150);
        set.insert(3);
        set.insert(64);
        assert_eq!(set.pop_first(), Some(3));
        assert_eq!(set.pop_first(), Some(64));
        assert_eq!(set.pop_first(), Some(150));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn test_node_set_nth() {
        let mut set = NodeSet::new(200);
        for node in [1, 63, 64, 130] {
            set.insert(node);
        }
        assert_eq!(set.nth(0), Some(1));
        assert_eq!(set.nth(1), Some(63));
        assert_eq!(set.nth(2), Some(64));
        assert_eq!(set.nth(3), Some(130));
        assert_eq!(set.nth(4), None);
    }

    #[test]
    fn test_node_set_iter() {
        let mut set = NodeSet::new(300);
        let nodes = [0, 31, 64, 65, 255];
        for node in nodes {
            set.insert(node);
        }
        assert_eq!(set.iter().collect::<Vec<_>>(), nodes);
        assert_eq!(NodeSet::new(0).iter().next(), None);
    }

    #[test]
    fn test_bit_graph_masks_cross_word_boundaries() {
        // A path graph too large for a single-word mask.
        let graph = BitGraph::new(&AdjacencyMatrix::banded(70, 1));
        assert_eq!(graph.num_nodes(), 70);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(65), 2);
        assert!(graph.has_edge(63, 64));
        assert!(!graph.has_edge(63, 65));
        assert_eq!(graph.successors(65).iter().collect::<Vec<_>>(), vec![64, 66]);
    }

    #[test]
    fn test_unvisited_successors() {
        let graph = BitGraph::new(&AdjacencyMatrix::banded(6, 2));
        let mut visited = NodeSet::new(6);
        visited.insert(2);
        visited.insert(3);
        // Neighbors of 4 are {2, 3, 5}; only 5 is unvisited.
        let available = graph.unvisited_successors(4, &visited);
        assert_eq!(available.iter().collect::<Vec<_>>(), vec![5]);
        assert_eq!(available.len(), 1);
    }

    #[test]
    fn test_diagonal_never_set() {
        let matrix =
            AdjacencyMatrix::from_rows(&[[1, 1, 0], [1, 1, 1], [0, 1, 1]]).unwrap();
        let graph = BitGraph::new(&matrix);
        for node in 0..3 {
            assert!(!graph.has_edge(node, node));
        }
        assert_eq!(graph.degree(1), 2);
    }
}
