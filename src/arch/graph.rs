//! A processor-interconnect graph and the brute-force computation of its
//! automorphism group.

use crate::{
    group::PermGroup,
    perm::{
        Permutation,
        StandardPermutation,
    },
};

/// An undirected, unweighted adjacency structure over `0..n` processing
/// elements.
#[derive(Debug, Clone)]
pub struct Graph {
    n: usize,
    adjacency: Vec<bool>,
}

impl Graph {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            adjacency: vec![false; n * n],
        }
    }

    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::new(n);
        for &(a, b) in edges {
            g.add_edge(a, b);
        }
        g
    }

    pub fn add_edge(&mut self, a: usize, b: usize) {
        self.adjacency[a * self.n + b] = true;
        self.adjacency[b * self.n + a] = true;
    }

    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency[a * self.n + b]
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// A ring of `n` processing elements, each connected to its two
    /// neighbours.
    pub fn ring(n: usize) -> Self {
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        Self::from_edges(n, &edges)
    }

    /// The complete graph on `n` processing elements.
    pub fn complete(n: usize) -> Self {
        let edges: Vec<(usize, usize)> = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect();
        Self::from_edges(n, &edges)
    }
}

/// Computes the automorphism group of a [`Graph`].
pub trait GraphCanonicalizer {
    fn automorphisms(&self) -> PermGroup<StandardPermutation>;
}

impl GraphCanonicalizer for Graph {
    /// Brute-force over the symmetric group on `n` points, keeping every
    /// permutation that preserves adjacency. Fine for the small graphs this
    /// crate is exercised with; a real deployment would swap in an
    /// orbit-refinement backend (e.g. nauty) behind this same trait.
    fn automorphisms(&self) -> PermGroup<StandardPermutation> {
        let n = self.n;
        let mut generators = Vec::new();
        let mut indices: Vec<usize> = (0..n).collect();
        permute_all(&mut indices, 0, &mut |candidate| {
            let preserves = (0..n).all(|a| (0..n).all(|b| self.adjacent(a, b) == self.adjacent(candidate[a], candidate[b])));
            if preserves {
                generators.push(StandardPermutation::from_images(candidate));
            }
        });
        PermGroup::new(&generators)
    }
}

fn permute_all(arr: &mut [usize], k: usize, visit: &mut impl FnMut(&[usize])) {
    if k == arr.len() {
        visit(arr);
        return;
    }
    for i in k..arr.len() {
        arr.swap(k, i);
        permute_all(arr, k + 1, visit);
        arr.swap(k, i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_of_four_has_dihedral_automorphisms() {
        let g = Graph::ring(4);
        let aut = g.automorphisms();
        assert_eq!(aut.order(), num_bigint::BigUint::from(8u32));
    }

    #[test]
    fn complete_graph_automorphisms_are_symmetric() {
        let g = Graph::complete(4);
        let aut = g.automorphisms();
        assert!(aut.is_symmetric());
    }
}
