//! Permutation groups given by a generating set, and the machinery to turn
//! that generating set into a base-and-strong-generating-set structure.

pub mod options;
pub mod orbit;
pub mod perm_group;
pub mod product_replacement;
pub mod random_perm;
pub mod stabchain;

use crate::perm::{
    export::CyclePermutation,
    Permutation,
};
use std::fmt;

pub use options::AutomorphismOptions;
pub use perm_group::PermGroup;

/// A group given by a (possibly redundant) list of generators.
///
/// This is the low-level engine type: construction, orbit computation and
/// stabiliser-chain building all work against `Group<P>`. [`PermGroup`] is
/// the public façade that wraps a `Group` together with its computed BSGS.
#[derive(Debug, Clone)]
pub struct Group<P: Permutation> {
    pub(crate) generators: Vec<P>,
}

impl<P: Permutation> Group<P> {
    pub fn new(generators: &[P]) -> Self {
        Self {
            generators: generators.to_vec(),
        }
    }

    pub fn from_list(generators: Vec<P>) -> Self {
        Self { generators }
    }

    pub fn trivial() -> Self {
        Self { generators: Vec::new() }
    }

    pub fn generators(&self) -> &[P] {
        &self.generators
    }

    /// The degree of the smallest symmetric group containing every
    /// generator (largest moved point across all generators, plus one).
    pub fn symmetric_super_order(&self) -> usize {
        self.generators
            .iter()
            .filter_map(|p| p.lmp())
            .max()
            .map_or(0, |l| l + 1)
    }

    /// The symmetric group on `n` points, generated by an `n`-cycle and a
    /// transposition of the first two points.
    pub fn symmetric(n: usize) -> Self {
        if n < 2 {
            return Self::trivial();
        }
        let mut cycle: Vec<usize> = (1..n).collect();
        cycle.push(0);
        let mut transposition: Vec<usize> = (0..n).collect();
        transposition.swap(0, 1);
        Self::new(&[P::from_images(&cycle), P::from_images(&transposition)])
    }

    /// The cyclic group of order `n`, generated by a single `n`-cycle.
    pub fn cyclic(n: usize) -> Self {
        if n < 2 {
            return Self::trivial();
        }
        let mut cycle: Vec<usize> = (1..n).collect();
        cycle.push(0);
        Self::new(&[P::from_images(&cycle)])
    }

    /// The dihedral group of order `2n`, generated by a rotation and a
    /// reflection of an `n`-gon.
    pub fn dihedral(n: usize) -> Self {
        if n < 3 {
            return Self::cyclic(n);
        }
        let mut rotation: Vec<usize> = (1..n).collect();
        rotation.push(0);
        let reflection: Vec<usize> = (0..n).map(|i| (n - i) % n).collect();
        Self::new(&[P::from_images(&rotation), P::from_images(&reflection)])
    }

    /// The alternating group on `n` points, generated by 3-cycles
    /// `(0 1 i)` for `i` in `2..n`.
    pub fn alternating(n: usize) -> Self {
        if n < 3 {
            return Self::trivial();
        }
        let gens: Vec<P> = (2..n)
            .map(|i| CyclePermutation::single_cycle(&[1, 2, i + 1]).into_perm())
            .collect();
        Self::new(&gens)
    }

    /// Build a stabiliser chain using the deterministic incremental
    /// Schreier-Sims strategy with a largest-moved-point base selector.
    pub fn stabchain(&self) -> stabchain::DefaultStabchain<P> {
        stabchain::default_stabchain(self)
    }
}

impl<P: Permutation> fmt::Display for Group<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        for (i, g) in self.generators.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, ">")
    }
}

impl<P: Permutation> FromIterator<P> for Group<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_list(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::StandardPermutation;

    #[test]
    fn symmetric_degree() {
        let g = Group::<StandardPermutation>::symmetric(4);
        assert_eq!(g.symmetric_super_order(), 4);
    }

    #[test]
    fn trivial_has_no_generators() {
        let g = Group::<StandardPermutation>::trivial();
        assert!(g.generators().is_empty());
    }
}
