//! Strategies for choosing which point a new base level stabilises.

use crate::perm::Permutation;

/// Picks the point a newly discovered generator should be added to the
/// chain at, given the level the chain has reached so far.
pub trait BaseSelector<P: Permutation, T>: Clone + std::fmt::Debug {
    fn moved_point(&self, p: &P, level: usize) -> T;
}

/// Always picks the largest point moved by the generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LmpSelector;

impl<P: Permutation> BaseSelector<P, usize> for LmpSelector {
    fn moved_point(&self, p: &P, _level: usize) -> usize {
        p.lmp().expect("moved_point requested of the identity permutation")
    }
}

/// Always picks the smallest point moved by the generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmpSelector;

impl<P: Permutation> BaseSelector<P, usize> for SmpSelector {
    fn moved_point(&self, p: &P, _level: usize) -> usize {
        p.smp().expect("moved_point requested of the identity permutation")
    }
}
