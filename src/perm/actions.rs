//! Generalised group actions.
//!
//! The Schreier-structure and stabiliser-chain machinery is written against
//! an abstract [`Action`] rather than against [`Permutation::apply`]
//! directly, so that the same code can later act on domains other than bare
//! points (e.g. ordered pairs, blocks) without touching the BSGS builders.
//! Only the point action is needed by this crate today.

use crate::perm::Permutation;
use std::hash::Hash;

/// An action of permutations of type `P` on a domain `OrbitT`.
pub trait Action<P: Permutation>: Default + Clone + std::fmt::Debug {
    type OrbitT: Clone + Eq + Hash + std::fmt::Debug;

    fn apply(&self, perm: &P, point: Self::OrbitT) -> Self::OrbitT;
}

/// The natural action of a permutation on the points of its domain.
pub struct SimpleApplication<P> {
    _marker: std::marker::PhantomData<P>,
}

impl<P> std::fmt::Debug for SimpleApplication<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimpleApplication").finish()
    }
}

impl<P> Clone for SimpleApplication<P> {
    fn clone(&self) -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<P> Default for SimpleApplication<P> {
    fn default() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

impl<P: Permutation> Action<P> for SimpleApplication<P> {
    type OrbitT = usize;

    fn apply(&self, perm: &P, point: usize) -> usize {
        perm.apply(point)
    }
}
