//! Dense permutations of a finite domain.
//!
//! A [`Permutation`] is a bijection of `{0, 1, .., degree - 1}` represented
//! by its image vector. Points are zero-indexed internally (as in the
//! teacher's `StandardPermutation`); one-indexed human-facing domains (cycle
//! notation, task-to-processor mappings) are layered on top at the
//! [`export`] and `arch` boundaries, which is also where an `offset` is
//! added or removed.

pub mod actions;
pub mod builder;
pub mod export;
pub mod impls;
pub mod utils;

pub use actions::{
    Action,
    SimpleApplication,
};
pub use impls::standard::StandardPermutation;

use std::{
    fmt,
    hash::Hash,
};

/// The permutation representation used by default throughout the crate.
pub type DefaultPermutation = StandardPermutation;

/// A bijection of `{0, .., degree - 1}`.
///
/// Implementors are immutable value types: every operation returns a fresh
/// permutation rather than mutating `self`. Composition follows the
/// "apply left-to-right" convention: `p.multiply(&q)` applied to `x` equals
/// `q.apply(p.apply(x))`.
pub trait Permutation: Clone + Eq + Hash + fmt::Display + fmt::Debug {
    /// The identity permutation of degree zero (moves nothing).
    fn id() -> Self;

    /// Build a permutation from a dense image vector, `images[i]` being the
    /// image of point `i`. Panics if `images` is not a permutation of
    /// `0..images.len()`.
    fn from_images(images: &[usize]) -> Self;

    /// Degree-preserving left shift: the identity on `0..k`, and `p`
    /// shifted so that point `k + i` maps to `k + p.apply(i)`.
    fn shift(&self, k: usize) -> Self;

    /// `true` iff this is the identity permutation.
    fn is_id(&self) -> bool;

    /// The image of `x` under this permutation.
    fn apply(&self, x: usize) -> usize;

    /// The inverse permutation.
    fn inv(&self) -> Self;

    /// `self * other`, meaning "apply `self` then `other`":
    /// `self.multiply(other).apply(x) == other.apply(self.apply(x))`.
    fn multiply(&self, other: &Self) -> Self;

    /// `self` raised to an integer power (negative powers invert first).
    fn pow(&self, pow: isize) -> Self;

    /// The multiplicative order of this permutation (lcm of its cycle
    /// lengths; 1 for the identity).
    fn order(&self) -> usize;

    /// `self * other^-1`.
    fn divide(&self, other: &Self) -> Self {
        self.multiply(&other.inv())
    }

    /// The largest point moved by this permutation, or `None` if it is the
    /// identity.
    fn lmp(&self) -> Option<usize>;

    /// The smallest point moved by this permutation, or `None` if it is the
    /// identity.
    fn smp(&self) -> Option<usize>;

    /// `true` iff every point in `points` is fixed.
    fn stabilizes(&self, points: impl IntoIterator<Item = usize>) -> bool {
        points.into_iter().all(|x| self.apply(x) == x)
    }

    /// Degree implied by the largest moved point (`lmp() + 1`, or `0` for
    /// the identity). Not necessarily the length of the stored image
    /// vector, which may be larger after [`Permutation::extend`].
    fn degree(&self) -> usize {
        self.lmp().map_or(0, |l| l + 1)
    }

    /// Extend to a larger domain, fixing all new points. `n` must be at
    /// least [`Permutation::degree`].
    fn extend(&self, n: usize) -> Self {
        let mut images: Vec<usize> = (0..n.max(self.degree())).map(|i| self.apply(i)).collect();
        images.resize(n, 0);
        for (i, img) in images.iter_mut().enumerate().take(n).skip(self.degree()) {
            *img = i;
        }
        Self::from_images(&images)
    }

    /// Restrict to a sub-domain `d`: keep only cycles fully contained in
    /// `d`, dropping the action on any point whose cycle leaves `d`.
    fn restricted(&self, d: &[usize]) -> Self {
        use crate::DetHashSet;
        let domain: DetHashSet<usize> = d.iter().cloned().collect();
        let n = self.degree();
        let mut images: Vec<usize> = (0..n).collect();
        for &start in d {
            if start >= n {
                continue;
            }
            let mut cycle = vec![start];
            let mut cur = self.apply(start);
            let mut fully_contained = true;
            while cur != start {
                if !domain.contains(&cur) {
                    fully_contained = false;
                    break;
                }
                cycle.push(cur);
                cur = self.apply(cur);
            }
            if fully_contained {
                for &p in &cycle {
                    images[p] = self.apply(p);
                }
            }
        }
        Self::from_images(&images)
    }
}
