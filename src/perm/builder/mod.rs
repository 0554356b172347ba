//! Lazy permutation composition.
//!
//! [`PermBuilder`] lets a chain of multiplications (as built up by a
//! random walk through a Cayley graph, or by a stabiliser-chain builder
//! evaluating a coset representative) stay unevaluated until
//! [`PermBuilder::collapse`] is actually called, instead of materialising
//! an intermediate permutation at every step.

pub mod join;
pub mod pow;

use {
    crate::perm::Permutation,
    join::Join,
    pow::Pow,
};

pub trait PermBuilder<P: Permutation>: Clone {
    /// The image of `x` under the permutation this builder represents.
    fn build_apply(&self, x: usize) -> usize;

    fn build_inv(&self) -> P {
        self.collapse().inv()
    }

    fn build_pow(&self, x: isize) -> Pow<Self> {
        Pow::new(self.clone(), x)
    }

    /// `self * other^-1`.
    fn build_divide<InPerm: PermBuilder<P>>(&self, other: &InPerm) -> Join<Self, Pow<InPerm>> {
        Join::new(self.clone(), Pow::new(other.clone(), -1))
    }

    fn build_multiply<InPerm: PermBuilder<P>>(&self, next: &InPerm) -> Join<Self, InPerm> {
        Join::new(self.clone(), next.clone())
    }

    /// Evaluate the whole chain into a single permutation.
    fn collapse(&self) -> P;
}

impl<P> PermBuilder<P> for P
where
    P: Permutation,
{
    fn build_apply(&self, x: usize) -> usize {
        self.apply(x)
    }

    fn collapse(&self) -> P {
        self.clone()
    }
}
