pub mod selectors;

use crate::perm::{
    Action,
    Permutation,
};
use std::marker::PhantomData;

/// An ordered sequence of base points for a stabiliser chain.
#[derive(Debug, Clone)]
pub struct Base<P, A>
where
    P: Permutation,
    A: Action<P>,
{
    base: Vec<A::OrbitT>,
    _marker: PhantomData<P>,
}

impl<P, A> Base<P, A>
where
    P: Permutation,
    A: Action<P>,
{
    pub fn new(base: Vec<A::OrbitT>) -> Self {
        Self {
            base,
            _marker: PhantomData,
        }
    }

    pub fn base(&self) -> &[A::OrbitT] {
        &self.base
    }
}
