//! Rebuilding a stabiliser chain over a new, compatible choice of base.

pub mod random;

use super::{
    base::Base,
    Stabchain,
};
use crate::{
    group::orbit::abstraction::TransversalResolver,
    perm::{
        Action,
        Permutation,
    },
};

pub trait BaseChangeBuilder<P, V, A>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    fn set_base<W: TransversalResolver<P, A>>(&mut self, chain: &Stabchain<P, W, A>, base: Base<P, A>);

    fn build(self) -> Stabchain<P, V, A>;
}
