//! Strategies for turning a generating set into a [`Stabchain`].

pub mod ift;
pub mod random;

use super::Stabchain;
use crate::{
    group::{
        orbit::abstraction::TransversalResolver,
        Group,
    },
    perm::{
        Action,
        Permutation,
    },
};

/// Incrementally feeds generators into a stabiliser-chain construction and
/// hands back the finished chain.
pub trait Builder<P, V, A>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    fn set_generators(&mut self, gens: &Group<P>);

    fn build(self) -> Stabchain<P, V, A>;
}
