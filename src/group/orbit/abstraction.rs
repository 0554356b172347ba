//! Pluggable strategies for resolving a coset representative from a
//! Schreier structure. A [`StabchainRecord`](super::super::stabchain::StabchainRecord)
//! is generic over its resolver so that a shallow, product-replacement-built
//! transversal and a fully factored one can share the same sifting code.

use super::transversal::factored_transversal::{
    representative_raw,
    representative_raw_as_word,
};
use crate::{
    perm::{
        Action,
        Permutation,
    },
    DetHashMap,
};
use std::marker::PhantomData;

/// Resolves a coset representative from a point-to-label Schreier table.
pub trait TransversalResolver<P, A>: Default + Clone + std::fmt::Debug
where
    P: Permutation,
    A: Action<P>,
{
    fn representative(
        &self,
        transversal: &DetHashMap<A::OrbitT, P>,
        base: A::OrbitT,
        point: A::OrbitT,
    ) -> Option<P>;

    fn representative_as_word(
        &self,
        transversal: &DetHashMap<A::OrbitT, P>,
        base: A::OrbitT,
        point: A::OrbitT,
    ) -> Option<Vec<P>>;

    /// `true` iff `g` is the generator that discovered `x` in this
    /// transversal, i.e. `g` labels a tree edge rather than a genuine
    /// back-edge. Schreier generators built from tree edges are always
    /// trivial, so a generator-enumeration loop can skip them.
    fn incoming(&self, transversal: &DetHashMap<A::OrbitT, P>, x: A::OrbitT, g: &P) -> bool {
        transversal.get(&x).is_some_and(|label| &label.inv() == g)
    }
}

/// Resolves representatives by walking the Schreier table and multiplying
/// the generators labelling each edge back to the base ("factored
/// transversal"), regardless of how that table was built.
pub struct FactoredTransversalResolver<A> {
    _marker: PhantomData<A>,
}

impl<A> std::fmt::Debug for FactoredTransversalResolver<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FactoredTransversalResolver").finish()
    }
}

impl<A> Clone for FactoredTransversalResolver<A> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<A> Default for FactoredTransversalResolver<A> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<P, A> TransversalResolver<P, A> for FactoredTransversalResolver<A>
where
    P: Permutation,
    A: Action<P>,
{
    fn representative(
        &self,
        transversal: &DetHashMap<A::OrbitT, P>,
        base: A::OrbitT,
        point: A::OrbitT,
    ) -> Option<P> {
        representative_raw(transversal, base, point, &A::default())
    }

    fn representative_as_word(
        &self,
        transversal: &DetHashMap<A::OrbitT, P>,
        base: A::OrbitT,
        point: A::OrbitT,
    ) -> Option<Vec<P>> {
        representative_raw_as_word(transversal, base, point, &A::default())
    }
}
