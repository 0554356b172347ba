pub mod factored_transversal;
pub mod shallow_transversal;

use crate::{
    perm::{
        Action,
        Permutation,
    },
    DetHashMap,
};

/// Sanity-check a Schreier table: every stored label must map its point
/// one step closer to `base`, and the base itself must be present.
pub fn valid_transversal<P, A>(
    transversal: &DetHashMap<A::OrbitT, P>,
    base: A::OrbitT,
    action: &A,
) -> bool
where
    P: Permutation,
    A: Action<P>,
{
    if !transversal.contains_key(&base) {
        return false;
    }
    transversal.iter().all(|(point, _label)| {
        point == &base || factored_transversal::representative_raw(transversal, base.clone(), point.clone(), action).is_some_and(|rep| &action.apply(&rep, base.clone()) == point)
    })
}
