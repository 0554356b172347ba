//! Membership testing by sifting a permutation through a chain of records.

use super::StabchainRecord;
use crate::{
    group::orbit::abstraction::TransversalResolver,
    perm::{
        Action,
        Permutation,
    },
};

/// `true` iff `p` lies in the group represented by `chain`.
///
/// Sifts `p` level by level: at each level, the image of the level's base
/// point under the current residue must lie in that level's orbit, and the
/// residue is reduced by the coset representative found there. `p` is in
/// the group iff the residue that falls out of the bottom is the identity.
pub fn is_in_group<'a, P, V, A>(
    chain: impl Iterator<Item = &'a StabchainRecord<P, V, A>>,
    p: &P,
) -> bool
where
    P: Permutation + 'a,
    A: Action<P> + 'a,
    V: TransversalResolver<P, A> + 'a,
{
    let action = A::default();
    let mut residue = p.clone();
    for record in chain {
        let base = record.base.clone();
        let image = action.apply(&residue, base.clone());
        let Some(representative) = record.resolver().representative(&record.transversal, base, image) else {
            return false;
        };
        residue = residue.divide(&representative);
    }
    residue.is_id()
}
