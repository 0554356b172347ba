//! The public permutation-group façade: a generating set plus its lazily
//! computed base-and-strong-generating-set, order, and symmetric/alternating
//! classification.

use crate::{
    group::{
        options::AutomorphismOptions,
        random_perm::RandPerm,
        stabchain::{
            build_with_options,
            default_stabchain,
            DefaultStabchain,
        },
        Group,
    },
    perm::Permutation,
};
use num::traits::One;
use num_bigint::BigUint;
use std::cell::OnceCell;

/// A permutation group given by a generating set.
///
/// Everything beyond the raw generators — order, membership testing,
/// symmetric/alternating classification — is derived from a stabiliser
/// chain that is built once, on first use, and cached.
pub struct PermGroup<P: Permutation> {
    group: Group<P>,
    chain: OnceCell<DefaultStabchain<P>>,
}

impl<P: Permutation> PermGroup<P> {
    pub fn new(generators: &[P]) -> Self {
        Self::from_group(Group::new(generators))
    }

    pub fn from_group(group: Group<P>) -> Self {
        Self {
            group,
            chain: OnceCell::new(),
        }
    }

    /// Build a group from `generators`, constructing its stabiliser chain
    /// up front (rather than lazily on first use) so that `options` —
    /// construction strategy, randomised strength test, timeout — governs
    /// that build.
    pub fn try_new_with_options(generators: &[P], options: &AutomorphismOptions) -> crate::Result<Self> {
        let group = Group::new(generators);
        let chain = build_with_options(&group, options)?;
        let cell = OnceCell::new();
        let _ = cell.set(chain);
        Ok(Self { group, chain: cell })
    }

    pub fn trivial() -> Self {
        Self::from_group(Group::trivial())
    }

    pub fn symmetric(n: usize) -> Self {
        Self::from_group(Group::symmetric(n))
    }

    pub fn cyclic(n: usize) -> Self {
        Self::from_group(Group::cyclic(n))
    }

    pub fn dihedral(n: usize) -> Self {
        Self::from_group(Group::dihedral(n))
    }

    pub fn alternating(n: usize) -> Self {
        Self::from_group(Group::alternating(n))
    }

    pub fn generators(&self) -> &[P] {
        self.group.generators()
    }

    fn stabchain(&self) -> &DefaultStabchain<P> {
        self.chain.get_or_init(|| self.group.stabchain())
    }

    /// The order of the group, computed (and cached) from its stabiliser chain.
    pub fn order(&self) -> BigUint {
        self.stabchain().order()
    }

    pub fn contains(&self, p: &P) -> bool {
        self.stabchain().in_group(p)
    }

    /// The degree of the smallest symmetric group containing this one.
    pub fn degree(&self) -> usize {
        self.group.symmetric_super_order()
    }

    pub fn is_symmetric(&self) -> bool {
        self.order() == factorial(self.degree())
    }

    pub fn is_alternating(&self) -> bool {
        let n = self.degree();
        n >= 3 && self.order() == factorial(n) / BigUint::from(2u32) && !self.is_symmetric()
    }

    /// An (approximately uniform) random element, by product replacement.
    pub fn random_element(&self) -> P {
        let mut rand_perm = RandPerm::from_generators(11, &self.group, 50);
        rand_perm.random_permutation()
    }

    /// Iterate over the elements of the group, by exhausting each
    /// stabiliser-chain level's coset transversal.
    ///
    /// Every element is produced exactly once, as the product of one coset
    /// representative per level ("factorized" enumeration), but the whole
    /// group is materialised eagerly: callers after a very large group
    /// should prefer [`PermGroup::order`] and [`PermGroup::random_element`].
    pub fn elements(&self) -> Vec<P> {
        let chain = self.stabchain();
        let mut products = vec![P::id()];
        for record in &chain.chain {
            let mut next = Vec::with_capacity(products.len() * record.transversal.len());
            for prefix in &products {
                for point in record.transversal.keys() {
                    let rep = crate::group::orbit::abstraction::TransversalResolver::representative(
                        &record.resolver(),
                        &record.transversal,
                        record.base.clone(),
                        *point,
                    )
                    .expect("point is present in its own transversal");
                    next.push(prefix.multiply(&rep));
                }
            }
            products = next;
        }
        products
    }

    /// The direct product of this group with `other`, acting on the
    /// disjoint union of their domains (`other`'s points shifted up by
    /// this group's degree).
    pub fn direct_product(&self, other: &Self) -> Self {
        let shift = self.degree();
        let mut generators: Vec<P> = self.generators().to_vec();
        generators.extend(other.generators().iter().map(|g| g.shift(shift)));
        generators.extend(self.generators().iter().map(|g| g.extend(shift + other.degree())));
        Self::new(&generators)
    }

    /// The wreath product of this group (the "base") by `top` (acting on
    /// `top.degree()` disjoint copies of this group's domain).
    pub fn wreath_product(&self, top: &Self) -> Self {
        let block = self.degree().max(1);
        let copies = top.degree();
        let mut generators = Vec::new();

        for i in 0..copies {
            for g in self.generators() {
                generators.push(g.shift(i * block).extend(block * copies));
            }
        }

        for g in top.generators() {
            let mut images: Vec<usize> = (0..block * copies).collect();
            for block_idx in 0..copies {
                let target = g.apply(block_idx);
                for offset in 0..block {
                    images[block_idx * block + offset] = target * block + offset;
                }
            }
            generators.push(P::from_images(&images));
        }

        Self::new(&generators)
    }
}

fn factorial(n: usize) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
}
