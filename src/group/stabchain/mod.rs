//! Base-and-strong-generating-set structures ("stabiliser chains").

pub mod base;
pub mod base_change_builder;
pub mod builder;
pub mod element_testing;

use crate::{
    group::{
        options::{
            AutomorphismOptions,
            ConstructionMethod,
            TransversalKind,
        },
        orbit::{
            abstraction::{
                FactoredTransversalResolver,
                TransversalResolver,
            },
            schreier_generator_queue::SchreierGeneratorQueue,
            transversal::factored_transversal::factored_transversal_complete_opt,
        },
        product_replacement::check_altsym,
        Group,
    },
    perm::{
        actions::SimpleApplication,
        Action,
        Permutation,
    },
    DetHashMap,
    Error,
    Result,
};
use num_bigint::BigUint;
use std::{
    marker::PhantomData,
    time::Instant,
};

/// The stabiliser-chain type built by the default (incremental, factored
/// transversal) strategy.
pub type DefaultStabchain<P> = Stabchain<P, FactoredTransversalResolver<SimpleApplication<P>>, SimpleApplication<P>>;

/// One level of a stabiliser chain: the point this level stabilises, the
/// generators known so far at this level, and the Schreier table for its
/// orbit.
#[derive(Debug, Clone)]
pub struct StabchainRecord<P, V, A = SimpleApplication<P>>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    pub base: A::OrbitT,
    pub gens: Group<P>,
    pub transversal: DetHashMap<A::OrbitT, P>,
    _resolver: PhantomData<V>,
}

impl<P, V, A> StabchainRecord<P, V, A>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    pub fn new(base: A::OrbitT, gens: Group<P>, transversal: DetHashMap<A::OrbitT, P>) -> Self {
        Self {
            base,
            gens,
            transversal,
            _resolver: PhantomData,
        }
    }

    /// An empty level with only the base point in its orbit.
    pub fn trivial_record(base: A::OrbitT) -> Self {
        let mut transversal = DetHashMap::default();
        transversal.insert(base.clone(), P::id());
        Self::new(base, Group::trivial(), transversal)
    }

    pub fn resolver(&self) -> V {
        V::default()
    }
}

/// A full base-and-strong-generating-set structure, as a stack of
/// [`StabchainRecord`] levels.
#[derive(Debug, Clone)]
pub struct Stabchain<P, V, A = SimpleApplication<P>>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    pub(crate) chain: Vec<StabchainRecord<P, V, A>>,
}

impl<P, V, A> Stabchain<P, V, A>
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    pub fn order(&self) -> BigUint {
        order(self.chain.iter())
    }

    pub fn records(&self) -> &[StabchainRecord<P, V, A>] {
        &self.chain
    }

    pub fn base(&self) -> Vec<A::OrbitT> {
        self.chain.iter().map(|r| r.base.clone()).collect()
    }

    pub fn strong_generating_set(&self) -> Vec<P> {
        self.chain.iter().flat_map(|r| r.gens.generators()).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn in_group(&self, p: &P) -> bool {
        element_testing::is_in_group(self.chain.iter(), p)
    }
}

/// The order of a group represented by a stabiliser chain: the product of
/// each level's orbit size.
pub fn order<'a, P, V, A>(chain: impl Iterator<Item = &'a StabchainRecord<P, V, A>>) -> BigUint
where
    P: Permutation + 'a,
    A: Action<P> + 'a,
    V: TransversalResolver<P, A> + 'a,
{
    chain.fold(BigUint::from(1u32), |acc, record| acc * BigUint::from(record.transversal.len()))
}

/// `true` iff `chain`'s order matches `expected`.
pub fn correct_stabchain_order<P, V, A>(chain: &Stabchain<P, V, A>, expected: &BigUint) -> bool
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    &chain.order() == expected
}

/// Structural sanity check: every level's Schreier table is internally
/// consistent with its base and action.
pub fn valid_stabchain<P, V, A>(chain: &Stabchain<P, V, A>) -> bool
where
    P: Permutation,
    A: Action<P>,
    V: TransversalResolver<P, A>,
{
    let action = A::default();
    chain
        .chain
        .iter()
        .all(|r| crate::group::orbit::transversal::valid_transversal(&r.transversal, r.base.clone(), &action))
}

/// Build a stabiliser chain for `group` using the deterministic
/// incremental Schreier-Sims strategy with a largest-moved-point base
/// selector.
pub fn default_stabchain<P: Permutation>(group: &Group<P>) -> DefaultStabchain<P> {
    use builder::{
        ift::StabchainBuilderIft,
        Builder,
    };
    let mut b = StabchainBuilderIft::new(base::selectors::LmpSelector, SimpleApplication::default());
    b.set_generators(group);
    b.build()
}

/// Build a stabiliser chain honouring `options`: the deterministic or
/// randomised construction, an optional wall-clock deadline surfaced as
/// [`Error::Aborted`], and an optional trailing generator-reduction pass.
pub fn build_with_options<P: Permutation>(group: &Group<P>, options: &AutomorphismOptions) -> Result<DefaultStabchain<P>> {
    use builder::{
        ift::StabchainBuilderIft,
        random::{
            parameters::RandomAlgoParameters,
            random_ift::StabchainBuilderRandom,
        },
        Builder,
    };

    if options.transversals != TransversalKind::Factored {
        return Err(Error::unsupported(format!(
            "{:?} transversals are not implemented; only Factored is",
            options.transversals
        )));
    }

    let deadline = options.timeout.map(|d| Instant::now() + d);

    let chain = match options.construction {
        ConstructionMethod::Deterministic => {
            let mut b = StabchainBuilderIft::new(base::selectors::LmpSelector, SimpleApplication::default());
            if let Some(deadline) = deadline {
                b = b.with_deadline(deadline);
            }
            b.set_generators(group);
            b.try_build()?
        }
        ConstructionMethod::Random => {
            let mut params = RandomAlgoParameters::new()
                .with_retries(options.schreier_sims_random_retries)
                .with_w(options.schreier_sims_random_w);
            if options.check_altsym {
                if let Some(order) = check_altsym(group, options.schreier_sims_random_retries) {
                    params = params.with_order(order);
                }
            }
            let mut b = StabchainBuilderRandom::new(base::selectors::LmpSelector, SimpleApplication::default(), params);
            if let Some(deadline) = deadline {
                b = b.with_deadline(deadline);
            }
            b.set_generators(group);
            b.try_build()?
        }
    };

    Ok(if options.reduce_gens { reduce_generators(&chain) } else { chain })
}

/// Try dropping each strong generator in turn, keeping the drop only when
/// the remaining generators still verify as a strong generating set for the
/// same base: every Schreier generator the reduced set produces at every
/// level must sift to the identity through the rest of the chain.
pub fn reduce_generators<P: Permutation>(chain: &DefaultStabchain<P>) -> DefaultStabchain<P> {
    let base = chain.base();
    let mut kept = chain.strong_generating_set();

    for idx in (0..kept.len()).rev() {
        if kept.len() <= 1 {
            break;
        }
        let mut candidate = kept.clone();
        candidate.remove(idx);
        if verifies_as_strong_generating_set(&candidate, &base) {
            kept = candidate;
        }
    }

    default_stabchain(&Group::new(&kept))
}

/// One level of the check `reduce_generators` performs: the base point it
/// stabilises, the generators feeding its transversal, and that transversal.
type VerificationLevel<P> = (usize, Vec<P>, DetHashMap<usize, P>);

fn verifies_as_strong_generating_set<P: Permutation>(candidate: &[P], base: &[usize]) -> bool {
    let action = SimpleApplication::<P>::default();
    let mut levels: Vec<VerificationLevel<P>> = Vec::with_capacity(base.len());
    let mut current_gens = candidate.to_vec();

    for &b in base {
        let transversal = factored_transversal_complete_opt(&Group::new(&current_gens), b, &action);
        let gens_here = current_gens.clone();
        current_gens.retain(|g| action.apply(g, b) == b);
        levels.push((b, gens_here, transversal));
    }
    // Any generator still moving a point past the last base level means
    // `candidate` isn't supported on this base at all.
    if !current_gens.iter().all(Permutation::is_id) {
        return false;
    }

    for i in 0..levels.len() {
        let (base_point, gens, transversal) = &levels[i];
        let queue: SchreierGeneratorQueue<'_, P, SimpleApplication<P>, FactoredTransversalResolver<SimpleApplication<P>>> =
            SchreierGeneratorQueue::new(gens, *base_point, transversal, action.clone(), FactoredTransversalResolver::default());
        for sg in queue {
            if !sifts_to_identity(&sg, &levels[i + 1..]) {
                return false;
            }
        }
    }
    true
}

fn sifts_to_identity<P: Permutation>(p: &P, lower_levels: &[VerificationLevel<P>]) -> bool {
    let action = SimpleApplication::<P>::default();
    let resolver: FactoredTransversalResolver<SimpleApplication<P>> = FactoredTransversalResolver::default();
    let mut g = p.clone();
    for (base_point, _, transversal) in lower_levels {
        let image = action.apply(&g, *base_point);
        let Some(rep) = resolver.representative(transversal, *base_point, image) else {
            return false;
        };
        g = g.multiply(&rep.inv());
    }
    g.is_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::StandardPermutation;

    #[test]
    fn stabchain_of_trivial_group_has_order_one() {
        let g = Group::<StandardPermutation>::trivial();
        let chain = default_stabchain(&g);
        assert_eq!(chain.order(), BigUint::from(1u32));
    }

    #[test]
    fn stabchain_of_cyclic_group_has_correct_order() {
        let g = Group::<StandardPermutation>::cyclic(5);
        let chain = default_stabchain(&g);
        assert_eq!(chain.order(), BigUint::from(5u32));
        assert!(valid_stabchain(&chain));
    }

    #[test]
    fn stabchain_of_symmetric_group_has_correct_order() {
        let g = Group::<StandardPermutation>::symmetric(4);
        let chain = default_stabchain(&g);
        assert_eq!(chain.order(), BigUint::from(24u32));
        assert!(valid_stabchain(&chain));
    }

    #[test]
    fn build_with_options_matches_default_construction() {
        let g = Group::<StandardPermutation>::symmetric(4);
        let chain = build_with_options(&g, &AutomorphismOptions::default()).unwrap();
        assert_eq!(chain.order(), BigUint::from(24u32));
        assert!(valid_stabchain(&chain));
    }

    #[test]
    fn build_with_options_rejects_unsupported_transversal_kind() {
        let g = Group::<StandardPermutation>::symmetric(3);
        let options = AutomorphismOptions::default().with_transversals(TransversalKind::Shallow);
        assert!(matches!(build_with_options(&g, &options), Err(Error::Unsupported(_))));
    }

    #[test]
    fn build_with_options_honours_an_already_expired_deadline() {
        let g = Group::<StandardPermutation>::symmetric(6);
        let options = AutomorphismOptions::default().with_timeout(std::time::Duration::from_secs(0));
        std::thread::sleep(std::time::Duration::from_millis(1));
        assert!(matches!(build_with_options(&g, &options), Err(Error::Aborted(_))));
    }

    #[test]
    fn build_with_options_random_construction_finds_the_right_order() {
        let g = Group::<StandardPermutation>::symmetric(5);
        let options = AutomorphismOptions::default().with_construction(ConstructionMethod::Random);
        let chain = build_with_options(&g, &options).unwrap();
        assert_eq!(chain.order(), BigUint::from(120u32));
    }

    #[test]
    fn build_with_options_check_altsym_still_finds_the_right_order() {
        let g = Group::<StandardPermutation>::symmetric(5);
        let options = AutomorphismOptions::default()
            .with_construction(ConstructionMethod::Random)
            .with_check_altsym(true);
        let chain = build_with_options(&g, &options).unwrap();
        assert_eq!(chain.order(), BigUint::from(120u32));
    }

    #[test]
    fn reduce_generators_preserves_order_while_shrinking_redundant_sets() {
        let g = Group::<StandardPermutation>::symmetric(4);
        let chain = default_stabchain(&g);
        let original_order = chain.order();
        let reduced = reduce_generators(&chain);
        assert_eq!(reduced.order(), original_order);
    }

    #[test]
    fn build_with_options_reduce_gens_preserves_order() {
        let g = Group::<StandardPermutation>::symmetric(4);
        let options = AutomorphismOptions::default().with_reduce_gens(true);
        let chain = build_with_options(&g, &options).unwrap();
        assert_eq!(chain.order(), BigUint::from(24u32));
    }
}
