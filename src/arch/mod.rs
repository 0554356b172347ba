//! Architecture graphs: systems of processing elements whose automorphism
//! group can be composed from simpler pieces (a single graph, a cluster of
//! independent sub-systems, or a uniform super-structure replicating one
//! sub-system under an outer group), and used to canonicalise task mappings.

pub mod canonicalizer;
pub mod graph;
pub mod repr_options;
pub mod task_mapping;
pub mod task_orbits;

pub use graph::Graph;
pub use repr_options::{
    AutomorphismOptions,
    LocalSearchVariant,
    ReprMethod,
    ReprOptions,
};
pub use task_mapping::TaskMapping;
pub use task_orbits::TaskOrbits;

use crate::{
    group::PermGroup,
    perm::{
        Permutation,
        StandardPermutation,
    },
};
use graph::GraphCanonicalizer;
use std::cell::OnceCell;

/// How an [`ArchGraphSystem`]'s automorphism group is composed from the
/// automorphism groups of its parts.
enum Source {
    /// A group given directly, with no further structure.
    Automorphisms(PermGroup<StandardPermutation>),
    /// The automorphism group of a concrete processor-interconnect graph.
    Graph(Graph),
    /// Independent sub-systems whose automorphisms act disjointly: the
    /// direct product of their automorphism groups.
    Cluster(Vec<ArchGraphSystem>),
    /// `copies` disjoint copies of a base sub-system, permuted as whole
    /// blocks by `top`: the wreath product of the base's automorphisms by
    /// `top`.
    UniformSuper {
        base: Box<ArchGraphSystem>,
        top: PermGroup<StandardPermutation>,
    },
}

/// A system of processing elements, described either directly or by
/// composition of smaller systems, together with its (lazily computed)
/// automorphism group.
pub struct ArchGraphSystem {
    source: Source,
    automorphisms: OnceCell<PermGroup<StandardPermutation>>,
}

impl ArchGraphSystem {
    pub fn from_automorphisms(group: PermGroup<StandardPermutation>) -> Self {
        Self {
            source: Source::Automorphisms(group),
            automorphisms: OnceCell::new(),
        }
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            source: Source::Graph(graph),
            automorphisms: OnceCell::new(),
        }
    }

    pub fn cluster(members: Vec<ArchGraphSystem>) -> Self {
        Self {
            source: Source::Cluster(members),
            automorphisms: OnceCell::new(),
        }
    }

    /// `copies` disjoint replicas of `base`, permuted as blocks by `top`.
    pub fn uniform_super(base: ArchGraphSystem, top: PermGroup<StandardPermutation>) -> Self {
        Self {
            source: Source::UniformSuper {
                base: Box::new(base),
                top,
            },
            automorphisms: OnceCell::new(),
        }
    }

    pub fn automorphisms_ready(&self) -> bool {
        self.automorphisms.get().is_some()
    }

    pub fn reset_automorphisms(&mut self) {
        self.automorphisms = OnceCell::new();
    }

    /// The automorphism group, computed (from the structure of `source`) on
    /// first use and cached from then on. Pass `force_recompute` to discard
    /// a cached group and rebuild it (e.g. after mutating a member of a
    /// cluster in place).
    pub fn automorphisms(&mut self, options: &AutomorphismOptions) -> &PermGroup<StandardPermutation> {
        if options.force_recompute {
            self.reset_automorphisms();
        }
        if self.automorphisms.get().is_none() {
            let computed = self.compute_automorphisms();
            let _ = self.automorphisms.set(computed);
        }
        self.automorphisms.get().expect("just initialized above")
    }

    fn compute_automorphisms(&mut self) -> PermGroup<StandardPermutation> {
        let default_options = AutomorphismOptions::default();
        match &mut self.source {
            Source::Automorphisms(group) => PermGroup::new(group.generators()),
            Source::Graph(graph) => graph.automorphisms(),
            Source::Cluster(members) => members
                .iter_mut()
                .map(|m| m.automorphisms(&default_options))
                .fold(PermGroup::trivial(), |acc, g| acc.direct_product(g)),
            Source::UniformSuper { base, top } => base.automorphisms(&default_options).wreath_product(top),
        }
    }

    /// As [`Self::automorphisms`], but propagates construction failure
    /// (an expired [`AutomorphismOptions::timeout`], or an unsupported
    /// [`crate::group::options::TransversalKind`]) instead of panicking.
    ///
    /// A composed system (`Cluster`/`UniformSuper`) computes its parts with
    /// default options and only applies `options` to the final combined
    /// group's own chain construction: propagating a single timeout or
    /// construction strategy down into every part would make the composed
    /// system's behaviour depend on its decomposition, not just its
    /// automorphism group.
    pub fn try_automorphisms(&mut self, options: &AutomorphismOptions) -> crate::Result<&PermGroup<StandardPermutation>> {
        if options.force_recompute {
            self.reset_automorphisms();
        }
        if self.automorphisms.get().is_none() {
            let computed = self.try_compute_automorphisms(options)?;
            let _ = self.automorphisms.set(computed);
        }
        Ok(self.automorphisms.get().expect("just initialized above"))
    }

    fn try_compute_automorphisms(&mut self, options: &AutomorphismOptions) -> crate::Result<PermGroup<StandardPermutation>> {
        let default_options = AutomorphismOptions::default();
        match &mut self.source {
            Source::Automorphisms(group) => PermGroup::try_new_with_options(group.generators(), options),
            Source::Graph(graph) => {
                let direct = graph.automorphisms();
                PermGroup::try_new_with_options(direct.generators(), options)
            }
            Source::Cluster(members) => {
                let combined = members
                    .iter_mut()
                    .map(|m| m.automorphisms(&default_options))
                    .fold(PermGroup::trivial(), |acc, g| acc.direct_product(g));
                PermGroup::try_new_with_options(combined.generators(), options)
            }
            Source::UniformSuper { base, top } => {
                let combined = base.automorphisms(&default_options).wreath_product(top);
                PermGroup::try_new_with_options(combined.generators(), options)
            }
        }
    }

    pub fn num_automorphisms(&mut self, options: &AutomorphismOptions) -> num_bigint::BigUint {
        self.automorphisms(options).order()
    }

    pub fn num_processors(&mut self) -> usize {
        self.automorphisms(&AutomorphismOptions::default()).degree()
    }

    fn init_repr(&mut self, options: &AutomorphismOptions) {
        if !self.repr_ready() {
            self.automorphisms(options);
        }
    }

    pub fn repr_ready(&self) -> bool {
        self.automorphisms_ready()
    }

    pub fn reset_repr(&mut self) {
        self.reset_automorphisms();
    }

    /// The canonical representative of `mapping`'s orbit under this
    /// system's automorphism group.
    ///
    /// Errors with [`crate::Error::DomainViolation`] if `mapping` names a
    /// processing element outside `0..num_processors()`.
    pub fn repr(
        &mut self,
        mapping: &TaskMapping,
        orbits: Option<&mut TaskOrbits>,
        options: &ReprOptions,
    ) -> crate::Result<TaskMapping> {
        self.validate_mapping(mapping)?;
        self.init_repr(&AutomorphismOptions::default());
        let automorphisms = self.automorphisms(&AutomorphismOptions::default());
        Ok(canonicalizer::representative(automorphisms, mapping, orbits, options))
    }

    /// Every task mapping reachable from `mapping` under this system's
    /// automorphism group.
    ///
    /// Errors with [`crate::Error::DomainViolation`] if `mapping` names a
    /// processing element outside `0..num_processors()`.
    pub fn orbit(&mut self, mapping: &TaskMapping) -> crate::Result<crate::DetHashSet<TaskMapping>> {
        self.validate_mapping(mapping)?;
        let automorphisms = self.automorphisms(&AutomorphismOptions::default());
        Ok(canonicalizer::orbit(automorphisms, mapping))
    }

    fn validate_mapping(&mut self, mapping: &TaskMapping) -> crate::Result<()> {
        let n = self.num_processors();
        if mapping.as_slice().iter().any(|&pe| pe >= n) {
            return Err(crate::Error::domain_violation(format!(
                "task mapping references a processing element outside 0..{n}"
            )));
        }
        Ok(())
    }

    /// The number of distinct orbits of length-`k` task mappings under this
    /// system's automorphism group, counted by Burnside's lemma rather than
    /// by enumeration: the average, over every automorphism `g`, of the
    /// number of length-`k` mappings `g` fixes. A mapping using each
    /// processing element at most once is fixed by `g` iff every one of its
    /// `k` entries is individually fixed by `g`, so that count is the
    /// falling factorial of `g`'s fixed-point count when `unique` is set,
    /// or that count raised to the `k`-th power otherwise.
    pub fn num_automorphism_orbits(&mut self, k: usize, unique: bool) -> num_bigint::BigUint {
        let n = self.num_processors();
        let automorphisms = self.automorphisms(&AutomorphismOptions::default());
        let order = automorphisms.order();
        let sum = automorphisms
            .elements()
            .iter()
            .map(|g| {
                let fixed = (0..n).filter(|&i| g.apply(i) == i).count();
                fixed_points_power(fixed, k, unique)
            })
            .fold(num_bigint::BigUint::from(0u32), |acc, term| acc + term);
        sum / order
    }

    /// The size of every distinct orbit of length-`k` task mappings under
    /// this system's automorphism group, sorted ascending. Mappings are
    /// enumerated exhaustively (with or without repeated processing
    /// elements, per `unique`) and grouped into orbits as they're visited.
    pub fn automorphism_orbit_sizes(&mut self, k: usize, unique: bool) -> Vec<usize> {
        let n = self.num_processors();
        let mut seen: crate::DetHashSet<TaskMapping> = crate::DetHashSet::default();
        let mut sizes = Vec::new();
        for mapping in enumerate_mappings(n, k, unique) {
            if seen.contains(&mapping) {
                continue;
            }
            let orbit = self.orbit(&mapping).expect("enumerated mapping is within the processor range");
            sizes.push(orbit.len());
            seen.extend(orbit);
        }
        sizes.sort_unstable();
        sizes
    }
}

fn fixed_points_power(fixed: usize, k: usize, unique: bool) -> num_bigint::BigUint {
    use num_bigint::BigUint;
    if unique {
        if k > fixed {
            return BigUint::from(0u32);
        }
        (0..k).fold(BigUint::from(1u32), |acc, i| acc * BigUint::from((fixed - i) as u64))
    } else {
        BigUint::from(fixed as u64).pow(k as u32)
    }
}

fn enumerate_mappings(n: usize, k: usize, unique: bool) -> Vec<TaskMapping> {
    use itertools::Itertools;
    if unique {
        (0..n).permutations(k).map(TaskMapping::new).collect()
    } else {
        (0..k).map(|_| 0..n).multi_cartesian_product().map(TaskMapping::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_system_automorphisms_match_ring_symmetry() {
        let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
        let options = AutomorphismOptions::default();
        assert_eq!(system.num_automorphisms(&options), num_bigint::BigUint::from(8u32));
    }

    #[test]
    fn cluster_of_two_s2_has_order_four() {
        let a = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(2));
        let b = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(2));
        let mut system = ArchGraphSystem::cluster(vec![a, b]);
        let options = AutomorphismOptions::default();
        assert_eq!(system.num_automorphisms(&options), num_bigint::BigUint::from(4u32));
    }

    #[test]
    fn uniform_super_wreaths_base_by_top() {
        let base = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(2));
        let top = PermGroup::cyclic(3);
        let mut system = ArchGraphSystem::uniform_super(base, top);
        let options = AutomorphismOptions::default();
        // |S_2 wr C_3| = |S_2|^3 * |C_3| = 8 * 3 = 24
        assert_eq!(system.num_automorphisms(&options), num_bigint::BigUint::from(24u32));
    }

    #[test]
    fn automorphisms_cached_until_reset() {
        let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
        assert!(!system.automorphisms_ready());
        system.automorphisms(&AutomorphismOptions::default());
        assert!(system.automorphisms_ready());
        system.reset_automorphisms();
        assert!(!system.automorphisms_ready());
    }

    #[test]
    fn num_automorphism_orbits_matches_burnside_count_on_ring() {
        let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
        assert_eq!(system.num_automorphism_orbits(2, true), num_bigint::BigUint::from(2u32));
    }

    #[test]
    fn automorphism_orbit_sizes_matches_orbit_partition_on_ring() {
        let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
        assert_eq!(system.automorphism_orbit_sizes(2, true), vec![4, 8]);
    }

    #[test]
    fn repr_is_invariant_under_automorphism_action() {
        let mut system = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(3));
        let mapping = TaskMapping::new(vec![2, 0, 1]);
        let options = ReprOptions::default();
        let direct = system.repr(&mapping, None, &options).unwrap();
        let generators = system.automorphisms(&AutomorphismOptions::default()).generators().to_vec();
        for gen in &generators {
            let permuted = mapping.permute(gen);
            let via_permuted = system.repr(&permuted, None, &options).unwrap();
            assert_eq!(direct, via_permuted);
        }
    }

    #[test]
    fn try_automorphisms_matches_automorphisms_by_default() {
        let mut system = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(4));
        let options = AutomorphismOptions::default();
        let order = system.try_automorphisms(&options).unwrap().order();
        assert_eq!(order, num_bigint::BigUint::from(24u32));
    }

    #[test]
    fn try_automorphisms_reports_an_expired_deadline() {
        let mut system = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(6));
        let options = AutomorphismOptions::default().with_timeout(std::time::Duration::from_secs(0));
        std::thread::sleep(std::time::Duration::from_millis(1));
        let err = system.try_automorphisms(&options).unwrap_err();
        assert!(matches!(err, crate::Error::Aborted(_)));
    }

    #[test]
    fn repr_rejects_out_of_range_processing_element() {
        let mut system = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(3));
        let mapping = TaskMapping::new(vec![0, 5]);
        let err = system.repr(&mapping, None, &ReprOptions::default()).unwrap_err();
        assert!(matches!(err, crate::Error::DomainViolation(_)));
    }
}
