//! Black-box scenarios exercising [`archsym::arch::ArchGraphSystem`] end to
//! end: build an automorphism group, canonicalise a few task mappings under
//! it, and check the results against hand-worked expectations.

use archsym::{
    arch::{
        ArchGraphSystem,
        Graph,
        ReprOptions,
        TaskMapping,
    },
    group::PermGroup,
    perm::{
        Permutation,
        StandardPermutation,
    },
};
use std::collections::HashSet;

fn mapping(one_indexed: &[usize]) -> TaskMapping {
    TaskMapping::from_one_indexed(one_indexed)
}

/// S1 — a 4-cycle's automorphisms are the dihedral group of order 8, whose
/// orbits on ordered pairs of tasks split into "same vertex", "adjacent",
/// and "opposite" classes.
#[test]
fn ring_of_four_splits_pairs_into_three_orbits() {
    let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
    assert_eq!(system.num_automorphisms(&Default::default()), num_bigint::BigUint::from(8u32));

    let same: HashSet<_> = system.orbit(&mapping(&[1, 1])).unwrap().into_iter().map(|m| m.to_one_indexed()).collect();
    assert_eq!(same.len(), 4);
    assert!(same.contains(&vec![1, 1]));
    assert!(same.contains(&vec![3, 3]));

    let adjacent: HashSet<_> = system.orbit(&mapping(&[1, 2])).unwrap().into_iter().map(|m| m.to_one_indexed()).collect();
    assert_eq!(adjacent.len(), 8);
    assert!(adjacent.contains(&vec![1, 2]));
    assert!(adjacent.contains(&vec![4, 1]));

    let opposite: HashSet<_> = system.orbit(&mapping(&[1, 3])).unwrap().into_iter().map(|m| m.to_one_indexed()).collect();
    assert_eq!(opposite.len(), 4);
    assert!(opposite.contains(&vec![1, 3]));
    assert!(opposite.contains(&vec![2, 4]));

    assert!(adjacent.is_disjoint(&same));
    assert!(adjacent.is_disjoint(&opposite));
    assert!(same.is_disjoint(&opposite));
}

/// S2 — a 3-node complete graph's automorphisms are the full symmetric
/// group on its vertices, so every mapping of two distinct tasks lands in
/// one orbit.
#[test]
fn triangle_automorphisms_are_symmetric_and_transitive_off_diagonal() {
    let mut system = ArchGraphSystem::from_graph(Graph::complete(3));
    assert_eq!(system.num_automorphisms(&Default::default()), num_bigint::BigUint::from(6u32));

    let orbit: HashSet<_> = system.orbit(&mapping(&[1, 2])).unwrap().into_iter().map(|m| m.to_one_indexed()).collect();
    let expected: HashSet<_> = (1..=3)
        .flat_map(|i| (1..=3).filter(move |&j| j != i).map(move |j| vec![i, j]))
        .collect();
    assert_eq!(orbit, expected);
}

/// S3 — a cluster of two disjoint 2-node graphs gives a direct product of
/// their automorphism groups; a mapping that already picks the first
/// representative of each child's PE pair is already canonical.
#[test]
fn cluster_of_two_pairs_is_a_direct_product() {
    let a = ArchGraphSystem::from_graph(Graph::complete(2));
    let b = ArchGraphSystem::from_graph(Graph::complete(2));
    let mut system = ArchGraphSystem::cluster(vec![a, b]);

    assert_eq!(system.num_automorphisms(&Default::default()), num_bigint::BigUint::from(4u32));

    let options = ReprOptions::default().with_symmetric_shortcut(false);
    let direct = system.repr(&mapping(&[1, 3]), None, &options).unwrap();
    let via_swap = system.repr(&mapping(&[2, 4]), None, &options).unwrap();
    assert_eq!(direct, via_swap);
    assert_eq!(direct, mapping(&[1, 3]));

    // every orbit of 2-task mappings over the 4 processing elements is
    // closed under the generators and partitions the full 16-point space.
    let mut seen = HashSet::new();
    let mut total = 0usize;
    for i in 1..=4 {
        for j in 1..=4 {
            let m = mapping(&[i, j]);
            if seen.insert(system.repr(&m, None, &options).unwrap()) {
                total += system.orbit(&m).unwrap().len();
            }
        }
    }
    assert_eq!(total, 16);
}

/// S4 — a uniform super-structure wreaths a prototype's automorphisms
/// (here, a 3-element cyclic rotation group) by an outer 4-ring: the result
/// should be insensitive to any generator of the wreath product.
#[test]
fn uniform_super_is_invariant_under_block_symmetries() {
    let base = ArchGraphSystem::from_automorphisms(PermGroup::cyclic(3));
    let top = PermGroup::dihedral(4);
    let mut system = ArchGraphSystem::uniform_super(base, top);

    assert_eq!(system.num_automorphisms(&Default::default()), num_bigint::BigUint::from(648u32));
    assert_eq!(system.num_processors(), 12);

    let m = mapping(&[4, 7]);
    let options = ReprOptions::default();
    let direct = system.repr(&m, None, &options).unwrap();

    let generators = system.automorphisms(&Default::default()).generators().to_vec();
    for gen in &generators {
        let permuted = m.permute(gen);
        assert_eq!(system.repr(&permuted, None, &options).unwrap(), direct);
    }
}

/// S5 — when the automorphism group is the full symmetric group, the
/// symmetric shortcut renumbers processing elements by first occurrence.
#[test]
fn symmetric_shortcut_matches_hand_worked_example() {
    let mut system = ArchGraphSystem::from_automorphisms(PermGroup::symmetric(5));
    let representative = system.repr(&mapping(&[3, 5, 3, 1]), None, &ReprOptions::default()).unwrap();
    assert_eq!(representative.to_one_indexed(), vec![1, 2, 1, 3]);
}

/// S5b — when the automorphism group is symmetric only on a sub-range of
/// its points (here, PEs 2 and 3 out of 1..=4), the shortcut must only
/// renumber within that window, leaving the PEs outside it untouched; a
/// group that's only accidentally symmetric on its whole degree (as in S5)
/// wouldn't catch a bug here.
#[test]
fn symmetric_shortcut_restricts_to_the_moved_window() {
    let swap = StandardPermutation::from_images(&[0, 2, 1, 3]);
    let mut system = ArchGraphSystem::from_automorphisms(PermGroup::new(&[swap]));
    let representative = system.repr(&mapping(&[1, 3, 4, 2]), None, &ReprOptions::default()).unwrap();
    assert_eq!(representative.to_one_indexed(), vec![1, 2, 4, 3]);
}

/// S6 — iterating the alternating group on 4 points yields exactly its 12
/// elements, each exactly once.
#[test]
fn alternating_group_iteration_is_exhaustive_and_duplicate_free() {
    let group = PermGroup::alternating(4);
    let elements = group.elements();
    assert_eq!(elements.len(), 12);

    let distinct: HashSet<_> = elements.iter().map(|p| format!("{p}")).collect();
    assert_eq!(distinct.len(), 12);

    for p in &elements {
        assert!(group.contains(p));
    }
}

#[test]
fn repr_and_orbit_reject_mappings_outside_the_processor_range() {
    let mut system = ArchGraphSystem::from_graph(Graph::ring(4));
    let out_of_range = TaskMapping::new(vec![0, 99]);
    assert!(system.repr(&out_of_range, None, &ReprOptions::default()).is_err());
    assert!(system.orbit(&out_of_range).is_err());
}
