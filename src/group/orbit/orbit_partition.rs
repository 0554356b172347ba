//! Orbits of a point domain under a generating set, tracked as a mutable
//! partition: every point knows which orbit it belongs to, and an orbit
//! can be split, refined against another partition, or have a point
//! removed from it without recomputing the whole structure from scratch.

use super::orbit;
use crate::{
    perm::{
        Action,
        Permutation,
        SimpleApplication,
    },
    DetHashSet,
};

/// A partition of `0..degree` into orbits, stored both as the list of
/// orbits and as a per-point index into that list, so that "which orbit is
/// this point in" is a lookup rather than a scan.
#[derive(Debug, Clone)]
pub struct OrbitPartition {
    partition_indices: Vec<Option<usize>>,
    partitions: Vec<DetHashSet<usize>>,
}

impl OrbitPartition {
    /// The discrete partition: every point in its own singleton orbit.
    pub fn new(degree: usize) -> Self {
        Self {
            partition_indices: (0..degree).map(Some).collect(),
            partitions: (0..degree).map(|i| DetHashSet::from_iter([i])).collect(),
        }
    }

    /// Build directly from a list of (disjoint, domain-covering) orbits.
    pub fn from_partitions(degree: usize, partitions: Vec<DetHashSet<usize>>) -> Self {
        let mut partition_indices = vec![None; degree];
        for (i, part) in partitions.iter().enumerate() {
            for &x in part {
                partition_indices[x] = Some(i);
            }
        }
        Self {
            partition_indices,
            partitions,
        }
    }

    /// The orbits of `0..degree` under `generators`, found by repeatedly
    /// running a BFS orbit computation from the smallest un-partitioned
    /// point until every point has been assigned.
    pub fn from_generators<P: Permutation>(degree: usize, generators: &[P]) -> Self {
        let action = SimpleApplication::<P>::default();
        let mut remaining: DetHashSet<usize> = (0..degree).collect();
        let mut partitions = Vec::new();
        while let Some(&point) = remaining.iter().min() {
            let o = orbit(generators, point, &action);
            for p in &o {
                remaining.remove(p);
            }
            partitions.push(o);
        }
        Self::from_partitions(degree, partitions)
    }

    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// The index of the orbit containing `x`, or `None` if `x` has been
    /// removed from the partition.
    pub fn partition_index(&self, x: usize) -> Option<usize> {
        self.partition_indices.get(x).copied().flatten()
    }

    pub fn partition(&self, i: usize) -> &DetHashSet<usize> {
        &self.partitions[i]
    }

    /// Drop `x` from whatever orbit currently contains it.
    pub fn remove_from_partition(&mut self, x: usize) {
        if let Some(i) = self.partition_index(x) {
            self.partitions[i].remove(&x);
            self.partition_indices[x] = None;
        }
    }

    /// Move `x` into orbit `i`, removing it from its current orbit first.
    pub fn change_partition(&mut self, x: usize, i: usize) {
        self.remove_from_partition(x);
        self.partitions[i].insert(x);
        self.partition_indices[x] = Some(i);
    }

    /// The common refinement of `self` with `other`: two points stay
    /// together only if both partitions already agreed they should.
    pub fn split(&self, other: &Self) -> Self {
        let degree = self.partition_indices.len();
        let mut groups: crate::DetHashMap<(Option<usize>, Option<usize>), DetHashSet<usize>> = crate::DetHashMap::default();
        for x in 0..degree {
            let key = (self.partition_index(x), other.partition_index(x));
            groups.entry(key).or_default().insert(x);
        }
        let partitions: Vec<DetHashSet<usize>> =
            groups.into_iter().filter(|(key, _)| key.0.is_some()).map(|(_, part)| part).collect();
        Self::from_partitions(degree, partitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::{
        export::CyclePermutation,
        StandardPermutation,
    };

    #[test]
    fn discrete_partition_has_one_orbit_per_point() {
        let p = OrbitPartition::new(3);
        assert_eq!(p.num_partitions(), 3);
        assert_eq!(p.partition_index(1), Some(1));
    }

    #[test]
    fn from_generators_matches_disjoint_cycles() {
        let a: StandardPermutation = CyclePermutation::single_cycle(&[1, 2]).into_perm();
        let b: StandardPermutation = CyclePermutation::single_cycle(&[3, 4]).into_perm();
        let p = OrbitPartition::from_generators(4, &[a, b]);
        assert_eq!(p.num_partitions(), 2);
        assert_eq!(p.partition_index(0), p.partition_index(1));
        assert_ne!(p.partition_index(0), p.partition_index(2));
    }

    #[test]
    fn remove_from_partition_drops_membership() {
        let mut p = OrbitPartition::new(2);
        p.change_partition(1, 0);
        assert_eq!(p.partition_index(1), Some(0));
        p.remove_from_partition(1);
        assert_eq!(p.partition_index(1), None);
    }

    #[test]
    fn split_refines_to_the_intersection() {
        let whole = OrbitPartition::from_partitions(4, vec![DetHashSet::from_iter([0, 1, 2, 3])]);
        let halves = OrbitPartition::from_partitions(4, vec![DetHashSet::from_iter([0, 1]), DetHashSet::from_iter([2, 3])]);
        let refined = whole.split(&halves);
        assert_eq!(refined.num_partitions(), 2);
        assert_eq!(refined.partition_index(0), refined.partition_index(1));
        assert_ne!(refined.partition_index(0), refined.partition_index(2));
    }
}
