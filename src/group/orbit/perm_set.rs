//! A set of permutations of a common degree, with the set-wide queries
//! (smallest/largest moved point, support, degree compression) that a
//! canonicalisation search runs over a generating set rather than over a
//! single permutation.

use crate::perm::Permutation;
use crate::DetHashSet;

/// A deduplicated collection of same-degree permutations.
#[derive(Debug, Clone)]
pub struct PermutationSet<P> {
    perms: Vec<P>,
}

impl<P: Permutation> PermutationSet<P> {
    pub fn new() -> Self {
        Self { perms: Vec::new() }
    }

    pub fn from_vec(perms: Vec<P>) -> Self {
        let mut set = Self { perms };
        set.make_unique();
        set
    }

    pub fn is_empty(&self) -> bool {
        self.perms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.perms.len()
    }

    pub fn as_slice(&self) -> &[P] {
        &self.perms
    }

    pub fn insert(&mut self, perm: P) {
        if !self.perms.contains(&perm) {
            self.perms.push(perm);
        }
    }

    fn make_unique(&mut self) {
        let mut seen: DetHashSet<P> = DetHashSet::default();
        self.perms.retain(|p| seen.insert(p.clone()));
    }

    /// `true` iff every permutation in the set is the identity (or the set
    /// is empty).
    pub fn trivial(&self) -> bool {
        self.perms.iter().all(|p| p.is_id())
    }

    /// The smallest point moved by any permutation in the set.
    pub fn smallest_moved_point(&self) -> Option<usize> {
        self.perms.iter().filter_map(|p| p.smp()).min()
    }

    /// The largest point moved by any permutation in the set.
    pub fn largest_moved_point(&self) -> Option<usize> {
        self.perms.iter().filter_map(|p| p.lmp()).max()
    }

    /// Every point moved by some permutation in the set, ascending.
    pub fn support(&self) -> Vec<usize> {
        let (Some(smp), Some(lmp)) = (self.smallest_moved_point(), self.largest_moved_point()) else {
            return Vec::new();
        };
        (smp..=lmp).filter(|&x| self.perms.iter().any(|p| p.apply(x) != x)).collect()
    }

    pub fn has_inverses(&self) -> bool {
        self.perms.iter().all(|p| self.perms.contains(&p.inv()))
    }

    pub fn with_inverses(&self) -> Self {
        let mut with_inv = self.clone();
        with_inv.insert_inverses();
        with_inv
    }

    /// Add every permutation's inverse to the set (a no-op for elements
    /// already closed under inversion).
    pub fn insert_inverses(&mut self) {
        let inverses: Vec<P> = self.perms.iter().map(|p| p.inv()).collect();
        for inv in inverses {
            self.insert(inv);
        }
    }

    /// Compress the set onto a contiguous degree spanning exactly its
    /// support: points that no permutation moves are squeezed out, in
    /// ascending order, so the returned set's degree is `support().len()`.
    pub fn minimize_degree(&self) -> Self {
        if self.perms.is_empty() {
            return self.clone();
        }
        let support = self.support();
        let compressed: std::collections::HashMap<usize, usize> =
            support.iter().enumerate().map(|(new, &old)| (old, new)).collect();

        let degree = support.len();
        let perms = self
            .perms
            .iter()
            .map(|p| {
                let images: Vec<usize> = (0..degree)
                    .map(|new_i| {
                        let old_i = support[new_i];
                        let old_img = p.apply(old_i);
                        *compressed.get(&old_img).expect("support is closed under every generator's action")
                    })
                    .collect();
                P::from_images(&images)
            })
            .collect();
        Self { perms }
    }
}

impl<P: Permutation> Default for PermutationSet<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Permutation> FromIterator<P> for PermutationSet<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
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
    fn smp_and_lmp_span_every_generator() {
        let a: StandardPermutation = CyclePermutation::single_cycle(&[2, 4]).into_perm();
        let b: StandardPermutation = CyclePermutation::single_cycle(&[5, 7]).into_perm();
        let set = PermutationSet::from_vec(vec![a, b]);
        assert_eq!(set.smallest_moved_point(), Some(1));
        assert_eq!(set.largest_moved_point(), Some(6));
    }

    #[test]
    fn support_lists_only_moved_points() {
        let a: StandardPermutation = CyclePermutation::single_cycle(&[2, 4]).into_perm();
        let set = PermutationSet::from_vec(vec![a]);
        assert_eq!(set.support(), vec![1, 3]);
    }

    #[test]
    fn insert_inverses_is_idempotent() {
        let a: StandardPermutation = CyclePermutation::single_cycle(&[1, 2, 3]).into_perm();
        let mut set = PermutationSet::from_vec(vec![a]);
        assert!(!set.has_inverses());
        set.insert_inverses();
        assert!(set.has_inverses());
        let len_once = set.len();
        set.insert_inverses();
        assert_eq!(set.len(), len_once);
    }

    #[test]
    fn minimize_degree_compacts_support_to_a_contiguous_range() {
        let a: StandardPermutation = CyclePermutation::single_cycle(&[2, 4]).into_perm();
        let set = PermutationSet::from_vec(vec![a]);
        let minimized = set.minimize_degree();
        assert_eq!(minimized.as_slice()[0].degree(), 2);
        assert_eq!(minimized.as_slice()[0].apply(0), 1);
        assert_eq!(minimized.as_slice()[0].apply(1), 0);
    }

    #[test]
    fn trivial_set_has_no_smp() {
        let set: PermutationSet<StandardPermutation> = PermutationSet::from_vec(vec![StandardPermutation::id()]);
        assert!(set.trivial());
        assert_eq!(set.smallest_moved_point(), None);
    }
}
