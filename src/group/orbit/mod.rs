//! Orbits of a point (or other domain value) under a group action, and the
//! Schreier-style structures used to recover coset representatives.

pub mod abstraction;
pub mod orbit_partition;
pub mod perm_set;
pub mod schreier_generator_queue;
pub mod transversal;

pub use orbit_partition::OrbitPartition;
pub use perm_set::PermutationSet;
pub use schreier_generator_queue::SchreierGeneratorQueue;

use crate::{
    perm::{
        Action,
        Permutation,
    },
    DetHashSet,
};
use std::collections::VecDeque;

/// The orbit of `point` under the given generators, computed by BFS.
pub fn orbit<P, A>(generators: &[P], point: A::OrbitT, action: &A) -> DetHashSet<A::OrbitT>
where
    P: Permutation,
    A: Action<P>,
{
    let mut seen = DetHashSet::default();
    seen.insert(point.clone());
    let mut queue = VecDeque::from([point]);
    while let Some(p) = queue.pop_front() {
        for g in generators {
            let img = action.apply(g, p.clone());
            if seen.insert(img.clone()) {
                queue.push_back(img);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::{
        actions::SimpleApplication,
        export::CyclePermutation,
        StandardPermutation,
    };

    #[test]
    fn orbit_of_transitive_cycle_is_everything() {
        let g: StandardPermutation = CyclePermutation::single_cycle(&[1, 2, 3, 4]).into_perm();
        let o = orbit(&[g], 0, &SimpleApplication::default());
        assert_eq!(o.len(), 4);
    }
}
