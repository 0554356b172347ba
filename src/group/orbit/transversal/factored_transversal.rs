//! A Schreier table where every point maps to the single generator used to
//! discover it, and a representative is recovered by walking that table
//! back to the base and multiplying the generators in reverse.

use crate::{
    group::Group,
    perm::{
        Action,
        Permutation,
    },
    DetHashMap,
};
use std::collections::VecDeque;

/// Walk the table from `point` back to `base`, folding the labels
/// encountered into a single representative permutation.
pub fn representative_raw<P, A>(
    transversal: &DetHashMap<A::OrbitT, P>,
    base: A::OrbitT,
    point: A::OrbitT,
    action: &A,
) -> Option<P>
where
    P: Permutation,
    A: Action<P>,
{
    let word = representative_raw_as_word(transversal, base, point, action)?;
    Some(word.into_iter().fold(P::id(), |acc, p| acc.multiply(&p)))
}

/// As [`representative_raw`], but returns the unfolded word instead of
/// collapsing it into a single permutation.
pub fn representative_raw_as_word<P, A>(
    transversal: &DetHashMap<A::OrbitT, P>,
    base: A::OrbitT,
    mut point: A::OrbitT,
    action: &A,
) -> Option<Vec<P>>
where
    P: Permutation,
    A: Action<P>,
{
    if !transversal.contains_key(&point) {
        return None;
    }
    let mut labels = Vec::new();
    while point != base {
        let label = transversal.get(&point)?;
        labels.push(label.inv());
        point = action.apply(label, point);
    }
    labels.reverse();
    Some(labels)
}

/// Build the full Schreier table for the orbit of `base` under `group`'s
/// generators, by breadth-first search.
#[allow(deprecated)]
pub fn factored_transversal_complete_opt<P, A>(
    group: &Group<P>,
    base: A::OrbitT,
    action: &A,
) -> DetHashMap<A::OrbitT, P>
where
    P: Permutation,
    A: Action<P>,
{
    let mut transversal = DetHashMap::default();
    transversal.insert(base.clone(), P::id());
    let mut queue = VecDeque::from([base]);
    while let Some(point) = queue.pop_front() {
        for g in group.generators() {
            let img = action.apply(g, point.clone());
            if !transversal.contains_key(&img) {
                transversal.insert(img.clone(), g.inv());
                queue.push_back(img);
            }
        }
    }
    transversal
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
    fn representative_reaches_every_orbit_point() {
        let g: StandardPermutation = CyclePermutation::single_cycle(&[1, 2, 3, 4]).into_perm();
        let group = Group::new(&[g]);
        let action = SimpleApplication::default();
        let transversal = factored_transversal_complete_opt(&group, 0, &action);
        for &point in transversal.keys() {
            let rep = representative_raw(&transversal, 0, point, &action).unwrap();
            assert_eq!(action.apply(&rep, 0), point);
        }
    }
}
