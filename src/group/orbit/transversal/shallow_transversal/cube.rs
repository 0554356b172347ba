use crate::{
    perm::{
        Action,
        Permutation,
    },
    DetHashMap,
    DetHashSet,
};

/// Breadth-first orbit search that grows the frontier by applying each
/// generator *and* its inverse at every step, bounding the depth of the
/// resulting Schreier table by roughly half of what a naive one-directional
/// search over the same generator sequence would need.
pub(super) struct Cube<P, A>
where
    P: Permutation,
    A: Action<P>,
{
    pub(super) cube: DetHashSet<A::OrbitT>,
    pub(super) orbit: DetHashMap<A::OrbitT, P>,
    pub(super) depth: DetHashMap<A::OrbitT, usize>,
}

impl<P, A> Cube<P, A>
where
    P: Permutation,
    A: Action<P>,
{
    pub(super) fn new(base: A::OrbitT, seq: &[P], strat: &A, orbit_size: Option<usize>) -> Self {
        let mut orbit = DetHashMap::default();
        orbit.insert(base.clone(), P::id());
        let mut depth = DetHashMap::default();
        depth.insert(base.clone(), 0);
        let mut cubes = vec![DetHashSet::default()];
        cubes[0].insert(base);

        for p in seq {
            let mut frontier = DetHashSet::default();
            let prev = cubes.last().unwrap();
            for j in prev.iter() {
                let val = strat.apply(p, j.clone());
                orbit.entry(val.clone()).or_insert_with(|| {
                    depth.insert(val.clone(), depth[j] + 1);
                    p.inv()
                });
                frontier.insert(val);

                let p_inv = p.inv();
                let val = strat.apply(&p_inv, j.clone());
                orbit.entry(val.clone()).or_insert_with(|| {
                    depth.insert(val.clone(), depth[j] + 1);
                    p.clone()
                });
                frontier.insert(val);
            }
            frontier.extend(prev.iter().cloned());
            cubes.push(frontier);

            if Some(orbit.len()) == orbit_size {
                break;
            }
        }

        Self {
            orbit,
            cube: cubes.pop().unwrap(),
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        group::{
            orbit::transversal::factored_transversal::representative_raw,
            Group,
        },
        perm::{
            actions::SimpleApplication,
            export::CyclePermutation,
            DefaultPermutation,
            Permutation,
        },
    };

    #[test]
    fn orbit_covers_the_whole_cycle() {
        let gens: Vec<DefaultPermutation> = vec![CyclePermutation::single_cycle(&[1, 2, 3]).into_perm()];
        let g = Group::from_list(gens);
        let strat = SimpleApplication::default();
        let cube = Cube::new(0, g.generators(), &strat, None);
        assert!(cube.orbit.contains_key(&0));
        assert!(cube.orbit.contains_key(&1));
        assert!(cube.orbit.contains_key(&2));
        for &i in cube.orbit.keys() {
            assert_eq!(i, representative_raw(&cube.orbit, 0, i, &strat).unwrap().apply(0));
        }
    }
}
