mod cube;

use crate::{
    perm::{
        Action,
        Permutation,
    },
    DetHashMap,
};
use cube::Cube;
use rand::{
    seq::SliceRandom,
    Rng,
};

/// Build a Schreier table whose depth is kept low by meeting the orbit
/// search from both a generator and its inverse at once (the "cube"
/// construction), instead of a plain one-directional BFS.
///
/// Returns the table together with the depth at which each point was
/// discovered, which callers can use to bound sift cost.
pub fn shallow_transversal<P, A, R>(
    generators: &[P],
    base: A::OrbitT,
    action: &A,
    rng: &mut R,
) -> (DetHashMap<A::OrbitT, P>, DetHashMap<A::OrbitT, usize>)
where
    P: Permutation,
    A: Action<P>,
    R: Rng,
{
    let mut seq = generators.to_vec();
    seq.shuffle(rng);
    let cube = Cube::new(base, &seq, action, None);
    (cube.orbit, cube.depth)
}
