//! Product-replacement-driven heuristics that only need *samples* from a
//! group rather than its full structure: here, a classical Monte-Carlo test
//! for "this group is probably all of `S_n` or `A_n`", used to let the
//! randomised strong-generating-set construction short-circuit its
//! strength test when it already knows the order to expect.

use super::{
    random_perm::RandPerm,
    Group,
};
use crate::perm::Permutation;
use num::traits::One;
use num_bigint::BigUint;

/// Repeated (approximately uniform) sampling from a group by product
/// replacement, the same generator the crate already uses for
/// [`super::PermGroup::random_element`].
pub struct ProductReplacementRandomiser<P: Permutation> {
    rand_perm: RandPerm<P>,
}

impl<P: Permutation> ProductReplacementRandomiser<P> {
    pub fn new(group: &Group<P>, burn_in: usize) -> Self {
        let min_size = group.generators().len().max(11);
        Self {
            rand_perm: RandPerm::from_generators(min_size, group, burn_in),
        }
    }

    pub fn sample(&mut self) -> P {
        self.rand_perm.random_permutation()
    }
}

/// `Some(order)` if repeated sampling gives strong Monte-Carlo evidence
/// that `group` is the full symmetric or alternating group on its moved
/// points, `None` if the evidence is inconclusive.
///
/// Grounded in the classical cycle-type test: a permutation of degree `n`
/// with a cycle of prime length `p` satisfying `n/2 < p <= n - 2` lies in
/// no transitive subgroup other than `A_n` or `S_n`. Seeing one such
/// element is strong evidence the group contains `A_n`; seeing an odd
/// permutation too promotes that to `S_n`.
pub fn check_altsym<P: Permutation>(group: &Group<P>, retries: usize) -> Option<BigUint> {
    let n = group.symmetric_super_order();
    if n < 3 || retries == 0 {
        return None;
    }

    let mut randomiser = ProductReplacementRandomiser::new(group, retries);
    let mut saw_large_prime_cycle = false;
    let mut saw_odd_permutation = false;

    for _ in 0..retries {
        let g = randomiser.sample();
        let lengths = cycle_lengths(&g, n);
        if lengths.iter().any(|&len| is_large_prime_cycle(len, n)) {
            saw_large_prime_cycle = true;
        }
        if !is_even(&lengths) {
            saw_odd_permutation = true;
        }
        if saw_large_prime_cycle && saw_odd_permutation {
            break;
        }
    }

    if saw_large_prime_cycle && saw_odd_permutation {
        Some(factorial(n))
    } else if saw_large_prime_cycle {
        Some(factorial(n) / BigUint::from(2u32))
    } else {
        None
    }
}

fn cycle_lengths<P: Permutation>(p: &P, n: usize) -> Vec<usize> {
    let mut seen = vec![false; n];
    let mut lengths = Vec::new();
    for start in 0..n {
        if seen[start] {
            continue;
        }
        let mut len = 0;
        let mut cur = start;
        while !seen[cur] {
            seen[cur] = true;
            cur = p.apply(cur);
            len += 1;
        }
        lengths.push(len);
    }
    lengths
}

fn is_even(cycle_lengths: &[usize]) -> bool {
    cycle_lengths.iter().map(|&len| len - 1).sum::<usize>() % 2 == 0
}

fn is_large_prime_cycle(len: usize, n: usize) -> bool {
    len * 2 > n && len <= n.saturating_sub(2) && is_prime(len)
}

fn is_prime(x: usize) -> bool {
    if x < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= x {
        if x % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

fn factorial(n: usize) -> BigUint {
    (1..=n).fold(BigUint::one(), |acc, i| acc * BigUint::from(i))
}
