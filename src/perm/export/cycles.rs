use crate::{
    perm::Permutation,
    DetHashMap,
    DetHashSet,
};
use num::integer::lcm;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;

/// A permutation in disjoint cycle notation, over the human-facing
/// `{1..=n}` domain.
///
/// This is the wire/display form used at crate boundaries; the dense
/// `Permutation` implementations stay zero-indexed internally, and
/// conversion to and from this type is where the `+1`/`-1` offset lives.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct CyclePermutation {
    cycles: Vec<Vec<usize>>,
}

impl CyclePermutation {
    pub fn id() -> Self {
        Self::from_vec_unchecked(Vec::new())
    }

    /// Build from one-indexed images (`images[i-1]` is the image of `i`).
    pub fn from_images(images: &[usize]) -> Self {
        assert!(images.iter().all(|&n| n > 0), "images must be one-indexed");
        let zero_indexed: Vec<usize> = images.iter().map(|&i| i - 1).collect();
        let perm = crate::perm::StandardPermutation::from_images(&zero_indexed);
        Self::from(perm)
    }

    pub fn from_vec(cycles: Vec<Vec<usize>>) -> Self {
        assert!(cycles.iter().flatten().all(|&i| i > 0), "cycle entries must be one-indexed");

        let mut counts = DetHashMap::default();
        for i in cycles.iter().flatten() {
            *counts.entry(*i).or_insert(0) += 1;
        }
        assert!(counts.values().all(|&i| i <= 1), "cycles must be disjoint");

        Self::from_vec_unchecked(cycles)
    }

    pub fn single_cycle(cycle: &[usize]) -> Self {
        Self::from_vec(vec![cycle.to_vec()])
    }

    fn from_vec_unchecked(v: Vec<Vec<usize>>) -> Self {
        Self { cycles: v }
    }

    pub fn order(&self) -> usize {
        self.cycles.iter().map(|s| s.len()).fold(1, lcm)
    }

    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles[..]
    }

    /// Convert to a zero-indexed permutation of the requested representation.
    pub fn into_perm<P: Permutation>(self) -> P {
        let n = self.cycles.iter().flatten().max().copied().unwrap_or(0);
        let mut images: Vec<usize> = (0..n).collect();
        for cycle in &self.cycles {
            for window in cycle.windows(2) {
                images[window[0] - 1] = window[1] - 1;
            }
            if let (Some(&first), Some(&last)) = (cycle.first(), cycle.last()) {
                images[last - 1] = first - 1;
            }
        }
        P::from_images(&images)
    }
}

impl<P: Permutation> From<P> for CyclePermutation {
    fn from(perm: P) -> Self {
        let n = perm.lmp();
        let n = match n {
            None => return Self::from_vec_unchecked(Vec::new()),
            Some(n) => n + 1,
        };

        let mut accounted: DetHashSet<usize> = DetHashSet::default();
        let mut cycles = Vec::new();

        for i in 1..=n {
            if accounted.contains(&i) {
                continue;
            }
            accounted.insert(i);

            let mut current = i;
            let mut cycle = vec![current];
            loop {
                current = perm.apply(current - 1) + 1;
                if cycle.contains(&current) {
                    break;
                }
                accounted.insert(current);
                cycle.push(current);
            }

            if cycle.len() > 1 {
                cycles.push(cycle);
            }
        }

        Self::from_vec_unchecked(cycles)
    }
}

macro_rules! impl_from_cycle_for {
    ($name:ty) => {
        impl From<CyclePermutation> for $name {
            fn from(perm: CyclePermutation) -> Self {
                perm.into_perm()
            }
        }
    };
}

impl_from_cycle_for!(crate::perm::impls::standard::StandardPermutation);
impl_from_cycle_for!(crate::perm::impls::based::BasedPermutation);

impl fmt::Display for CyclePermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cycles().is_empty() {
            write!(f, "()")?;
            return Ok(());
        }

        for cycle in &self.cycles {
            write!(f, "(")?;
            for img in cycle[0..cycle.len() - 1].iter() {
                write!(f, "{} ", img)?;
            }
            write!(f, "{})", cycle[cycle.len() - 1])?;
        }

        Ok(())
    }
}
