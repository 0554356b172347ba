use crate::perm::{
    impls::standard::StandardPermutation,
    Permutation,
};
use std::fmt;

/// A permutation stored as a fixed prefix `0..base` plus a dense tail.
///
/// Direct and wreath products shift each factor's generators by a growing
/// offset before combining them; every shifted generator then fixes a large
/// initial segment of the combined domain. Storing that segment explicitly
/// as `base` instead of folding it into the image vector keeps shifting and
/// composing such permutations cheap regardless of how large the offset
/// grows.
#[derive(Debug, Clone, Eq)]
pub struct BasedPermutation {
    base: usize,
    perm: StandardPermutation,
}

impl BasedPermutation {
    fn from_vec_unchecked(vals: &[usize]) -> Self {
        let mut base = 0;
        while base < vals.len() && vals[base] == base {
            base += 1;
        }

        let values: Vec<usize> = vals.iter().skip(base).map(|i| i - base).collect();

        let perm = StandardPermutation::from_vec_unchecked(values);
        if perm.is_id() {
            return Self::id();
        }

        Self { base, perm }
    }

    pub fn base(&self) -> usize {
        self.base
    }
}

impl Permutation for BasedPermutation {
    fn id() -> Self {
        Self {
            base: 0,
            perm: StandardPermutation::id(),
        }
    }

    fn from_images(images: &[usize]) -> Self {
        crate::perm::utils::valid_images(images).expect("invalid permutation images");
        Self::from_vec_unchecked(images)
    }

    fn shift(&self, k: usize) -> Self {
        if self.is_id() {
            return self.clone();
        }

        Self {
            base: self.base + k,
            perm: self.perm.clone(),
        }
    }

    fn is_id(&self) -> bool {
        self.perm.is_id()
    }

    fn apply(&self, x: usize) -> usize {
        if x < self.base {
            x
        } else {
            self.perm.apply(x - self.base) + self.base
        }
    }

    fn inv(&self) -> Self {
        Self {
            perm: self.perm.inv(),
            base: self.base,
        }
    }

    fn multiply(&self, other: &Self) -> Self {
        let result = if self.is_id() {
            other.clone()
        } else if other.is_id() {
            self.clone()
        } else if self.base == other.base {
            Self {
                perm: self.perm.multiply(&other.perm),
                base: self.base,
            }
        } else if self.base < other.base {
            Self {
                base: self.base,
                perm: self
                    .perm
                    .multiply(&other.perm.shift(other.base - self.base)),
            }
        } else {
            Self {
                base: other.base,
                perm: self
                    .perm
                    .shift(self.base - other.base)
                    .multiply(&other.perm),
            }
        };

        if result.perm.is_id() {
            return Self::id();
        }

        let new_based = Self::from_images(result.perm.as_vec());

        Self {
            base: result.base + new_based.base,
            perm: new_based.perm,
        }
    }

    fn pow(&self, pow: isize) -> Self {
        let perm = self.perm.pow(pow);
        if perm.is_id() {
            Self::id()
        } else {
            Self {
                perm,
                base: self.base,
            }
        }
    }

    fn order(&self) -> usize {
        self.perm.order()
    }

    fn lmp(&self) -> Option<usize> {
        self.perm.lmp().map(|l| l + self.base)
    }

    fn smp(&self) -> Option<usize> {
        self.perm.smp().map(|s| s + self.base)
    }
}

impl PartialEq for BasedPermutation {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.perm == other.perm
    }
}

impl std::hash::Hash for BasedPermutation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.perm.hash(state);
    }
}

impl fmt::Display for BasedPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::perm::export::CyclePermutation;
        write!(f, "{}", CyclePermutation::from(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_skips_fixed_prefix() {
        let p = BasedPermutation::from_images(&[0, 1, 2, 4, 3]);
        assert_eq!(p.base(), 3);
    }

    #[test]
    fn shift_moves_base_only() {
        let p = BasedPermutation::from_images(&[1, 0]);
        let shifted = p.shift(10);
        assert_eq!(shifted.apply(10), 11);
        assert_eq!(shifted.apply(11), 10);
        assert_eq!(shifted.apply(0), 0);
    }

    #[test]
    fn multiply_with_different_bases() {
        let p = BasedPermutation::from_images(&[0, 1, 3, 2]);
        let q = BasedPermutation::from_images(&[1, 0, 2, 3]);
        let pq = p.multiply(&q);
        for i in 0..4 {
            assert_eq!(pq.apply(i), q.apply(p.apply(i)));
        }
    }

    #[test]
    fn inverse_roundtrips() {
        let p = BasedPermutation::from_images(&[2, 0, 1]).shift(2);
        assert!(p.multiply(&p.inv()).is_id());
    }
}
