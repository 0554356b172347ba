use crate::perm::{
    utils::valid_images,
    Permutation,
};
use std::fmt;

/// A permutation stored as a dense image vector.
///
/// `images[i]` is the image of point `i`. Trailing fixed points are kept in
/// the vector (so `degree()` can be smaller than `images.len()`), which is
/// what lets [`Permutation::extend`] and direct-product shifting avoid
/// reallocating every intermediate permutation.
#[derive(Debug, Clone, Eq)]
pub struct StandardPermutation {
    images: Vec<usize>,
}

impl StandardPermutation {
    /// Build directly from an already-validated image vector, trimming
    /// trailing fixed points.
    pub(crate) fn from_vec_unchecked(mut images: Vec<usize>) -> Self {
        while let Some(&last) = images.last() {
            if last == images.len() - 1 {
                images.pop();
            } else {
                break;
            }
        }
        Self { images }
    }

    pub fn as_vec(&self) -> &[usize] {
        &self.images
    }
}

impl Permutation for StandardPermutation {
    fn id() -> Self {
        Self { images: Vec::new() }
    }

    fn from_images(images: &[usize]) -> Self {
        valid_images(images).expect("invalid permutation images");
        Self::from_vec_unchecked(images.to_vec())
    }

    fn shift(&self, k: usize) -> Self {
        if self.is_id() {
            return Self::id();
        }
        let mut images: Vec<usize> = (0..k).collect();
        images.extend(self.images.iter().map(|&i| i + k));
        Self::from_vec_unchecked(images)
    }

    fn is_id(&self) -> bool {
        self.images.is_empty()
    }

    fn apply(&self, x: usize) -> usize {
        self.images.get(x).copied().unwrap_or(x)
    }

    fn inv(&self) -> Self {
        let mut inv = vec![0usize; self.images.len()];
        for (i, &img) in self.images.iter().enumerate() {
            inv[img] = i;
        }
        Self::from_vec_unchecked(inv)
    }

    fn multiply(&self, other: &Self) -> Self {
        let n = self.images.len().max(other.images.len());
        let images: Vec<usize> = (0..n).map(|i| other.apply(self.apply(i))).collect();
        Self::from_vec_unchecked(images)
    }

    fn pow(&self, pow: isize) -> Self {
        if pow == 0 || self.is_id() {
            return Self::id();
        }
        let (base, mut exp) = if pow < 0 {
            (self.inv(), (-pow) as usize)
        } else {
            (self.clone(), pow as usize)
        };
        let mut result = Self::id();
        let mut acc = base;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(&acc);
            }
            acc = acc.multiply(&acc);
            exp >>= 1;
        }
        result
    }

    fn order(&self) -> usize {
        use num::integer::lcm;
        let mut accounted = vec![false; self.images.len()];
        let mut ord = 1usize;
        for i in 0..self.images.len() {
            if accounted[i] {
                continue;
            }
            let mut len = 0usize;
            let mut cur = i;
            loop {
                accounted[cur] = true;
                cur = self.apply(cur);
                len += 1;
                if cur == i {
                    break;
                }
            }
            if len > 1 {
                ord = lcm(ord, len);
            }
        }
        ord
    }

    fn lmp(&self) -> Option<usize> {
        (0..self.images.len()).rev().find(|&i| self.apply(i) != i)
    }

    fn smp(&self) -> Option<usize> {
        (0..self.images.len()).find(|&i| self.apply(i) != i)
    }
}

impl PartialEq for StandardPermutation {
    fn eq(&self, other: &Self) -> bool {
        let n = self.images.len().max(other.images.len());
        (0..n).all(|i| self.apply(i) == other.apply(i))
    }
}

impl std::hash::Hash for StandardPermutation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.images.hash(state);
    }
}

impl fmt::Display for StandardPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::perm::export::CyclePermutation;
        write!(f, "{}", CyclePermutation::from(self.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_fixes_everything() {
        let id = StandardPermutation::id();
        for i in 0..10 {
            assert_eq!(id.apply(i), i);
        }
    }

    #[test]
    fn compose_matches_definition() {
        let p = StandardPermutation::from_images(&[1, 2, 0]);
        let q = StandardPermutation::from_images(&[0, 2, 1]);
        let pq = p.multiply(&q);
        for i in 0..3 {
            assert_eq!(pq.apply(i), q.apply(p.apply(i)));
        }
    }

    #[test]
    fn inverse_roundtrips() {
        let p = StandardPermutation::from_images(&[3, 0, 1, 2]);
        let inv = p.inv();
        assert!(p.multiply(&inv).is_id());
        assert!(inv.multiply(&p).is_id());
        assert_eq!(inv.inv(), p);
    }

    #[test]
    fn associativity() {
        let p = StandardPermutation::from_images(&[1, 2, 0, 3]);
        let q = StandardPermutation::from_images(&[0, 3, 2, 1]);
        let r = StandardPermutation::from_images(&[2, 1, 0, 3]);
        assert_eq!(p.multiply(&q).multiply(&r), p.multiply(&q.multiply(&r)));
    }

    #[test]
    fn order_of_three_cycle() {
        let p = StandardPermutation::from_images(&[1, 2, 0]);
        assert_eq!(p.order(), 3);
    }

    #[test]
    fn extend_preserves_behaviour() {
        let p = StandardPermutation::from_images(&[1, 0]);
        let extended = p.extend(5);
        for i in 0..2 {
            assert_eq!(extended.apply(i), p.apply(i));
        }
        for i in 2..5 {
            assert_eq!(extended.apply(i), i);
        }
    }
}
