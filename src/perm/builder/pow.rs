use super::PermBuilder;
use crate::perm::Permutation;

/// The lazy power of a builder: `Pow(a, k).collapse() == a.collapse().pow(k)`.
#[derive(Debug, Clone)]
pub struct Pow<A> {
    a: A,
    pow: isize,
}

impl<A> Pow<A> {
    pub fn new(a: A, pow: isize) -> Self {
        Self { a, pow }
    }
}

impl<P, A> PermBuilder<P> for Pow<A>
where
    P: Permutation,
    A: PermBuilder<P>,
{
    fn build_apply(&self, x: usize) -> usize {
        self.collapse().apply(x)
    }

    fn collapse(&self) -> P {
        self.a.collapse().pow(self.pow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::StandardPermutation;

    #[test]
    fn pow_matches_repeated_multiply() {
        let a = StandardPermutation::from_images(&[1, 2, 0]);
        let p = Pow::new(a.clone(), 3);
        assert_eq!(p.collapse(), a.pow(3));
    }

    #[test]
    fn negative_pow_inverts() {
        let a = StandardPermutation::from_images(&[1, 2, 0]);
        let p = Pow::new(a.clone(), -1);
        assert_eq!(p.collapse(), a.inv());
    }
}
