use super::PermBuilder;
use crate::perm::Permutation;

/// The lazy product of two builders: `Join(a, b).build_apply(x) == b.build_apply(a.build_apply(x))`.
#[derive(Debug, Clone)]
pub struct Join<A, B> {
    a: A,
    b: B,
}

impl<A, B> Join<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }
}

impl<P, A, B> PermBuilder<P> for Join<A, B>
where
    P: Permutation,
    A: PermBuilder<P>,
    B: PermBuilder<P>,
{
    fn build_apply(&self, x: usize) -> usize {
        self.b.build_apply(self.a.build_apply(x))
    }

    fn collapse(&self) -> P {
        self.a.collapse().multiply(&self.b.collapse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perm::StandardPermutation;

    #[test]
    fn join_matches_multiply() {
        let a = StandardPermutation::from_images(&[1, 2, 0]);
        let b = StandardPermutation::from_images(&[0, 2, 1]);
        let joined = Join::new(a.clone(), b.clone());
        let collapsed: StandardPermutation = joined.collapse();
        assert_eq!(collapsed, a.multiply(&b));
        for i in 0..3 {
            assert_eq!(joined.build_apply(i), collapsed.apply(i));
        }
    }
}
