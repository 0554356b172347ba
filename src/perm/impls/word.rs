use crate::perm::{
    impls::standard::StandardPermutation,
    Permutation,
};
use std::fmt;

/// A permutation expressed as a pending product of generators.
///
/// Random walks through a Cayley graph (see
/// [`crate::group::random_perm::random_cayley_walk`]) multiply a long chain
/// of generators together one at a time. Doing that directly against
/// [`StandardPermutation`] rebuilds a full image vector at every step; a
/// `WordPermutation` instead accumulates the word and only evaluates it into
/// a [`StandardPermutation`] once, on demand.
#[derive(Debug, Clone)]
pub struct WordPermutation {
    degree: usize,
    word: Vec<StandardPermutation>,
    evaluated: std::cell::OnceCell<StandardPermutation>,
}

impl WordPermutation {
    /// The empty word over a domain of size `degree`.
    pub fn id_with_capacity(degree: usize) -> Self {
        Self {
            degree,
            word: Vec::new(),
            evaluated: std::cell::OnceCell::new(),
        }
    }

    /// Append `perm` to the word, on the right.
    pub fn multiply_mut(&mut self, perm: &StandardPermutation) {
        self.word.push(perm.clone());
        self.evaluated = std::cell::OnceCell::new();
    }

    /// Fold the word into a single [`StandardPermutation`].
    pub fn evaluate(&self) -> &StandardPermutation {
        self.evaluated.get_or_init(|| {
            let mut acc = StandardPermutation::id().extend(self.degree);
            for p in &self.word {
                acc = acc.multiply(p);
            }
            acc
        })
    }
}

impl PartialEq for WordPermutation {
    fn eq(&self, other: &Self) -> bool {
        self.evaluate() == other.evaluate()
    }
}

impl Eq for WordPermutation {}

impl std::hash::Hash for WordPermutation {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.evaluate().hash(state);
    }
}

impl fmt::Display for WordPermutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.evaluate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_to_product_of_word() {
        let a = StandardPermutation::from_images(&[1, 0, 2]);
        let b = StandardPermutation::from_images(&[0, 2, 1]);
        let mut w = WordPermutation::id_with_capacity(3);
        w.multiply_mut(&a);
        w.multiply_mut(&b);
        assert_eq!(*w.evaluate(), a.multiply(&b));
    }

    #[test]
    fn empty_word_is_identity() {
        let w = WordPermutation::id_with_capacity(4);
        assert!(w.evaluate().is_id());
    }
}
