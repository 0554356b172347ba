//! Small helpers shared by the permutation implementations.

use crate::{
    perm::Permutation,
    Error,
};
use rand::{
    seq::SliceRandom,
    Rng,
};

/// Check that `images` is a bijection of `0..images.len()`.
pub fn valid_images(images: &[usize]) -> Result<(), Error> {
    let n = images.len();
    let mut seen = vec![false; n];
    for &img in images {
        if img >= n {
            return Err(Error::invalid_argument(format!(
                "image {img} out of range for degree {n}"
            )));
        }
        if seen[img] {
            return Err(Error::invalid_argument("images are not a bijection"));
        }
        seen[img] = true;
    }
    Ok(())
}

/// A uniformly random permutation of degree `n`, by Fisher-Yates shuffle.
pub fn random_permutation<P: Permutation>(n: usize) -> P {
    let mut rng = rand::thread_rng();
    random_permutation_with_rng(n, &mut rng)
}

/// As [`random_permutation`], but with an explicit source of randomness.
pub fn random_permutation_with_rng<P: Permutation, R: Rng>(n: usize, rng: &mut R) -> P {
    let mut images: Vec<usize> = (0..n).collect();
    images.shuffle(rng);
    P::from_images(&images)
}
