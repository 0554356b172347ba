//! Tunable constants for the randomised strong-generating-set construction.

use num_bigint::BigUint;
use rand::rngs::ThreadRng;

/// Iteration counts and thresholds controlling how hard the randomised
/// builder works to convince itself a candidate generating set is strong.
/// Larger values lower the (already small) probability of a false
/// negative at the cost of more random-element generation.
#[derive(Debug, Clone)]
pub struct Constants {
    /// Schreier generators drawn as full subproducts, per SGC round.
    pub c1: usize,
    /// Schreier generators drawn as partial subproducts, per SGC round.
    pub c2: usize,
    /// Full-subproduct generators drawn during the final strength test.
    pub c3: usize,
    /// Partial-subproduct generators drawn during the final strength test.
    pub c4: usize,
    /// Above this orbit size, residues are checked on a random sample of
    /// points rather than the whole orbit.
    pub orbit_bound: usize,
    /// Sample size used once `orbit_bound` is exceeded.
    pub base_bound: usize,
    /// The group order, if already known, lets the strength test short-circuit.
    pub order: Option<BigUint>,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            c1: 10,
            c2: 10,
            c3: 10,
            c4: 5,
            orbit_bound: 100,
            base_bound: 50,
            order: None,
        }
    }
}

/// Parameters bundle handed to [`super::random_ift::StabchainBuilderRandom`]:
/// the constants above, plus the source of randomness to drive the whole
/// construction.
#[derive(Debug)]
pub struct RandomAlgoParameters<R = ThreadRng> {
    constants: Constants,
    rng: R,
}

impl RandomAlgoParameters<ThreadRng> {
    pub fn new() -> Self {
        Self {
            constants: Constants::default(),
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomAlgoParameters<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RandomAlgoParameters<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            constants: Constants::default(),
            rng,
        }
    }

    /// Supply the expected group order so the strength test can short-circuit.
    pub fn with_order(mut self, order: BigUint) -> Self {
        self.constants.order = Some(order);
        self
    }

    /// Scale how many Schreier generators each SGC round and the final
    /// strength test sample, applied to both the full- and partial-subproduct
    /// counts (`c1`/`c3` and `c2`/`c4` respectively).
    pub fn with_retries(mut self, retries: usize) -> Self {
        self.constants.c1 = retries;
        self.constants.c3 = retries;
        self
    }

    /// Width of the product-replacement generator pool partial subproducts
    /// are drawn from (`c2`/`c4`).
    pub fn with_w(mut self, w: usize) -> Self {
        self.constants.c2 = w;
        self.constants.c4 = w / 2;
        self
    }

    pub(crate) fn consts(self) -> (Constants, R) {
        (self.constants, self.rng)
    }
}
