//! Options controlling how a stabiliser chain (and hence a [`super::PermGroup`]'s
//! order, membership test, and classification) is built.

use std::time::Duration;

/// Which Schreier-Sims strategy builds the stabiliser chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConstructionMethod {
    /// Deterministic incremental Schreier-Sims.
    #[default]
    Deterministic,
    /// Randomised Schreier-Sims: a product-replacement-driven construction
    /// followed by a probabilistic strength test.
    Random,
}

/// Which transversal representation a level of the chain uses. Currently
/// only the factored (Schreier-table) representation is implemented; this
/// exists so a caller's choice is explicit rather than implied, and so a
/// request for an unsupported kind fails loudly instead of silently
/// falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransversalKind {
    #[default]
    Factored,
    Shallow,
    Explicit,
}

/// Options for [`super::PermGroup::try_new_with_options`] and
/// [`super::super::arch::ArchGraphSystem::try_automorphisms`].
#[derive(Debug, Clone)]
pub struct AutomorphismOptions {
    /// Re-derive the automorphism group even if one is already cached.
    pub force_recompute: bool,
    pub construction: ConstructionMethod,
    pub transversals: TransversalKind,
    /// Run a Monte-Carlo cycle-type test before a randomised construction,
    /// to let the strength test short-circuit when the group is very
    /// likely `S_n` or `A_n`.
    pub check_altsym: bool,
    /// After construction, try to verify that a strict subset of the
    /// strong generating set still generates the same group, and keep
    /// only that subset if so.
    pub reduce_gens: bool,
    /// Full-subproduct / partial-subproduct Schreier generators sampled
    /// per round of the randomised construction's strength test.
    pub schreier_sims_random_retries: usize,
    /// Width of the product-replacement generator pool the randomised
    /// construction samples from.
    pub schreier_sims_random_w: usize,
    /// Abort construction (returning [`crate::Error::Aborted`]) once this
    /// much wall-clock time has elapsed.
    pub timeout: Option<Duration>,
}

impl Default for AutomorphismOptions {
    fn default() -> Self {
        Self {
            force_recompute: false,
            construction: ConstructionMethod::Deterministic,
            transversals: TransversalKind::Factored,
            check_altsym: false,
            reduce_gens: false,
            schreier_sims_random_retries: 10,
            schreier_sims_random_w: 10,
            timeout: None,
        }
    }
}

impl AutomorphismOptions {
    pub fn with_force_recompute(mut self, on: bool) -> Self {
        self.force_recompute = on;
        self
    }

    pub fn with_construction(mut self, method: ConstructionMethod) -> Self {
        self.construction = method;
        self
    }

    pub fn with_transversals(mut self, kind: TransversalKind) -> Self {
        self.transversals = kind;
        self
    }

    pub fn with_check_altsym(mut self, on: bool) -> Self {
        self.check_altsym = on;
        self
    }

    pub fn with_reduce_gens(mut self, on: bool) -> Self {
        self.reduce_gens = on;
        self
    }

    pub fn with_schreier_sims_random_retries(mut self, n: usize) -> Self {
        self.schreier_sims_random_retries = n;
        self
    }

    pub fn with_schreier_sims_random_w(mut self, n: usize) -> Self {
        self.schreier_sims_random_w = n;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
