//! Concrete [`super::Permutation`] representations.
//!
//! [`standard::StandardPermutation`] is the dense, general-purpose
//! representation used everywhere by default. [`based::BasedPermutation`]
//! specialises storage for permutations with a large common fixed prefix
//! (as produced by, e.g., repeated shifting in direct products).
//! [`word::WordPermutation`] defers composition, amortising the cost of a
//! long chain of multiplications into a single evaluation pass.

pub mod based;
pub mod standard;
pub mod word;
