//! Conversions between the internal zero-indexed permutation
//! representations and the one-indexed notations used at crate boundaries.

pub mod cycles;

pub use cycles::CyclePermutation;
