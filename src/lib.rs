//! Automorphism groups of architecture graphs, and symmetry-aware
//! canonicalisation of task mappings under those groups.
//!
//! The [`perm`] and [`group`] modules implement the permutation-group engine
//! (dense permutations, orbits, Schreier structures, base-and-strong
//! generating sets). The [`arch`] module builds on top of it to compose
//! automorphism groups of whole architecture graphs and to canonicalise
//! task-to-processor mappings modulo those symmetries.

pub mod arch;
pub mod error;
pub mod group;
pub mod perm;

use std::{
    collections::{
        hash_map::{
            DefaultHasher,
            HashMap,
        },
        HashSet,
    },
    hash::BuildHasherDefault,
};

pub use error::{
    Error,
    Result,
};

/// A type of HashMap that uses a determined seed
pub type DetHashMap<K, V> = HashMap<K, V, BuildHasherDefault<DefaultHasher>>;

/// A type of DetHashSet that uses a determined seed
pub type DetHashSet<K> = HashSet<K, BuildHasherDefault<DefaultHasher>>;
