//! A computational engine for finite permutation groups: an interned
//! permutation store with trie-based deduplication (C2), vectorised set
//! algebra over interned IDs (C3/C4), a Schreier-Sims stabiliser chain
//! (C5), and structural analysis built on top of it (C6).

pub mod analysis;
pub mod chain;
pub mod closure;
pub mod cycles;
pub mod error;
pub mod factories;
pub mod intset;
pub mod limits;
pub mod permset;
pub mod store;

use std::{
    collections::{
        hash_map::{DefaultHasher, HashMap},
        HashSet,
    },
    hash::BuildHasherDefault,
};

/// A type of HashMap that uses a determined seed
pub type DetHashMap<K, V> = HashMap<K, V, BuildHasherDefault<DefaultHasher>>;

/// A type of DetHashSet that uses a determined seed
pub type DetHashSet<K> = HashSet<K, BuildHasherDefault<DefaultHasher>>;

pub use chain::StabilizerChain;
pub use closure::closure_from_generators;
pub use error::{PermcoreError, Result, TriState};
pub use limits::Limits;
pub use permset::PermSet;
pub use store::{PermId, PermStore};
