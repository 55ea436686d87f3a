//! Error and tri-state types shared across every component.

use thiserror::Error;

/// Every fallible outcome the engine can produce.
///
/// Leaf utilities and the permutation store ([`crate::store`]) return these
/// directly; the set and chain layers surface them unchanged; structural
/// analysis raises them only for preconditions and resource limits, using
/// [`TriState`] for decision problems instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermcoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("point {point} is out of bounds for degree {degree}")]
    OutOfBounds { point: usize, degree: usize },

    #[error("{0} is not a subgroup of {1}")]
    NotSubgroup(String, String),

    #[error("order of {0} ({1}) does not divide order of {2} ({3})")]
    NotDivisor(String, String, String, String),

    #[error("{0} exceeded its configured limit ({1})")]
    Overflow(String, usize),
}

pub type Result<T> = std::result::Result<T, PermcoreError>;

/// Decision-problem outcome for algorithms whose strict solution is out of
/// scope (simplicity, isomorphism). `Unknown` is a first-class result, not
/// a failure: callers opt into the tri-state contract by invoking the
/// decision function at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    No,
    Yes,
    Unknown,
}

impl TriState {
    pub fn is_yes(self) -> bool {
        matches!(self, TriState::Yes)
    }

    pub fn is_no(self) -> bool {
        matches!(self, TriState::No)
    }

    pub fn is_unknown(self) -> bool {
        matches!(self, TriState::Unknown)
    }
}
