//! Safety bounds for the algorithms in [`crate::analysis`] that would
//! otherwise have no natural termination guarantee (random sampling,
//! series truncation). Exceeding one of these is a typed
//! [`crate::error::PermcoreError::Overflow`], never a silent timeout.

/// Configuration for structural-analysis algorithms.
///
/// Mirrors the teacher crate's `RandomAlgoParameters` builder
/// (`group::stabchain::builder::random::parameters`): a plain struct with
/// a `Default` impl and `with_*` setters, threaded by reference into every
/// entry point that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum length of the derived series before solvability gives up.
    pub derived_series_depth: usize,
    /// Maximum length of the lower-central series before nilpotency gives up.
    pub lower_central_series_depth: usize,
    /// Number of random elements sampled by the simplicity heuristic.
    pub simplicity_random_samples: usize,
    /// Number of greedy-extension attempts per Sylow restart.
    pub sylow_trial_budget: usize,
    /// Number of restarts allowed before Sylow construction fails.
    pub sylow_restart_budget: usize,
    /// Largest quotient index `[G:N]` the quotient builder will enumerate.
    pub max_quotient_index: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            derived_series_depth: 64,
            lower_central_series_depth: 64,
            simplicity_random_samples: 8,
            sylow_trial_budget: 200,
            sylow_restart_budget: 20,
            max_quotient_index: 1_000_000,
        }
    }
}

impl Limits {
    pub fn with_derived_series_depth(mut self, n: usize) -> Self {
        self.derived_series_depth = n;
        self
    }

    pub fn with_simplicity_random_samples(mut self, n: usize) -> Self {
        self.simplicity_random_samples = n;
        self
    }

    pub fn with_max_quotient_index(mut self, n: usize) -> Self {
        self.max_quotient_index = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_setters_chain_and_override_defaults() {
        let limits = Limits::default()
            .with_derived_series_depth(4)
            .with_simplicity_random_samples(0)
            .with_max_quotient_index(10);

        assert_eq!(limits.derived_series_depth, 4);
        assert_eq!(limits.simplicity_random_samples, 0);
        assert_eq!(limits.max_quotient_index, 10);
        // Fields left untouched keep their defaults.
        assert_eq!(limits.lower_central_series_depth, 64);
        assert_eq!(limits.sylow_trial_budget, 200);
        assert_eq!(limits.sylow_restart_budget, 20);
    }
}
