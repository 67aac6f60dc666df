//! Strike search tolerances and iteration budget.

use serde::{Deserialize, Serialize};

/// Strike resolver configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Accepted |abs(delta) - target| for a converged match.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Hard cap on search iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Largest delta error accepted for a closest-available fallback.
    #[serde(default = "default_max_fallback_error")]
    pub max_fallback_error: f64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            max_fallback_error: default_max_fallback_error(),
        }
    }
}

const fn default_tolerance() -> f64 {
    0.02
}

const fn default_max_iterations() -> u32 {
    8
}

const fn default_max_fallback_error() -> f64 {
    0.20
}
