//! Fault engine options.
//!
//! Options are plain data: they are accepted as given and only interpreted
//! when a request is evaluated. An out-of-range `inject_percent` is kept
//! verbatim so it can still be inspected and logged.

use serde::{Deserialize, Serialize};

/// Seed used when no explicit seed is configured
pub const DEFAULT_RAND_SEED: u64 = 1;

/// Options controlling when a fault is injected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FaultOptions {
    /// Master switch; a disabled engine never injects
    pub enabled: bool,

    /// Probability of injecting a fault (0.0 to 1.0)
    pub inject_percent: f64,

    /// Paths that are never injected, even when whitelisted
    pub path_blacklist: Vec<String>,

    /// If non-empty, only these paths are eligible for injection
    pub path_whitelist: Vec<String>,

    /// Seed for the engine's random source
    pub rand_seed: u64,
}

impl Default for FaultOptions {
    fn default() -> Self {
        Self {
            enabled: false, // Disabled by default for safety
            inject_percent: 0.0,
            path_blacklist: Vec::new(),
            path_whitelist: Vec::new(),
            rand_seed: DEFAULT_RAND_SEED,
        }
    }
}

impl FaultOptions {
    /// Enable or disable injection
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the injection probability
    #[must_use]
    pub const fn with_inject_percent(mut self, percent: f64) -> Self {
        self.inject_percent = percent;
        self
    }

    /// Set the paths that must never be injected
    #[must_use]
    pub fn with_path_blacklist<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.path_blacklist = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict injection to the given paths
    #[must_use]
    pub fn with_path_whitelist<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.path_whitelist = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the random seed
    #[must_use]
    pub const fn with_rand_seed(mut self, seed: u64) -> Self {
        self.rand_seed = seed;
        self
    }

    /// Whether `inject_percent` lies inside `[0.0, 1.0]`
    pub fn percent_in_range(&self) -> bool {
        (0.0..=1.0).contains(&self.inject_percent)
    }
}

/// Map a configured percentage to the rate actually used for the draw.
///
/// Anything outside `[0.0, 1.0]`, NaN included, never injects.
pub fn effective_rate(percent: f64) -> f64 {
    if (0.0..=1.0).contains(&percent) {
        percent
    } else {
        0.0
    }
}
