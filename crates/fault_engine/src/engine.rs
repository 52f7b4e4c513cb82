//! The decision engine.
//!
//! Decides per request path whether the configured injector runs. The
//! order of checks is fixed: injector/enabled, blacklist, whitelist, then
//! the probability draw. The blacklist always wins over the whitelist.

use std::{collections::HashSet, fmt, sync::Arc};

use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, trace, warn};

use crate::{
    injector::Injector,
    options::{FaultOptions, effective_rate},
    stats::{FaultStats, StatsCounters},
};

/// Outcome of evaluating a single request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request to the injector
    Inject,
    /// No injector is configured
    NoInjector,
    /// The engine is disabled
    Disabled,
    /// The path is blacklisted
    Blacklisted,
    /// A whitelist exists and the path is not on it
    NotWhitelisted,
    /// The path is eligible but the probability draw said no
    NotSelected,
}

impl Decision {
    /// Whether the injector should run
    pub const fn is_inject(self) -> bool {
        matches!(self, Self::Inject)
    }
}

/// Fault injection decision engine
///
/// Options and path sets are immutable after construction. The random
/// source is seeded once and shared by every request, so a fixed seed and a
/// fixed call sequence always reproduce the same decisions.
pub struct FaultEngine {
    options: FaultOptions,
    injector: Option<Arc<dyn Injector>>,
    path_blacklist: HashSet<String>,
    path_whitelist: HashSet<String>,
    rng: Mutex<StdRng>,
    stats: StatsCounters,
}

impl FaultEngine {
    /// Create an engine from an injector and options
    pub fn new(injector: Arc<dyn Injector>, options: FaultOptions) -> Self {
        Self::from_optional(Some(injector), options)
    }

    /// Create an engine whose injector may be absent.
    ///
    /// Never fails: a missing injector or an out-of-range percentage is
    /// logged and results in an engine that never injects.
    pub fn from_optional(injector: Option<Arc<dyn Injector>>, options: FaultOptions) -> Self {
        if injector.is_none() && options.enabled {
            warn!("Fault injection enabled without an injector, requests will pass through");
        }
        if !options.percent_in_range() {
            warn!(
                inject_percent = options.inject_percent,
                "Inject percent outside [0.0, 1.0], faults will never be injected"
            );
        }

        let path_blacklist = options.path_blacklist.iter().cloned().collect();
        let path_whitelist = options.path_whitelist.iter().cloned().collect();
        let rng = Mutex::new(StdRng::seed_from_u64(options.rand_seed));

        Self {
            options,
            injector,
            path_blacklist,
            path_whitelist,
            rng,
            stats: StatsCounters::default(),
        }
    }

    /// The options as configured, raw values included
    pub const fn options(&self) -> &FaultOptions {
        &self.options
    }

    /// The configured injector, if any
    pub fn injector(&self) -> Option<&Arc<dyn Injector>> {
        self.injector.as_ref()
    }

    /// Evaluate a request path
    pub fn evaluate(&self, path: &str) -> Decision {
        let decision = self.decide(path);
        self.stats.record(decision);

        if decision.is_inject() {
            debug!(path, "Injecting fault");
        } else {
            trace!(path, ?decision, "Passing request through");
        }

        decision
    }

    /// Whether the injector should run for this path
    pub fn should_inject(&self, path: &str) -> bool {
        self.evaluate(path).is_inject()
    }

    /// Current statistics snapshot
    pub fn stats(&self) -> FaultStats {
        self.stats.snapshot()
    }

    fn decide(&self, path: &str) -> Decision {
        if self.injector.is_none() {
            return Decision::NoInjector;
        }

        if !self.options.enabled {
            return Decision::Disabled;
        }

        if self.path_blacklist.contains(path) {
            return Decision::Blacklisted;
        }

        if !self.path_whitelist.is_empty() && !self.path_whitelist.contains(path) {
            return Decision::NotWhitelisted;
        }

        if self.percent_do() {
            Decision::Inject
        } else {
            Decision::NotSelected
        }
    }

    /// Probability draw against the effective rate.
    ///
    /// Rates of zero or one are decided without consuming a draw.
    fn percent_do(&self) -> bool {
        let rate = effective_rate(self.options.inject_percent);

        if rate <= 0.0 {
            return false;
        }

        if rate >= 1.0 {
            return true;
        }

        self.rng.lock().random::<f64>() < rate
    }
}

impl Default for FaultEngine {
    /// A disabled engine without an injector
    fn default() -> Self {
        Self::from_optional(None, FaultOptions::default())
    }
}

impl fmt::Debug for FaultEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultEngine")
            .field("options", &self.options)
            .field("has_injector", &self.injector.is_some())
            .finish_non_exhaustive()
    }
}

/// Evaluate a possibly absent engine; an absent engine never injects
pub fn should_inject(engine: Option<&FaultEngine>, path: &str) -> bool {
    engine.is_some_and(|engine| engine.should_inject(path))
}
