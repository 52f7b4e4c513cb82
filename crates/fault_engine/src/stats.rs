//! Injection statistics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::engine::Decision;

/// Snapshot of how an engine has decided so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultStats {
    /// Total number of requests evaluated
    pub evaluated: u64,
    /// Number of requests handed to the injector
    pub injected: u64,
    /// Requests skipped because the engine is disabled or has no injector
    pub skipped_disabled: u64,
    /// Requests skipped because their path is blacklisted
    pub skipped_blacklisted: u64,
    /// Requests skipped because their path is not whitelisted
    pub skipped_not_whitelisted: u64,
    /// Eligible requests that lost the probability draw
    pub not_selected: u64,
}

impl FaultStats {
    /// Fraction of evaluated requests that were injected
    #[allow(clippy::cast_precision_loss)]
    pub fn actual_inject_rate(&self) -> f64 {
        if self.evaluated == 0 {
            0.0
        } else {
            self.injected as f64 / self.evaluated as f64
        }
    }
}

/// Lock-free counters backing [`FaultStats`]
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    evaluated: AtomicU64,
    injected: AtomicU64,
    skipped_disabled: AtomicU64,
    skipped_blacklisted: AtomicU64,
    skipped_not_whitelisted: AtomicU64,
    not_selected: AtomicU64,
}

impl StatsCounters {
    pub(crate) fn record(&self, decision: Decision) {
        self.evaluated.fetch_add(1, Ordering::Relaxed);

        let counter = match decision {
            Decision::Inject => &self.injected,
            Decision::NoInjector | Decision::Disabled => &self.skipped_disabled,
            Decision::Blacklisted => &self.skipped_blacklisted,
            Decision::NotWhitelisted => &self.skipped_not_whitelisted,
            Decision::NotSelected => &self.not_selected,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> FaultStats {
        FaultStats {
            evaluated: self.evaluated.load(Ordering::Relaxed),
            injected: self.injected.load(Ordering::Relaxed),
            skipped_disabled: self.skipped_disabled.load(Ordering::Relaxed),
            skipped_blacklisted: self.skipped_blacklisted.load(Ordering::Relaxed),
            skipped_not_whitelisted: self.skipped_not_whitelisted.load(Ordering::Relaxed),
            not_selected: self.not_selected.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_default() {
        let stats = FaultStats::default();
        assert_eq!(stats.evaluated, 0);
        assert_eq!(stats.injected, 0);
    }

    #[test]
    fn actual_inject_rate() {
        let stats = FaultStats {
            evaluated: 100,
            injected: 25,
            ..Default::default()
        };
        assert!((stats.actual_inject_rate() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn inject_rate_zero_evaluations() {
        let stats = FaultStats::default();
        assert!((stats.actual_inject_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counters_track_each_decision() {
        let counters = StatsCounters::default();
        counters.record(Decision::Inject);
        counters.record(Decision::Disabled);
        counters.record(Decision::NoInjector);
        counters.record(Decision::Blacklisted);
        counters.record(Decision::NotWhitelisted);
        counters.record(Decision::NotSelected);

        let stats = counters.snapshot();
        assert_eq!(stats.evaluated, 6);
        assert_eq!(stats.injected, 1);
        assert_eq!(stats.skipped_disabled, 2);
        assert_eq!(stats.skipped_blacklisted, 1);
        assert_eq!(stats.skipped_not_whitelisted, 1);
        assert_eq!(stats.not_selected, 1);
    }

    #[test]
    fn stats_serialize() {
        let stats = FaultStats {
            evaluated: 3,
            injected: 1,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["evaluated"], 3);
        assert_eq!(json["injected"], 1);
    }
}
