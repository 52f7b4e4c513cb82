//! Property-based tests for the decision engine

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fault_engine::{Decision, FaultEngine, FaultOptions, Injector, Next};
use proptest::prelude::*;

#[derive(Debug)]
struct StaticInjector;

#[async_trait]
impl Injector for StaticInjector {
    async fn inject(&self, _request: Request, _next: Next) -> Response {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

fn path_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{0,6}(/[a-z]{1,4}){0,2}"
}

fn engine(options: FaultOptions) -> FaultEngine {
    FaultEngine::new(Arc::new(StaticInjector), options)
}

proptest! {
    #[test]
    fn blacklisted_paths_are_never_injected(
        path in path_strategy(),
        mut whitelist in prop::collection::vec(path_strategy(), 0..4),
        percent in 0.0f64..=1.0f64,
        seed in any::<u64>(),
    ) {
        whitelist.push(path.clone());
        let engine = engine(
            FaultOptions::default()
                .with_enabled(true)
                .with_inject_percent(percent)
                .with_path_blacklist([path.clone()])
                .with_path_whitelist(whitelist)
                .with_rand_seed(seed),
        );

        for _ in 0..8 {
            prop_assert_eq!(engine.evaluate(&path), Decision::Blacklisted);
        }
    }

    #[test]
    fn paths_off_the_whitelist_are_never_injected(
        path in path_strategy(),
        whitelist in prop::collection::vec(path_strategy(), 1..4),
        seed in any::<u64>(),
    ) {
        prop_assume!(!whitelist.contains(&path));
        let engine = engine(
            FaultOptions::default()
                .with_enabled(true)
                .with_inject_percent(1.0)
                .with_path_whitelist(whitelist)
                .with_rand_seed(seed),
        );

        prop_assert!(!engine.should_inject(&path));
    }

    #[test]
    fn disabled_engines_never_inject(
        path in path_strategy(),
        percent in any::<f64>(),
        seed in any::<u64>(),
    ) {
        let engine = engine(
            FaultOptions::default()
                .with_enabled(false)
                .with_inject_percent(percent)
                .with_rand_seed(seed),
        );

        prop_assert!(!engine.should_inject(&path));
    }

    #[test]
    fn out_of_range_percent_never_injects(
        path in path_strategy(),
        percent in prop_oneof![f64::MIN..-f64::EPSILON, 1.0f64 + 1e-9..f64::MAX],
        seed in any::<u64>(),
    ) {
        let engine = engine(
            FaultOptions::default()
                .with_enabled(true)
                .with_inject_percent(percent)
                .with_rand_seed(seed),
        );

        for _ in 0..16 {
            prop_assert!(!engine.should_inject(&path));
        }
    }

    #[test]
    fn full_percent_always_injects_eligible_paths(
        path in path_strategy(),
        seed in any::<u64>(),
    ) {
        let engine = engine(
            FaultOptions::default()
                .with_enabled(true)
                .with_inject_percent(1.0)
                .with_rand_seed(seed),
        );

        prop_assert!(engine.should_inject(&path));
    }
}
