//! Route definitions

use std::sync::Arc;

use axum::{Router, routing::get};
use fault_engine::{FaultEngine, FaultLayer};

use crate::handlers;

/// Create the router, with fault injection around the demo routes.
///
/// The stats route is merged after the layer is applied, so it is never
/// subject to injection.
pub fn create_router(engine: Option<Arc<FaultEngine>>) -> Router {
    let injected = Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .layer(FaultLayer::from_engine(engine.clone()));

    let stats = Router::new()
        .route("/fault/stats", get(handlers::fault_stats))
        .with_state(engine);

    injected.merge(stats)
}
