//! Demo request handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use fault_engine::{FaultEngine, FaultStats};

/// Root handler; the target of fault injection
pub async fn root() -> &'static str {
    "ok"
}

/// Liveness probe
pub async fn health() -> &'static str {
    "healthy"
}

/// Injection statistics of the running engine
pub async fn fault_stats(State(engine): State<Option<Arc<FaultEngine>>>) -> Json<FaultStats> {
    Json(engine.map(|engine| engine.stats()).unwrap_or_default())
}
