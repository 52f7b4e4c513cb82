//! Latency injector

use std::time::Duration;

use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use fault_engine::{Injector, Next};
use tracing::debug;

/// Delays selected requests before running the handler
#[derive(Debug, Clone, Copy)]
pub struct SlowInjector {
    delay: Duration,
}

impl SlowInjector {
    /// Create an injector adding a fixed delay
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Injector for SlowInjector {
    #[allow(clippy::cast_possible_truncation)]
    async fn inject(&self, request: Request, next: Next) -> Response {
        debug!(
            delay_ms = self.delay.as_millis() as u64,
            path = request.uri().path(),
            "Injecting latency"
        );
        tokio::time::sleep(self.delay).await;
        next.run(request).await
    }
}
