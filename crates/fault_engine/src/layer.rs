//! Fault injection middleware
//!
//! Wraps a service so that selected requests are handed to the engine's
//! injector. Everything else, including every request when no engine is
//! configured, reaches the inner service untouched.

use std::{
    convert::Infallible,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{extract::Request, response::Response};
use tower::{Layer, Service};

use crate::{engine::FaultEngine, injector::Next};

/// Layer that applies fault injection
#[derive(Clone, Debug, Default)]
pub struct FaultLayer {
    engine: Option<Arc<FaultEngine>>,
}

impl FaultLayer {
    /// Create a new fault layer around an engine
    #[must_use]
    pub const fn new(engine: Arc<FaultEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// Create a layer from an engine that may not exist
    #[must_use]
    pub const fn from_engine(engine: Option<Arc<FaultEngine>>) -> Self {
        Self { engine }
    }

    /// Create a pass-through layer without an engine
    #[must_use]
    pub const fn disabled() -> Self {
        Self { engine: None }
    }

    /// Get the engine, e.g. for reading statistics
    #[must_use]
    pub fn engine(&self) -> Option<Arc<FaultEngine>> {
        self.engine.clone()
    }
}

impl<S> Layer<S> for FaultLayer {
    type Service = FaultService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FaultService {
            inner,
            engine: self.engine.clone(),
        }
    }
}

/// Middleware service for fault injection
#[derive(Clone, Debug)]
pub struct FaultService<S> {
    inner: S,
    engine: Option<Arc<FaultEngine>>,
}

impl<S> Service<Request> for FaultService<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let injector = self
            .engine
            .as_deref()
            .filter(|engine| engine.should_inject(req.uri().path()))
            .and_then(|engine| engine.injector().cloned());

        // The clone is not driven to readiness; take the ready one
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);

        match injector {
            Some(injector) => {
                Box::pin(async move { Ok(injector.inject(req, Next::new(inner)).await) })
            },
            None => {
                let mut inner = inner;
                Box::pin(inner.call(req))
            },
        }
    }
}
