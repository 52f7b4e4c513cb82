//! Injector capability and the downstream handle it receives.

use std::{convert::Infallible, fmt};

use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use tower::{Service, ServiceExt, util::BoxCloneService};

/// A fault that takes over a request once the engine selects it.
///
/// The injector fully owns the outcome: it may answer on its own (an error
/// status), call `next` after doing something (latency), or both.
#[async_trait]
pub trait Injector: Send + Sync {
    /// Produce the response for a selected request
    async fn inject(&self, request: Request, next: Next) -> Response;
}

/// The downstream service an injector may forward to
pub struct Next {
    inner: BoxCloneService<Request, Response, Infallible>,
}

impl Next {
    /// Wrap a downstream service
    pub fn new<S>(service: S) -> Self
    where
        S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
        S::Future: Send + 'static,
    {
        Self {
            inner: BoxCloneService::new(service),
        }
    }

    /// Forward the request to the downstream service
    pub async fn run(self, request: Request) -> Response {
        match self.inner.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

impl Clone for Next {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next").finish_non_exhaustive()
    }
}
