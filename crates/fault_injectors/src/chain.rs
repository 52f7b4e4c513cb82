//! Sequential injector composition

use std::{
    convert::Infallible,
    fmt,
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use fault_engine::{Injector, Next};
use tower::Service;

/// Runs injectors in order around the handler
///
/// Each injector's `next` is the rest of the chain followed by the handler,
/// so `[slow, error]` first delays and then answers with the error. An
/// empty chain passes straight through.
#[derive(Clone)]
pub struct ChainInjector {
    injectors: Arc<[Arc<dyn Injector>]>,
}

impl ChainInjector {
    /// Create a chain from injectors, outermost first
    pub fn new(injectors: Vec<Arc<dyn Injector>>) -> Self {
        Self {
            injectors: injectors.into(),
        }
    }

    /// Number of injectors in the chain
    pub fn len(&self) -> usize {
        self.injectors.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }
}

impl fmt::Debug for ChainInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainInjector")
            .field("len", &self.injectors.len())
            .finish()
    }
}

#[async_trait]
impl Injector for ChainInjector {
    async fn inject(&self, request: Request, next: Next) -> Response {
        Remaining {
            injectors: Arc::clone(&self.injectors),
            index: 0,
            downstream: next,
        }
        .run(request)
        .await
    }
}

/// The part of a chain that has not run yet
#[derive(Clone)]
struct Remaining {
    injectors: Arc<[Arc<dyn Injector>]>,
    index: usize,
    downstream: Next,
}

impl Remaining {
    async fn run(self, request: Request) -> Response {
        let Some(injector) = self.injectors.get(self.index).cloned() else {
            return self.downstream.run(request).await;
        };

        let rest = Self {
            injectors: self.injectors,
            index: self.index + 1,
            downstream: self.downstream,
        };
        injector.inject(request, Next::new(rest)).await
    }
}

impl Service<Request> for Remaining {
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let remaining = self.clone();
        Box::pin(async move { Ok(remaining.run(request).await) })
    }
}
