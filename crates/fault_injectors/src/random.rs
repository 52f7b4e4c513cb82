//! Random choice between injectors

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use fault_engine::{Injector, Next};
use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::InjectorError;

/// Picks one of several injectors for each selected request
///
/// Like the engine, the choice comes from a generator seeded once, so a
/// fixed seed reproduces the same sequence of picks.
pub struct RandomInjector {
    injectors: Vec<Arc<dyn Injector>>,
    rng: Mutex<StdRng>,
}

impl RandomInjector {
    /// Create a random injector over the given candidates
    pub fn new(injectors: Vec<Arc<dyn Injector>>, seed: u64) -> Result<Self, InjectorError> {
        if injectors.is_empty() {
            return Err(InjectorError::EmptyChoice);
        }

        Ok(Self {
            injectors,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        })
    }

    fn pick(&self) -> Arc<dyn Injector> {
        let index = self.rng.lock().random_range(0..self.injectors.len());
        Arc::clone(&self.injectors[index])
    }
}

impl fmt::Debug for RandomInjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomInjector")
            .field("candidates", &self.injectors.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Injector for RandomInjector {
    async fn inject(&self, request: Request, next: Next) -> Response {
        self.pick().inject(request, next).await
    }
}
