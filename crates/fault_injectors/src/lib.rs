//! Ready-made fault injectors
//!
//! Injectors plug into `fault_engine::FaultEngine` and decide what a
//! selected request experiences:
//! - `ErrorInjector`: answers with an error status instead of the handler
//! - `SlowInjector`: delays the request, then runs the handler
//! - `ChainInjector`: runs several injectors in order
//! - `RandomInjector`: picks one injector per request

mod chain;
mod error;
mod error_injector;
mod random;
mod slow;

pub use chain::ChainInjector;
pub use error::InjectorError;
pub use error_injector::ErrorInjector;
pub use random::RandomInjector;
pub use slow::SlowInjector;
