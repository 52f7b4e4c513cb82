//! Fault injection decision engine
//!
//! Decides per inbound HTTP request whether to pass it through untouched or
//! to hand it to a pluggable [`Injector`] that alters the response.
//!
//! The crate consists of:
//! - `FaultOptions`: what to inject, how often, and on which paths
//! - `FaultEngine`: evaluates a request path against the options
//! - `FaultLayer`: tower middleware dispatching to the injector
//!
//! # Example
//!
//! ```ignore
//! use fault_engine::{FaultEngine, FaultLayer, FaultOptions};
//!
//! let engine = FaultEngine::new(
//!     Arc::new(my_injector),
//!     FaultOptions::default()
//!         .with_enabled(true)
//!         .with_inject_percent(0.3)
//!         .with_path_blacklist(["/health"]),
//! );
//!
//! let app = Router::new()
//!     .route("/", get(handler))
//!     .layer(FaultLayer::new(Arc::new(engine)));
//! ```

mod engine;
mod injector;
mod layer;
mod options;
mod stats;

pub use engine::{Decision, FaultEngine, should_inject};
pub use injector::{Injector, Next};
pub use layer::{FaultLayer, FaultService};
pub use options::{DEFAULT_RAND_SEED, FaultOptions, effective_rate};
pub use stats::FaultStats;
