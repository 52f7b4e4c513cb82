//! Fault injection demo server
//!
//! Wires a `fault_engine::FaultLayer` around a small router, with the engine
//! built from file and environment configuration.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use config::{AppConfig, InjectorConfig, ServerConfig};
pub use error::ServerError;
pub use routes::create_router;
pub use server::serve;
