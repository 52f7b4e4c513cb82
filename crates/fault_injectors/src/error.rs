//! Injector construction errors

use thiserror::Error;

/// Errors that can occur while building an injector
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InjectorError {
    /// Status code outside the valid HTTP range
    #[error("Invalid HTTP status code: {0}")]
    InvalidStatusCode(u16),

    /// A random injector needs at least one candidate
    #[error("Random injector requires at least one injector")]
    EmptyChoice,
}
