//! Server errors

use fault_injectors::InjectorError;
use thiserror::Error;

/// Errors that can occur while configuring or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The configured injector is invalid
    #[error("Injector error: {0}")]
    Injector(#[from] InjectorError),

    /// Binding or serving failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn injector_error_converts() {
        let err: ServerError = InjectorError::InvalidStatusCode(42).into();
        assert!(matches!(err, ServerError::Injector(_)));
        assert_eq!(err.to_string(), "Injector error: Invalid HTTP status code: 42");
    }

    #[test]
    fn io_error_converts() {
        let err: ServerError = std::io::Error::other("boom").into();
        assert!(matches!(err, ServerError::Io(_)));
    }
}
