//! Error status injector

use async_trait::async_trait;
use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fault_engine::{Injector, Next};
use tracing::debug;

use crate::error::InjectorError;

/// Answers selected requests with an error status; the handler never runs
#[derive(Debug, Clone)]
pub struct ErrorInjector {
    status: StatusCode,
    status_text: Option<String>,
}

impl ErrorInjector {
    /// Create an injector responding with the given status code
    pub fn new(code: u16) -> Result<Self, InjectorError> {
        if !(100..=599).contains(&code) {
            return Err(InjectorError::InvalidStatusCode(code));
        }

        let status =
            StatusCode::from_u16(code).map_err(|_| InjectorError::InvalidStatusCode(code))?;

        Ok(Self {
            status,
            status_text: None,
        })
    }

    /// Override the response body, which defaults to the reason phrase
    #[must_use]
    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    /// The status code this injector responds with
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    fn body(&self) -> String {
        self.status_text.clone().unwrap_or_else(|| {
            self.status
                .canonical_reason()
                .unwrap_or_default()
                .to_string()
        })
    }
}

#[async_trait]
impl Injector for ErrorInjector {
    async fn inject(&self, request: Request, _next: Next) -> Response {
        debug!(
            status = self.status.as_u16(),
            path = request.uri().path(),
            "Injecting error response"
        );
        (self.status, self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::body::{Body, to_bytes};
    use tower::service_fn;

    use super::*;

    fn next() -> Next {
        Next::new(service_fn(|_req: Request| async {
            Ok::<_, Infallible>("handler".into_response())
        }))
    }

    fn request() -> Request {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8_lossy(&bytes).to_string()
    }

    #[test]
    fn rejects_invalid_codes() {
        assert_eq!(
            ErrorInjector::new(0).unwrap_err(),
            InjectorError::InvalidStatusCode(0)
        );
        assert_eq!(
            ErrorInjector::new(99).unwrap_err(),
            InjectorError::InvalidStatusCode(99)
        );
        assert_eq!(
            ErrorInjector::new(600).unwrap_err(),
            InjectorError::InvalidStatusCode(600)
        );
    }

    #[test]
    fn accepts_valid_codes() {
        for code in [100, 200, 418, 500, 503, 599] {
            assert_eq!(ErrorInjector::new(code).unwrap().status().as_u16(), code);
        }
    }

    #[tokio::test]
    async fn responds_with_reason_phrase() {
        let injector = ErrorInjector::new(500).unwrap();
        let response = injector.inject(request(), next()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "Internal Server Error");
    }

    #[tokio::test]
    async fn custom_status_text() {
        let injector = ErrorInjector::new(503)
            .unwrap()
            .with_status_text("chaos says no");
        let response = injector.inject(request(), next()).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_text(response).await, "chaos says no");
    }

    #[tokio::test]
    async fn unknown_code_has_empty_body() {
        let injector = ErrorInjector::new(599).unwrap();
        let response = injector.inject(request(), next()).await;

        assert_eq!(response.status().as_u16(), 599);
        assert_eq!(body_text(response).await, "");
    }
}
