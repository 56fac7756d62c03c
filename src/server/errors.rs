//! Errors surfaced to HTTP callers.
//!
//! The display text of each variant is the response body. Upstream detail
//! is logged where the error is raised and never reaches the caller.
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;

/// Error returned from a route handler.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum HTTPError {
    /// Malformed or invalid request. Carries a caller-facing message.
    #[display(fmt = "{}", _0)]
    BadRequest(String),
    /// Route exists but not for this method.
    #[display(fmt = "Method not allowed")]
    MethodNotAllowed,
    /// Feature disabled because its database is not configured.
    #[display(fmt = "{}", _0)]
    ServiceUnavailable(String),
    /// Upstream call failed. Carries a generic caller-facing message.
    #[display(fmt = "{}", _0)]
    InternalServerError(String),
}

impl ResponseError for HTTPError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
