//! HTTP error payloads and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`DomainError`] into Actix responses here. Every failure renders the
//! uniform `{status: "error", message}` envelope; internal faults are
//! redacted to a generic message.

use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use tracing::error;

use crate::domain::{DomainError, ErrorCode};

/// Standard error envelope returned by the HTTP adapter.
#[derive(Debug, Clone)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message, pre-redaction.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        Self {
            code: error.code(),
            message: error.message().to_owned(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        let message = if matches!(self.code, ErrorCode::InternalError) {
            error!(detail = %self.message, "internal error surfaced to client");
            "Internal server error"
        } else {
            self.message.as_str()
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            status: "error",
            message,
        })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Keep malformed or absent JSON bodies inside the uniform envelope
/// instead of Actix's default error body.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &HttpRequest,
) -> actix_web::Error {
    ApiError::from(DomainError::invalid_request(format!(
        "Invalid JSON payload: {err}"
    )))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: &ApiError) -> Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[actix_web::test]
    async fn validation_errors_keep_their_message() {
        let error = ApiError::from(DomainError::invalid_request("Amount must be greater than 0"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        let body = body_of(&error).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Amount must be greater than 0");
    }

    #[actix_web::test]
    async fn internal_errors_are_redacted() {
        let error = ApiError::from(DomainError::internal("pool checkout failed on conn 3"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&error).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn not_found_maps_to_404() {
        let error = ApiError::from(DomainError::not_found("Expense with ID 9 not found"));
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }
}
