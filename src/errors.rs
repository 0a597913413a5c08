use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use std::future::Future;
use utoipa::ToSchema;

tokio::task_local! {
    static EXPOSE_ERROR_DETAILS: bool;
}

/// Runs `future` with 500 bodies carrying (or omitting) the underlying error text.
pub async fn scope_error_details<Fut, R>(expose: bool, future: Fut) -> R
where
    Fut: Future<Output = R>,
{
    EXPOSE_ERROR_DETAILS.scope(expose, future).await
}

/// Details stay hidden unless the request runs inside [`scope_error_details`].
fn expose_error_details() -> bool {
    EXPOSE_ERROR_DETAILS.try_with(|expose| *expose).unwrap_or(false)
}

/// Applies the configured error-detail policy to every request.
pub async fn error_details_middleware(
    State(expose): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    scope_error_details(expose, next.run(request)).await
}

fn current_request_id() -> Option<String> {
    crate::telemetry::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Problem document returned for 400 and 500 responses
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": 400,
    "error": "Bad Request",
    "message": "Validation error: description must be at most 4000 characters",
    "request_id": "req-abc123xyz",
    "timestamp": "2025-11-14T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status code
    #[schema(example = 400)]
    pub status: u16,
    /// HTTP status category (e.g., "Bad Request", "Internal Server Error")
    #[schema(example = "Bad Request")]
    pub error: String,
    /// Human-readable error description
    pub message: String,
    /// Underlying failure text, only populated in development
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// ISO 8601 timestamp when the error occurred
    pub timestamp: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: String, details: Option<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
            details: details.filter(|_| expose_error_details()),
            request_id: current_request_id(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Generic 500 document used when no typed error is available (e.g. a caught panic).
    pub fn internal(details: Option<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
            details,
        )
    }
}

/// Errors raised by the core services and the storage gateway.
///
/// A missing product is not an error: lookups return `Option` and updates
/// return `bool`. `NotFound` exists for callers that need to escalate.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Infrastructure failures return a generic message.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Internal server error".to_string(),
            Self::NotFound(_) => self.to_string(),
        }
    }

    fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ApiError::ServiceError(self).into_response()
    }
}

/// API Error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            ApiError::ServiceError(service_error) => {
                if service_error.is_internal() {
                    tracing::error!(error = %service_error, "request failed");
                }
                (
                    service_error.status_code(),
                    service_error.response_message(),
                    service_error
                        .is_internal()
                        .then(|| service_error.to_string()),
                )
            }
            ApiError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: {}", msg),
                None,
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
        };

        (status, Json(ErrorResponse::new(status, message, details))).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}
