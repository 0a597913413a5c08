use crate::errors::{ApiError, ServiceError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// 404 without a body
pub fn not_found_response() -> Response {
    StatusCode::NOT_FOUND.into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input.validate().map_err(ApiError::from)
}

/// Map service errors to API errors
pub fn map_service_error(err: ServiceError) -> ApiError {
    ApiError::ServiceError(err)
}

/// Turn extractor failures into the standard 400 document
pub fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
}

pub fn map_path_rejection(rejection: PathRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid path parameter: {}", rejection.body_text()))
}

pub fn map_query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::BadRequest(format!("Invalid query string: {}", rejection.body_text()))
}
