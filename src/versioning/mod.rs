/*!
 * # API Versioning Module
 *
 * Versions are selected by URL path prefix (`/api/v1/`, `/api/v2/`). Every
 * versioned response advertises the versions this service supports through
 * the `api-supported-versions` header.
 */

use axum::{
    extract::Request,
    http::{header::HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;
use tracing::debug;

/// Response header listing every supported version
pub const SUPPORTED_VERSIONS_HEADER: &str = "api-supported-versions";

/// Response header naming the version that served the request
pub const API_VERSION_HEADER: &str = "x-api-version";

/// API version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Version 1 - unpaged listing
    V1,
    /// Version 2 - paged listing
    V2,
}

impl ApiVersion {
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Path segment form, e.g. `v1`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// `major.minor` form used in response headers, e.g. `1.0`
    pub fn as_header_value(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }

    /// Route prefix for this version, e.g. `/api/v1`
    pub fn prefix(&self) -> String {
        format!("/api/{}", self.as_str())
    }

    /// Comma separated header value of every supported version
    pub fn supported_header_value() -> String {
        Self::ALL
            .iter()
            .map(ApiVersion::as_header_value)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for invalid API versions
#[derive(Debug, thiserror::Error)]
pub enum ApiVersionError {
    #[error("Invalid API version format: {0}")]
    InvalidFormat(String),
}

impl TryFrom<&str> for ApiVersion {
    type Error = ApiVersionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "v1" | "1" | "1.0" | "v1.0" => Ok(Self::V1),
            "v2" | "2" | "2.0" | "v2.0" => Ok(Self::V2),
            _ => Err(ApiVersionError::InvalidFormat(value.to_string())),
        }
    }
}

/// Extract version from URL path (e.g., /api/v1/...)
pub fn extract_version_from_path(path: &str) -> Option<ApiVersion> {
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "api" {
            return segments.next().and_then(|v| ApiVersion::try_from(v).ok());
        }
    }
    None
}

/// Adds `api-supported-versions` and, for versioned paths, `x-api-version`.
pub async fn api_version_middleware(req: Request, next: Next) -> Response {
    let version = extract_version_from_path(req.uri().path());
    debug!(path = %req.uri().path(), ?version, "API request");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(&ApiVersion::supported_header_value()) {
        headers.insert(HeaderName::from_static(SUPPORTED_VERSIONS_HEADER), value);
    }
    if let Some(v) = version {
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_static(v.as_header_value()),
        );
    }

    response
}
