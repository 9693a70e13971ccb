//! Response shaping.
//!
//! # Responsibilities
//! - Render errors as `{"detail": "..."}` with the right status
//! - Return stored payloads verbatim as plain text
//! - Render health check bodies
//!
//! # Design Decisions
//! - Payloads are never re-encoded or trimmed
//! - 405 responses always carry an `Allow` header
//! - Absent answers on DELETE are 204, not an error

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::routing::PathRejection;

/// A request-level failure, surfaced to the caller as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {detail}")]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
    /// `Allow` header value, only for 405.
    pub allow: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
            allow: None,
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    }

    pub fn method_not_allowed(allow: impl Into<String>) -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            detail: "Method not allowed".to_string(),
            allow: Some(allow.into()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::not_found(rejection.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (
            self.status,
            Json(ErrorBody {
                detail: &self.detail,
            }),
        )
            .into_response();

        if let Some(allow) = self.allow {
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}

/// A stored payload returned as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(pub String);

impl IntoResponse for Payload {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            )],
            self.0,
        )
            .into_response()
    }
}

/// Result of a destructive read: the payload, or an empty 204.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taken(pub Option<String>);

impl IntoResponse for Taken {
    fn into_response(self) -> Response {
        match self.0 {
            Some(payload) => Payload(payload).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Liveness check body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl HealthStatus {
    pub fn ok(room: Option<String>) -> Self {
        Self { status: "ok", room }
    }
}

impl IntoResponse for HealthStatus {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
