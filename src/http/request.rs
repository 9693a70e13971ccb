//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for tracing
//! - Read the full request body
//! - Enforce the body size limit with a JSON 413
//! - Reject empty or non-UTF-8 payloads before they reach the store

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, Request},
};
use futures_util::StreamExt;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::http::response::ApiError;
use crate::store::Resource;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID generator for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Request ID of `request`, or `"-"` when none was assigned.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Read a PUT body as a non-empty UTF-8 payload for `resource`.
///
/// A declared `Content-Length` over `limit` is refused before any byte is
/// read; a body that streams past `limit` is refused as soon as it does.
pub async fn read_payload(
    request: Request<Body>,
    resource: Resource,
    limit: usize,
) -> Result<String, ApiError> {
    if declared_length(request.headers()).is_some_and(|len| len > limit as u64) {
        return Err(ApiError::payload_too_large());
    }

    let mut stream = request.into_body().into_data_stream();
    let mut bytes = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read request body");
            ApiError::bad_request("Failed to read request body")
        })?;
        if bytes.len() + chunk.len() > limit {
            return Err(ApiError::payload_too_large());
        }
        bytes.extend_from_slice(&chunk);
    }

    if bytes.is_empty() {
        return Err(ApiError::bad_request(format!(
            "{} body is empty",
            resource.title()
        )));
    }

    String::from_utf8(bytes).map_err(|_| ApiError::bad_request("Body is not valid UTF-8"))
}
