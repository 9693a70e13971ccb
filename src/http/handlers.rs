//! Resource handlers.
//!
//! One function per routed action; `signal_handler` is the single
//! entry point the Axum router calls for every path.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::http::request::{read_payload, request_id};
use crate::http::response::{ApiError, HealthStatus, Payload, Taken};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::Action;
use crate::store::{RoomKey, RoomStore};

/// Resolve the request against the route table and run the action.
pub async fn signal_handler(State(state): State<AppState>, request: Request) -> Response {
    let start_time = Instant::now();
    let action = state.routes.resolve(request.method(), request.uri().path());
    let label = action.label();

    tracing::debug!(
        request_id = %request_id(&request),
        method = %request.method(),
        path = %request.uri().path(),
        action = label,
        "Dispatching request"
    );

    let response = match action {
        Action::Health { room } => HealthStatus::ok(room).into_response(),
        Action::Put(key) => put_payload(&state.store, key, request, state.max_body_bytes)
            .await
            .into_response(),
        Action::Get(key) => get_payload(&state.store, &key).into_response(),
        Action::Take(key) => take_payload(&state.store, &key).into_response(),
        Action::MethodNotAllowed { allow } => ApiError::method_not_allowed(allow).into_response(),
        Action::NotFound(rejection) => ApiError::from(rejection).into_response(),
    };

    metrics::record_request(label, response.status().as_u16(), start_time);
    response
}

/// `PUT .../offer` and `PUT .../answer`.
pub async fn put_payload(
    store: &RoomStore,
    key: RoomKey,
    request: Request,
    limit: usize,
) -> Result<StatusCode, ApiError> {
    let payload = read_payload(request, key.resource, limit).await?;
    store.put(key.resource, &key.room_id, payload);
    metrics::record_store_entries(store.len());
    Ok(StatusCode::NO_CONTENT)
}

/// `GET .../offer`.
pub fn get_payload(store: &RoomStore, key: &RoomKey) -> Result<Payload, ApiError> {
    store
        .get(key.resource, &key.room_id)
        .map(Payload)
        .ok_or_else(|| ApiError::not_found(format!("{} not found", key.resource.title())))
}

/// `DELETE .../answer` (and `.../offer` when enabled).
pub fn take_payload(store: &RoomStore, key: &RoomKey) -> Taken {
    let taken = store.take(key.resource, &key.room_id);
    if taken.is_some() {
        metrics::record_store_entries(store.len());
    }
    Taken(taken)
}
