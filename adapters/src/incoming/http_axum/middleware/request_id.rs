use axum::http::{HeaderMap, HeaderValue, Method};
use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Caller-supplied ids are kept when they are short printable header
/// values, otherwise a fresh v4 uuid is minted.
fn resolve_request_id(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(REQUEST_ID_HEADER)
        .filter(|value| !value.is_empty() && value.len() <= MAX_REQUEST_ID_LEN)
        .filter(|value| value.to_str().is_ok())
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unassigned"))
        })
}

/// Tags every event emitted while serving the request with its id and
/// echoes the id on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(request.headers());
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let span = info_span!(
        "http_request",
        request_id = request_id.to_str().unwrap_or_default(),
        method = %request.method(),
        path = %request.uri().path(),
    );
    let is_mutation = request.method() == Method::PATCH;
    let started = Instant::now();

    let mut response = next.run(request).instrument(span.clone()).await;

    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let status = response.status();
    span.in_scope(|| {
        if status.is_server_error() {
            warn!(%status, elapsed_ms, "Request failed");
        } else if is_mutation {
            info!(%status, elapsed_ms, "Point mutation completed");
        } else {
            debug!(%status, elapsed_ms, "Request completed");
        }
    });

    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);
    response
}
