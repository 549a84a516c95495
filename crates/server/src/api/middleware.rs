//! Request metrics middleware.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::metrics::{observe_request, HTTP_REQUESTS_IN_FLIGHT};

/// Keeps the in-flight gauge balanced even when the request future is
/// dropped before completing.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        HTTP_REQUESTS_IN_FLIGHT.inc();
        InFlight
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        HTTP_REQUESTS_IN_FLIGHT.dec();
    }
}

/// Record duration, count and in-flight requests per route.
///
/// Routes are labeled by their template (`/api/v1/streams/curate`), never
/// by the raw URI; requests that match no route share `unmatched`.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or("unmatched", MatchedPath::as_str)
        .to_owned();
    let method = request.method().clone();

    let guard = InFlight::enter();
    let started = Instant::now();
    let response = next.run(request).await;
    drop(guard);

    observe_request(
        method.as_str(),
        &route,
        response.status().as_u16(),
        started.elapsed(),
    );
    response
}
