//! Lightweight in-process metrics.
//!
//! Request counts and latencies are recorded by [`track_requests`], a route
//! layer, so the `route` label is the matched template (`/meters/:meter_id`)
//! rather than the raw path. Rendered by the `/metrics` handler.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

pub use metrics::MeterdMetrics;

pub async fn track_requests(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let started = Instant::now();

    let res = next.run(req).await;

    let status = res.status().as_u16().to_string();
    let (method, route) = (method.as_str(), route.as_str());
    let m = app.metrics();
    m.http_requests
        .inc(&[("method", method), ("route", route), ("status", status.as_str())]);
    m.request_duration
        .observe(&[("method", method), ("route", route)], started.elapsed());
    res
}
