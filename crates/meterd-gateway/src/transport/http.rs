//! Meter REST handlers.
//!
//! Handlers that act on a single meter take a [`ResolvedMeter`]; the lookup
//! and its 404 have already happened by the time they run.

use axum::{extract::State, http::StatusCode, response::Response};

use meterd_core::error::MeterError;
use meterd_core::MeterResponse;

use crate::app_state::AppState;
use crate::context::ResolvedMeter;

use super::codec::{render, MeterBody};
use super::error::ApiError;

type HandlerResult = Result<Response, ApiError>;

fn record_op(app: &AppState, op: &str, outcome: &str) {
    app.metrics()
        .store_ops
        .inc(&[("op", op), ("outcome", outcome)]);
}

pub async fn root() -> &'static str {
    "root."
}

pub async fn list_meters(State(app): State<AppState>) -> HandlerResult {
    let meters = app.store().list().await;
    render(StatusCode::OK, &MeterResponse::list(meters))
}

/// Placeholder search: ignores the query and returns every meter.
pub async fn search_meters(State(app): State<AppState>) -> HandlerResult {
    let meters = app.store().list().await;
    render(StatusCode::OK, &MeterResponse::list(meters))
}

pub async fn get_meter(ResolvedMeter(meter): ResolvedMeter) -> HandlerResult {
    render(StatusCode::OK, &MeterResponse::new(meter))
}

pub async fn create_meter(State(app): State<AppState>, MeterBody(req): MeterBody) -> HandlerResult {
    let meter = req.bind().map_err(|e| {
        tracing::debug!(error = %e, "create bind failed");
        record_op(&app, "create", "invalid");
        e
    })?;

    let meter = app.store().insert(meter).await;
    record_op(&app, "create", "ok");
    tracing::info!(id = %meter.id, slug = %meter.slug, "meter created");

    render(StatusCode::CREATED, &MeterResponse::new(meter))
}

pub async fn update_meter(
    State(app): State<AppState>,
    ResolvedMeter(existing): ResolvedMeter,
    MeterBody(req): MeterBody,
) -> HandlerResult {
    let meter = req.bind_onto(&existing).map_err(|e| {
        tracing::debug!(id = %existing.id, error = %e, "update bind failed");
        record_op(&app, "update", "invalid");
        e
    })?;

    let meter = app.store().update(&existing.id, meter).await.map_err(|e| {
        tracing::debug!(id = %existing.id, "meter vanished before update");
        record_op(&app, "update", "missing");
        e
    })?;
    record_op(&app, "update", "ok");
    tracing::info!(id = %meter.id, slug = %meter.slug, "meter updated");

    render(StatusCode::OK, &MeterResponse::new(meter))
}

pub async fn delete_meter(
    State(app): State<AppState>,
    ResolvedMeter(existing): ResolvedMeter,
) -> HandlerResult {
    let meter = app.store().remove(&existing.id).await.map_err(|_| {
        tracing::debug!(id = %existing.id, "meter vanished before delete");
        record_op(&app, "delete", "missing");
        MeterError::InvalidRequest("meter not found".into())
    })?;
    record_op(&app, "delete", "ok");
    tracing::info!(id = %meter.id, slug = %meter.slug, "meter deleted");

    render(StatusCode::OK, &MeterResponse::new(meter))
}
