//! Axum router wiring.
//!
//! Meter routes are mounted under `http.base_path`; ops routes stay at root.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{app_state::AppState, obs, ops, transport::http};

fn meter_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(http::root))
        .route("/meters", get(http::list_meters).post(http::create_meter))
        .route("/meters/search", get(http::search_meters))
        .route(
            "/meters/:meter_id",
            get(http::get_meter)
                .put(http::update_meter)
                .delete(http::delete_meter),
        )
        .route("/meters/slug/:meter_slug", get(http::get_meter))
        .route_layer(middleware::from_fn_with_state(state.clone(), obs::track_requests))
}

pub fn build_router(state: AppState) -> Router {
    let base_path = state.cfg().http.base_path.clone();
    let body_limit = state.cfg().http.body_limit_bytes;

    let meters = meter_routes(&state);
    let api = if base_path.is_empty() {
        meters
    } else {
        Router::new().nest(&base_path, meters)
    };

    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .merge(api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
