//! meterd gateway
//!
//! REST CRUD over an in-memory meter store.
//! - Config: `$METERD_CONFIG` (default `meterd.yaml`), defaults if absent
//! - Logging: `RUST_LOG` via `EnvFilter`
//! - Graceful shutdown on Ctrl+C / SIGTERM (readiness flips to 503 first)

use tracing_subscriber::{fmt, EnvFilter};

use meterd_gateway::{app_state, config, ops, router};

const DEFAULT_CONFIG_PATH: &str = "meterd.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("METERD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_or_default(&path).expect("config load failed");
    let listen = cfg
        .http
        .listen_addr()
        .expect("http.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "meterd-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(ops::shutdown_signal(state))
        .await
        .expect("server failed");

    tracing::info!("meterd-gateway stopped");
}
