use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};

pub mod events;
pub mod handlers;
pub mod state;

use self::state::AppState;
use handlers::{
    feed_events_stream, get_earthquakes, get_legend, get_plates, get_settings, get_status,
    index_html, map_js, refresh, style_css,
};

// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_html))
        .route("/style.css", get(style_css))
        .route("/map.js", get(map_js))
        .route("/api/earthquakes", get(get_earthquakes))
        .route("/api/plates", get(get_plates))
        .route("/api/legend", get(get_legend))
        .route("/api/status", get(get_status))
        .route("/api/settings", get(get_settings))
        .route("/api/refresh", post(refresh))
        .route("/api/events", get(feed_events_stream))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))
}

/// Serves until `shutdown` resolves
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    Ok(())
}
