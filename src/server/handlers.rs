use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{sse::Event as SseEvent, Html, IntoResponse, Json, Response, Sse},
};
use rust_embed::RustEmbed;
use serde_json::Value;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::Stream;

use super::events::FeedEvent;
use super::state::AppState;
use crate::constants::HEARTBEAT_SECS;
use crate::html_template::{render_map_page, MapConfig};
use crate::legend::{legend_entries, LegendEntry};
use crate::refresh::refresh_feeds;
use crate::settings::Settings;
use crate::snapshot::FeedStatus;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct Asset;

fn embedded(path: &str, content_type: &'static str) -> Response {
    match Asset::get(path) {
        Some(file) => ([(header::CONTENT_TYPE, content_type)], file.data.into_owned()).into_response(),
        None => {
            tracing::error!("Missing embedded asset {}", path);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn geojson_response(layer: Option<std::sync::Arc<Value>>) -> Response {
    let Some(layer) = layer else {
        // Not loaded yet, or every attempt so far failed
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    match serde_json::to_vec(&*layer) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/geo+json")], body).into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize layer: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn index_html(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let file = Asset::get("index.html").ok_or(StatusCode::NOT_FOUND)?;
    let template = String::from_utf8_lossy(&file.data);
    let config = MapConfig::from_settings(&state.settings);

    render_map_page(&template, &config).map_err(|e| {
        tracing::error!("Failed to render map page: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

pub async fn style_css() -> Response {
    embedded("style.css", "text/css")
}

pub async fn map_js() -> Response {
    embedded("map.js", "application/javascript")
}

// Styled earthquake points
pub async fn get_earthquakes(State(state): State<AppState>) -> Response {
    geojson_response(state.snapshot.earthquake_layer())
}

pub async fn get_plates(State(state): State<AppState>) -> Response {
    geojson_response(state.snapshot.plates_layer())
}

pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(legend_entries())
}

pub async fn get_status(State(state): State<AppState>) -> Json<FeedStatus> {
    Json(state.snapshot.status())
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json((*state.settings).clone())
}

// Reload both feeds now
pub async fn refresh(State(state): State<AppState>) -> Json<FeedStatus> {
    tracing::info!("🔄 Refresh requested");
    Json(refresh_feeds(&state).await)
}

// SSE endpoint for feed updates
pub async fn feed_events_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<SseEvent, Infallible>>> {
    let (tx, rx) = mpsc::channel(16);
    let mut event_receiver = state.event_sender.subscribe();

    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                received = event_receiver.recv() => match received {
                    Ok(event) => event,
                    // A slow client only needs to know that something changed
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                },
                _ = tokio::time::sleep(Duration::from_secs(HEARTBEAT_SECS)) => FeedEvent::heartbeat(),
            };

            let sse_event = SseEvent::default()
                .json_data(&event)
                .unwrap_or_else(|_| SseEvent::default().data("Error serializing event"));

            if tx.send(Ok(sse_event)).await.is_err() {
                break; // Client disconnected
            }
        }
    });

    Sse::new(ReceiverStream::new(rx)).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive-message"),
    )
}
