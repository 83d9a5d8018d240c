use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod constants;
mod error;
mod feed;
mod html_template;
mod legend;
mod models;
mod popup;
mod refresh;
mod render;
mod server;
mod settings;
mod snapshot;
mod style;
mod utils;

use feed::FeedClient;
use server::state::AppState;
use settings::Settings;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quakemap=info,tower_http=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    tracing::info!("🗺️  QuakeMap v{} starting...", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load().context("Failed to load settings")?;
    let config_path = Settings::config_path();
    if config_path.exists() {
        tracing::info!("⚙️  Settings loaded from {}", config_path.display());
    } else if let Err(e) = settings.save() {
        tracing::warn!("⚠️  Could not write default settings to {}: {}", config_path.display(), e);
    } else {
        tracing::info!("⚙️  Default settings written to {}", config_path.display());
    }

    let client = FeedClient::new(settings.request_timeout()).context("Failed to build HTTP client")?;
    let listener = server::bind(settings.port).await?;
    let state = AppState::new(settings, client);

    // Initial load; a failed layer is reported and the map serves whatever loaded
    tracing::info!("🌐 Fetching earthquake and tectonic plate feeds...");
    let status = refresh::refresh_feeds(&state).await;
    tracing::info!(
        "📊 {} earthquakes ({} rejected), {} plate boundaries",
        status.earthquakes.feature_count,
        status.earthquakes.rejected,
        status.plates.feature_count
    );

    if let Some(interval) = state.settings.refresh_interval() {
        tokio::spawn(refresh::poll_feeds(state.clone(), interval));
    }

    let url = format!("http://127.0.0.1:{}", state.settings.port);
    tracing::info!("   ✅ HTTP server started successfully at {}", url);
    if state.settings.auto_open_browser {
        if let Err(e) = utils::open_browser(&url) {
            tracing::warn!("⚠️  Could not open browser: {}", e);
        }
    }

    server::serve(listener, state, utils::shutdown_signal()).await
}
