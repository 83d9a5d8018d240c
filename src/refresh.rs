use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::server::events::FeedEvent;
use crate::server::state::AppState;
use crate::snapshot::FeedStatus;

/// Loads both feeds, folds the outcome into the snapshot and tells connected
/// pages to reload.
pub async fn refresh_feeds(state: &AppState) -> FeedStatus {
    let _guard = state.refresh_lock.lock().await;
    let settings = &state.settings;
    let report = state
        .client
        .fetch_all(&settings.earthquake_feed_url, &settings.plates_feed_url)
        .await;

    let status = state.snapshot.apply(report);

    // No subscribers is fine
    let _ = state.event_sender.send(FeedEvent::feeds_updated(&status));
    status
}

/// Background task refreshing the feeds every `interval`
pub async fn poll_feeds(state: AppState, interval: Duration) {
    tracing::info!("🔁 Refreshing feeds every {:?}", interval);
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick fires immediately and startup already loaded once
    ticker.tick().await;

    loop {
        ticker.tick().await;
        let status = refresh_feeds(&state).await;
        tracing::info!(
            "🔄 Feeds refreshed: {} earthquakes, {} plate boundaries",
            status.earthquakes.feature_count,
            status.plates.feature_count
        );
    }
}
