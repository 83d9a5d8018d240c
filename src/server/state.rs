use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

use super::events::FeedEvent;
use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::feed::FeedClient;
use crate::settings::Settings;
use crate::snapshot::Snapshot;

// Application state shared by handlers and the refresher
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Snapshot,
    pub client: FeedClient,
    pub settings: Arc<Settings>,
    pub event_sender: broadcast::Sender<FeedEvent>,
    /// Held for a whole refresh so results are applied in start order
    pub refresh_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(settings: Settings, client: FeedClient) -> Self {
        let (event_sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        AppState {
            snapshot: Snapshot::new(),
            client,
            settings: Arc::new(settings),
            event_sender,
            refresh_lock: Arc::new(Mutex::new(())),
        }
    }
}
