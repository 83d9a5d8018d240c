use serde::{Deserialize, Serialize};

use crate::snapshot::FeedStatus;

pub const FEEDS_UPDATED: &str = "feeds_updated";
pub const HEARTBEAT: &str = "heartbeat";

// SSE Event types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEvent {
    pub event_type: String,
    pub data: FeedEventData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedEventData {
    pub earthquakes: Option<usize>,
    pub plates: Option<usize>,
    pub errors: Vec<String>,
    pub message: Option<String>,
}

impl FeedEvent {
    pub fn feeds_updated(status: &FeedStatus) -> Self {
        let errors = [&status.earthquakes.last_error, &status.plates.last_error]
            .into_iter()
            .flatten()
            .cloned()
            .collect();

        FeedEvent {
            event_type: FEEDS_UPDATED.to_string(),
            data: FeedEventData {
                earthquakes: Some(status.earthquakes.feature_count),
                plates: Some(status.plates.feature_count),
                errors,
                message: None,
            },
        }
    }

    pub fn heartbeat() -> Self {
        FeedEvent {
            event_type: HEARTBEAT.to_string(),
            data: FeedEventData {
                message: Some("SSE connection alive".to_string()),
                ..Default::default()
            },
        }
    }
}
