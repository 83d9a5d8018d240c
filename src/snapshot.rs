use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

use crate::feed::FeedReport;
use crate::render::build_earthquake_layer;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LayerStatus {
    pub feature_count: usize,
    pub rejected: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedStatus {
    pub earthquakes: LayerStatus,
    pub plates: LayerStatus,
}

#[derive(Default)]
struct Layers {
    earthquakes: Option<Arc<Value>>,
    plates: Option<Arc<Value>>,
    status: FeedStatus,
}

/// Latest successfully loaded copy of both map layers, shared between the
/// HTTP handlers and the refresher
#[derive(Clone, Default)]
pub struct Snapshot {
    layers: Arc<RwLock<Layers>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a fetch report in. A failed layer keeps its previous data and
    /// only records the error.
    pub fn apply(&self, report: FeedReport) -> FeedStatus {
        let now = Utc::now();

        // Styling happens before taking the write lock
        let earthquakes = report
            .earthquakes
            .map(|load| (Arc::new(build_earthquake_layer(&load.features)), load));

        let mut guard = self.layers.write().unwrap_or_else(PoisonError::into_inner);
        let layers = &mut *guard;

        let status = &mut layers.status.earthquakes;
        status.last_attempt = Some(now);
        match earthquakes {
            Ok((layer, load)) => {
                status.feature_count = load.features.len();
                status.rejected = load.rejected;
                status.loaded_at = Some(now);
                status.last_error = None;
                layers.earthquakes = Some(layer);
            }
            Err(e) => {
                tracing::error!("❌ Earthquake feed failed: {}", e);
                status.last_error = Some(e.to_string());
            }
        }

        let status = &mut layers.status.plates;
        status.last_attempt = Some(now);
        match report.plates {
            Ok(document) => {
                status.feature_count = document["features"].as_array().map_or(0, Vec::len);
                status.loaded_at = Some(now);
                status.last_error = None;
                layers.plates = Some(Arc::new(document));
            }
            Err(e) => {
                tracing::error!("❌ Tectonic plate feed failed: {}", e);
                status.last_error = Some(e.to_string());
            }
        }

        layers.status.clone()
    }

    pub fn earthquake_layer(&self) -> Option<Arc<Value>> {
        self.read().earthquakes.clone()
    }

    pub fn plates_layer(&self) -> Option<Arc<Value>> {
        self.read().plates.clone()
    }

    pub fn status(&self) -> FeedStatus {
        self.read().status.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Layers> {
        self.layers.read().unwrap_or_else(PoisonError::into_inner)
    }
}
