use reqwest::StatusCode;

/// Failures while loading one of the GeoJSON feeds
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("Invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{url} did not return a GeoJSON FeatureCollection")]
    NotACollection { url: String },
}
