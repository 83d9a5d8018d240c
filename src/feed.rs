use std::time::{Duration, Instant};

use serde_json::Value;

use crate::constants::USER_AGENT;
use crate::error::FeedError;
use crate::models::{is_feature_collection, EarthquakeLoad};

/// Outcome of loading both layers. Each layer succeeds or fails on its own.
#[derive(Debug)]
pub struct FeedReport {
    pub earthquakes: Result<EarthquakeLoad, FeedError>,
    pub plates: Result<Value, FeedError>,
}

/// HTTP client for the two GeoJSON feeds
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(FeedClient { http })
    }

    async fn get_json(&self, url: &str) -> Result<Value, FeedError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn fetch_earthquakes(&self, url: &str) -> Result<EarthquakeLoad, FeedError> {
        let start = Instant::now();
        let document = self.get_json(url).await?;
        let load = EarthquakeLoad::from_collection(document, url)?;

        tracing::info!(
            "🌋 Loaded {} earthquakes ({} rejected) in {:?}",
            load.features.len(),
            load.rejected,
            start.elapsed()
        );
        Ok(load)
    }

    pub async fn fetch_plates(&self, url: &str) -> Result<Value, FeedError> {
        let start = Instant::now();
        let document = self.get_json(url).await?;
        if !is_feature_collection(&document) {
            return Err(FeedError::NotACollection { url: url.to_string() });
        }

        let count = document["features"].as_array().map_or(0, Vec::len);
        tracing::info!("🧩 Loaded {} plate boundaries in {:?}", count, start.elapsed());
        Ok(document)
    }

    /// Fetches both feeds concurrently and reports each outcome
    pub async fn fetch_all(&self, earthquakes_url: &str, plates_url: &str) -> FeedReport {
        let (earthquakes, plates) = tokio::join!(
            self.fetch_earthquakes(earthquakes_url),
            self.fetch_plates(plates_url)
        );
        FeedReport { earthquakes, plates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn serve_fixtures() -> String {
        let app = Router::new()
            .route(
                "/quakes.geojson",
                get(|| async {
                    Json(json!({
                        "type": "FeatureCollection",
                        "features": [
                            {
                                "type": "Feature",
                                "id": "nc1",
                                "properties": { "mag": 2.1, "place": "5 km N of Cobb, CA", "time": 1_700_000_000_000i64 },
                                "geometry": { "type": "Point", "coordinates": [-122.7, 38.8, 1.9] }
                            },
                            {
                                "type": "Feature",
                                "id": "broken",
                                "properties": { "mag": 1.0 },
                                "geometry": { "type": "Point", "coordinates": [] }
                            }
                        ]
                    }))
                }),
            )
            .route(
                "/plates.json",
                get(|| async {
                    Json(json!({
                        "type": "FeatureCollection",
                        "features": [{
                            "type": "Feature",
                            "properties": { "Name": "AF-AN" },
                            "geometry": { "type": "LineString", "coordinates": [[-0.4, -54.8], [0.0, -54.6]] }
                        }]
                    }))
                }),
            )
            .route("/not-a-collection.json", get(|| async { Json(json!({ "type": "Feature" })) }))
            .route("/broken.json", get(|| async { "{ not json" }))
            .route("/missing.json", get(|| async { StatusCode::NOT_FOUND }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client() -> FeedClient {
        FeedClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_all_success() {
        let base = serve_fixtures().await;
        let report = client()
            .fetch_all(&format!("{}/quakes.geojson", base), &format!("{}/plates.json", base))
            .await;

        let load = report.earthquakes.unwrap();
        assert_eq!(load.features.len(), 1);
        assert_eq!(load.rejected, 1);
        assert_eq!(load.features[0].place.as_deref(), Some("5 km N of Cobb, CA"));

        let plates = report.plates.unwrap();
        assert_eq!(plates["features"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_one_failed_layer_keeps_the_other() {
        let base = serve_fixtures().await;
        let report = client()
            .fetch_all(&format!("{}/quakes.geojson", base), &format!("{}/missing.json", base))
            .await;

        assert!(report.earthquakes.is_ok());
        match report.plates {
            Err(FeedError::Status { status, .. }) => assert_eq!(status, reqwest::StatusCode::NOT_FOUND),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_documents() {
        let base = serve_fixtures().await;
        let client = client();

        let err = client.fetch_plates(&format!("{}/not-a-collection.json", base)).await.unwrap_err();
        assert!(matches!(err, FeedError::NotACollection { .. }));

        let err = client.fetch_earthquakes(&format!("{}/broken.json", base)).await.unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client()
            .fetch_earthquakes(&format!("http://{}/quakes.geojson", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FeedError::Http(_)));
    }
}
