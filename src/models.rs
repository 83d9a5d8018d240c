use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::FeedError;

// Raw USGS record as it arrives on the wire. Only the geometry is typed, a
// mistyped property never costs the whole record.
#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<Value>,
}

/// One earthquake, validated at ingestion. Location fields are always present,
/// descriptive properties may be missing from the feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeFeature {
    pub id: Option<String>,
    pub place: Option<String>,
    pub mag: Option<f64>,
    /// Epoch milliseconds
    pub time: Option<i64>,
    pub longitude: f64,
    pub latitude: f64,
    pub depth_km: f64,
}

impl EarthquakeFeature {
    /// Validates a single GeoJSON feature. The error is a human readable
    /// rejection reason.
    pub fn from_geojson(value: Value) -> Result<Self, String> {
        let raw: RawFeature =
            serde_json::from_value(value).map_err(|e| format!("malformed feature: {}", e))?;

        let geometry = raw.geometry.ok_or_else(|| "missing geometry".to_string())?;
        if geometry.coordinates.len() < 3 {
            return Err(format!(
                "expected [longitude, latitude, depth], got {} coordinate(s)",
                geometry.coordinates.len()
            ));
        }

        let mut coords = [0.0f64; 3];
        for (slot, raw_value) in coords.iter_mut().zip(&geometry.coordinates) {
            *slot = raw_value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("non-numeric coordinate: {}", raw_value))?;
        }

        let properties = raw.properties.unwrap_or(Value::Null);
        let number = |key: &str| {
            properties
                .get(key)
                .and_then(Value::as_f64)
                .filter(|v| v.is_finite())
        };

        Ok(EarthquakeFeature {
            id: raw.id.and_then(feature_id),
            place: properties.get("place").and_then(Value::as_str).map(str::to_string),
            mag: number("mag"),
            time: number("time").map(|t| t as i64),
            longitude: coords[0],
            latitude: coords[1],
            depth_km: coords[2],
        })
    }
}

// GeoJSON allows string or numeric ids
fn feature_id(id: Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Result of ingesting one earthquake feed
#[derive(Debug, Clone, Default)]
pub struct EarthquakeLoad {
    pub features: Vec<EarthquakeFeature>,
    pub rejected: usize,
}

impl EarthquakeLoad {
    /// Splits a FeatureCollection into valid earthquakes and a count of
    /// rejected records. Only a document that is not a collection at all is an error.
    pub fn from_collection(document: Value, url: &str) -> Result<Self, FeedError> {
        let features = take_collection_features(document, url)?;

        let mut load = EarthquakeLoad::default();
        for (index, feature) in features.into_iter().enumerate() {
            match EarthquakeFeature::from_geojson(feature) {
                Ok(quake) => load.features.push(quake),
                Err(reason) => {
                    tracing::warn!("⚠️  Skipping earthquake record #{}: {}", index, reason);
                    load.rejected += 1;
                }
            }
        }

        Ok(load)
    }
}

/// Checks that a document is a FeatureCollection and hands back its features
pub fn take_collection_features(document: Value, url: &str) -> Result<Vec<Value>, FeedError> {
    if !is_feature_collection(&document) {
        return Err(FeedError::NotACollection { url: url.to_string() });
    }

    match document {
        Value::Object(mut map) => match map.remove("features") {
            Some(Value::Array(features)) => Ok(features),
            _ => Err(FeedError::NotACollection { url: url.to_string() }),
        },
        _ => Err(FeedError::NotACollection { url: url.to_string() }),
    }
}

pub fn is_feature_collection(document: &Value) -> bool {
    document.get("type").and_then(Value::as_str) == Some("FeatureCollection")
        && document.get("features").map_or(false, Value::is_array)
}
