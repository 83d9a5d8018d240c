use serde::Serialize;

use crate::constants::{
    DEPTH_BUCKETS, MARKER_FILL_OPACITY, MARKER_OPACITY, MARKER_OUTLINE_COLOR, MARKER_WEIGHT,
    RADIUS_SCALE, SHALLOW_COLOR, ZERO_MAGNITUDE_RADIUS,
};
use crate::models::EarthquakeFeature;

/// Leaflet circle marker options, serialized with Leaflet's option names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub opacity: f64,
    pub fill_opacity: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub radius: f64,
    pub stroke: bool,
    pub weight: f64,
}

/// Marker color for a hypocenter depth in km. Thresholds are strict, so a
/// depth sitting exactly on one falls into the shallower bucket.
pub fn depth_color(depth_km: f64) -> &'static str {
    DEPTH_BUCKETS
        .iter()
        .find(|(threshold, _)| depth_km > *threshold)
        .map(|(_, color)| *color)
        .unwrap_or(SHALLOW_COLOR)
}

/// Marker radius for a magnitude. Negative magnitudes are not clamped and
/// give a negative radius.
pub fn magnitude_radius(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        ZERO_MAGNITUDE_RADIUS
    } else {
        magnitude * RADIUS_SCALE
    }
}

pub fn marker_style(quake: &EarthquakeFeature) -> MarkerStyle {
    MarkerStyle {
        opacity: MARKER_OPACITY,
        fill_opacity: MARKER_FILL_OPACITY,
        fill_color: depth_color(quake.depth_km),
        color: MARKER_OUTLINE_COLOR,
        // No magnitude in the feed draws the smallest visible marker
        radius: magnitude_radius(quake.mag.unwrap_or(0.0)),
        stroke: true,
        weight: MARKER_WEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_color_buckets() {
        assert_eq!(depth_color(650.0), "#ea2c2c");
        assert_eq!(depth_color(90.01), "#ea2c2c");
        assert_eq!(depth_color(80.0), "#ea822c");
        assert_eq!(depth_color(60.0), "#ee9c00");
        assert_eq!(depth_color(40.0), "#eecc00");
        assert_eq!(depth_color(20.0), "#d4ee00");
        assert_eq!(depth_color(5.0), "#98ee00");
        assert_eq!(depth_color(-3.5), "#98ee00");
    }

    #[test]
    fn test_depth_color_boundaries_are_strict() {
        assert_eq!(depth_color(90.0), "#ea822c");
        assert_eq!(depth_color(70.0), "#ee9c00");
        assert_eq!(depth_color(50.0), "#eecc00");
        assert_eq!(depth_color(30.0), "#d4ee00");
        assert_eq!(depth_color(10.0), "#98ee00");
    }

    #[test]
    fn test_depth_color_nan_falls_back() {
        assert_eq!(depth_color(f64::NAN), "#98ee00");
    }

    #[test]
    fn test_magnitude_radius() {
        assert_eq!(magnitude_radius(0.0), 1.0);
        assert_eq!(magnitude_radius(5.0), 20.0);
        assert_eq!(magnitude_radius(1.5), 6.0);
        // not clamped
        assert_eq!(magnitude_radius(-2.0), -8.0);
    }

    #[test]
    fn test_marker_style() {
        let quake = EarthquakeFeature {
            id: None,
            place: None,
            mag: Some(3.0),
            time: None,
            longitude: 0.0,
            latitude: 0.0,
            depth_km: 95.0,
        };
        let style = marker_style(&quake);
        assert_eq!(style.fill_color, "#ea2c2c");
        assert_eq!(style.radius, 12.0);
        assert_eq!(style.color, "#000");
        assert!(style.stroke);

        let json = serde_json::to_value(&style).unwrap();
        assert_eq!(json["fillOpacity"], 0.8);
        assert_eq!(json["fillColor"], "#ea2c2c");
        assert_eq!(json["weight"], 0.5);

        let unknown = EarthquakeFeature { mag: None, ..quake };
        assert_eq!(marker_style(&unknown).radius, 1.0);
    }
}
