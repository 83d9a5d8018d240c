use rayon::prelude::*;
use serde_json::{json, Value};

use crate::models::EarthquakeFeature;
use crate::popup::format_popup;
use crate::style::marker_style;

/// GeoJSON the map page draws directly: every feature carries its circle
/// marker options and popup HTML next to the feed properties.
pub fn build_earthquake_layer(quakes: &[EarthquakeFeature]) -> Value {
    // par_iter keeps input order on collect
    let features: Vec<Value> = quakes.par_iter().map(styled_feature).collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn styled_feature(quake: &EarthquakeFeature) -> Value {
    json!({
        "type": "Feature",
        "id": quake.id,
        "geometry": {
            "type": "Point",
            "coordinates": [quake.longitude, quake.latitude, quake.depth_km],
        },
        "properties": {
            "place": quake.place,
            "mag": quake.mag,
            "time": quake.time,
            "style": marker_style(quake),
            "popup": format_popup(quake),
        },
    })
}
