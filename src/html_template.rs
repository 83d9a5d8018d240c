use axum::response::Html;
use serde::Serialize;

use crate::constants::{
    EARTHQUAKES_OVERLAY, MAP_CENTER, MAP_ZOOM, PLATES_OVERLAY, PLATE_LINE_COLOR,
    PLATE_LINE_WEIGHT, STANDARD_TILES_ATTRIBUTION, STANDARD_TILES_URL, STREET_TILES_ATTRIBUTION,
    STREET_TILES_URL,
};
use crate::legend::render_legend_html;
use crate::settings::Settings;

const CONFIG_PLACEHOLDER: &str = "/* MAP_CONFIG_PLACEHOLDER */null";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerConfig {
    pub name: &'static str,
    pub url: &'static str,
    pub attribution: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: f64,
}

/// Everything the page needs to build the Leaflet map
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub center: [f64; 2],
    pub zoom: u8,
    /// First entry is the default base layer
    pub base_layers: Vec<TileLayerConfig>,
    pub earthquakes_overlay: &'static str,
    pub plates_overlay: &'static str,
    pub show_plates: bool,
    pub plate_style: LineStyle,
    pub legend_html: String,
    pub earthquakes_url: &'static str,
    pub plates_url: &'static str,
    pub status_url: &'static str,
    pub events_url: &'static str,
}

impl MapConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        MapConfig {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            base_layers: vec![
                TileLayerConfig {
                    name: "Standard Map",
                    url: STANDARD_TILES_URL,
                    attribution: STANDARD_TILES_ATTRIBUTION,
                },
                TileLayerConfig {
                    name: "Street Map",
                    url: STREET_TILES_URL,
                    attribution: STREET_TILES_ATTRIBUTION,
                },
            ],
            earthquakes_overlay: EARTHQUAKES_OVERLAY,
            plates_overlay: PLATES_OVERLAY,
            show_plates: settings.show_plates,
            plate_style: LineStyle {
                color: PLATE_LINE_COLOR,
                weight: PLATE_LINE_WEIGHT,
            },
            legend_html: render_legend_html(),
            earthquakes_url: "/api/earthquakes",
            plates_url: "/api/plates",
            status_url: "/api/status",
            events_url: "/api/events",
        }
    }
}

/// Fills the map configuration into the page template
pub fn render_map_page(template: &str, config: &MapConfig) -> serde_json::Result<Html<String>> {
    // "</" would end the surrounding <script> early
    let config_json = serde_json::to_string(config)?.replace("</", "<\\/");
    Ok(Html(template.replace(CONFIG_PLACEHOLDER, &config_json)))
}
