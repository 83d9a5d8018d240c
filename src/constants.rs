// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Feeds
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PLATES_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const USER_AGENT: &str = concat!("quakemap/", env!("CARGO_PKG_VERSION"));

// Map view
pub const MAP_CENTER: [f64; 2] = [20.0, 0.0]; // roughly the equator
pub const MAP_ZOOM: u8 = 2;

pub const STANDARD_TILES_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const STANDARD_TILES_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
pub const STREET_TILES_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const STREET_TILES_ATTRIBUTION: &str =
    "&copy; OpenStreetMap contributors, Humanitarian OpenStreetMap Team";

pub const EARTHQUAKES_OVERLAY: &str = "Earthquakes";
pub const PLATES_OVERLAY: &str = "Tectonic Plates";

pub const PLATE_LINE_COLOR: &str = "orange";
pub const PLATE_LINE_WEIGHT: f64 = 2.0;

// Depth buckets, deepest first. Anything not strictly deeper than the last
// threshold gets SHALLOW_COLOR.
pub const DEPTH_BUCKETS: &[(f64, &str)] = &[
    (90.0, "#ea2c2c"),
    (70.0, "#ea822c"),
    (50.0, "#ee9c00"),
    (30.0, "#eecc00"),
    (10.0, "#d4ee00"),
];
pub const SHALLOW_COLOR: &str = "#98ee00";

// First legend row starts here
pub const LEGEND_FLOOR_DEPTH: f64 = -10.0;

// Circle markers
pub const RADIUS_SCALE: f64 = 4.0;
pub const ZERO_MAGNITUDE_RADIUS: f64 = 1.0;
pub const MARKER_OUTLINE_COLOR: &str = "#000";
pub const MARKER_OPACITY: f64 = 1.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;
pub const MARKER_WEIGHT: f64 = 0.5;

// Rendered in popups for absent feed values
pub const MISSING_VALUE: &str = "undefined";

// SSE
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
pub const HEARTBEAT_SECS: u64 = 30;
