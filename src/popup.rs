use chrono::{DateTime, Datelike, Utc};

use crate::constants::MISSING_VALUE;
use crate::models::EarthquakeFeature;

// Largest distance from the epoch a browser Date accepts
const MAX_DATE_MILLIS: u64 = 8_640_000_000_000_000;

/// Popup HTML bound to each earthquake marker
pub fn format_popup(quake: &EarthquakeFeature) -> String {
    let place = quake
        .place
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| MISSING_VALUE.to_string());
    let magnitude = quake
        .mag
        .map(|m| plain_number(m).to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string());
    let date = quake
        .time
        .map(format_event_time)
        .unwrap_or_else(|| MISSING_VALUE.to_string());

    format!(
        "<h3>Location: {}</h3>\n<p>Magnitude: {}</p>\n<p>Depth: {} km</p>\n<p>Date: {}</p>",
        place,
        magnitude,
        plain_number(quake.depth_km),
        date
    )
}

// -0.0 prints as "-0"
fn plain_number(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Calendar date-time of an epoch-millisecond timestamp, in UTC, in the same
/// layout browsers use for `Date.prototype.toString`.
pub fn format_event_time(epoch_millis: i64) -> String {
    let dt = match DateTime::<Utc>::from_timestamp_millis(epoch_millis) {
        Some(dt) if epoch_millis.unsigned_abs() <= MAX_DATE_MILLIS => dt,
        _ => return "Invalid Date".to_string(),
    };

    // At least four digits, unsigned past 9999, leading '-' before year 0
    let year = dt.year();
    let year = if year >= 0 {
        format!("{:04}", year)
    } else {
        format!("-{:04}", -year)
    };

    format!(
        "{} {} {} GMT+0000 (Coordinated Universal Time)",
        dt.format("%a %b %d"),
        year,
        dt.format("%H:%M:%S")
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EarthquakeFeature {
        EarthquakeFeature {
            id: Some("ak0251234".to_string()),
            place: Some("45 km NW of Anchorage, Alaska".to_string()),
            mag: Some(4.5),
            // 2023-11-14 22:13:20 UTC
            time: Some(1_700_000_000_000),
            longitude: -150.4,
            latitude: 61.5,
            depth_km: 35.2,
        }
    }

    #[test]
    fn test_popup_contains_all_fields() {
        let html = format_popup(&sample());
        assert!(html.contains("<h3>Location: 45 km NW of Anchorage, Alaska</h3>"));
        assert!(html.contains("<p>Magnitude: 4.5</p>"));
        assert!(html.contains("<p>Depth: 35.2 km</p>"));
        assert!(html.contains(
            "<p>Date: Tue Nov 14 2023 22:13:20 GMT+0000 (Coordinated Universal Time)</p>"
        ));
    }

    #[test]
    fn test_missing_values_render_undefined() {
        let quake = EarthquakeFeature {
            place: None,
            mag: None,
            time: None,
            ..sample()
        };
        let html = format_popup(&quake);
        assert!(html.contains("Location: undefined"));
        assert!(html.contains("Magnitude: undefined"));
        assert!(html.contains("Date: undefined"));
        assert!(html.contains("Depth: 35.2 km"));
    }

    #[test]
    fn test_whole_numbers_have_no_fraction() {
        let quake = EarthquakeFeature {
            mag: Some(0.0),
            depth_km: 10.0,
            ..sample()
        };
        let html = format_popup(&quake);
        assert!(html.contains("Magnitude: 0</p>"));
        assert!(html.contains("Depth: 10 km"));
    }

    #[test]
    fn test_place_is_escaped() {
        let quake = EarthquakeFeature {
            place: Some("<b>Ridge & Valley</b>".to_string()),
            ..sample()
        };
        assert!(format_popup(&quake).contains("Location: &lt;b&gt;Ridge &amp; Valley&lt;/b&gt;"));
    }

    #[test]
    fn test_negative_zero_prints_as_zero() {
        let quake = EarthquakeFeature {
            mag: Some(-0.0),
            depth_km: -0.0,
            ..sample()
        };
        let html = format_popup(&quake);
        assert!(html.contains("<p>Magnitude: 0</p>"));
        assert!(html.contains("<p>Depth: 0 km</p>"));
    }

    #[test]
    fn test_year_layout() {
        assert_eq!(
            format_event_time(-1),
            "Wed Dec 31 1969 23:59:59 GMT+0000 (Coordinated Universal Time)"
        );
        // 10000-01-01T00:00:00Z
        assert_eq!(
            format_event_time(253_402_300_800_000),
            "Sat Jan 01 10000 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_out_of_range_time() {
        assert_eq!(format_event_time(i64::MAX), "Invalid Date");
        assert_eq!(format_event_time(i64::MIN), "Invalid Date");
        assert_eq!(format_event_time(8_640_000_000_000_001), "Invalid Date");
        assert_eq!(format_event_time(-8_640_000_000_000_001), "Invalid Date");
    }
}
