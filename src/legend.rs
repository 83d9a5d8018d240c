use serde::Serialize;

use crate::constants::{DEPTH_BUCKETS, LEGEND_FLOOR_DEPTH, SHALLOW_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub depth: f64,
    pub color: &'static str,
    pub label: String,
}

/// Depth legend rows, shallowest first. Mirrors the classifier table.
pub fn legend_entries() -> Vec<LegendEntry> {
    let mut rows: Vec<(f64, &'static str)> = vec![(LEGEND_FLOOR_DEPTH, SHALLOW_COLOR)];
    rows.extend(DEPTH_BUCKETS.iter().rev().copied());

    rows.iter()
        .enumerate()
        .map(|(i, &(depth, color))| {
            let label = match rows.get(i + 1) {
                Some(&(next, _)) => format!("{}\u{2013}{}", depth, next),
                None => format!("{}+", depth),
            };
            LegendEntry { depth, color, label }
        })
        .collect()
}

/// Inner HTML of the legend control
pub fn render_legend_html() -> String {
    let mut html = String::from("<strong>Depth (km)</strong><br>");
    for entry in legend_entries() {
        html.push_str(&format!(
            "<i style=\"background: {}\"></i> {}<br>",
            entry.color,
            entry.label.replace('\u{2013}', "&ndash;")
        ));
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_entries_last_open_ended() {
        let entries = legend_entries();
        assert_eq!(entries.len(), 6);

        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["-10–10", "10–30", "30–50", "50–70", "70–90", "90+"]);

        for pair in entries.windows(2) {
            assert!(pair[0].label.ends_with(&format!("–{}", pair[1].depth)));
        }
    }

    #[test]
    fn test_colors_match_classifier() {
        let entries = legend_entries();
        assert_eq!(entries[0].color, "#98ee00");
        assert_eq!(entries[5].color, "#ea2c2c");
        for entry in &entries {
            // one step past the lower edge lands in the row's own bucket
            assert_eq!(crate::style::depth_color(entry.depth + 1.0), entry.color);
        }
    }

    #[test]
    fn test_render_html() {
        let html = render_legend_html();
        assert!(html.starts_with("<strong>Depth (km)</strong><br>"));
        assert_eq!(html.matches("<i style=").count(), 6);
        assert!(html.contains("<i style=\"background: #ea2c2c\"></i> 90+<br>"));
        assert!(html.contains("<i style=\"background: #98ee00\"></i> -10&ndash;10<br>"));
    }
}
