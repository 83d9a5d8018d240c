use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_PORT, EARTHQUAKE_FEED_URL, PLATES_FEED_URL, REQUEST_TIMEOUT_SECS};

const CONFIG_FILE_NAME: &str = "quakemap.ini";
const CONFIG_ENV_VAR: &str = "QUAKEMAP_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub port: u16,
    #[serde(default)]
    pub auto_open_browser: bool,
    pub earthquake_feed_url: String,
    pub plates_feed_url: String,
    /// Plates overlay visible when the page loads
    pub show_plates: bool,
    /// 0 disables the background refresh
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            auto_open_browser: false,
            earthquake_feed_url: EARTHQUAKE_FEED_URL.to_string(),
            plates_feed_url: PLATES_FEED_URL.to_string(),
            show_plates: true,
            refresh_interval_secs: 0,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        Ok(Self::parse(&content))
    }

    /// Reads `key = value` lines over the defaults. Comments, unknown keys and
    /// values that do not parse are ignored.
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(key.trim(), value.trim().trim_matches('"'));
            }
        }

        if let Some(port) = config_map.get("port").and_then(|v| v.parse().ok()) {
            settings.port = port;
        }
        if let Some(auto_open) = config_map.get("auto_open_browser").and_then(|v| v.parse().ok()) {
            settings.auto_open_browser = auto_open;
        }
        if let Some(url) = config_map.get("earthquake_feed_url").filter(|v| !v.is_empty()) {
            settings.earthquake_feed_url = url.to_string();
        }
        if let Some(url) = config_map.get("plates_feed_url").filter(|v| !v.is_empty()) {
            settings.plates_feed_url = url.to_string();
        }
        if let Some(show) = config_map.get("show_plates").and_then(|v| v.parse().ok()) {
            settings.show_plates = show;
        }
        if let Some(secs) = config_map.get("refresh_interval_secs").and_then(|v| v.parse().ok()) {
            settings.refresh_interval_secs = secs;
        }
        if let Some(secs) = config_map
            .get("request_timeout_secs")
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
        {
            settings.request_timeout_secs = secs;
        }

        settings
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# QuakeMap Configuration File\n");
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));
        content.push_str(&format!("earthquake_feed_url = \"{}\"\n", self.earthquake_feed_url));
        content.push_str(&format!("plates_feed_url = \"{}\"\n", self.plates_feed_url));
        content.push_str(&format!("show_plates = {}\n", self.show_plates));
        content.push_str(&format!("refresh_interval_secs = {}\n", self.refresh_interval_secs));
        content.push_str(&format!("request_timeout_secs = {}\n", self.request_timeout_secs));
        content
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(&config_path, self.to_ini()).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }

    /// `$QUAKEMAP_CONFIG`, or `quakemap.ini` next to the executable
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push(CONFIG_FILE_NAME);
        path
    }
}
