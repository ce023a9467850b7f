// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Application configuration management.
//!
//! This module handles persistent configuration storage using TOML format:
//! where the check-ins come from, which tile server draws the base map, the
//! initial view and the marker look.

use checkin_core::{Coordinate, MarkerStyle};
use serde::{Deserialize, Serialize};

use crate::map::MapOptions;

const APP_NAME: &str = "checkin-map";
const CONFIG_NAME: &str = "config";

/// Default dataset location, relative to the working directory
pub const DEFAULT_DATA_SOURCE: &str = "data/checkins.geojson";

/// Default OpenStreetMap tile URL template
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// GeoJSON file path or http(s) URL
    #[serde(default = "default_data_source")]
    pub data_source: String,

    /// Tile URL template with `{z}`, `{x}`, `{y}` and optional `{s}` placeholders
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Attribution text painted in the map corner
    #[serde(default = "default_tile_attribution")]
    pub tile_attribution: String,

    /// Initial view center latitude
    #[serde(default)]
    pub center_lat: f64,

    /// Initial view center longitude
    #[serde(default)]
    pub center_lon: f64,

    /// Initial zoom level
    #[serde(default)]
    pub initial_zoom: f64,

    /// Window width in points
    #[serde(default = "default_window_width")]
    pub window_width: f32,

    /// Window height in points
    #[serde(default = "default_window_height")]
    pub window_height: f32,

    /// Check-in marker appearance
    #[serde(default)]
    pub marker: MarkerStyle,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_data_source() -> String {
    DEFAULT_DATA_SOURCE.to_string()
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_tile_attribution() -> String {
    "© OpenStreetMap contributors".to_string()
}

fn default_window_width() -> f32 {
    1280.0
}

fn default_window_height() -> f32 {
    800.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            data_source: default_data_source(),
            tile_url: default_tile_url(),
            tile_attribution: default_tile_attribution(),
            center_lat: 0.0,
            center_lon: 0.0,
            initial_zoom: 0.0,
            window_width: default_window_width(),
            window_height: default_window_height(),
            marker: MarkerStyle::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk
    pub fn load() -> Result<Self, confy::ConfyError> {
        confy::load(APP_NAME, CONFIG_NAME)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, CONFIG_NAME, self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
    }

    /// Initial view center
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_lon, self.center_lat)
    }

    /// Map settings derived from this configuration
    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            tile_url: self.tile_url.clone(),
            tile_attribution: self.tile_attribution.clone(),
            center: self.center(),
            zoom: self.initial_zoom,
            marker: self.marker,
            cache_dir: dirs::cache_dir().map(|dir| dir.join(APP_NAME).join("tiles")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view_is_origin_at_zoom_zero() {
        let config = AppConfig::default();
        assert_eq!(config.center(), Coordinate::new(0.0, 0.0));
        assert!(config.initial_zoom.abs() < f64::EPSILON);
        assert_eq!(config.marker, MarkerStyle::default());
    }

    #[test]
    fn test_map_options_follow_config() {
        let config = AppConfig {
            tile_url: "https://{s}.tiles.example/{z}/{x}/{y}.png".to_string(),
            center_lat: 51.5,
            center_lon: -0.12,
            initial_zoom: 4.0,
            ..AppConfig::default()
        };

        let options = config.map_options();
        assert_eq!(options.tile_url, config.tile_url);
        assert_eq!(options.center, Coordinate::new(-0.12, 51.5));
        assert!((options.zoom - 4.0).abs() < f64::EPSILON);
    }
}
