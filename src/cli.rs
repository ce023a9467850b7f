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

//! Command line arguments. Anything given here overrides the config file.

use clap::Parser;

use crate::config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "checkin-map", version, about = "Interactive map of beer check-ins")]
pub struct Cli {
    /// GeoJSON file or http(s) URL with the check-ins
    pub data: Option<String>,

    /// Tile URL template, e.g. https://{s}.tile.example/{z}/{x}/{y}.png
    #[arg(long)]
    pub tiles: Option<String>,

    /// Initial zoom level
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Initial center as LAT,LON
    #[arg(long, value_parser = parse_center, allow_hyphen_values = true)]
    pub center: Option<(f64, f64)>,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Overlay command line values on `config`.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(ref data) = self.data {
            config.data_source.clone_from(data);
        }
        if let Some(ref tiles) = self.tiles {
            config.tile_url.clone_from(tiles);
        }
        if let Some(zoom) = self.zoom {
            config.initial_zoom = zoom;
        }
        if let Some((lat, lon)) = self.center {
            config.center_lat = lat;
            config.center_lon = lon;
        }
    }
}

fn parse_center(value: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("invalid longitude '{lon}': {e}"))?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(format!("longitude {lon} out of range"));
    }
    Ok((lat, lon))
}
