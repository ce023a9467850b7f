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

//! GeoJSON dataset loading.
//!
//! Accepts a `FeatureCollection` (or a lone `Feature`) of point features.
//! Features without a point geometry are skipped with a warning rather than
//! failing the whole load.

use std::fs;
use std::io::Read;
use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use log::{info, warn};
use thiserror::Error;

use crate::feature::{Checkin, Coordinate, Dataset};

/// Errors that can occur while loading a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("expected a FeatureCollection or Feature, found a bare geometry")]
    NotACollection,

    #[cfg(feature = "http")]
    #[error("failed to fetch dataset: {0}")]
    Http(#[from] reqwest::Error),
}

impl Dataset {
    /// Parse a dataset from GeoJSON text.
    pub fn from_geojson_str(text: &str) -> Result<Self, DatasetError> {
        let features = match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => collection.features,
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::Geometry(_) => return Err(DatasetError::NotACollection),
        };

        let total = features.len();
        let checkins: Vec<Checkin> = features
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| checkin_from_feature(index, feature))
            .collect();

        if checkins.len() < total {
            warn!(
                "Skipped {} of {} features without a point geometry",
                total - checkins.len(),
                total
            );
        }

        Ok(Self::new(checkins))
    }

    /// Parse a dataset from any reader producing GeoJSON text.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DatasetError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_geojson_str(&text)
    }

    /// Load a dataset from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let dataset = Self::from_geojson_str(&text)?;
        info!("Loaded {} check-ins from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Fetch a dataset over HTTP(S).
    #[cfg(feature = "http")]
    pub fn from_url(url: &str) -> Result<Self, DatasetError> {
        let text = reqwest::blocking::get(url)?.error_for_status()?.text()?;
        let dataset = Self::from_geojson_str(&text)?;
        info!("Loaded {} check-ins from {}", dataset.len(), url);
        Ok(dataset)
    }

    /// Load from a URL when `source` looks like one, otherwise from a path.
    #[cfg(feature = "http")]
    pub fn load(source: &str) -> Result<Self, DatasetError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::from_url(source)
        } else {
            Self::from_path(source)
        }
    }
}

fn checkin_from_feature(index: usize, feature: Feature) -> Option<Checkin> {
    let location = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Point(position)) if position.len() >= 2 => {
            Coordinate::new(position[0], position[1])
        }
        Some(_) => {
            warn!("Feature {index} is not a point, skipping");
            return None;
        }
        None => {
            warn!("Feature {index} has no geometry, skipping");
            return None;
        }
    };

    Some(Checkin::from_properties(
        location,
        feature.properties.unwrap_or_default(),
    ))
}
