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

//! Check-in records and the dataset that owns them.
//!
//! Check-ins are immutable once loaded. The [`Dataset`] hands them out as
//! `Arc<Checkin>` so hit sets and popup sessions can hold on to them without
//! copying property maps around.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property name for the beer name.
pub const BEER_NAME: &str = "beer_name";
/// Property name for the brewery name.
pub const BREWERY_NAME: &str = "brewery_name";
/// Property name for the optional venue name.
pub const VENUE_NAME: &str = "venue_name";
/// Property name for the check-in timestamp.
pub const CREATED_AT: &str = "created_at";

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// One check-in from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkin {
    /// Where the check-in happened.
    pub location: Coordinate,
    pub beer_name: String,
    pub brewery_name: String,
    /// Venue name, `None` when absent, null or empty in the source.
    pub venue_name: Option<String>,
    /// Raw creation timestamp as it appeared in the source.
    pub created_at: String,
    /// All source properties, including the ones lifted into fields above.
    pub properties: Map<String, Value>,
}

impl Checkin {
    /// Build a check-in from a location and a GeoJSON property object.
    ///
    /// Missing name properties become empty strings. A numeric `created_at`
    /// is taken as milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_properties(location: Coordinate, properties: Map<String, Value>) -> Self {
        let text = |key: &str| -> String {
            match properties.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            }
        };

        let venue_name = Some(text(VENUE_NAME)).filter(|venue| !venue.is_empty());

        let created_at = match properties.get(CREATED_AT) {
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(chrono::DateTime::from_timestamp_millis)
                .map(|ts| ts.to_rfc3339())
                .unwrap_or_else(|| n.to_string()),
            _ => text(CREATED_AT),
        };

        Self {
            location,
            beer_name: text(BEER_NAME),
            brewery_name: text(BREWERY_NAME),
            venue_name,
            created_at,
            properties,
        }
    }

    /// Read a source property by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// The loaded check-in collection, in source (draw) order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    checkins: Vec<Arc<Checkin>>,
}

impl Dataset {
    #[must_use]
    pub fn new(checkins: Vec<Checkin>) -> Self {
        Self {
            checkins: checkins.into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checkins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checkins.is_empty()
    }

    /// Iterate check-ins in draw order (bottom-most first).
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Checkin>> {
        self.checkins.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<Checkin>> {
        self.checkins.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_from_properties_reads_named_fields() {
        let checkin = Checkin::from_properties(
            Coordinate::new(-0.12, 51.5),
            props(json!({
                "beer_name": "Pale Ale",
                "brewery_name": "Acme",
                "venue_name": "The Tap",
                "created_at": "2021-03-05T10:00:00Z",
                "rating_score": 4.25
            })),
        );

        assert_eq!(checkin.beer_name, "Pale Ale");
        assert_eq!(checkin.brewery_name, "Acme");
        assert_eq!(checkin.venue_name.as_deref(), Some("The Tap"));
        assert_eq!(checkin.created_at, "2021-03-05T10:00:00Z");
        assert_eq!(checkin.get("rating_score"), Some(&json!(4.25)));
    }

    #[test]
    fn test_venue_absent_null_or_empty_is_none() {
        for venue in [json!(null), json!("")] {
            let checkin = Checkin::from_properties(
                Coordinate::default(),
                props(json!({ "beer_name": "Stout", "venue_name": venue })),
            );
            assert_eq!(checkin.venue_name, None);
        }

        let checkin =
            Checkin::from_properties(Coordinate::default(), props(json!({ "beer_name": "Stout" })));
        assert_eq!(checkin.venue_name, None);
        assert_eq!(checkin.brewery_name, "");
    }

    #[test]
    fn test_whitespace_venue_is_kept() {
        let checkin = Checkin::from_properties(
            Coordinate::default(),
            props(json!({ "beer_name": "Stout", "venue_name": "   " })),
        );
        assert_eq!(checkin.venue_name.as_deref(), Some("   "));
    }

    #[test]
    fn test_dataset_iter_runs_both_ways() {
        let dataset = Dataset::new(vec![
            Checkin::from_properties(Coordinate::new(1.0, 2.0), props(json!({ "beer_name": "A" }))),
            Checkin::from_properties(Coordinate::new(1.0, 2.0), props(json!({ "beer_name": "B" }))),
        ]);
        let names: Vec<&str> = dataset.iter().rev().map(|c| c.beer_name.as_str()).collect();
        assert_eq!(names, ["B", "A"]);
        assert_eq!(dataset.iter().len(), 2);
    }

    #[test]
    fn test_numeric_created_at_is_epoch_millis() {
        let checkin = Checkin::from_properties(
            Coordinate::default(),
            props(json!({ "created_at": 1_614_938_400_000_i64 })),
        );
        assert!(checkin.created_at.starts_with("2021-03-05T10:00:00"));
    }

    #[test]
    fn test_dataset_preserves_order() {
        let dataset = Dataset::new(vec![
            Checkin::from_properties(Coordinate::new(1.0, 1.0), props(json!({ "beer_name": "A" }))),
            Checkin::from_properties(Coordinate::new(2.0, 2.0), props(json!({ "beer_name": "B" }))),
        ]);

        assert_eq!(dataset.len(), 2);
        let names: Vec<_> = dataset.iter().map(|c| c.beer_name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(dataset.get(1).map(|c| c.location), Some(Coordinate::new(2.0, 2.0)));
    }
}
