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

//! Check-in map core: everything behind the map that does not need a window.
//!
//! - **Feature layer**: check-in records and the dataset that owns them
//! - **Source layer**: GeoJSON loading from strings, readers, files and
//!   (with the `http` feature) URLs
//! - **Hit layer**: resolving a click pixel to the markers drawn under it
//! - **Pager layer**: the popup state machine and its imperative shell
//! - **Render layer**: page content and its HTML form
//!
//! # Quick Start
//!
//! ```
//! use checkin_core::{ClickResolver, Coordinate, Dataset, MarkerLayout, PageView,
//!     PopupSurface, ScreenPoint};
//!
//! #[derive(Default)]
//! struct Popup(Option<String>);
//!
//! impl PopupSurface for Popup {
//!     fn show(&mut self, _anchor: Coordinate, view: PageView) {
//!         self.0 = Some(view.html());
//!     }
//!     fn hide(&mut self) {
//!         self.0 = None;
//!     }
//! }
//!
//! let dataset = Dataset::from_geojson_str(r#"{
//!     "type": "FeatureCollection",
//!     "features": [{
//!         "type": "Feature",
//!         "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
//!         "properties": {
//!             "beer_name": "Pale Ale",
//!             "brewery_name": "Acme",
//!             "created_at": "2021-03-05T10:00:00Z"
//!         }
//!     }]
//! }"#).unwrap();
//!
//! // The map layer records where it painted each marker...
//! let mut layout = MarkerLayout::new();
//! for checkin in dataset.iter() {
//!     layout.push(checkin.clone(), ScreenPoint::new(50.0, 50.0));
//! }
//!
//! // ...and clicks are resolved against that layout.
//! let mut resolver = ClickResolver::new();
//! let mut popup = Popup::default();
//! resolver.handle_click(layout.hits_at(ScreenPoint::new(52.0, 51.0), 5.5), &mut popup);
//!
//! let html = popup.0.unwrap();
//! assert!(html.contains("on Mar 05, 2021"));
//! assert!(html.contains("<span>1 of 1</span>"));
//! ```

pub mod feature;
pub mod hit;
pub mod pager;
pub mod render;
pub mod source;
pub mod style;

pub use feature::{Checkin, Coordinate, Dataset};
pub use hit::{HitSet, MarkerLayout, ScreenPoint};
pub use pager::{
    reduce, ClickResolver, Effect, PagerEvent, PagerState, PopupSurface, Session, SessionId,
    Transition,
};
pub use render::{format_checkin_date, PageView};
pub use source::DatasetError;
pub use style::{MarkerStyle, Rgba};
