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

//! Pixel hit-testing over rendered markers.
//!
//! The map layer records where each marker was painted during a frame into a
//! [`MarkerLayout`]. Clicks are resolved against that layout, so a hit means
//! "a marker is drawn under this pixel" regardless of how the projection got
//! it there.

use std::ops::Deref;
use std::sync::Arc;

use crate::feature::Checkin;

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_sq(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Check-ins found under a pixel, topmost first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitSet(Vec<Arc<Checkin>>);

impl HitSet {
    #[must_use]
    pub fn new(hits: Vec<Arc<Checkin>>) -> Self {
        Self(hits)
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Arc<Checkin>> {
        self.0
    }
}

impl Deref for HitSet {
    type Target = [Arc<Checkin>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Checkin>> for HitSet {
    fn from(hits: Vec<Checkin>) -> Self {
        Self(hits.into_iter().map(Arc::new).collect())
    }
}

impl FromIterator<Arc<Checkin>> for HitSet {
    fn from_iter<I: IntoIterator<Item = Arc<Checkin>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Screen positions of the markers painted in one frame, in paint order.
#[derive(Debug, Clone, Default)]
pub struct MarkerLayout {
    placed: Vec<(Arc<Checkin>, ScreenPoint)>,
}

impl MarkerLayout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a marker painted at `at`. Later pushes are drawn on top.
    pub fn push(&mut self, checkin: Arc<Checkin>, at: ScreenPoint) {
        self.placed.push((checkin, at));
    }

    pub fn clear(&mut self) {
        self.placed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    /// Markers whose painted circle of `radius` contains `pixel`, topmost first.
    #[must_use]
    pub fn hits_at(&self, pixel: ScreenPoint, radius: f32) -> HitSet {
        let radius_sq = radius * radius;
        self.placed
            .iter()
            .rev()
            .filter(|(_, at)| at.distance_sq(pixel) <= radius_sq)
            .map(|(checkin, _)| Arc::clone(checkin))
            .collect()
    }
}
