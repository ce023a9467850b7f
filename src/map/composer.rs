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

//! Map composition: base tiles, the check-in layer and the popup overlay.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use checkin_core::{Coordinate, Dataset, HitSet, MarkerStyle, ScreenPoint};
use eframe::egui;
use log::{info, warn};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory};

use super::markers::{position, CheckinMarkersPlugin, FrameState};
use super::popup::{PopupAction, PopupOverlay};
use super::tiles::UrlTemplateSource;

/// Everything needed to build the map once.
#[derive(Debug, Clone)]
pub struct MapOptions {
    pub tile_url: String,
    pub tile_attribution: String,
    /// Initial view center
    pub center: Coordinate,
    pub zoom: f64,
    pub marker: MarkerStyle,
    /// Disk cache for downloaded tiles, if any
    pub cache_dir: Option<PathBuf>,
}

/// A click on the map surface (not on the popup).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub pixel: ScreenPoint,
}

/// Owns the map view: tiles, the check-in layer and the one popup overlay.
pub struct MapComposer {
    tiles: HttpTiles,
    memory: MapMemory,
    center: walkers::Position,
    attribution: &'static str,
    dataset: Arc<Dataset>,
    style: MarkerStyle,
    frame: Arc<Mutex<FrameState>>,
    overlay: PopupOverlay,
}

impl std::fmt::Debug for MapComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapComposer")
            .field("checkins", &self.dataset.len())
            .field("overlay", &self.overlay)
            .finish_non_exhaustive()
    }
}

impl MapComposer {
    /// Build the map. The view starts at `options.center` / `options.zoom`
    /// and is never refit to the data.
    pub fn initialize(ctx: &egui::Context, options: MapOptions, dataset: Dataset) -> Self {
        let source = UrlTemplateSource::new(options.tile_url.clone(), &options.tile_attribution);
        let attribution = source.attribution_text();

        let http_options = HttpOptions {
            cache: options.cache_dir.clone(),
            ..Default::default()
        };
        let tiles = HttpTiles::with_options(source, http_options, ctx.clone());

        let mut memory = MapMemory::default();
        if let Err(e) = memory.set_zoom(options.zoom) {
            warn!("Initial zoom {} rejected: {:?}", options.zoom, e);
        }

        info!(
            "Map ready: {} check-ins, tiles from {}, view at {:.4},{:.4} z{}",
            dataset.len(),
            options.tile_url,
            options.center.lat,
            options.center.lon,
            options.zoom
        );

        Self {
            tiles,
            memory,
            center: position(options.center),
            attribution,
            dataset: Arc::new(dataset),
            style: options.marker,
            frame: Arc::new(Mutex::new(FrameState::default())),
            overlay: PopupOverlay::default(),
        }
    }

    /// Paint the map into `ui`. Returns the click, if the map itself was
    /// clicked this frame.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<MapClick> {
        let plugin = CheckinMarkersPlugin::new(
            Arc::clone(&self.dataset),
            self.style,
            self.overlay.anchor(),
            Arc::clone(&self.frame),
        );

        let map = Map::new(Some(&mut self.tiles), &mut self.memory, self.center)
            .with_plugin(plugin);
        let response = ui.add(map);

        // Attribution (required by the tile provider)
        ui.painter().text(
            response.rect.right_bottom() + egui::vec2(-10.0, -10.0),
            egui::Align2::RIGHT_BOTTOM,
            self.attribution,
            egui::FontId::proportional(10.0),
            egui::Color32::from_black_alpha(180),
        );

        match self.frame.lock() {
            Ok(mut frame) => frame.click.take().map(|pixel| MapClick { pixel }),
            Err(e) => {
                warn!("Marker frame state unavailable, dropping click: {e}");
                None
            }
        }
    }

    /// Check-ins painted under `pixel` in the last frame, topmost first.
    pub fn features_at_pixel(&self, pixel: ScreenPoint) -> HitSet {
        match self.frame.lock() {
            Ok(frame) => frame.layout.hits_at(pixel, self.style.hit_radius()),
            Err(e) => {
                warn!("Marker frame state unavailable, no hits at {pixel:?}: {e}");
                HitSet::default()
            }
        }
    }

    pub fn overlay_mut(&mut self) -> &mut PopupOverlay {
        &mut self.overlay
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Paint the popup at its anchor. If the anchor was set after the map
    /// was painted this frame, its screen position is not known yet and the
    /// popup waits for the next frame.
    pub fn paint_overlay(&self, ctx: &egui::Context) -> Option<PopupAction> {
        if !self.overlay.is_visible() {
            return None;
        }
        let anchor = self.overlay.anchor()?;
        let projected = self.frame.lock().ok().and_then(|frame| frame.anchor);

        match projected {
            Some((coordinate, at)) if coordinate == anchor => self.overlay.paint(ctx, at),
            _ => {
                ctx.request_repaint();
                None
            }
        }
    }
}
