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

//! Check-in marker layer.
//!
//! The plugin paints every check-in as a filled, stroked circle and records
//! what it painted into the shared [`FrameState`], which is how the composer
//! answers "what is under this pixel" once the frame is done.

use std::sync::{Arc, Mutex};

use checkin_core::{Coordinate, Dataset, MarkerLayout, MarkerStyle, Rgba, ScreenPoint};
use eframe::egui;
use walkers::{MapMemory, Plugin, Projector};

/// What the marker layer saw while painting the last frame.
#[derive(Debug, Default)]
pub struct FrameState {
    /// Screen positions of painted markers, in paint order.
    pub layout: MarkerLayout,
    /// Pointer position of a click on the map itself, if any.
    pub click: Option<ScreenPoint>,
    /// Popup anchor and where it landed on screen.
    pub anchor: Option<(Coordinate, ScreenPoint)>,
}

pub fn to_color32(color: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.alpha_u8())
}

pub fn position(coordinate: Coordinate) -> walkers::Position {
    walkers::lat_lon(coordinate.lat, coordinate.lon)
}

/// Walkers plugin drawing the check-in layer.
pub struct CheckinMarkersPlugin {
    dataset: Arc<Dataset>,
    style: MarkerStyle,
    anchor: Option<Coordinate>,
    frame: Arc<Mutex<FrameState>>,
}

impl CheckinMarkersPlugin {
    pub fn new(
        dataset: Arc<Dataset>,
        style: MarkerStyle,
        anchor: Option<Coordinate>,
        frame: Arc<Mutex<FrameState>>,
    ) -> Self {
        Self {
            dataset,
            style,
            anchor,
            frame,
        }
    }
}

impl Plugin for CheckinMarkersPlugin {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let Ok(mut frame) = self.frame.lock() else {
            return;
        };
        frame.layout.clear();
        frame.click = None;
        frame.anchor = None;

        let map_rect = response.rect;
        let painter = ui.painter().with_clip_rect(map_rect);
        let visible = map_rect.expand(self.style.hit_radius());

        let fill = to_color32(self.style.fill);
        let stroke = egui::Stroke::new(self.style.stroke_width, to_color32(self.style.stroke));

        for checkin in self.dataset.iter() {
            let screen = projector.project(position(checkin.location));
            let pos = egui::pos2(screen.x, screen.y);

            // Off-screen markers are not painted, so they cannot be hit either
            if !visible.contains(pos) {
                continue;
            }

            painter.circle_filled(pos, self.style.radius, fill);
            painter.circle_stroke(pos, self.style.radius, stroke);
            frame.layout.push(Arc::clone(checkin), ScreenPoint::new(pos.x, pos.y));
        }

        if let Some(anchor) = self.anchor {
            let screen = projector.project(position(anchor));
            frame.anchor = Some((anchor, ScreenPoint::new(screen.x, screen.y)));
        }

        if response.clicked() {
            frame.click = response
                .interact_pointer_pos()
                .map(|pos| ScreenPoint::new(pos.x, pos.y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors() {
        let style = MarkerStyle::default();
        assert_eq!(
            to_color32(style.fill),
            egui::Color32::from_rgba_unmultiplied(242, 142, 28, 153)
        );
        assert_eq!(to_color32(style.stroke), egui::Color32::from_rgb(242, 142, 28));
    }

    #[test]
    fn test_position_is_lat_lon() {
        let pos = position(Coordinate::new(-0.12, 51.5));
        assert!((pos.x() + 0.12).abs() < f64::EPSILON);
        assert!((pos.y() - 51.5).abs() < f64::EPSILON);
    }
}
