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

//! The map's single popup overlay.

use checkin_core::{Coordinate, PageView, PopupSurface, ScreenPoint, SessionId};
use eframe::egui;

/// Gap between the anchor point and the popup's bottom edge
const ANCHOR_OFFSET: f32 = 12.0;
const POPUP_WIDTH: f32 = 220.0;

/// A control activated inside the popup this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    Prev(SessionId),
    Next(SessionId),
    Close,
}

/// Popup pinned to a map coordinate.
///
/// Content and anchor are set by the click resolver through
/// [`PopupSurface`]; painting rebuilds the controls from the current view
/// every frame, so only the live session's controls can ever be clicked.
#[derive(Debug, Default)]
pub struct PopupOverlay {
    anchor: Option<Coordinate>,
    view: Option<PageView>,
}

impl PopupSurface for PopupOverlay {
    fn show(&mut self, anchor: Coordinate, view: PageView) {
        self.anchor = Some(anchor);
        self.view = Some(view);
    }

    fn hide(&mut self) {
        self.anchor = None;
        self.view = None;
    }
}

impl PopupOverlay {
    pub fn is_visible(&self) -> bool {
        self.view.is_some()
    }

    pub fn anchor(&self) -> Option<Coordinate> {
        self.anchor
    }

    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    /// Paint the popup with its tail at `at` and report any activated control.
    pub fn paint(&self, ctx: &egui::Context, at: ScreenPoint) -> Option<PopupAction> {
        let view = self.view()?;
        let mut action = None;

        let area = egui::Area::new(egui::Id::new("checkin_popup"))
            .order(egui::Order::Foreground)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .fixed_pos(egui::pos2(at.x, at.y - ANCHOR_OFFSET))
            .show(ctx, |ui| {
                egui::Frame::window(&ctx.style())
                    .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 235))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        ui.set_width(POPUP_WIDTH);
                        action = Self::contents(ui, view);
                    });
            });

        area.response.context_menu(|ui| {
            if ui.button("Copy as HTML").clicked() {
                ui.ctx().copy_text(view.html());
                ui.close();
            }
        });

        // Tail from the popup down to the anchor point
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("checkin_popup_tail"),
        ));
        painter.line_segment(
            [
                egui::pos2(at.x, at.y - ANCHOR_OFFSET),
                egui::pos2(at.x, at.y),
            ],
            egui::Stroke::new(1.5, egui::Color32::from_rgb(60, 80, 100)),
        );

        action
    }

    fn contents(ui: &mut egui::Ui, view: &PageView) -> Option<PopupAction> {
        let mut action = None;
        let text_color = egui::Color32::from_rgb(200, 220, 255);
        let dim_color = egui::Color32::from_rgb(150, 150, 150);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&view.beer_name)
                .color(text_color)
                .size(13.0)
                .strong());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    action = Some(PopupAction::Close);
                }
            });
        });

        ui.label(egui::RichText::new(view.brewery_line()).color(text_color).size(11.0));
        if let Some(venue) = view.venue_line() {
            ui.label(egui::RichText::new(venue).color(text_color).size(11.0));
        }
        ui.label(egui::RichText::new(view.date_line()).color(dim_color).size(10.0));

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui.add_enabled(view.has_prev(), egui::Button::new("<")).clicked() {
                action = Some(PopupAction::Prev(view.session));
            }
            ui.label(egui::RichText::new(view.label())
                .color(dim_color)
                .size(10.0)
                .monospace());
            if ui.add_enabled(view.has_next(), egui::Button::new(">")).clicked() {
                action = Some(PopupAction::Next(view.session));
            }
        });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkin_core::{ClickResolver, Dataset, HitSet};

    fn hits() -> HitSet {
        let dataset = Dataset::from_geojson_str(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [4.9, 52.37] },
                        "properties": {
                            "beer_name": "Tripel",
                            "brewery_name": "Abbey",
                            "created_at": "2020-01-02 03:04:05"
                        }
                    },
                    {
                        "type": "Feature",
                        "geometry": { "type": "Point", "coordinates": [4.9, 52.37] },
                        "properties": {
                            "beer_name": "Dubbel",
                            "brewery_name": "Abbey",
                            "venue_name": "Proeflokaal",
                            "created_at": "2020-01-03 03:04:05"
                        }
                    }
                ]
            }"#,
        )
        .unwrap();
        dataset.iter().rev().cloned().collect()
    }

    #[test]
    fn test_overlay_follows_resolver() {
        let mut resolver = ClickResolver::new();
        let mut overlay = PopupOverlay::default();
        assert!(!overlay.is_visible());

        resolver.handle_click(hits(), &mut overlay);
        assert!(overlay.is_visible());
        assert_eq!(overlay.anchor(), Some(Coordinate::new(4.9, 52.37)));

        let view = overlay.view().unwrap();
        assert_eq!(view.beer_name, "Dubbel");
        assert_eq!(view.venue_line().as_deref(), Some("at Proeflokaal"));
        let session = view.session;

        resolver.next(session, &mut overlay);
        assert_eq!(overlay.view().unwrap().beer_name, "Tripel");
        assert_eq!(overlay.view().unwrap().date_line(), "on Jan 02, 2020");

        resolver.handle_click(HitSet::default(), &mut overlay);
        assert!(!overlay.is_visible());
        assert_eq!(overlay.anchor(), None);
    }

    #[test]
    fn test_hidden_overlay_paints_nothing() {
        let ctx = egui::Context::default();
        let overlay = PopupOverlay::default();
        let mut action = Some(PopupAction::Close);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = overlay.paint(ctx, ScreenPoint::new(10.0, 10.0));
        });
        assert_eq!(action, None);
    }
}
