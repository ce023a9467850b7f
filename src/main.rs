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

mod cli;
mod config;
mod map;

use checkin_core::{ClickResolver, Dataset};
use clap::Parser;
use eframe::egui;
use log::{error, info, warn};

use cli::Cli;
use config::AppConfig;
use map::{MapClick, MapComposer, PopupAction};

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    info!("Starting Check-in Map...");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });
    cli.apply(&mut config);

    if cli.save_config {
        match config.save() {
            Ok(()) => {
                if let Ok(path) = AppConfig::get_config_path() {
                    info!("Configuration saved to {}", path.display());
                }
            }
            Err(e) => warn!("Failed to save config: {e}"),
        }
    }

    let (dataset, load_error) = match Dataset::load(&config.data_source) {
        Ok(dataset) => (dataset, None),
        Err(e) => {
            error!("Failed to load check-ins from {}: {e}", config.data_source);
            (Dataset::default(), Some(format!("Failed to load check-ins: {e}")))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Check-in Map"),
        ..Default::default()
    };

    eframe::run_native(
        "Check-in Map",
        options,
        Box::new(move |cc| {
            let composer = MapComposer::initialize(&cc.egui_ctx, config.map_options(), dataset);
            Ok(Box::new(CheckinApp::new(composer, load_error)))
        }),
    )
}

struct CheckinApp {
    composer: MapComposer,
    resolver: ClickResolver,
    load_error: Option<String>,
}

impl CheckinApp {
    fn new(composer: MapComposer, load_error: Option<String>) -> Self {
        Self {
            composer,
            resolver: ClickResolver::new(),
            load_error,
        }
    }

    fn handle_click(&mut self, click: MapClick) {
        let hits = self.composer.features_at_pixel(click.pixel);
        info!(
            "Click at ({:.0}, {:.0}) hit {} check-in(s)",
            click.pixel.x,
            click.pixel.y,
            hits.len()
        );
        self.resolver.handle_click(hits, self.composer.overlay_mut());
    }

    fn handle_popup_action(&mut self, action: PopupAction) {
        let overlay = self.composer.overlay_mut();
        match action {
            PopupAction::Prev(session) => self.resolver.prev(session, overlay),
            PopupAction::Next(session) => self.resolver.next(session, overlay),
            PopupAction::Close => self.resolver.dismiss(overlay),
        };
    }

    fn draw_map(&mut self, ui: &mut egui::Ui) {
        if let Some(click) = self.composer.show(ui) {
            self.handle_click(click);
        }

        let rect = ui.max_rect();
        let painter = ui.painter();

        // Instructions
        painter.text(
            rect.left_top() + egui::vec2(10.0, 10.0),
            egui::Align2::LEFT_TOP,
            "Drag to pan | Scroll to zoom | Click a marker for details",
            egui::FontId::proportional(12.0),
            egui::Color32::BLACK,
        );

        let message = match (&self.load_error, self.composer.dataset().is_empty()) {
            (Some(error), _) => Some((error.as_str(), true)),
            (None, true) => Some(("No check-ins to show", false)),
            (None, false) => None,
        };

        // Error display at the top
        if let Some((message, is_error)) = message {
            let bg_color = if is_error {
                egui::Color32::from_rgb(220, 50, 50)
            } else {
                egui::Color32::from_rgb(255, 200, 100)
            };

            let banner_pos = rect.center_top() + egui::vec2(0.0, 20.0);
            let text_galley = painter.layout_no_wrap(
                message.to_string(),
                egui::FontId::proportional(12.0),
                egui::Color32::WHITE,
            );

            let padding = egui::vec2(12.0, 6.0);
            let bubble_rect =
                egui::Rect::from_center_size(banner_pos, text_galley.size() + padding * 2.0);

            painter.rect_filled(bubble_rect, 5.0, bg_color);
            painter.text(
                banner_pos,
                egui::Align2::CENTER_CENTER,
                message,
                egui::FontId::proportional(12.0),
                egui::Color32::WHITE,
            );
        }
    }
}

impl eframe::App for CheckinApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Map takes full window
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_map(ui);
            });

        if let Some(action) = self.composer.paint_overlay(ctx) {
            self.handle_popup_action(action);
        }
    }
}
