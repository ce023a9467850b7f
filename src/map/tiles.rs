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

use walkers::sources::{Attribution, TileSource};
use walkers::TileId;

const SUBDOMAINS: [char; 3] = ['a', 'b', 'c'];

/// Base map tile source built from a URL template.
///
/// `{z}`, `{x}` and `{y}` are replaced with the tile id. `{s}` picks a
/// subdomain (a, b, c) from the tile coordinates to spread load.
pub struct UrlTemplateSource {
    template: String,
    attribution: &'static str,
}

impl UrlTemplateSource {
    /// The attribution text is leaked once; sources live for the whole run.
    pub fn new(template: impl Into<String>, attribution: &str) -> Self {
        Self {
            template: template.into(),
            attribution: Box::leak(attribution.to_owned().into_boxed_str()),
        }
    }

    pub fn attribution_text(&self) -> &'static str {
        self.attribution
    }
}

impl TileSource for UrlTemplateSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        let subdomain = SUBDOMAINS[((tile_id.x + tile_id.y) % 3) as usize];

        self.template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", &tile_id.zoom.to_string())
            .replace("{x}", &tile_id.x.to_string())
            .replace("{y}", &tile_id.y.to_string())
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: self.attribution,
            url: "https://www.openstreetmap.org/copyright",
            logo_light: None,
            logo_dark: None,
        }
    }

    // tile_size() and max_zoom() keep the walkers defaults (256px, z19)
}
