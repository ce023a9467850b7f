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

//! Marker appearance.

use serde::{Deserialize, Serialize};

/// An sRGB color with straight (unmultiplied) alpha in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha as a byte, clamped.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "clamped to 0..=255")]
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

/// Filled circle with a stroke, drawn for every check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Circle radius in screen points.
    pub radius: f32,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius: 5.0,
            fill: Rgba::rgba(242, 142, 28, 0.6),
            stroke: Rgba::rgb(242, 142, 28),
            stroke_width: 1.0,
        }
    }
}

impl MarkerStyle {
    /// Outer edge of the painted marker, stroke included.
    #[must_use]
    pub fn hit_radius(&self) -> f32 {
        self.radius + self.stroke_width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker_style() {
        let style = MarkerStyle::default();
        assert!((style.radius - 5.0).abs() < f32::EPSILON);
        assert_eq!(style.fill.alpha_u8(), 153);
        assert_eq!(style.stroke.alpha_u8(), 255);
        assert!((style.hit_radius() - 5.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(Rgba::rgba(0, 0, 0, 2.0).alpha_u8(), 255);
        assert_eq!(Rgba::rgba(0, 0, 0, -1.0).alpha_u8(), 0);
    }
}
