//! # Rendering Module
//!
//! Pure frame builders plus the macroquad surface that paints them.
//!
//! [`ProjectionRenderer`] and [`MiniMapProjector`] turn a
//! [`FrameSnapshot`](crate::FrameSnapshot) into plain data
//! ([`ColumnBuffer`], [`MiniMapFrame`]); only [`MacroquadDisplay`] and
//! the [`UI`] overlays touch the window.

pub mod display;
pub mod lighting;
pub mod minimap;
pub mod raycast;
pub mod ui;

pub use display::*;
pub use lighting::*;
pub use minimap::*;
pub use raycast::*;
pub use ui::*;

use serde::{Deserialize, Serialize};

/// Ambient and torch slider values, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub ambient: f32,
    pub torch: f32,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            ambient: 0.3,
            torch: 0.7,
        }
    }
}

impl LightSettings {
    /// Creates settings with both sliders clamped into `[0, 1]`.
    pub fn new(ambient: f32, torch: f32) -> Self {
        Self {
            ambient: clamp_unit(ambient),
            torch: clamp_unit(torch),
        }
    }

    /// Nudges both sliders, snapping to tenths so repeated key presses do
    /// not drift.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::LightSettings;
    ///
    /// let lights = LightSettings::new(0.9, 0.0).adjusted(0.1, -0.1);
    /// assert_eq!(lights, LightSettings::new(1.0, 0.0));
    /// let lights = lights.adjusted(0.1, 0.0);
    /// assert_eq!(lights.ambient, 1.0);
    /// ```
    pub fn adjusted(self, ambient_delta: f32, torch_delta: f32) -> Self {
        Self::new(
            snap_tenth(self.ambient + ambient_delta),
            snap_tenth(self.torch + torch_delta),
        )
    }
}

fn snap_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Projection renderer tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Horizontal field of view, radians
    pub field_of_view: f32,
    /// Strip width in device pixels
    pub strip_width: f32,
    /// Ray march increment, cells
    pub ray_step: f32,
    /// Longest ray, cells
    pub max_range: f32,
    /// Slice height at distance 1, as a fraction of the viewport height
    pub wall_scale: f32,
    /// Share of the slice painted with the top band
    pub top_band: f32,
    /// Share of the slice painted with the mid band; bottom takes the rest
    pub mid_band: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            field_of_view: 66.0_f32.to_radians(),
            strip_width: 4.0,
            ray_step: 0.08,
            max_range: 30.0,
            wall_scale: 1.0,
            top_band: 0.22,
            mid_band: 0.56,
        }
    }
}

/// Drawing area in logical pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpi_scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpi_scale: 1.0,
        }
    }

    pub fn with_dpi_scale(mut self, dpi_scale: f32) -> Self {
        self.dpi_scale = dpi_scale;
        self
    }

    /// Converts device pixels to logical pixels. Non-positive scales count
    /// as 1.
    pub fn to_logical(&self, device_pixels: f32) -> f32 {
        if self.dpi_scale > 0.0 && self.dpi_scale.is_finite() {
            device_pixels / self.dpi_scale
        } else {
            device_pixels
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_settings_clamped() {
        let lights = LightSettings::new(-1.0, 4.0);
        assert_eq!(lights.ambient, 0.0);
        assert_eq!(lights.torch, 1.0);
        assert_eq!(LightSettings::new(f32::NAN, 0.5).ambient, 0.0);
    }

    #[test]
    fn test_repeated_steps_do_not_drift() {
        let mut lights = LightSettings::new(0.0, 0.0);
        for _ in 0..3 {
            lights = lights.adjusted(0.1, 0.0);
        }
        assert_eq!(lights.ambient, 0.3);
    }

    #[test]
    fn test_viewport_dpi() {
        let viewport = Viewport::new(800.0, 600.0).with_dpi_scale(2.0);
        assert_eq!(viewport.to_logical(4.0), 2.0);
        assert_eq!(Viewport::new(1.0, 1.0).with_dpi_scale(0.0).to_logical(4.0), 4.0);
        assert!(Viewport::new(0.0, 600.0).is_empty());
        assert!(!viewport.is_empty());
    }
}
