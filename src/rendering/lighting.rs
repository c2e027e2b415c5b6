//! # Lighting Model
//!
//! Blends the ambient and torch sliders against ray distance into three grey
//! levels, one per vertical band of a wall slice.

use serde::{Deserialize, Serialize};

/// Shortest distance the model will shade at.
pub const MIN_LIGHT_DISTANCE: f32 = 1e-4;

/// Grey levels for the three bands of one wall slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BandShades {
    pub top: u8,
    pub mid: u8,
    pub bottom: u8,
}

/// Shading parameters for one band.
///
/// `base` is the brightest grey the band reaches. `floor` keeps distant walls
/// from going fully black. `offset` and `slope` map local light to a gain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandProfile {
    pub base: f32,
    pub floor: f32,
    pub offset: f32,
    pub slope: f32,
}

impl BandProfile {
    fn shade(&self, distance_falloff: f32, edge_falloff: f32, local_light: f32) -> u8 {
        let mix = self.floor + (1.0 - self.floor) * distance_falloff;
        let bias = self.offset + self.slope * local_light;
        let value = self.base * mix * edge_falloff * bias;
        if value.is_finite() {
            value.round().clamp(0.0, 255.0) as u8
        } else {
            0
        }
    }
}

/// Lighting tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Distance at which wall brightness reaches its floor
    pub far_plane: f32,
    /// Reach of the torch
    pub near_plane: f32,
    /// Darkening toward the screen edges
    pub edge_darkening: f32,
    pub torch_gain: f32,
    pub top: BandProfile,
    pub mid: BandProfile,
    pub bottom: BandProfile,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            far_plane: 18.0,
            near_plane: 5.0,
            edge_darkening: 0.95,
            torch_gain: 3.0,
            top: BandProfile {
                base: 150.0,
                floor: 0.35,
                offset: 0.45,
                slope: 0.2,
            },
            mid: BandProfile {
                base: 190.0,
                floor: 0.3,
                offset: 0.35,
                slope: 0.4,
            },
            bottom: BandProfile {
                base: 170.0,
                floor: 0.25,
                offset: 0.25,
                slope: 0.6,
            },
        }
    }
}

impl LightingConfig {
    /// Shades one wall slice.
    ///
    /// `distance` is the fisheye-corrected ray length, `camera_offset` the
    /// strip position in `[-1, 1]`. Both sliders are clamped into `[0, 1]`.
    /// Output is non-decreasing in `ambient` and in `torch`.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::LightingConfig;
    ///
    /// let lighting = LightingConfig::default();
    /// let dim = lighting.shade(3.0, 0.0, 0.1, 0.0);
    /// let lit = lighting.shade(3.0, 0.0, 0.1, 1.0);
    /// assert!(lit.mid > dim.mid);
    /// ```
    pub fn shade(&self, distance: f32, camera_offset: f32, ambient: f32, torch: f32) -> BandShades {
        let distance = if distance.is_nan() {
            MIN_LIGHT_DISTANCE
        } else {
            distance.max(MIN_LIGHT_DISTANCE)
        };
        let ambient = unit(ambient);
        let torch = unit(torch);
        let offset = if camera_offset.is_finite() {
            camera_offset.abs()
        } else {
            1.0
        };

        let distance_falloff = (1.0 - distance / self.far_plane).max(0.0);
        let edge_falloff = 1.0 - (offset * self.edge_darkening).min(1.0);
        let torch_contribution = (1.0 - distance / self.near_plane).max(0.0) * torch * self.torch_gain;
        let local_light = torch_contribution + ambient;

        BandShades {
            top: self.top.shade(distance_falloff, edge_falloff, local_light),
            mid: self.mid.shade(distance_falloff, edge_falloff, local_light),
            bottom: self.bottom.shade(distance_falloff, edge_falloff, local_light),
        }
    }
}

fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
