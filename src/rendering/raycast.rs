//! # Projection Renderer
//!
//! Fixed-step ray marching over the exploration grid. Each vertical strip of
//! the viewport casts one ray; the fisheye-corrected distance sets the slice
//! height and feeds the lighting model. The output is a [`ColumnBuffer`] that
//! the display paints without further computation.

use crate::game::{Grid, Pose};
use crate::rendering::{BandShades, LightSettings, LightingConfig, RenderConfig, Viewport, MIN_LIGHT_DISTANCE};
use serde::Serialize;

/// Mid-band grey above which a slice gets a highlight line on top.
pub const HIGHLIGHT_THRESHOLD: u8 = 150;

/// 8-bit RGBA color, independent of any graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn grey(value: u8) -> Self {
        Self::new(value, value, value, 255)
    }
}

pub const SKY_UPPER: Rgba = Rgba::new(18, 20, 34, 255);
pub const SKY_LOWER: Rgba = Rgba::new(36, 38, 56, 255);
pub const FLOOR: Rgba = Rgba::new(44, 36, 30, 255);
pub const RIM: Rgba = Rgba::new(0, 0, 0, 70);
pub const HIGHLIGHT: Rgba = Rgba::new(245, 245, 235, 255);
pub const CROSSHAIR: Rgba = Rgba::new(230, 230, 230, 200);

/// One painted band of a wall slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandSpan {
    pub y: f32,
    pub height: f32,
    pub color: Rgba,
}

/// A single wall strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallColumn {
    pub x: f32,
    pub width: f32,
    /// Strip center position in `[-1, 1]`
    pub camera_offset: f32,
    /// Distance along the ray before correction
    pub raw_distance: f32,
    /// Perpendicular distance after fisheye correction
    pub distance: f32,
    pub top: f32,
    pub height: f32,
    pub shades: BandShades,
    /// Top, mid and bottom bands in painting order
    pub bands: [BandSpan; 3],
    pub highlight: bool,
}

/// Crosshair at the viewport center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Crosshair {
    pub x: f32,
    pub y: f32,
    pub half_size: f32,
    pub color: Rgba,
}

/// Everything needed to paint the first-person view for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBuffer {
    pub width: f32,
    pub height: f32,
    pub sky_upper: Rgba,
    pub sky_lower: Rgba,
    pub floor: Rgba,
    pub rim: Rgba,
    pub highlight: Rgba,
    pub columns: Vec<WallColumn>,
    pub crosshair: Crosshair,
}

/// Marches a ray from `(x, y)` along `angle` and returns the distance to the
/// first wall sample, or `max_range` if nothing is hit.
///
/// Off-grid samples count as wall, so a ray leaving the map stops there. The
/// shortest possible result is one `step`.
///
/// # Examples
///
/// ```
/// use delve::{cast_ray, Grid};
///
/// let grid = Grid::from_rows(&["#####", "#...#", "#####"]).unwrap();
/// let distance = cast_ray(&grid, 1.5, 1.5, 0.0, 0.1, 30.0);
/// assert!((distance - 2.5).abs() < 0.11);
/// ```
pub fn cast_ray(grid: &Grid, x: f32, y: f32, angle: f32, step: f32, max_range: f32) -> f32 {
    if !(step > 0.0 && step.is_finite()) {
        return MIN_LIGHT_DISTANCE;
    }
    let (dx, dy) = (angle.cos(), angle.sin());
    let samples = (max_range / step).ceil().max(1.0) as usize;
    for i in 1..=samples {
        let distance = step * i as f32;
        if grid.is_wall_at(x + dx * distance, y + dy * distance) {
            return distance;
        }
    }
    max_range.max(step)
}

/// Builds [`ColumnBuffer`]s from the grid and the player's pose.
#[derive(Debug, Clone, Default)]
pub struct ProjectionRenderer {
    pub config: RenderConfig,
    pub lighting: LightingConfig,
}

impl ProjectionRenderer {
    pub fn new(config: RenderConfig, lighting: LightingConfig) -> Self {
        Self { config, lighting }
    }

    /// Renders one frame. An empty viewport yields a buffer with no columns.
    pub fn render(&self, grid: &Grid, pose: &Pose, viewport: Viewport, lights: LightSettings) -> ColumnBuffer {
        let (width, height) = (viewport.width.max(0.0), viewport.height.max(0.0));
        let mut columns = Vec::new();

        if !viewport.is_empty() {
            let strip = viewport.to_logical(self.config.strip_width).max(0.5);
            let count = (width / strip).ceil() as usize;
            columns.reserve(count);
            for i in 0..count {
                let x = i as f32 * strip;
                let strip_width = strip.min(width - x);
                let center = x + strip_width / 2.0;
                let camera_offset = 2.0 * center / width - 1.0;
                columns.push(self.column(grid, pose, x, strip_width, camera_offset, height, lights));
            }
        }

        ColumnBuffer {
            width,
            height,
            sky_upper: SKY_UPPER,
            sky_lower: SKY_LOWER,
            floor: FLOOR,
            rim: RIM,
            highlight: HIGHLIGHT,
            columns,
            crosshair: Crosshair {
                x: width / 2.0,
                y: height / 2.0,
                half_size: 6.0,
                color: CROSSHAIR,
            },
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn column(
        &self,
        grid: &Grid,
        pose: &Pose,
        x: f32,
        width: f32,
        camera_offset: f32,
        viewport_height: f32,
        lights: LightSettings,
    ) -> WallColumn {
        let relative = self.config.field_of_view * camera_offset / 2.0;
        let angle = pose.heading() + relative;
        let raw_distance = cast_ray(grid, pose.x, pose.y, angle, self.config.ray_step, self.config.max_range);
        let distance = (raw_distance * relative.cos()).max(MIN_LIGHT_DISTANCE);

        let height = (viewport_height * self.config.wall_scale / distance).min(viewport_height);
        let top = (viewport_height - height) / 2.0;
        let shades = self.lighting.shade(distance, camera_offset, lights.ambient, lights.torch);

        let top_height = height * self.config.top_band;
        let mid_height = height * self.config.mid_band;
        let bottom_height = (height - top_height - mid_height).max(0.0);
        let bands = [
            BandSpan {
                y: top,
                height: top_height,
                color: Rgba::grey(shades.top),
            },
            BandSpan {
                y: top + top_height,
                height: mid_height,
                color: Rgba::grey(shades.mid),
            },
            BandSpan {
                y: top + top_height + mid_height,
                height: bottom_height,
                color: Rgba::grey(shades.bottom),
            },
        ];

        WallColumn {
            x,
            width,
            camera_offset,
            raw_distance,
            distance,
            top,
            height,
            shades,
            bands,
            highlight: shades.mid > HIGHLIGHT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use std::f32::consts::PI;

    fn open_room() -> Grid {
        let mut rows = vec!["#".repeat(21)];
        for _ in 0..19 {
            rows.push(format!("#{}#", ".".repeat(19)));
        }
        rows.push("#".repeat(21));
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_cast_ray_hits_adjacent_wall_at_min_step() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        let distance = cast_ray(&grid, 1.5, 1.5, 0.0, 0.08, 30.0);
        assert!(distance > 0.5 && distance < 0.6);

        // Standing outside the grid exits on the first sample
        assert_eq!(cast_ray(&grid, -3.0, 1.5, 0.0, 0.08, 30.0), 0.08);
    }

    #[test]
    fn test_cast_ray_bad_step() {
        let grid = open_room();
        assert_eq!(cast_ray(&grid, 5.5, 5.5, 0.0, 0.0, 30.0), MIN_LIGHT_DISTANCE);
    }

    #[test]
    fn test_center_column_needs_no_correction() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(5, 10), 0.0);

        let buffer = renderer.render(&grid, &pose, Viewport::new(12.0, 100.0), LightSettings::default());
        assert_eq!(buffer.columns.len(), 3);

        let center = &buffer.columns[1];
        assert_eq!(center.camera_offset, 0.0);
        assert_eq!(center.distance, center.raw_distance);
        assert_eq!(
            center.raw_distance,
            cast_ray(&grid, pose.x, pose.y, pose.heading(), 0.08, 30.0)
        );
    }

    #[test]
    fn test_flat_wall_has_flat_corrected_distance() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(10, 10), 0.0);

        let buffer = renderer.render(&grid, &pose, Viewport::new(120.0, 100.0), LightSettings::default());
        let first = buffer.columns.first().unwrap();
        let last = buffer.columns.last().unwrap();
        assert!((first.distance - last.distance).abs() < 0.1);
        assert!(first.raw_distance > first.distance);
        assert!((first.camera_offset + last.camera_offset).abs() < 1e-5);
    }

    #[test]
    fn test_slices_centered_and_clipped() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(1, 10), PI);

        let buffer = renderer.render(&grid, &pose, Viewport::new(40.0, 200.0), LightSettings::default());
        for column in &buffer.columns {
            assert!(column.height <= 200.0);
            assert!((column.top * 2.0 + column.height - 200.0).abs() < 1e-3);
            let painted: f32 = column.bands.iter().map(|band| band.height).sum();
            assert!((painted - column.height).abs() < 1e-3);
        }
        assert_eq!(buffer.crosshair.x, 20.0);
        assert_eq!(buffer.crosshair.y, 100.0);
    }

    #[test]
    fn test_band_split_follows_config() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(6, 10), 0.0);

        let buffer = renderer.render(&grid, &pose, Viewport::new(12.0, 1000.0), LightSettings::default());
        let center = &buffer.columns[1];
        assert!(center.height < 1000.0);

        let [top, mid, bottom] = center.bands;
        assert!((top.height - 0.22 * center.height).abs() < 1e-2);
        assert!((mid.height - 0.56 * center.height).abs() < 1e-2);
        assert!((bottom.height - 0.22 * center.height).abs() < 1e-2);
        assert_eq!(top.y, center.top);
        assert!((mid.y - (top.y + top.height)).abs() < 1e-3);
        assert!((bottom.y - (mid.y + mid.height)).abs() < 1e-3);
    }

    #[test]
    fn test_highlight_only_on_bright_slices() {
        let renderer = ProjectionRenderer::default();

        let cell = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        let near = renderer.render(
            &cell,
            &Pose::centered_in(Position::new(1, 1), 0.0),
            Viewport::new(12.0, 100.0),
            LightSettings::new(0.3, 1.0),
        );
        assert!(near.columns[1].shades.mid > HIGHLIGHT_THRESHOLD);
        assert!(near.columns[1].highlight);

        let far = renderer.render(
            &open_room(),
            &Pose::centered_in(Position::new(1, 10), 0.0),
            Viewport::new(12.0, 100.0),
            LightSettings::new(0.0, 0.0),
        );
        assert!(far.columns[1].distance > renderer.lighting.far_plane);
        assert!(!far.columns[1].highlight);

        for column in near.columns.iter().chain(&far.columns) {
            assert_eq!(column.highlight, column.shades.mid > HIGHLIGHT_THRESHOLD);
        }
    }

    #[test]
    fn test_rim_alpha_is_constant() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(10, 10), 0.0);

        for lights in [LightSettings::new(0.0, 0.0), LightSettings::new(1.0, 1.0)] {
            let buffer = renderer.render(&grid, &pose, Viewport::new(40.0, 60.0), lights);
            assert_eq!(buffer.rim, RIM);
            assert_eq!(buffer.rim.a, 70);
        }
    }

    #[test]
    fn test_dpi_scale_narrows_strips() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::centered_in(Position::new(10, 10), 0.0);
        let lights = LightSettings::default();

        let normal = renderer.render(&grid, &pose, Viewport::new(80.0, 60.0), lights);
        let retina = renderer.render(&grid, &pose, Viewport::new(80.0, 60.0).with_dpi_scale(2.0), lights);
        assert_eq!(normal.columns.len(), 20);
        assert_eq!(retina.columns.len(), 40);
    }

    #[test]
    fn test_empty_viewport() {
        let renderer = ProjectionRenderer::default();
        let grid = open_room();
        let pose = Pose::new(5.5, 5.5, 0.0);
        let buffer = renderer.render(&grid, &pose, Viewport::new(0.0, 0.0), LightSettings::default());
        assert!(buffer.columns.is_empty());
    }
}
