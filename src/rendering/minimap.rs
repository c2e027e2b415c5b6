//! # MiniMap Projector
//!
//! Top-down thumbnail of the whole grid with a player marker and a heading
//! arrow.

use crate::config::MINIMAP_SIZE;
use crate::game::{Grid, Pose};
use crate::rendering::Rgba;
use crate::utils::polar_offset;
use serde::Serialize;
use std::f32::consts::PI;

pub const MINIMAP_WALL: Rgba = Rgba::new(70, 70, 84, 255);
pub const MINIMAP_FLOOR: Rgba = Rgba::new(170, 164, 150, 255);
pub const MINIMAP_PLAYER: Rgba = Rgba::new(220, 60, 50, 255);

/// Back corners of the arrow sit this far either side of the heading.
const ARROW_SPREAD: f32 = 3.0 * PI / 4.0;

/// A filled cell rectangle, relative to the minimap's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MiniMapCell {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

/// Draw list for one minimap frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MiniMapFrame {
    pub size: f32,
    pub cells: Vec<MiniMapCell>,
    /// Player marker center
    pub player: (f32, f32),
    pub player_radius: f32,
    /// Tip, then the two back corners
    pub arrow: [(f32, f32); 3],
}

#[derive(Debug, Clone)]
pub struct MiniMapProjector {
    pub size: f32,
    pub player_radius: f32,
    pub arrow_tip: f32,
    pub arrow_back: f32,
}

impl Default for MiniMapProjector {
    fn default() -> Self {
        Self {
            size: MINIMAP_SIZE,
            player_radius: 2.5,
            arrow_tip: 7.0,
            arrow_back: 4.0,
        }
    }
}

impl MiniMapProjector {
    /// Projects the grid and pose into a `size`×`size` thumbnail.
    pub fn project(&self, grid: &Grid, pose: &Pose) -> MiniMapFrame {
        let cell_width = self.size / grid.width().max(1) as f32;
        let cell_height = self.size / grid.height().max(1) as f32;

        let cells = grid
            .positions()
            .map(|pos| MiniMapCell {
                x: pos.x as f32 * cell_width,
                y: pos.y as f32 * cell_height,
                width: cell_width,
                height: cell_height,
                color: if grid.is_floor(pos) {
                    MINIMAP_FLOOR
                } else {
                    MINIMAP_WALL
                },
            })
            .collect();

        let player = (pose.x * cell_width, pose.y * cell_height);
        let heading = pose.heading();
        let arrow = [
            polar_offset(player.0, player.1, heading, self.arrow_tip),
            polar_offset(player.0, player.1, heading + ARROW_SPREAD, self.arrow_back),
            polar_offset(player.0, player.1, heading - ARROW_SPREAD, self.arrow_back),
        ];

        MiniMapFrame {
            size: self.size,
            cells,
            player,
            player_radius: self.player_radius,
            arrow,
        }
    }
}
