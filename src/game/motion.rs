//! # Motion
//!
//! Player pose and the wall-checked movement rules of exploration mode.

use crate::game::{Grid, Position};
use crate::utils::normalize_angle;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Continuous player position in cell units plus a heading in `[0, 2π)`.
///
/// Heading 0 looks toward `+x`; positive turns rotate toward `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    heading: f32,
}

impl Pose {
    /// Creates a pose, normalizing the heading.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::Pose;
    /// use std::f32::consts::PI;
    ///
    /// let pose = Pose::new(1.5, 2.5, -PI / 2.0);
    /// assert!((pose.heading() - 3.0 * PI / 2.0).abs() < 1e-6);
    /// ```
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: normalize_angle(heading),
        }
    }

    /// Pose standing in the middle of a cell.
    pub fn centered_in(cell: Position, heading: f32) -> Self {
        Self::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5, heading)
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    /// The cell the pose stands in.
    pub fn cell(&self) -> Position {
        Position::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Point `distance` cells along the heading.
    pub fn ahead(&self, distance: f32) -> (f32, f32) {
        (
            self.x + self.heading.cos() * distance,
            self.y + self.heading.sin() * distance,
        )
    }

    /// Same position, heading turned by `delta` radians.
    pub fn turned(&self, delta: f32) -> Self {
        Self::new(self.x, self.y, self.heading + delta)
    }
}

/// Movement tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Cells travelled per keypress
    pub speed: f32,
    /// Rotation per turn key, radians
    pub turn_step: f32,
    /// Rotation per quick-turn key, radians
    pub quick_turn: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            turn_step: PI / 8.0,
            quick_turn: PI / 2.0,
        }
    }
}

/// Forward or backward along the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Forward,
    Backward,
}

impl MoveDirection {
    pub fn multiplier(self) -> f32 {
        match self {
            MoveDirection::Forward => 1.0,
            MoveDirection::Backward => -1.0,
        }
    }
}

/// The four rotation bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
    QuickLeft,
    QuickRight,
}

/// Applies movement and rotation to a pose.
#[derive(Debug, Clone, Default)]
pub struct MotionController {
    pub config: MotionConfig,
}

impl MotionController {
    pub fn new(config: MotionConfig) -> Self {
        Self { config }
    }

    /// Projects the step along the heading and returns the new pose when the
    /// destination cell is floor. A rejected move returns `None`.
    pub fn try_move(&self, grid: &Grid, pose: &Pose, direction: MoveDirection) -> Option<Pose> {
        let (x, y) = pose.ahead(self.config.speed * direction.multiplier());
        if grid.is_wall_at(x, y) {
            return None;
        }
        Some(Pose::new(x, y, pose.heading()))
    }

    /// Turns the pose by the configured increment.
    pub fn rotate(&self, pose: &Pose, turn: Turn) -> Pose {
        let delta = match turn {
            Turn::Left => -self.config.turn_step,
            Turn::Right => self.config.turn_step,
            Turn::QuickLeft => -self.config.quick_turn,
            Turn::QuickRight => self.config.quick_turn,
        };
        pose.turned(delta)
    }
}
