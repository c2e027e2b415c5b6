//! # Generation Module
//!
//! Procedural content for the exploration layer: the maze itself and the
//! monster table random encounters draw from.
//!
//! Generation is unseeded by design. Callers pass any [`rand::Rng`]; the engine
//! hands in an entropy-seeded generator, tests may hand in a seeded one.

pub mod dungeon;
pub mod encounters;

pub use dungeon::*;
pub use encounters::*;

use crate::config::{DEFAULT_DUNGEON_HEIGHT, DEFAULT_DUNGEON_WIDTH};
use crate::game::Position;
use crate::DelveResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for maze generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Number of rooms the placer tries to reach
    pub room_target: usize,
    /// Rejection-sampling budget shared by all rooms
    pub placement_attempts: usize,
    /// Smallest room edge in cells
    pub min_room_size: u32,
    /// Largest room edge as a fraction of the grid dimension
    pub max_room_fraction: f64,
    /// Free cells kept between accepted rooms
    pub room_margin: u32,
    /// Number of drunkard walks carved after the corridors
    pub tunnel_count: usize,
    /// Shortest drunkard walk
    pub min_tunnel_length: u32,
    /// Longest drunkard walk
    pub max_tunnel_length: u32,
}

impl GenerationConfig {
    /// Reference configuration for a grid of the given size.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(50, 50);
    /// assert_eq!(config.room_target, 6);
    /// assert_eq!(config.placement_attempts, 200);
    /// ```
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            room_target: 6,
            placement_attempts: 200,
            min_room_size: 3,
            max_room_fraction: 0.2,
            room_margin: 1,
            tunnel_count: 150,
            min_tunnel_length: 3,
            max_tunnel_length: 20,
        }
    }

    /// Largest room edge for a grid dimension.
    pub(crate) fn max_room_size(&self, dimension: usize) -> u32 {
        let scaled = (dimension as f64 * self.max_room_fraction) as u32;
        scaled.max(self.min_room_size.max(1))
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DUNGEON_WIDTH, DEFAULT_DUNGEON_HEIGHT)
    }
}

/// An axis-aligned room, used only while the grid is being carved.
///
/// Every cell inside the rectangle becomes floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Placement order, starting at zero
    pub id: u32,
    /// Top-left floor cell
    pub top_left: Position,
    pub width: u32,
    pub height: u32,
}

impl Room {
    /// Creates a new room.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Position, Room};
    ///
    /// let room = Room::new(0, Position::new(5, 5), 4, 3);
    /// assert_eq!(room.center(), Position::new(7, 6));
    /// assert!(room.contains(Position::new(8, 7)));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// Gets the center cell of the room.
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room, grown by `margin` cells on every side, overlaps another.
    pub fn overlaps_with_margin(&self, other: &Room, margin: u32) -> bool {
        let m = margin as i32;
        let left = self.top_left.x - m;
        let top = self.top_left.y - m;
        let right = self.top_left.x + self.width as i32 + m;
        let bottom = self.top_left.y + self.height as i32 + m;

        !(left >= other.top_left.x + other.width as i32
            || other.top_left.x >= right
            || top >= other.top_left.y + other.height as i32
            || other.top_left.y >= bottom)
    }

    /// Checks if this room overlaps another with no spacing.
    pub fn overlaps(&self, other: &Room) -> bool {
        self.overlaps_with_margin(other, 0)
    }

    /// Gets all positions within this room.
    pub fn positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);
        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// Trait for procedural generators.
///
/// Generators cannot fail: degenerate inputs produce degenerate but valid
/// content. `validate` checks the invariants the content promises.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> T;

    /// Validates that the generated content meets its invariants.
    fn validate(&self, content: &T, config: &GenerationConfig) -> DelveResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates an entropy-seeded random number generator.
    pub fn create_rng() -> StdRng {
        StdRng::from_entropy()
    }

    /// Creates a seeded generator, for tests and debugging sessions.
    pub fn seeded_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.width, 50);
        assert_eq!(config.height, 50);
        assert_eq!(config.room_target, 6);
        assert_eq!(config.tunnel_count, 150);
        assert_eq!(config.max_room_size(50), 10);
    }

    #[test]
    fn test_max_room_size_never_below_min() {
        let config = GenerationConfig::new(10, 10);
        assert_eq!(config.max_room_size(10), 3);
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(1, Position::new(5, 5), 10, 8);

        assert_eq!(room.center(), Position::new(10, 9));
        assert_eq!(room.area(), 80);
        assert_eq!(room.positions().len(), 80);

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
    }

    #[test]
    fn test_room_overlap() {
        let room1 = Room::new(1, Position::new(5, 5), 10, 8);
        let room2 = Room::new(2, Position::new(10, 8), 6, 6);
        let room3 = Room::new(3, Position::new(20, 20), 5, 5);

        assert!(room1.overlaps(&room2));
        assert!(room2.overlaps(&room1));
        assert!(!room1.overlaps(&room3));
        assert!(!room3.overlaps(&room1));
    }

    #[test]
    fn test_room_margin() {
        let room1 = Room::new(0, Position::new(1, 1), 3, 3);
        // Touching edge to edge: x 1..=3 and 4..=6
        let touching = Room::new(1, Position::new(4, 1), 3, 3);
        // One free column between them
        let spaced = Room::new(2, Position::new(5, 1), 3, 3);

        assert!(!room1.overlaps(&touching));
        assert!(room1.overlaps_with_margin(&touching, 1));
        assert!(!room1.overlaps_with_margin(&spaced, 1));
    }
}
