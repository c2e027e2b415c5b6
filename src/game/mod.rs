//! # Game Module
//!
//! The exploration engine and the state machines layered on top of it:
//! - Grid cells and the immutable exploration grid
//! - Player pose and wall-checked motion
//! - Random encounters and negotiation
//! - The tactical battle resolver
//! - [`GameState`], which owns all of the above and routes input by mode

pub mod battle;
pub mod encounter;
pub mod motion;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod world;

pub use battle::*;
pub use encounter::*;
pub use motion::*;
pub use state::*;
pub use world::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Represents an integer cell coordinate, on the exploration grid or the
/// tactical grid.
///
/// # Examples
///
/// ```
/// use delve::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.chebyshev_distance(Position::new(11, 7)), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Calculates the Chebyshev distance to another position.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        crate::utils::chebyshev_distance(self.x - other.x, self.y - other.y)
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::all()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }

    /// Clamps both coordinates into `[min, max]`.
    pub fn clamped(self, min: i32, max: i32) -> Self {
        Self::new(self.x.clamp(min, max), self.y.clamp(min, max))
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Cardinal directions for tactical movement. North is toward smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns all 4 directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::West,
            Direction::East,
            Direction::South,
        ]
    }
}

/// Source of randomness for encounters and battles.
///
/// Blanket-implemented for every [`rand::Rng`], so the engine runs on an
/// entropy-seeded generator while tests script exact outcomes.
pub trait Dice {
    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform integer in `low..=high`.
    fn roll(&mut self, low: u32, high: u32) -> u32;

    /// Uniform index in `0..len`. `len` must be positive.
    fn pick(&mut self, len: usize) -> usize;

    /// True when a uniform draw falls below `probability`.
    fn chance(&mut self, probability: f64) -> bool {
        self.uniform() < probability
    }
}

impl<R: Rng + ?Sized> Dice for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn roll(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            low
        } else {
            self.gen_range(low..=high)
        }
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            0
        } else {
            self.gen_range(0..len)
        }
    }
}
