//! # Dungeon Generation
//!
//! Maze layout generation in three passes:
//! 1. Place rooms by rejection sampling
//! 2. Connect consecutive rooms with L-shaped corridors
//! 3. Carve drunkard-walk tunnels for texture
//!
//! The outer ring is sealed last, so no pass can breach it. Corridors link
//! rooms in placement order only; the room graph is a path, and tunnel
//! fragments may dead-end.

use crate::game::{Cell, Grid, Position};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::{DelveError, DelveResult};
use log::{debug, info};
use rand::Rng;

/// Grid plus the rooms it was carved from.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    /// Accepted rooms in placement order
    pub rooms: Vec<Room>,
}

impl Layout {
    /// Preferred spawn cell: the first room's center, else any floor cell.
    pub fn spawn_cell(&self) -> Option<Position> {
        self.rooms
            .first()
            .map(Room::center)
            .or_else(|| self.grid.floor_positions().next())
    }
}

/// Room-corridor-tunnel maze generator.
#[derive(Debug, Clone, Default)]
pub struct MazeGenerator;

impl MazeGenerator {
    /// Creates a new maze generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{GenerationConfig, Generator, MazeGenerator};
    ///
    /// let generator = MazeGenerator::new();
    /// let mut rng = rand::thread_rng();
    /// let grid = generator.generate(&GenerationConfig::new(30, 20), &mut rng);
    /// assert_eq!(grid.width(), 30);
    /// assert!(generator.validate(&grid, &GenerationConfig::new(30, 20)).is_ok());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Generates the grid and keeps the accepted rooms.
    pub fn generate_layout<R: Rng + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Layout {
        let mut grid = Grid::filled(config.width, config.height, Cell::Wall);

        // Nothing fits inside a border ring this thin
        if config.width < 3 || config.height < 3 {
            return Layout {
                grid,
                rooms: Vec::new(),
            };
        }

        let rooms = self.place_rooms(&mut grid, config, rng);
        self.connect_rooms(&mut grid, &rooms);
        self.carve_tunnels(&mut grid, config, rng);
        grid.seal_border();

        info!(
            "Generated {}x{} maze: {} rooms, {} floor cells",
            config.width,
            config.height,
            rooms.len(),
            grid.floor_count()
        );

        Layout { grid, rooms }
    }

    /// Places rooms by rejection sampling until the target or the budget runs out.
    fn place_rooms<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Vec<Room> {
        let mut rooms: Vec<Room> = Vec::new();

        for _ in 0..config.placement_attempts {
            if rooms.len() >= config.room_target {
                break;
            }

            let Some(candidate) = self.room_candidate(grid, config, rng, rooms.len() as u32)
            else {
                continue;
            };

            if rooms
                .iter()
                .any(|existing| candidate.overlaps_with_margin(existing, config.room_margin))
            {
                continue;
            }

            self.carve_room(grid, &candidate);
            rooms.push(candidate);
        }

        if rooms.len() < config.room_target {
            debug!(
                "Placement budget exhausted with {}/{} rooms",
                rooms.len(),
                config.room_target
            );
        }

        rooms
    }

    /// Draws a random room that fits inside the border, if the drawn size allows one.
    fn room_candidate<R: Rng + ?Sized>(
        &self,
        grid: &Grid,
        config: &GenerationConfig,
        rng: &mut R,
        room_id: u32,
    ) -> Option<Room> {
        let min_size = config.min_room_size.max(1);
        let width = rng.gen_range(min_size..=config.max_room_size(grid.width()));
        let height = rng.gen_range(min_size..=config.max_room_size(grid.height()));

        if width as usize + 2 > grid.width() || height as usize + 2 > grid.height() {
            return None;
        }

        let x = rng.gen_range(1..=(grid.width() - width as usize - 1)) as i32;
        let y = rng.gen_range(1..=(grid.height() - height as usize - 1)) as i32;

        Some(Room::new(room_id, Position::new(x, y), width, height))
    }

    /// Carves out a room by setting all of its cells to floor.
    fn carve_room(&self, grid: &mut Grid, room: &Room) {
        for pos in room.positions() {
            grid.set(pos, Cell::Floor);
        }
    }

    /// Links each room to the next one in placement order.
    fn connect_rooms(&self, grid: &mut Grid, rooms: &[Room]) {
        for pair in rooms.windows(2) {
            self.carve_l_corridor(grid, pair[0].center(), pair[1].center());
        }
    }

    /// Carves an L-shaped corridor: walk x toward the target, then y.
    pub(crate) fn carve_l_corridor(&self, grid: &mut Grid, start: Position, end: Position) {
        let mut pos = start;
        grid.set(pos, Cell::Floor);

        while pos.x != end.x {
            pos.x += (end.x - pos.x).signum();
            grid.set(pos, Cell::Floor);
        }
        while pos.y != end.y {
            pos.y += (end.y - pos.y).signum();
            grid.set(pos, Cell::Floor);
        }
    }

    /// Random walks along one axis, clamped off the border.
    fn carve_tunnels<R: Rng + ?Sized>(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut R,
    ) {
        let max_x = grid.width() as i32 - 2;
        let max_y = grid.height() as i32 - 2;
        let shortest = config.min_tunnel_length.min(config.max_tunnel_length);
        let longest = config.min_tunnel_length.max(config.max_tunnel_length);

        for _ in 0..config.tunnel_count {
            let mut pos = Position::new(rng.gen_range(1..=max_x), rng.gen_range(1..=max_y));
            let length = rng.gen_range(shortest..=longest);
            let horizontal = rng.gen_bool(0.5);

            for _ in 0..length {
                grid.set(pos, Cell::Floor);
                let step = if rng.gen_bool(0.5) { 1 } else { -1 };
                if horizontal {
                    pos.x = (pos.x + step).clamp(1, max_x);
                } else {
                    pos.y = (pos.y + step).clamp(1, max_y);
                }
            }
        }
    }
}

impl Generator<Grid> for MazeGenerator {
    fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Grid {
        self.generate_layout(config, rng).grid
    }

    fn validate(&self, grid: &Grid, config: &GenerationConfig) -> DelveResult<()> {
        if grid.width() != config.width || grid.height() != config.height {
            return Err(DelveError::InvalidGrid(format!(
                "expected {}x{}, got {}x{}",
                config.width,
                config.height,
                grid.width(),
                grid.height()
            )));
        }

        if let Some(breach) = grid.border_positions().find(|pos| grid.is_floor(*pos)) {
            return Err(DelveError::InvalidGrid(format!(
                "border breached at ({}, {})",
                breach.x, breach.y
            )));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "MazeGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::seeded_rng;
    use crate::utils::is_reachable;

    #[test]
    fn test_default_generation() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::default();
        let mut rng = seeded_rng(12345);

        let layout = generator.generate_layout(&config, &mut rng);
        assert_eq!(layout.grid.width(), 50);
        assert_eq!(layout.grid.height(), 50);
        assert!(!layout.rooms.is_empty());
        assert!(layout.rooms.len() <= config.room_target);
        assert!(generator.validate(&layout.grid, &config).is_ok());
    }

    #[test]
    fn test_rooms_keep_margin() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::default();
        let mut rng = seeded_rng(7);

        let layout = generator.generate_layout(&config, &mut rng);
        for (i, a) in layout.rooms.iter().enumerate() {
            for b in &layout.rooms[i + 1..] {
                assert!(!a.overlaps_with_margin(b, config.room_margin));
            }
        }
    }

    #[test]
    fn test_rooms_are_floor() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig {
            tunnel_count: 0,
            ..GenerationConfig::default()
        };
        let mut rng = seeded_rng(99);

        let layout = generator.generate_layout(&config, &mut rng);
        for room in &layout.rooms {
            assert!(room.positions().iter().all(|pos| layout.grid.is_floor(*pos)));
        }
    }

    #[test]
    fn test_consecutive_rooms_connected() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig {
            tunnel_count: 0,
            ..GenerationConfig::default()
        };

        for seed in 0..20 {
            let mut rng = seeded_rng(seed);
            let layout = generator.generate_layout(&config, &mut rng);
            for pair in layout.rooms.windows(2) {
                assert!(is_reachable(&layout.grid, pair[0].center(), pair[1].center()));
            }
        }
    }

    #[test]
    fn test_l_corridor_goes_x_first() {
        let generator = MazeGenerator::new();
        let mut grid = Grid::filled(20, 20, Cell::Wall);

        generator.carve_l_corridor(&mut grid, Position::new(5, 5), Position::new(15, 12));

        // Horizontal leg on the start row, vertical leg on the end column
        assert!(grid.is_floor(Position::new(10, 5)));
        assert!(grid.is_floor(Position::new(15, 5)));
        assert!(grid.is_floor(Position::new(15, 9)));
        assert!(grid.is_floor(Position::new(15, 12)));
        assert!(!grid.is_floor(Position::new(5, 12)));
        assert_eq!(grid.floor_count(), 11 + 7);
    }

    #[test]
    fn test_degenerate_grid_is_all_wall() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(2, 8);
        let mut rng = seeded_rng(1);

        let layout = generator.generate_layout(&config, &mut rng);
        assert_eq!(layout.grid.floor_count(), 0);
        assert!(layout.rooms.is_empty());
        assert!(layout.spawn_cell().is_none());
    }

    #[test]
    fn test_zero_budget_still_tunnels() {
        let generator = MazeGenerator::new();
        let mut config = GenerationConfig::new(20, 20);
        config.placement_attempts = 0;
        let mut rng = seeded_rng(3);

        let layout = generator.generate_layout(&config, &mut rng);
        assert!(layout.rooms.is_empty());
        assert!(layout.grid.floor_count() > 0);
        assert!(layout.spawn_cell().is_some());
        assert!(generator.validate(&layout.grid, &config).is_ok());
    }

    #[test]
    fn test_generator_type() {
        assert_eq!(MazeGenerator::new().generator_type(), "MazeGenerator");
    }
}
