//! # World Representation
//!
//! The exploration grid. A grid is built once, by the maze generator or from
//! text rows, and has no public mutators afterwards. Its outer ring is always
//! wall.

use crate::game::Position;
use crate::{DelveError, DelveResult};
use serde::{Deserialize, Serialize};

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Floor,
}

impl Cell {
    /// Whether the player can stand in this cell.
    pub fn is_passable(self) -> bool {
        self == Cell::Floor
    }

    /// Map glyph used by [`Grid::from_rows`] and [`Grid::to_rows`].
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => '.',
        }
    }
}

/// Rectangular wall/floor grid, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every cell set to `cell`.
    pub(crate) fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    /// Parses a grid from rows of `#` (wall) and `.` (floor).
    ///
    /// The border ring is forced to wall whatever the rows say.
    ///
    /// # Examples
    ///
    /// ```
    /// use delve::{Grid, Position};
    ///
    /// let grid = Grid::from_rows(&[
    ///     "#####",
    ///     "#...#",
    ///     "#####",
    /// ]).unwrap();
    /// assert_eq!(grid.floor_count(), 3);
    /// assert!(grid.is_floor(Position::new(2, 1)));
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> DelveResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(DelveError::InvalidGrid("grid has no cells".to_string()));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(DelveError::InvalidGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '#' => Cell::Wall,
                    '.' => Cell::Floor,
                    other => {
                        return Err(DelveError::InvalidGrid(format!(
                            "unknown glyph {other:?} at ({x}, {y})"
                        )))
                    }
                };
                cells.push(cell);
            }
        }

        let mut grid = Self {
            width,
            height,
            cells,
        };
        grid.seal_border();
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks if a position lies on the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Gets the cell at a position, or `None` off the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|index| self.cells[index])
    }

    /// Whether the position is an on-grid floor cell.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get(pos) == Some(Cell::Floor)
    }

    /// Whether the position blocks movement and rays. Off-grid counts as wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        !self.is_floor(pos)
    }

    /// Wall test for a continuous point in cell units.
    pub fn is_wall_at(&self, x: f32, y: f32) -> bool {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return true;
        }
        self.is_wall(Position::new(x.floor() as i32, y.floor() as i32))
    }

    /// Whether the position is on the outer ring.
    pub fn is_border(&self, pos: Position) -> bool {
        self.in_bounds(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as usize == self.width - 1
                || pos.y as usize == self.height - 1)
    }

    /// Iterates over every cell of the outer ring.
    pub fn border_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|pos| self.is_border(*pos))
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// Iterates over floor positions in row-major order.
    pub fn floor_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|pos| self.is_floor(*pos))
    }

    pub fn floor_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_passable()).count()
    }

    /// Renders the grid back to `#`/`.` rows.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|cell| cell.glyph()).collect())
            .collect()
    }

    /// Sets a cell; off-grid writes are ignored.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = cell;
        }
    }

    /// Forces the outer ring to wall.
    pub(crate) fn seal_border(&mut self) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        for x in 0..self.width {
            self.cells[x] = Cell::Wall;
            self.cells[(self.height - 1) * self.width + x] = Cell::Wall;
        }
        for y in 0..self.height {
            self.cells[y * self.width] = Cell::Wall;
            self.cells[y * self.width + self.width - 1] = Cell::Wall;
        }
    }
}
