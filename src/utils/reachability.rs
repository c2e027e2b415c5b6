//! # Reachability
//!
//! Flood fills over the exploration grid.

use crate::game::{Grid, Position};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Every floor cell reachable from `start` through 4-connected floor cells.
///
/// Returns an empty set when `start` is not a floor cell.
pub fn reachable_floor(grid: &Grid, start: Position) -> HashSet<Position> {
    if !grid.is_floor(start) {
        return HashSet::new();
    }

    bfs_reach(start, |pos| {
        pos.cardinal_adjacent_positions()
            .into_iter()
            .filter(|next| grid.is_floor(*next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Whether `to` can be walked to from `from`.
pub fn is_reachable(grid: &Grid, from: Position, to: Position) -> bool {
    reachable_floor(grid, from).contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reachability_respects_walls() {
        let grid = Grid::from_rows(&[
            "#######",
            "#..#..#",
            "#..#..#",
            "#######",
        ])
        .unwrap();

        let left = reachable_floor(&grid, Position::new(1, 1));
        assert_eq!(left.len(), 4);
        assert!(!is_reachable(&grid, Position::new(1, 1), Position::new(4, 1)));
        assert!(is_reachable(&grid, Position::new(1, 1), Position::new(2, 2)));
    }

    #[test]
    fn test_reachability_from_wall_is_empty() {
        let grid = Grid::from_rows(&["###", "#.#", "###"]).unwrap();
        assert!(reachable_floor(&grid, Position::new(0, 0)).is_empty());
    }
}
