use itertools::Itertools;
use std::collections::HashSet;

use super::{Coordinate, Tile};

/// The full set of tiles for one game, ordered by home position.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Build a solved grid: tile `i * size + j` starts at its home `(i, j)`.
    pub fn new(size: usize) -> Self {
        let tiles = Coordinate::all(size).map(Tile::new).collect();
        Self { size, tiles }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Index of the tile currently sitting at `coord`.
    pub fn tile_at(&self, coord: Coordinate) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.current == coord)
    }

    /// Exchange the current positions of tiles `a` and `b`. Swapping a tile
    /// with itself or an out-of-range index does nothing.
    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b || a >= self.tiles.len() || b >= self.tiles.len() {
            return;
        }
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.tiles.split_at_mut(high);
        Tile::exchange(&mut head[low], &mut tail[0]);
    }

    /// True when every tile is back at its home position.
    pub fn is_complete(&self) -> bool {
        self.tiles.iter().all(Tile::is_home)
    }

    pub fn misplaced_count(&self) -> usize {
        self.tiles.iter().filter(|tile| !tile.is_home()).count()
    }

    /// Current positions must be a permutation of every board coordinate.
    pub fn has_valid_arrangement(&self) -> bool {
        let positions: HashSet<Coordinate> = self.tiles.iter().map(|tile| tile.current).collect();
        positions.len() == self.size * self.size
            && positions
                .iter()
                .all(|pos| pos.row < self.size && pos.col < self.size)
    }
}

impl std::fmt::Display for Grid {
    /// Renders the board as it currently looks, each cell showing the home
    /// index of the tile occupying it.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self.len().saturating_sub(1).to_string().len();
        for row in 0..self.size {
            let line = (0..self.size)
                .map(|col| match self.tile_at(Coordinate::new(row, col)) {
                    Some(index) => format!("{:>width$}", index, width = width),
                    None => format!("{:>width$}", "?", width = width),
                })
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Grid {}x{}\n{}", self.size, self.size, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_complete() {
        for size in [1, 4, 6, 8] {
            let grid = Grid::new(size);
            assert_eq!(grid.len(), size * size);
            assert!(grid.is_complete(), "fresh {size}x{size} grid should be solved");
            assert!(grid.has_valid_arrangement());
        }
    }

    #[test]
    fn test_tile_layout_matches_linear_index() {
        let grid = Grid::new(4);
        let tile = grid.tile(6).unwrap();
        assert_eq!(tile.correct, Coordinate::new(1, 2));
        assert_eq!(tile.current, Coordinate::new(1, 2));
    }

    #[test]
    fn test_swap_is_its_own_inverse() {
        let mut grid = Grid::new(4);
        grid.swap(3, 12);
        assert!(!grid.is_complete());
        assert_eq!(grid.misplaced_count(), 2);
        assert_eq!(grid.tile(3).unwrap().current, Coordinate::new(3, 0));
        assert_eq!(grid.tile_at(Coordinate::new(0, 3)), Some(12));
        assert!(grid.has_valid_arrangement());

        grid.swap(3, 12);
        assert!(grid.is_complete());
    }

    #[test]
    fn test_swap_with_self_or_out_of_range_is_noop() {
        let mut grid = Grid::new(4);
        grid.swap(5, 5);
        grid.swap(5, 99);
        assert_eq!(grid, Grid::new(4));
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(2);
        grid.swap(0, 3);
        assert_eq!(grid.to_string(), "3 1\n2 0\n");
    }
}
