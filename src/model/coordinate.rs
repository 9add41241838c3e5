use serde::{Deserialize, Serialize};

/// A cell position on the board, zero-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    pub fn to_index(&self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Every coordinate of a `size` x `size` board in row-major order.
    pub fn all(size: usize) -> impl Iterator<Item = Coordinate> {
        (0..size).flat_map(move |row| (0..size).map(move |col| Coordinate { row, col }))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl std::fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversion() {
        let coord = Coordinate::from_index(13, 4);
        assert_eq!(coord, Coordinate::new(3, 1));
        assert_eq!(coord.to_index(4), 13);
    }

    #[test]
    fn test_all_is_row_major() {
        let coords: Vec<_> = Coordinate::all(2).collect();
        assert_eq!(
            coords,
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1),
            ]
        );
    }
}
