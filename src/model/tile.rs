use super::Coordinate;

/// One puzzle cell. `correct` is its home in the solved image and never
/// changes; `current` only moves through [`Tile::exchange`].
#[readonly::make]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub correct: Coordinate,
    pub current: Coordinate,
}

impl Tile {
    pub fn new(home: Coordinate) -> Self {
        Self {
            correct: home,
            current: home,
        }
    }

    pub fn is_home(&self) -> bool {
        self.current == self.correct
    }

    /// Swap the current positions of two tiles.
    pub(crate) fn exchange(a: &mut Tile, b: &mut Tile) {
        std::mem::swap(&mut a.current, &mut b.current);
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{:?}", self.correct, self.current)
    }
}
