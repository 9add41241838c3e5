use log::trace;
use rand::Rng;

use crate::model::Grid;

/// Swaps needed to scramble a board of `size` x `size` tiles.
pub fn scramble_move_count(size: usize) -> usize {
    if size <= 1 {
        0
    } else {
        size * size * 2
    }
}

/// Pick two different indices in `0..len`, rerolling the second until it
/// differs from the first.
pub fn pick_distinct_pair<R: Rng>(rng: &mut R, len: usize) -> Option<(usize, usize)> {
    if len < 2 {
        return None;
    }
    let first = rng.random_range(0..len);
    let mut second = rng.random_range(0..len);
    while second == first {
        second = rng.random_range(0..len);
    }
    Some((first, second))
}

/// Step-by-step scramble so the presentation layer can show each swap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrambler {
    total: usize,
    performed: usize,
}

impl Scrambler {
    pub fn new(size: usize) -> Self {
        Self {
            total: scramble_move_count(size),
            performed: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.total - self.performed
    }

    pub fn is_finished(&self) -> bool {
        self.performed >= self.total
    }

    /// Perform one random swap. Returns the swapped pair, or `None` once the
    /// scramble is over.
    pub fn step<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) -> Option<(usize, usize)> {
        if self.is_finished() {
            return None;
        }
        let Some((a, b)) = pick_distinct_pair(rng, grid.len()) else {
            self.performed = self.total;
            return None;
        };
        grid.swap(a, b);
        self.performed += 1;
        trace!(target: "scramble", "Swap {}/{}: {} <-> {}", self.performed, self.total, a, b);
        Some((a, b))
    }

    /// Run every remaining step at once.
    pub fn finish<R: Rng>(&mut self, grid: &mut Grid, rng: &mut R) {
        while self.step(grid, rng).is_some() {}
    }
}

/// Scramble `grid` in place with `2 * size²` random swaps.
pub fn scramble<R: Rng>(grid: &mut Grid, rng: &mut R) {
    Scrambler::new(grid.size()).finish(grid, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_move_count() {
        assert_eq!(scramble_move_count(4), 32);
        assert_eq!(scramble_move_count(8), 128);
        assert_eq!(scramble_move_count(1), 0);
    }

    #[test]
    fn test_scramble_keeps_permutation() {
        for size in [4, 6, 8] {
            for seed in 0..20 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut grid = Grid::new(size);
                scramble(&mut grid, &mut rng);
                assert!(grid.has_valid_arrangement(), "size {size} seed {seed}");
            }
        }
    }

    #[test]
    fn test_scramble_disturbs_the_board() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(8);
        scramble(&mut grid, &mut rng);
        assert!(!grid.is_complete());
    }

    #[test]
    fn test_scrambler_steps_exact_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut grid = Grid::new(4);
        let mut scrambler = Scrambler::new(4);
        let mut steps = 0;
        while let Some((a, b)) = scrambler.step(&mut grid, &mut rng) {
            assert_ne!(a, b);
            steps += 1;
            assert!(grid.has_valid_arrangement());
        }
        assert_eq!(steps, 32);
        assert!(scrambler.is_finished());
        assert_eq!(scrambler.remaining(), 0);
    }

    #[test]
    fn test_single_tile_short_circuits() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(1);
        let mut scrambler = Scrambler::new(1);
        assert!(scrambler.is_finished());
        assert_eq!(scrambler.step(&mut grid, &mut rng), None);
        assert!(grid.is_complete());
    }

    #[test]
    fn test_same_seed_same_scramble() {
        let mut a = Grid::new(6);
        let mut b = Grid::new(6);
        scramble(&mut a, &mut StdRng::seed_from_u64(2024));
        scramble(&mut b, &mut StdRng::seed_from_u64(2024));
        assert_eq!(a, b);
    }

    #[test]
    fn test_pick_distinct_pair() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_distinct_pair(&mut rng, 1), None);
        for _ in 0..100 {
            let (a, b) = pick_distinct_pair(&mut rng, 2).unwrap();
            assert_ne!(a, b);
        }
    }
}
