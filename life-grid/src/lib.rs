#![deny(clippy::all)]
#![forbid(unsafe_code)]

use rand::SeedableRng;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::mem;

pub const GRID_WIDTH: usize = 128;
pub const GRID_HEIGHT: usize = 64;

/// Starting cluster drawn by `seed_pattern`, identical on every reseed.
pub const SEED_PATTERN: [(usize, usize); 13] = [
    (62, 30),
    (63, 30),
    (64, 30),
    (66, 30),
    (62, 31),
    (65, 32),
    (66, 32),
    (63, 33),
    (64, 33),
    (66, 33),
    (62, 34),
    (64, 34),
    (66, 34),
];

#[derive(Debug)]
pub struct Life {
    grid: LifeGrid,
    rand: Random,
}

impl Life {
    pub fn new(rand: Random) -> Self {
        Self {
            grid: LifeGrid::new(),
            rand,
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }

    pub fn seed_pattern(&mut self) {
        self.grid.clear();
        for (x, y) in SEED_PATTERN {
            self.grid.set(x, y, true);
        }
    }

    pub fn randomize(&mut self) {
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let alive = self.rand.next_bool(0.5);
                self.grid.set(x, y, alive);
            }
        }
    }

    pub fn advance(&mut self) {
        self.grid.advance();
    }
}

#[derive(Clone, Debug)]
pub struct LifeGrid {
    cells: Vec<bool>,
    next_cells: Vec<bool>,
    width: usize,
    height: usize,
}

impl LifeGrid {
    pub fn new() -> Self {
        Self {
            cells: vec![false; GRID_WIDTH * GRID_HEIGHT],
            next_cells: vec![false; GRID_WIDTH * GRID_HEIGHT],
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Out-of-range coordinates read as dead rather than failing.
    pub fn get(&self, x: usize, y: usize) -> bool {
        match self.index_of(x, y) {
            Some(index) => self.cells[index],
            None => false,
        }
    }

    fn set(&mut self, x: usize, y: usize, alive: bool) {
        if let Some(index) = self.index_of(x, y) {
            self.cells[index] = alive;
        }
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Computes the next generation from the current one, then swaps the
    /// buffers so the new generation becomes visible in a single commit.
    pub fn advance(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let index = y * self.width + x;
                let neighbors = self.num_live_neighbors(x, y);
                self.next_cells[index] = Self::next_state(self.cells[index], neighbors);
            }
        }
        mem::swap(&mut self.next_cells, &mut self.cells);
    }

    fn next_state(alive: bool, neighbors: usize) -> bool {
        match neighbors {
            3 => true,
            2 => alive,
            _ => false,
        }
    }

    fn num_live_neighbors(&self, x: usize, y: usize) -> usize {
        let (col_left, col_right) = Self::adjacent_indexes(x, self.width);
        let (row_above, row_below) = Self::adjacent_indexes(y, self.height);
        let cols = [col_left, x, col_right];
        let rows = [row_above, y, row_below];

        let mut result = 0;
        for &row in &rows {
            for &col in &cols {
                if row == y && col == x {
                    continue;
                }
                if self.cells[row * self.width + col] {
                    result += 1;
                }
            }
        }
        result
    }

    fn adjacent_indexes(cell_index: usize, max: usize) -> (usize, usize) {
        (
            Self::modulo(cell_index as i64 - 1, max),
            Self::modulo(cell_index as i64 + 1, max),
        )
    }

    fn modulo(val: i64, max: usize) -> usize {
        val.rem_euclid(max as i64) as usize
    }

    fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

impl Default for LifeGrid {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    /// Deterministic alternative to `new` for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_life() -> Life {
        Life::new(Random::with_seed(0x5eed))
    }

    fn live_cells(life: &Life) -> Vec<(usize, usize)> {
        let mut result = vec![];
        for y in 0..life.height() {
            for x in 0..life.width() {
                if life.get(x, y) {
                    result.push((x, y));
                }
            }
        }
        result
    }

    #[test]
    fn new_grid_is_all_dead() {
        let life = seeded_life();
        assert!(live_cells(&life).is_empty());
    }

    #[test]
    fn out_of_range_reads_are_dead() {
        let mut life = seeded_life();
        life.randomize();
        assert!(!life.get(GRID_WIDTH, 0));
        assert!(!life.get(0, GRID_HEIGHT));
        assert!(!life.get(GRID_WIDTH, GRID_HEIGHT));
        assert!(!life.get(usize::MAX, usize::MAX));
    }

    #[test]
    fn seed_pattern_matches_fixture() {
        let mut life = seeded_life();
        life.seed_pattern();

        let mut expected = SEED_PATTERN.to_vec();
        expected.sort_unstable();
        let mut actual = live_cells(&life);
        actual.sort_unstable();
        assert_eq!(actual, expected);
    }

    #[test]
    fn seed_pattern_is_reproducible() {
        let mut life = seeded_life();
        life.seed_pattern();
        let first = live_cells(&life);

        life.randomize();
        life.seed_pattern();
        assert_eq!(live_cells(&life), first);
    }

    #[test]
    fn lone_cell_dies() {
        let mut life = seeded_life();
        life.grid.set(10, 10, true);
        life.advance();
        assert!(live_cells(&life).is_empty());
    }

    #[test]
    fn birth_on_exactly_three_neighbors() {
        let mut life = seeded_life();
        life.grid.set(9, 10, true);
        life.grid.set(11, 10, true);
        life.grid.set(10, 9, true);
        life.advance();
        assert!(life.get(10, 10));
    }

    #[test]
    fn block_is_a_still_life() {
        let mut life = seeded_life();
        for (x, y) in [(10, 10), (11, 10), (10, 11), (11, 11)] {
            life.grid.set(x, y, true);
        }
        let before = live_cells(&life);
        life.advance();
        assert_eq!(live_cells(&life), before);
    }

    #[test]
    fn corners_wrap_into_neighbors() {
        let mut life = seeded_life();
        life.grid.set(0, 0, true);
        life.grid.set(GRID_WIDTH - 1, 0, true);
        life.grid.set(0, GRID_HEIGHT - 1, true);
        life.advance();
        // Three live corners wrap into the fourth, which is born.
        assert!(life.get(GRID_WIDTH - 1, GRID_HEIGHT - 1));
    }

    #[test]
    fn blinker_oscillates_with_period_two() {
        let mut life = seeded_life();
        for (x, y) in [(10, 9), (10, 10), (10, 11)] {
            life.grid.set(x, y, true);
        }
        let vertical = live_cells(&life);

        life.advance();
        let mut horizontal = live_cells(&life);
        horizontal.sort_unstable();
        assert_eq!(horizontal, vec![(9, 10), (10, 10), (11, 10)]);

        life.advance();
        assert_eq!(live_cells(&life), vertical);
    }

    #[test]
    fn randomize_changes_the_grid() {
        let mut life = seeded_life();
        life.seed_pattern();
        let before = live_cells(&life);

        life.randomize();
        let after = live_cells(&life);
        assert_ne!(after, before);
        assert!(!after.is_empty());
        assert!(after.len() < GRID_WIDTH * GRID_HEIGHT);
    }

    #[test]
    fn randomize_is_reproducible_for_a_fixed_seed() {
        let mut a = Life::new(Random::with_seed(7));
        let mut b = Life::new(Random::with_seed(7));
        a.randomize();
        b.randomize();
        assert_eq!(live_cells(&a), live_cells(&b));
    }
}
