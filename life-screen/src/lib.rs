#![deny(clippy::all)]
#![forbid(unsafe_code)]

use life_grid::{Life, Random};

/// Monochrome pixel sink the screen draws into. Implementations must cover
/// at least the grid's width and height.
pub trait MonoCanvas {
    fn clear(&mut self);
    fn set_pixel(&mut self, x: usize, y: usize, on: bool);
}

#[derive(Debug)]
pub struct LifeScreen {
    life: Life,
}

impl LifeScreen {
    pub fn new(rand: Random) -> Self {
        Self {
            life: Life::new(rand),
        }
    }

    /// One-shot startup hook; call before the first render or trigger.
    pub fn initialize(&mut self) {
        log::debug!("seeding initial pattern");
        self.life.seed_pattern();
    }

    /// Clears the canvas and draws every live cell of the committed
    /// generation. Does not advance the simulation; schedule `advance`
    /// separately.
    pub fn render(&self, canvas: &mut impl MonoCanvas) {
        canvas.clear();
        for y in 0..self.life.height() {
            for x in 0..self.life.width() {
                if self.life.get(x, y) {
                    canvas.set_pixel(x, y, true);
                }
            }
        }
    }

    pub fn advance(&mut self) {
        self.life.advance();
    }

    pub fn seed_pattern(&mut self) {
        self.life.seed_pattern();
    }

    pub fn randomize(&mut self) {
        self.life.randomize();
    }

    pub fn width(&self) -> usize {
        self.life.width()
    }

    pub fn height(&self) -> usize {
        self.life.height()
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.life.get(x, y)
    }
}

/// Binds two host key identities to the reseed actions. Feed it press
/// transitions only; holds and repeats stay with the caller.
#[derive(Clone, Copy, Debug)]
pub struct TriggerKeys<K> {
    seed_pattern: K,
    randomize: K,
}

impl<K: PartialEq> TriggerKeys<K> {
    pub fn new(seed_pattern: K, randomize: K) -> Self {
        Self {
            seed_pattern,
            randomize,
        }
    }

    /// Returns true when the key was one of the two bound triggers and has
    /// been fully handled; any other key is left for the host to process.
    pub fn on_key_press(&self, key: &K, screen: &mut LifeScreen) -> bool {
        if *key == self.seed_pattern {
            log::debug!("trigger: reseed fixed pattern");
            screen.seed_pattern();
            true
        } else if *key == self.randomize {
            log::debug!("trigger: randomize grid");
            screen.randomize();
            true
        } else {
            false
        }
    }
}
