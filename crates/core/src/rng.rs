//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Pieces are popped off the end of the bag until it is empty, then a freshly
//! shuffled bag replaces it.
//!
//! Also provides a simple LCG so a seed reproduces a whole game.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Remaining pieces; the next draw is the last element
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceBag {
    /// Create a new bag generator with the given seed
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
            seed,
        };
        bag.refill();
        bag
    }

    /// Replace the bag with a freshly shuffled set of all seven kinds
    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next piece, refilling first if the bag ran out
    pub fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill();
        }
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Current RNG state, used to seed the next session so restarts differ
    pub fn rng_state(&self) -> u32 {
        self.rng.state
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
