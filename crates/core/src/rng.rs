//! RNG module - piece selection
//!
//! Each spawn picks one of the seven kinds uniformly at random. The
//! generator is a small seeded LCG so the same seed always produces the
//! same game. A scripted sequence source is also available for scenarios
//! that need a known order of pieces.

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where spawned pieces come from
#[derive(Debug, Clone)]
pub enum PieceSource {
    /// Uniform random selection per spawn
    Random(SimpleRng),
    /// Cycle through a fixed list of kinds
    Sequence { kinds: Vec<PieceKind>, next: usize },
}

impl PieceSource {
    /// Seeded uniform random source
    pub fn random(seed: u32) -> Self {
        PieceSource::Random(SimpleRng::new(seed))
    }

    /// Scripted source that repeats `kinds` in order
    pub fn sequence(kinds: impl Into<Vec<PieceKind>>) -> Self {
        PieceSource::Sequence {
            kinds: kinds.into(),
            next: 0,
        }
    }

    /// Pick the kind for the next spawn
    pub fn draw(&mut self) -> PieceKind {
        match self {
            PieceSource::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            PieceSource::Sequence { kinds, next } => {
                if kinds.is_empty() {
                    return PieceKind::O;
                }
                let kind = kinds[*next % kinds.len()];
                *next = (*next + 1) % kinds.len();
                kind
            }
        }
    }
}

impl Default for PieceSource {
    fn default() -> Self {
        Self::random(1)
    }
}
