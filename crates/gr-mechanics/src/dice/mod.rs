//! Ten-sided dice, sources of randomness, and roll options.
//!
//! Every die is a d10. A die showing the explode threshold or higher adds
//! another die to the roll ("10-again" by default, widened to 9 or 8 by
//! some effects).

pub mod roll;

pub use roll::roll;

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Faces on every die.
pub const SIDES: u8 = 10;

/// Default cap on extra dice a single roll may add through explosions.
pub const DEFAULT_MAX_DRAWS: u32 = 10_000;

/// Something that produces d10 faces.
pub trait DieSource {
    /// Draw one face in `1..=10`.
    fn draw(&mut self) -> u8;
}

/// Dice backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    /// Wrap an RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Reproducible dice from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> DieSource for RngDice<R> {
    fn draw(&mut self) -> u8 {
        self.rng.random_range(1..=SIDES)
    }
}

/// Dice that replay a fixed sequence of faces, cycling when exhausted.
///
/// Faces outside `1..=10` are clamped.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Replay `faces` in order. An empty script always draws 1.
    pub fn new(faces: impl Into<Vec<u8>>) -> Self {
        Self {
            faces: faces.into(),
            next: 0,
        }
    }

    /// How many faces have been drawn so far.
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DieSource for ScriptedDice {
    fn draw(&mut self) -> u8 {
        if self.faces.is_empty() {
            return 1;
        }
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face.clamp(1, SIDES)
    }
}

/// Which faces explode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Again {
    /// Only 10s explode.
    #[default]
    Ten,
    /// 9s and 10s explode.
    Nine,
    /// 8s, 9s, and 10s explode.
    Eight,
}

impl Again {
    /// Lowest face that explodes.
    pub fn threshold(self) -> u8 {
        match self {
            Self::Ten => 10,
            Self::Nine => 9,
            Self::Eight => 8,
        }
    }

    /// Pick the rule from the two casting flags. 8-again wins if both are set.
    pub fn from_flags(eight_again: bool, nine_again: bool) -> Self {
        if eight_again {
            Self::Eight
        } else if nine_again {
            Self::Nine
        } else {
            Self::Ten
        }
    }
}

impl fmt::Display for Again {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-again", self.threshold())
    }
}

/// Options for a single roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOptions {
    /// Explode rule.
    pub again: Again,
    /// Abort once explosions have added this many dice. The base pool
    /// does not count.
    pub max_draws: u32,
}

impl Default for RollOptions {
    fn default() -> Self {
        Self {
            again: Again::Ten,
            max_draws: DEFAULT_MAX_DRAWS,
        }
    }
}

impl RollOptions {
    /// Set the explode rule.
    pub fn with_again(mut self, again: Again) -> Self {
        self.again = again;
        self
    }

    /// Set the explosion cap (at least 1).
    pub fn with_max_draws(mut self, max_draws: u32) -> Self {
        self.max_draws = max_draws.max(1);
        self
    }
}
