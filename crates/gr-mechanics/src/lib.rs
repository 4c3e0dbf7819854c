//! Spellcasting rules engine for Grimoire.
//!
//! Turns a character, a spell, and a set of reaches into a dice pool, a
//! reach cost, a Mana cost, and a potency, then rolls the open-ended d10
//! pool and classifies the result. Everything here is pure computation
//! except the dice, which draw from an injectable [`DieSource`].

pub mod cast;
pub mod combine;
pub mod dice;
pub mod error;
pub mod pool;
pub mod reach;
pub mod resolution;

#[cfg(test)]
mod testutil;

pub use cast::{CastPlan, CastRequest, CastResult, cast, plan_cast};
pub use combine::{combine, max_components};
pub use dice::{Again, DieSource, RngDice, RollOptions, ScriptedDice, roll};
pub use error::{CombinationError, CombinationResult, MechError, MechResult};
pub use pool::{PoolSize, available_reaches, compute_pool};
pub use reach::{ReachEvaluation, ReachSelection, evaluate};
pub use resolution::Resolution;
