//! Reach selection and evaluation.
//!
//! A [`ReachSelection`] holds what the caster has picked, with one slot for
//! the duration and one for a primary factor change. [`evaluate`] prices a
//! selection against the shared catalog and the spell's own reaches.

pub mod evaluate;
pub mod selection;

pub use evaluate::{ReachEvaluation, duration_penalty, effective_primary_factor, evaluate};
pub use selection::ReachSelection;
