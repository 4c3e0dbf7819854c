//! Error types for the rules engine.

/// Errors that can occur while rolling dice.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// Exploding dice kept cascading until the draw cap was hit.
    #[error("dice kept exploding past {draws} extra dice")]
    RunawayExplosion {
        /// The explosion cap that was reached.
        draws: u32,
    },
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;

/// Reasons a set of spells cannot be merged into one combined spell.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CombinationError {
    /// Combining needs at least two spells.
    #[error("select at least 2 spells to combine (got {0})")]
    TooFewSpells(usize),

    /// The caster's Gnosis does not allow this many components.
    #[error("Gnosis {gnosis} allows combining at most {max} spells (got {count})")]
    TooManySpells {
        /// Number of spells selected.
        count: usize,
        /// Maximum allowed at this Gnosis.
        max: usize,
        /// The caster's Gnosis.
        gnosis: u8,
    },

    /// Rotes cannot be combined.
    #[error("\"{0}\" is a rote; rotes cannot be combined")]
    RoteComponent(String),

    /// Combined spells cannot be combined again.
    #[error("\"{0}\" is already a combined spell")]
    CombinedComponent(String),

    /// The combined spell needs a name.
    #[error("a combined spell needs a name")]
    BlankName,
}

/// Convenience result type for spell combination.
pub type CombinationResult<T> = Result<T, CombinationError>;
