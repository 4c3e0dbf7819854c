//! Core types for Grimoire: arcana, characters, spells, and reach catalogs.
//!
//! This crate holds the data the spellcasting rules operate on. It does no
//! rules evaluation itself; see `gr-mechanics` for that.

/// The ten arcana and per-character ratings.
pub mod arcanum;
/// The spell catalog loaded from sourcebook records.
pub mod catalog;
/// Character state and the persisted blob format.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// The shared reach catalog and reach classification.
///
/// Reach names double as semantic keys (`"Duration: One week"`,
/// `"Change Primary Factor: Potency"`). A name is parsed once, when its
/// entry is built, into a [`ReachKind`]; evaluation never re-reads names.
pub mod reach;
/// Spell, combined spell, and special reach definitions.
pub mod spell;
/// Key-value persistence for character state.
pub mod storage;

/// Re-export arcanum types.
pub use arcanum::{Arcanum, ArcanaRatings};
/// Re-export the spell catalog.
pub use catalog::SpellCatalog;
/// Re-export character state.
pub use character::Character;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export reach catalog types.
pub use reach::{DurationScale, ReachCatalog, ReachDefinition, ReachKind};
/// Re-export spell types.
pub use spell::{
    CastingType, CombinedMarker, CombinedSpell, LowestArcanum, PrimaryFactor, SpecialReach, Spell,
    SpellDefinition,
};
/// Re-export storage types.
pub use storage::{FileStorage, MemoryStorage, Storage, load_character, save_character};
