use crate::arcanum::Arcanum;
use crate::spell::CastingType;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when manipulating character data or catalogs.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A string did not name one of the ten arcana.
    #[error("unknown arcanum: \"{0}\"")]
    UnknownArcanum(String),

    /// A string did not name a casting type.
    #[error("unknown casting type: \"{0}\" (expected improvised, rote, or praxis)")]
    UnknownCastingType(String),

    /// The character already has the maximum number of major arcana.
    #[error("cannot flag {0} as a major arcanum: at most 3 are allowed")]
    TooManyMajorArcana(Arcanum),

    /// No spellbook entry matched the requested name (and casting type).
    #[error("spell not found in spellbook: \"{0}\"")]
    SpellNotFound(String),

    /// Several spellbook entries share a name; a casting type is needed.
    #[error("spell \"{name}\" is known as several casting types: {types}")]
    AmbiguousSpell {
        /// The spell name that matched more than once.
        name: String,
        /// The casting types found, comma separated.
        types: String,
    },

    /// A spell was not found in the spell catalog.
    #[error("spell not found in catalog: \"{0}\"")]
    UnknownSpell(String),

    /// A spell of this name and casting type is already in the spellbook.
    #[error("\"{name}\" is already in the spellbook as {casting_type}")]
    DuplicateSpell {
        /// The spell name.
        name: String,
        /// The casting type of the existing entry.
        casting_type: CastingType,
    },

    /// JSON could not be parsed or produced.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage backend failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}
