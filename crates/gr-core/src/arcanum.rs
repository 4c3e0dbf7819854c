use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Highest rating a character can hold in a single arcanum.
pub const MAX_RATING: u8 = 5;

/// One of the ten fixed magical domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcanum {
    /// Shadows, decay, and the dead.
    Death,
    /// Luck, probability, and oaths.
    Fate,
    /// Energy, motion, and the elements.
    Forces,
    /// Living bodies and biology.
    Life,
    /// Inanimate substance.
    Matter,
    /// Thought and the self.
    Mind,
    /// Magic itself.
    Prime,
    /// The Shadow and its inhabitants.
    Spirit,
    /// Distance and sympathy.
    Space,
    /// Causality and prophecy.
    Time,
}

impl Arcanum {
    /// All arcana in storage order.
    pub const ALL: [Arcanum; 10] = [
        Self::Death,
        Self::Fate,
        Self::Forces,
        Self::Life,
        Self::Matter,
        Self::Mind,
        Self::Prime,
        Self::Spirit,
        Self::Space,
        Self::Time,
    ];

    /// Lowercase key used in persisted data and catalogs.
    pub fn key(self) -> &'static str {
        match self {
            Self::Death => "death",
            Self::Fate => "fate",
            Self::Forces => "forces",
            Self::Life => "life",
            Self::Matter => "matter",
            Self::Mind => "mind",
            Self::Prime => "prime",
            Self::Spirit => "spirit",
            Self::Space => "space",
            Self::Time => "time",
        }
    }
}

impl FromStr for Arcanum {
    type Err = CoreError;

    /// Parse case-insensitively, so catalog paths like `"Forces"` resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.key() == wanted)
            .ok_or_else(|| CoreError::UnknownArcanum(s.to_string()))
    }
}

impl fmt::Display for Arcanum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.key();
        let mut chars = key.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// A character's rating (0-5) in every arcanum.
///
/// Serializes as an object keyed by lowercase arcanum name, which is the
/// `arcanaValues` shape of the persisted character blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcanaRatings(BTreeMap<Arcanum, u8>);

impl Default for ArcanaRatings {
    fn default() -> Self {
        Self(Arcanum::ALL.into_iter().map(|a| (a, 0)).collect())
    }
}

impl ArcanaRatings {
    /// Rating in the given arcanum.
    pub fn get(&self, arcanum: Arcanum) -> u8 {
        self.0.get(&arcanum).copied().unwrap_or(0)
    }

    /// Set a rating, clamped to 0-5.
    pub fn set(&mut self, arcanum: Arcanum, rating: u8) {
        self.0.insert(arcanum, rating.min(MAX_RATING));
    }

    /// Builder form of [`ArcanaRatings::set`].
    pub fn with(mut self, arcanum: Arcanum, rating: u8) -> Self {
        self.set(arcanum, rating);
        self
    }

    /// Iterate over every arcanum and its rating in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Arcanum, u8)> + '_ {
        Arcanum::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}
