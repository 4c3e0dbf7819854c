use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::arcanum::Arcanum;
use crate::error::CoreError;

/// How a spell is known and cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastingType {
    /// Cast on the fly with Gnosis + Arcanum; costs a point of Mana.
    #[default]
    Improvised,
    /// A learned formula; gets the full reach allowance of an Arcanum 5 caster.
    Rote,
    /// A practised spell.
    Praxis,
}

impl FromStr for CastingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "improvised" => Ok(Self::Improvised),
            "rote" => Ok(Self::Rote),
            "praxis" => Ok(Self::Praxis),
            _ => Err(CoreError::UnknownCastingType(s.to_string())),
        }
    }
}

impl fmt::Display for CastingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Improvised => write!(f, "improvised"),
            Self::Rote => write!(f, "rote"),
            Self::Praxis => write!(f, "praxis"),
        }
    }
}

/// The spell factor that scales with the caster's Arcanum for free.
///
/// Serialized as its plain label (`"Potency"`, `"Duration"`, or anything
/// else the catalog uses, such as `"Scale"` or a `/`-joined list).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrimaryFactor {
    /// Potency scales with Arcanum.
    Potency,
    /// Duration scales with Arcanum.
    Duration,
    /// Any other factor label, kept verbatim.
    Other(String),
}

impl PrimaryFactor {
    /// The label as it appears in catalogs.
    pub fn label(&self) -> &str {
        match self {
            Self::Potency => "Potency",
            Self::Duration => "Duration",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for PrimaryFactor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Potency" => Self::Potency,
            "Duration" => Self::Duration,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for PrimaryFactor {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<PrimaryFactor> for String {
    fn from(factor: PrimaryFactor) -> Self {
        match factor {
            PrimaryFactor::Other(s) => s,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for PrimaryFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reach that only exists for one spell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialReach {
    /// Full name, `"<spell>: <effect>"`.
    pub name: String,
    /// Reach points spent.
    pub cost: u32,
    /// Mana spent on top of the casting cost.
    #[serde(default)]
    pub mana_cost: u32,
    /// Effect text.
    #[serde(default)]
    pub description: String,
}

/// A single spell from the catalog, as known by a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    /// Spell name. Together with the casting type this identifies a spellbook entry.
    pub name: String,
    /// The arcanum the spell belongs to.
    pub arcanum: Arcanum,
    /// Required dots in the arcanum (1-5).
    pub level: u8,
    /// How the character casts it.
    #[serde(default)]
    pub casting_type: CastingType,
    /// The factor that scales with Arcanum.
    pub primary_factor: PrimaryFactor,
    /// Practice label (Knowing, Unveiling, ...).
    #[serde(default)]
    pub practice: String,
    /// Resistance the target may apply, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withstand: Option<String>,
    /// Rote skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Spell-specific reaches.
    #[serde(default)]
    pub special_reaches: Vec<SpecialReach>,
    /// Full rules text.
    #[serde(default)]
    pub description: String,
    /// One-line summary.
    #[serde(default, alias = "short_description")]
    pub short_description: String,
    /// Sourcebook reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Spell {
    /// Return a copy of this spell learned as the given casting type.
    pub fn with_casting_type(mut self, casting_type: CastingType) -> Self {
        self.casting_type = casting_type;
        self
    }
}

/// The component arcanum a combined spell is cast with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowestArcanum {
    /// The arcanum.
    pub name: Arcanum,
    /// The character's rating in it when the spell was combined.
    pub value: u8,
}

/// Several base spells merged into one casting.
///
/// Label fields (`arcanum`, `level`, `practice`, `primary_factor`) are the
/// `/`-joined component values in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSpell {
    /// Name chosen by the player.
    pub name: String,
    /// Joined arcanum keys, e.g. `"forces/life"`.
    pub arcanum: String,
    /// Joined levels, e.g. `"2/3"`.
    pub level: String,
    /// Joined practices.
    pub practice: String,
    /// Joined primary factors; never equal to a bare `Potency` or `Duration`.
    pub primary_factor: PrimaryFactor,
    /// Joined withstand text of the components that define one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withstand: Option<String>,
    /// Union of component skills.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Every component's special reaches.
    #[serde(default)]
    pub special_reaches: Vec<SpecialReach>,
    /// Component descriptions separated by blank lines.
    #[serde(default)]
    pub description: String,
    /// `"Combined spell: A, B"`.
    #[serde(default, alias = "short_description")]
    pub short_description: String,
    /// Praxis if all components are praxes, improvised otherwise.
    pub casting_type: CastingType,
    /// The source spells.
    pub component_spells: Vec<Spell>,
    /// Flat dice penalty for merging, `2 × (components − 1)`.
    pub additional_penalty: u32,
    /// Component arcanum with the lowest character rating.
    pub lowest_arcanum: LowestArcanum,
    /// Stored as `"combined": true`.
    #[serde(default)]
    pub combined: CombinedMarker,
}

/// The `combined` flag of a stored combined spell. It always serializes as
/// `true`; a stored `false` is rejected so the entry decodes as a base spell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombinedMarker;

impl Serialize for CombinedMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(true)
    }
}

impl<'de> Deserialize<'de> for CombinedMarker {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if bool::deserialize(deserializer)? {
            Ok(Self)
        } else {
            Err(D::Error::custom("a combined spell must have `combined: true`"))
        }
    }
}

/// Anything that can sit in a spellbook and be cast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpellDefinition {
    /// A merged spell. Listed first so untagged decoding tries it before `Base`.
    Combined(CombinedSpell),
    /// A single catalog spell.
    Base(Spell),
}

impl SpellDefinition {
    /// Spell name.
    pub fn name(&self) -> &str {
        match self {
            Self::Base(s) => &s.name,
            Self::Combined(c) => &c.name,
        }
    }

    /// Casting type.
    pub fn casting_type(&self) -> CastingType {
        match self {
            Self::Base(s) => s.casting_type,
            Self::Combined(c) => c.casting_type,
        }
    }

    /// Whether this is a combined spell.
    pub fn is_combined(&self) -> bool {
        matches!(self, Self::Combined(_))
    }

    /// The spell's own primary factor (before any reach overrides it).
    pub fn primary_factor(&self) -> &PrimaryFactor {
        match self {
            Self::Base(s) => &s.primary_factor,
            Self::Combined(c) => &c.primary_factor,
        }
    }

    /// Spell-specific reaches.
    pub fn special_reaches(&self) -> &[SpecialReach] {
        match self {
            Self::Base(s) => &s.special_reaches,
            Self::Combined(c) => &c.special_reaches,
        }
    }

    /// The arcanum whose rating forms the dice pool.
    pub fn casting_arcanum(&self) -> Arcanum {
        match self {
            Self::Base(s) => s.arcanum,
            Self::Combined(c) => c.lowest_arcanum.name,
        }
    }

    /// Every arcanum the spell draws on, in component order.
    pub fn arcana(&self) -> Vec<Arcanum> {
        match self {
            Self::Base(s) => vec![s.arcanum],
            Self::Combined(c) => c.component_spells.iter().map(|s| s.arcanum).collect(),
        }
    }

    /// The highest required level across components.
    pub fn highest_level(&self) -> u8 {
        match self {
            Self::Base(s) => s.level,
            Self::Combined(c) => c
                .component_spells
                .iter()
                .map(|s| s.level)
                .max()
                .unwrap_or(1),
        }
    }

    /// Display label for the arcanum (joined for combined spells).
    pub fn arcanum_label(&self) -> String {
        match self {
            Self::Base(s) => s.arcanum.key().to_string(),
            Self::Combined(c) => c.arcanum.clone(),
        }
    }

    /// Display label for the level (joined for combined spells).
    pub fn level_label(&self) -> String {
        match self {
            Self::Base(s) => s.level.to_string(),
            Self::Combined(c) => c.level.clone(),
        }
    }

    /// Withstand text, if any.
    pub fn withstand(&self) -> Option<&str> {
        match self {
            Self::Base(s) => s.withstand.as_deref(),
            Self::Combined(c) => c.withstand.as_deref(),
        }
    }

    /// Extra dice penalty applied at cast time (0 for base spells).
    pub fn additional_penalty(&self) -> u32 {
        match self {
            Self::Base(_) => 0,
            Self::Combined(c) => c.additional_penalty,
        }
    }

    /// Short summary line.
    pub fn short_description(&self) -> &str {
        match self {
            Self::Base(s) => &s.short_description,
            Self::Combined(c) => &c.short_description,
        }
    }

    /// True if this entry has the given identity.
    pub fn is(&self, name: &str, casting_type: CastingType) -> bool {
        self.name() == name && self.casting_type() == casting_type
    }
}

impl From<Spell> for SpellDefinition {
    fn from(spell: Spell) -> Self {
        Self::Base(spell)
    }
}

impl From<CombinedSpell> for SpellDefinition {
    fn from(spell: CombinedSpell) -> Self {
        Self::Combined(spell)
    }
}
