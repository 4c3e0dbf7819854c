use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::spell::PrimaryFactor;

/// Name prefix shared by every duration reach.
pub const DURATION_PREFIX: &str = "Duration:";
/// Name prefix shared by every scale reach.
pub const SCALE_PREFIX: &str = "Scale:";
/// Reach that makes Duration the primary factor.
pub const CHANGE_TO_DURATION: &str = "Change Primary Factor: Duration";
/// Reach that makes Potency the primary factor.
pub const CHANGE_TO_POTENCY: &str = "Change Primary Factor: Potency";

/// The two mutually exclusive duration ladders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationScale {
    /// 2 / 3 / 5 / 10 turns.
    Standard,
    /// Scene-hour / day / week / month / year / indefinite.
    Advanced,
}

impl DurationScale {
    /// Cumulative dice penalty by level, starting at level 0.
    pub fn penalty_table(self) -> &'static [u32] {
        match self {
            Self::Standard => &[0, 2, 4, 6, 8],
            Self::Advanced => &[0, 0, 2, 4, 6, 8, 10],
        }
    }

    /// Cumulative penalty at `level`, clamped to the top of the ladder.
    pub fn cumulative_penalty(self, level: u8) -> u32 {
        let table = self.penalty_table();
        let idx = usize::from(level).min(table.len() - 1);
        table[idx]
    }
}

/// What a reach does, resolved from its name at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReachKind {
    /// A step on one of the duration ladders.
    Duration {
        /// Which ladder.
        scale: DurationScale,
        /// Ordinal on that ladder (1-based; 0 if unrecognised).
        level: u8,
    },
    /// An area or subject-count step.
    Scale,
    /// Swap the spell's primary factor.
    PrimaryFactorChange {
        /// The factor that becomes primary.
        to: PrimaryFactor,
    },
    /// Anything else.
    Generic,
}

impl ReachKind {
    /// Classify a reach by its exact name.
    pub fn classify(name: &str) -> Self {
        if name == CHANGE_TO_DURATION {
            return Self::PrimaryFactorChange {
                to: PrimaryFactor::Duration,
            };
        }
        if name == CHANGE_TO_POTENCY {
            return Self::PrimaryFactorChange {
                to: PrimaryFactor::Potency,
            };
        }
        if name.starts_with(SCALE_PREFIX) {
            return Self::Scale;
        }
        if !name.starts_with(DURATION_PREFIX) {
            return Self::Generic;
        }

        let advanced = name.starts_with("Duration: One") || name == "Duration: Indefinite";
        if advanced {
            let level = match name {
                "Duration: One scene/hour" => 1,
                "Duration: One day" => 2,
                "Duration: One week" => 3,
                "Duration: One month" => 4,
                "Duration: One year" => 5,
                "Duration: Indefinite" => 6,
                _ => 0,
            };
            Self::Duration {
                scale: DurationScale::Advanced,
                level,
            }
        } else {
            let level = match name {
                "Duration: 2 turns" => 1,
                "Duration: 3 turns" => 2,
                "Duration: 5 turns" => 3,
                "Duration: 10 turns" => 4,
                _ => 0,
            };
            Self::Duration {
                scale: DurationScale::Standard,
                level,
            }
        }
    }

    /// Returns true for duration reaches.
    pub fn is_duration(&self) -> bool {
        matches!(self, Self::Duration { .. })
    }
}

/// A reach as it appears in catalog JSON. Numeric fields are optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReach {
    name: String,
    #[serde(default)]
    cost: u32,
    #[serde(default)]
    category: String,
    #[serde(default)]
    dice_penalty: u32,
    #[serde(default)]
    mana_cost: u32,
    #[serde(default)]
    description: String,
}

/// One entry in the shared reach catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachDefinition {
    /// Unique name, matched literally.
    pub name: String,
    /// Reach points spent.
    pub cost: u32,
    /// Grouping label for display.
    pub category: String,
    /// Flat dice penalty.
    pub dice_penalty: u32,
    /// Mana spent.
    pub mana_cost: u32,
    /// Effect text.
    pub description: String,
    /// Semantic kind, derived from `name`.
    #[serde(skip)]
    pub kind: ReachKind,
}

impl ReachDefinition {
    /// Build an entry, classifying it by name.
    pub fn new(
        name: impl Into<String>,
        cost: u32,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let kind = ReachKind::classify(&name);
        Self {
            name,
            cost,
            category: category.into(),
            dice_penalty: 0,
            mana_cost: 0,
            description: description.into(),
            kind,
        }
    }

    /// Set the flat dice penalty.
    pub fn with_dice_penalty(mut self, penalty: u32) -> Self {
        self.dice_penalty = penalty;
        self
    }

    /// Set the Mana cost.
    pub fn with_mana_cost(mut self, mana: u32) -> Self {
        self.mana_cost = mana;
        self
    }
}

impl From<RawReach> for ReachDefinition {
    fn from(raw: RawReach) -> Self {
        Self::new(raw.name, raw.cost, raw.category, raw.description)
            .with_dice_penalty(raw.dice_penalty)
            .with_mana_cost(raw.mana_cost)
    }
}

/// The shared catalog of reaches available to every spell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachCatalog {
    entries: Vec<ReachDefinition>,
}

impl Default for ReachCatalog {
    fn default() -> Self {
        Self::new(default_reaches())
    }
}

impl ReachCatalog {
    /// Build a catalog from entries.
    pub fn new(entries: Vec<ReachDefinition>) -> Self {
        Self { entries }
    }

    /// Load a catalog from a JSON array of reach records.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: Vec<RawReach> = serde_json::from_str(json)?;
        Ok(Self::new(raw.into_iter().map(ReachDefinition::from).collect()))
    }

    /// Look up a reach by exact name.
    pub fn find(&self, name: &str) -> Option<&ReachDefinition> {
        self.entries.iter().find(|r| r.name == name)
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[ReachDefinition] {
        &self.entries
    }

    /// Entries grouped by category, categories in first-seen order.
    pub fn by_category(&self) -> Vec<(&str, Vec<&ReachDefinition>)> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: BTreeMap<&str, Vec<&ReachDefinition>> = BTreeMap::new();
        for entry in &self.entries {
            if !groups.contains_key(entry.category.as_str()) {
                order.push(&entry.category);
            }
            groups.entry(&entry.category).or_default().push(entry);
        }
        order
            .into_iter()
            .map(|c| (c, groups.remove(c).unwrap_or_default()))
            .collect()
    }
}

fn default_reaches() -> Vec<ReachDefinition> {
    vec![
        ReachDefinition::new(
            "Casting Time: Instant",
            1,
            "Casting",
            "Cast your spell as an instant action",
        ),
        ReachDefinition::new(
            "Range: Sensory",
            1,
            "Range",
            "Extend the range to anything you can perceive",
        ),
        ReachDefinition::new(
            "Additional Active",
            1,
            "General",
            "Maintain an additional spell active simultaneously",
        ),
        ReachDefinition::new(
            CHANGE_TO_DURATION,
            1,
            "Primary Factor",
            "Duration scales with your Arcanum instead of Potency",
        ),
        ReachDefinition::new(
            CHANGE_TO_POTENCY,
            1,
            "Primary Factor",
            "Potency scales with your Arcanum instead of Duration",
        ),
        ReachDefinition::new(
            "Duration: 2 turns",
            1,
            "Duration",
            "Extend the spell to last for two turns",
        )
        .with_dice_penalty(2),
        ReachDefinition::new(
            "Duration: 3 turns",
            1,
            "Duration",
            "Extend the spell to last for three turns",
        )
        .with_dice_penalty(4),
        ReachDefinition::new(
            "Duration: 5 turns",
            1,
            "Duration",
            "Extend the spell to last for five turns",
        )
        .with_dice_penalty(6),
        ReachDefinition::new(
            "Duration: 10 turns",
            1,
            "Duration",
            "Extend the spell to last for ten turns",
        )
        .with_dice_penalty(8),
        ReachDefinition::new(
            "Duration: One scene/hour",
            1,
            "Duration",
            "Extend the spell to last for one scene or hour",
        ),
        ReachDefinition::new(
            "Duration: One day",
            1,
            "Duration",
            "Extend spell duration to last for one day",
        )
        .with_dice_penalty(2),
        ReachDefinition::new(
            "Duration: One week",
            1,
            "Duration",
            "Extend spell duration to last for one week",
        )
        .with_dice_penalty(4),
        ReachDefinition::new(
            "Duration: One month",
            1,
            "Duration",
            "Extend spell duration to last for one month",
        )
        .with_dice_penalty(6),
        ReachDefinition::new(
            "Duration: One year",
            1,
            "Duration",
            "Extend spell duration to last for one year",
        )
        .with_dice_penalty(8),
        ReachDefinition::new(
            "Duration: Indefinite",
            2,
            "Duration",
            "Extend spell duration indefinitely",
        )
        .with_dice_penalty(10)
        .with_mana_cost(1),
        ReachDefinition::new(
            "Scale: Large building, 5 subjects",
            1,
            "Scale",
            "Affect an area the size of a large building or up to 5 subjects",
        ),
        ReachDefinition::new(
            "Scale: Small warehouse, 10 subjects",
            1,
            "Scale",
            "Affect an area the size of a small warehouse or up to 10 subjects",
        )
        .with_dice_penalty(2),
        ReachDefinition::new(
            "Scale: Supermarket, 20 subjects",
            1,
            "Scale",
            "Affect an area the size of a supermarket or up to 20 subjects",
        )
        .with_dice_penalty(4),
        ReachDefinition::new(
            "Scale: Shopping mall, 40 subjects",
            1,
            "Scale",
            "Affect an area the size of a shopping mall or up to 40 subjects",
        )
        .with_dice_penalty(6),
        ReachDefinition::new(
            "Scale: City block, 80 subjects",
            1,
            "Scale",
            "Affect an area the size of a city block or up to 80 subjects",
        )
        .with_dice_penalty(8),
        ReachDefinition::new(
            "Scale: Small neighborhood, 160 subjects",
            1,
            "Scale",
            "Affect an area the size of a small neighborhood or up to 160 subjects",
        )
        .with_dice_penalty(10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_standard_durations() {
        assert_eq!(
            ReachKind::classify("Duration: 5 turns"),
            ReachKind::Duration {
                scale: DurationScale::Standard,
                level: 3
            }
        );
        assert_eq!(
            ReachKind::classify("Duration: 10 turns"),
            ReachKind::Duration {
                scale: DurationScale::Standard,
                level: 4
            }
        );
    }

    #[test]
    fn classify_advanced_durations() {
        assert_eq!(
            ReachKind::classify("Duration: One scene/hour"),
            ReachKind::Duration {
                scale: DurationScale::Advanced,
                level: 1
            }
        );
        assert_eq!(
            ReachKind::classify("Duration: Indefinite"),
            ReachKind::Duration {
                scale: DurationScale::Advanced,
                level: 6
            }
        );
    }

    #[test]
    fn classify_unknown_duration_has_level_zero() {
        assert_eq!(
            ReachKind::classify("Duration: 7 turns"),
            ReachKind::Duration {
                scale: DurationScale::Standard,
                level: 0
            }
        );
    }

    #[test]
    fn classify_other_kinds() {
        assert_eq!(
            ReachKind::classify(CHANGE_TO_POTENCY),
            ReachKind::PrimaryFactorChange {
                to: PrimaryFactor::Potency
            }
        );
        assert_eq!(ReachKind::classify("Scale: City block, 80 subjects"), ReachKind::Scale);
        assert_eq!(ReachKind::classify("Range: Sensory"), ReachKind::Generic);
        // Exact match only.
        assert_eq!(
            ReachKind::classify("change primary factor: potency"),
            ReachKind::Generic
        );
    }

    #[test]
    fn cumulative_penalty_clamps() {
        assert_eq!(DurationScale::Standard.cumulative_penalty(3), 6);
        assert_eq!(DurationScale::Standard.cumulative_penalty(5), 8);
        assert_eq!(DurationScale::Advanced.cumulative_penalty(1), 0);
        assert_eq!(DurationScale::Advanced.cumulative_penalty(6), 10);
    }

    #[test]
    fn default_catalog_lookups() {
        let catalog = ReachCatalog::default();
        let indefinite = catalog.find("Duration: Indefinite").unwrap();
        assert_eq!(indefinite.cost, 2);
        assert_eq!(indefinite.dice_penalty, 10);
        assert_eq!(indefinite.mana_cost, 1);
        assert!(indefinite.kind.is_duration());
        assert_eq!(catalog.find("Duration: 5 turns").unwrap().dice_penalty, 6);
        assert!(catalog.find("Duration: Forever").is_none());
    }

    #[test]
    fn from_json_defaults_missing_numbers() {
        let catalog = ReachCatalog::from_json(
            r#"[{"name": "Duration: One week", "category": "Duration"},
                {"name": "Range: Sensory", "cost": 1, "dicePenalty": 3}]"#,
        )
        .unwrap();
        let week = catalog.find("Duration: One week").unwrap();
        assert_eq!(week.cost, 0);
        assert_eq!(week.dice_penalty, 0);
        assert_eq!(
            week.kind,
            ReachKind::Duration {
                scale: DurationScale::Advanced,
                level: 3
            }
        );
        assert_eq!(catalog.find("Range: Sensory").unwrap().dice_penalty, 3);
    }

    #[test]
    fn by_category_keeps_first_seen_order() {
        let catalog = ReachCatalog::default();
        let names: Vec<&str> = catalog.by_category().iter().map(|(c, _)| *c).collect();
        assert_eq!(
            names,
            vec!["Casting", "Range", "General", "Primary Factor", "Duration", "Scale"]
        );
        let durations = &catalog.by_category()[4].1;
        assert_eq!(durations.len(), 10);
    }
}
