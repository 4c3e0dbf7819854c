use serde::Deserialize;

use crate::arcanum::{Arcanum, ArcanaRatings};
use crate::error::{CoreError, CoreResult};
use crate::spell::{CastingType, PrimaryFactor, SpecialReach, Spell};

/// The sample catalog compiled into the crate.
const BUNDLED_SPELLS: &str = include_str!("../data/spells.json");

/// Map a tier label to a spell level; unknown tiers count as 1.
pub fn tier_level(tier: &str) -> u8 {
    match tier {
        "Initiate" => 1,
        "Apprentice" => 2,
        "Disciple" => 3,
        "Adept" => 4,
        "Master" => 5,
        _ => 1,
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawReachEffect {
    effect: String,
    #[serde(default)]
    level: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpellRecord {
    name: String,
    path: String,
    #[serde(default)]
    tier: String,
    #[serde(default)]
    description: String,
    #[serde(default, alias = "short_description")]
    short_description: String,
    #[serde(default)]
    practice: String,
    #[serde(default)]
    primary_factor: String,
    #[serde(default)]
    withstand: Option<String>,
    #[serde(default)]
    skills: Vec<String>,
    #[serde(default)]
    reaches: Vec<RawReachEffect>,
    #[serde(default)]
    source: Option<String>,
}

impl RawSpellRecord {
    fn into_spell(self) -> CoreResult<Spell> {
        let arcanum: Arcanum = self.path.parse()?;
        let special_reaches = self
            .reaches
            .into_iter()
            .map(|r| SpecialReach {
                name: format!("{}: {}", self.name, r.effect),
                cost: r.level,
                mana_cost: 0,
                description: r.effect,
            })
            .collect();

        Ok(Spell {
            level: tier_level(&self.tier),
            name: self.name,
            arcanum,
            casting_type: CastingType::Improvised,
            primary_factor: PrimaryFactor::from(self.primary_factor),
            practice: self.practice,
            withstand: self.withstand.filter(|w| !w.is_empty()),
            skills: self.skills,
            special_reaches,
            description: self.description,
            short_description: self.short_description,
            source: self.source,
        })
    }
}

/// All spells a character could learn.
#[derive(Debug, Clone, Default)]
pub struct SpellCatalog {
    spells: Vec<Spell>,
}

impl SpellCatalog {
    /// The sample catalog shipped with the crate.
    pub fn bundled() -> CoreResult<Self> {
        Self::from_json(BUNDLED_SPELLS)
    }

    /// Load a catalog from a JSON array of sourcebook records.
    ///
    /// Records whose `path` is not a known arcanum are skipped with a warning.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let records: Vec<RawSpellRecord> = serde_json::from_str(json)?;
        let mut spells = Vec::with_capacity(records.len());
        for record in records {
            let name = record.name.clone();
            match record.into_spell() {
                Ok(spell) => spells.push(spell),
                Err(e) => tracing::warn!(spell = %name, "skipping catalog record: {e}"),
            }
        }
        tracing::debug!(count = spells.len(), "spell catalog loaded");
        Ok(Self { spells })
    }

    /// Every spell in catalog order.
    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    /// Look up a spell by exact name.
    pub fn find(&self, name: &str) -> CoreResult<&Spell> {
        self.spells
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CoreError::UnknownSpell(name.to_string()))
    }

    /// Spells of one arcanum.
    pub fn by_arcanum(&self, arcanum: Arcanum) -> impl Iterator<Item = &Spell> {
        self.spells.iter().filter(move |s| s.arcanum == arcanum)
    }

    /// Spells whose level the character's rating reaches.
    pub fn castable<'a>(&'a self, ratings: &'a ArcanaRatings) -> impl Iterator<Item = &'a Spell> {
        self.spells
            .iter()
            .filter(move |s| ratings.get(s.arcanum) >= s.level)
    }

    /// Castable spells whose name or description contains `term`, ignoring case.
    pub fn search<'a>(
        &'a self,
        term: &str,
        ratings: &'a ArcanaRatings,
    ) -> impl Iterator<Item = &'a Spell> {
        let term = term.trim().to_lowercase();
        self.castable(ratings)
            .filter(move |s| matches_term(s, &term))
    }

    /// Like [`search`](Self::search), but over the whole catalog.
    pub fn search_all<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Spell> {
        let term = term.trim().to_lowercase();
        self.spells.iter().filter(move |s| matches_term(s, &term))
    }
}

/// `term` is already trimmed and lowercased. A blank term matches nothing.
fn matches_term(spell: &Spell, term: &str) -> bool {
    !term.is_empty()
        && (spell.name.to_lowercase().contains(term)
            || spell.description.to_lowercase().contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = r#"[
        {
            "name": "Kinetic Blow",
            "path": "Forces",
            "tier": "Initiate",
            "description": "Strike with the force of a hammer.",
            "short_description": "Enhance an unarmed strike",
            "practice": "Compelling",
            "primaryFactor": "Potency",
            "reaches": [{"effect": "Strike all targets in range", "level": 2}]
        },
        {
            "name": "Alter Accuracy",
            "path": "Fate",
            "tier": "Apprentice",
            "description": "Tilt the odds.",
            "practice": "Ruling",
            "primaryFactor": "Duration",
            "withstand": ""
        },
        {
            "name": "Transmute Lead",
            "path": "Alchemy",
            "tier": "Master",
            "primaryFactor": "Potency"
        }
    ]"#;

    #[test]
    fn tier_mapping() {
        assert_eq!(tier_level("Initiate"), 1);
        assert_eq!(tier_level("Disciple"), 3);
        assert_eq!(tier_level("Master"), 5);
        assert_eq!(tier_level("Archmaster"), 1);
    }

    #[test]
    fn records_become_spells() {
        let catalog = SpellCatalog::from_json(RECORDS).unwrap();
        // The unknown path is skipped, not fatal.
        assert_eq!(catalog.spells().len(), 2);

        let blow = catalog.find("Kinetic Blow").unwrap();
        assert_eq!(blow.arcanum, Arcanum::Forces);
        assert_eq!(blow.level, 1);
        assert_eq!(blow.casting_type, CastingType::Improvised);
        assert_eq!(blow.short_description, "Enhance an unarmed strike");
        assert_eq!(blow.special_reaches.len(), 1);
        assert_eq!(
            blow.special_reaches[0].name,
            "Kinetic Blow: Strike all targets in range"
        );
        assert_eq!(blow.special_reaches[0].cost, 2);

        let accuracy = catalog.find("Alter Accuracy").unwrap();
        assert_eq!(accuracy.level, 2);
        assert_eq!(accuracy.primary_factor, PrimaryFactor::Duration);
        assert_eq!(accuracy.withstand, None);
    }

    #[test]
    fn castable_and_search_respect_ratings() {
        let catalog = SpellCatalog::from_json(RECORDS).unwrap();
        let ratings = ArcanaRatings::default().with(Arcanum::Forces, 1);

        let castable: Vec<&str> = catalog.castable(&ratings).map(|s| s.name.as_str()).collect();
        assert_eq!(castable, vec!["Kinetic Blow"]);

        assert_eq!(catalog.search("hammer", &ratings).count(), 1);
        assert_eq!(catalog.search("odds", &ratings).count(), 0);
        assert_eq!(catalog.search("   ", &ratings).count(), 0);
    }

    #[test]
    fn search_all_ignores_ratings_but_not_blank_terms() {
        let catalog = SpellCatalog::from_json(RECORDS).unwrap();
        let found: Vec<&str> = catalog.search_all("ODDS").map(|s| s.name.as_str()).collect();
        assert_eq!(found, vec!["Alter Accuracy"]);
        assert_eq!(catalog.search_all("").count(), 0);
        assert_eq!(catalog.search_all("  ").count(), 0);
    }

    #[test]
    fn unknown_spell_is_an_error() {
        let catalog = SpellCatalog::from_json(RECORDS).unwrap();
        assert!(matches!(
            catalog.find("Nothing"),
            Err(CoreError::UnknownSpell(_))
        ));
    }

    #[test]
    fn bundled_catalog_loads() {
        let catalog = SpellCatalog::bundled().unwrap();
        assert!(!catalog.spells().is_empty());
        assert!(catalog.by_arcanum(Arcanum::Forces).count() > 0);
    }
}
