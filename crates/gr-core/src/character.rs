use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::arcanum::{Arcanum, ArcanaRatings, MAX_RATING};
use crate::error::{CoreError, CoreResult};
use crate::spell::{CastingType, SpellDefinition};

/// Lowest Gnosis a mage can have.
pub const MIN_GNOSIS: u8 = 1;
/// Highest Gnosis a mage can have.
pub const MAX_GNOSIS: u8 = 10;
/// How many arcana can be flagged as major.
pub const MAX_MAJOR_ARCANA: usize = 3;

/// A mage's persistent state.
///
/// Serializes to the storage blob shape
/// `{gnosis, arcanaValues, userSpells, yantras, majorArcana}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// General power rating, 1-10.
    pub gnosis: u8,
    /// Rating in each arcanum.
    pub arcana_values: ArcanaRatings,
    /// Learned and combined spells.
    pub user_spells: Vec<SpellDefinition>,
    /// Default yantra bonus dice.
    pub yantras: i32,
    /// Up to three specialties; improvised spells in these cost no Mana.
    pub major_arcana: Vec<Arcanum>,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            gnosis: MIN_GNOSIS,
            arcana_values: ArcanaRatings::default(),
            user_spells: Vec::new(),
            yantras: 0,
            major_arcana: Vec::new(),
        }
    }
}

impl Character {
    /// Set Gnosis, clamped to 1-10.
    pub fn set_gnosis(&mut self, gnosis: u8) {
        self.gnosis = gnosis.clamp(MIN_GNOSIS, MAX_GNOSIS);
    }

    /// Rating in an arcanum.
    pub fn rating(&self, arcanum: Arcanum) -> u8 {
        self.arcana_values.get(arcanum)
    }

    /// Set an arcanum rating, clamped to 0-5.
    pub fn set_rating(&mut self, arcanum: Arcanum, rating: u8) {
        self.arcana_values.set(arcanum, rating);
    }

    /// Whether an arcanum is flagged as major.
    pub fn is_major(&self, arcanum: Arcanum) -> bool {
        self.major_arcana.contains(&arcanum)
    }

    /// Flip an arcanum's major flag. Returns whether it is now flagged.
    pub fn toggle_major_arcanum(&mut self, arcanum: Arcanum) -> CoreResult<bool> {
        if let Some(pos) = self.major_arcana.iter().position(|a| *a == arcanum) {
            self.major_arcana.remove(pos);
            return Ok(false);
        }
        if self.major_arcana.len() >= MAX_MAJOR_ARCANA {
            return Err(CoreError::TooManyMajorArcana(arcanum));
        }
        self.major_arcana.push(arcanum);
        Ok(true)
    }

    /// Add a spell to the spellbook unless an entry with the same name and
    /// casting type exists. Returns whether it was added.
    pub fn learn(&mut self, spell: impl Into<SpellDefinition>) -> bool {
        let spell = spell.into();
        if self
            .user_spells
            .iter()
            .any(|s| s.is(spell.name(), spell.casting_type()))
        {
            return false;
        }
        tracing::debug!(spell = spell.name(), casting_type = %spell.casting_type(), "learned spell");
        self.user_spells.push(spell);
        true
    }

    /// Remove a spellbook entry by identity.
    pub fn forget(&mut self, name: &str, casting_type: CastingType) -> CoreResult<SpellDefinition> {
        let pos = self
            .user_spells
            .iter()
            .position(|s| s.is(name, casting_type))
            .ok_or_else(|| CoreError::SpellNotFound(format!("{name} ({casting_type})")))?;
        Ok(self.user_spells.remove(pos))
    }

    /// Find a spellbook entry by name, disambiguating by casting type when
    /// the same spell is known several ways.
    pub fn find_spell(
        &self,
        name: &str,
        casting_type: Option<CastingType>,
    ) -> CoreResult<&SpellDefinition> {
        let mut matches = self.user_spells.iter().filter(|s| s.name() == name);
        if let Some(ct) = casting_type {
            return matches
                .find(|s| s.casting_type() == ct)
                .ok_or_else(|| CoreError::SpellNotFound(format!("{name} ({ct})")));
        }

        let found: Vec<&SpellDefinition> = matches.collect();
        match found.as_slice() {
            [] => Err(CoreError::SpellNotFound(name.to_string())),
            [one] => Ok(*one),
            many => Err(CoreError::AmbiguousSpell {
                name: name.to_string(),
                types: many
                    .iter()
                    .map(|s| s.casting_type().to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Serialize to the storage blob.
    pub fn to_blob(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild from a storage blob. Never fails: unparseable input yields
    /// the default character, see [`Character::from_value`].
    pub fn from_blob(blob: &str) -> Self {
        match serde_json::from_str::<Value>(blob) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                tracing::warn!("character blob is not JSON, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Rebuild from parsed blob JSON, validating each field on its own.
    ///
    /// A field of the wrong type keeps its default; the others still load.
    pub fn from_value(value: &Value) -> Self {
        let mut character = Self::default();
        let Some(obj) = value.as_object() else {
            tracing::warn!("character blob is not an object, using defaults");
            return character;
        };

        if let Some(gnosis) = obj.get("gnosis").and_then(as_int) {
            let clamped = gnosis.clamp(i64::from(MIN_GNOSIS), i64::from(MAX_GNOSIS));
            character.set_gnosis(u8::try_from(clamped).unwrap_or(MIN_GNOSIS));
        }

        if let Some(values) = obj.get("arcanaValues").and_then(Value::as_object) {
            for (key, rating) in values {
                let (Ok(arcanum), Some(rating)) = (key.parse::<Arcanum>(), as_int(rating)) else {
                    continue;
                };
                let clamped = rating.clamp(0, i64::from(MAX_RATING));
                character.set_rating(arcanum, u8::try_from(clamped).unwrap_or(0));
            }
        }

        if let Some(spells) = obj.get("userSpells").and_then(Value::as_array) {
            for entry in spells {
                match serde_json::from_value::<SpellDefinition>(entry.clone()) {
                    Ok(spell) => character.user_spells.push(spell),
                    Err(e) => tracing::warn!("dropping unreadable spellbook entry: {e}"),
                }
            }
        }

        if let Some(yantras) = obj.get("yantras").and_then(as_int) {
            character.yantras =
                i32::try_from(yantras.clamp(i64::from(i32::MIN), i64::from(i32::MAX)))
                    .unwrap_or(0);
        }

        if let Some(major) = obj.get("majorArcana").and_then(Value::as_array) {
            for arcanum in major
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| s.parse::<Arcanum>().ok())
            {
                if character.major_arcana.len() < MAX_MAJOR_ARCANA && !character.is_major(arcanum) {
                    character.major_arcana.push(arcanum);
                }
            }
        }

        character
    }
}

fn as_int(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spell::tests::sample_spell;
    use serde_json::json;

    #[test]
    fn defaults() {
        let c = Character::default();
        assert_eq!(c.gnosis, 1);
        assert!(c.arcana_values.iter().all(|(_, r)| r == 0));
        assert!(c.user_spells.is_empty());
        assert!(c.major_arcana.is_empty());
        assert_eq!(c.yantras, 0);
    }

    #[test]
    fn gnosis_is_clamped() {
        let mut c = Character::default();
        c.set_gnosis(0);
        assert_eq!(c.gnosis, 1);
        c.set_gnosis(12);
        assert_eq!(c.gnosis, 10);
    }

    #[test]
    fn major_arcana_capped_at_three() {
        let mut c = Character::default();
        assert!(c.toggle_major_arcanum(Arcanum::Forces).unwrap());
        assert!(c.toggle_major_arcanum(Arcanum::Life).unwrap());
        assert!(c.toggle_major_arcanum(Arcanum::Prime).unwrap());
        assert!(matches!(
            c.toggle_major_arcanum(Arcanum::Time),
            Err(CoreError::TooManyMajorArcana(Arcanum::Time))
        ));
        assert!(!c.toggle_major_arcanum(Arcanum::Life).unwrap());
        assert!(c.toggle_major_arcanum(Arcanum::Time).unwrap());
    }

    #[test]
    fn spellbook_identity_is_name_and_casting_type() {
        let mut c = Character::default();
        let blow = sample_spell("Kinetic Blow", Arcanum::Forces, 1);
        assert!(c.learn(blow.clone()));
        assert!(!c.learn(blow.clone()));
        assert!(c.learn(blow.clone().with_casting_type(CastingType::Rote)));
        assert_eq!(c.user_spells.len(), 2);

        assert!(matches!(
            c.find_spell("Kinetic Blow", None),
            Err(CoreError::AmbiguousSpell { .. })
        ));
        let rote = c.find_spell("Kinetic Blow", Some(CastingType::Rote)).unwrap();
        assert_eq!(rote.casting_type(), CastingType::Rote);

        c.forget("Kinetic Blow", CastingType::Improvised).unwrap();
        assert_eq!(
            c.find_spell("Kinetic Blow", None).unwrap().casting_type(),
            CastingType::Rote
        );
        assert!(c.forget("Kinetic Blow", CastingType::Praxis).is_err());
    }

    #[test]
    fn blob_round_trip() {
        let mut c = Character::default();
        c.set_gnosis(6);
        c.set_rating(Arcanum::Forces, 4);
        c.set_rating(Arcanum::Time, 2);
        c.yantras = 3;
        c.toggle_major_arcanum(Arcanum::Forces).unwrap();
        c.learn(sample_spell("Kinetic Blow", Arcanum::Forces, 1));

        let blob = c.to_blob().unwrap();
        assert_eq!(Character::from_blob(&blob), c);
    }

    #[test]
    fn blob_uses_storage_field_names() {
        let blob = Character::default().to_blob().unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        for key in ["gnosis", "arcanaValues", "userSpells", "yantras", "majorArcana"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn corrupt_fields_degrade_one_by_one() {
        let value = json!({
            "gnosis": "seven",
            "arcanaValues": {"forces": 3, "alchemy": 4, "mind": "lots", "time": 9},
            "userSpells": [
                {"name": "Broken"},
                {
                    "name": "Kinetic Blow",
                    "arcanum": "forces",
                    "level": 1,
                    "castingType": "rote",
                    "primaryFactor": "Potency"
                }
            ],
            "yantras": 2,
            "majorArcana": ["forces", "nope", "life", "forces", "mind", "prime"]
        });
        let c = Character::from_value(&value);
        assert_eq!(c.gnosis, 1);
        assert_eq!(c.rating(Arcanum::Forces), 3);
        assert_eq!(c.rating(Arcanum::Mind), 0);
        assert_eq!(c.rating(Arcanum::Time), 5);
        assert_eq!(c.user_spells.len(), 1);
        assert_eq!(c.user_spells[0].casting_type(), CastingType::Rote);
        assert_eq!(c.yantras, 2);
        assert_eq!(
            c.major_arcana,
            vec![Arcanum::Forces, Arcanum::Life, Arcanum::Mind]
        );
    }

    #[test]
    fn garbage_blob_is_default() {
        assert_eq!(Character::from_blob("not json"), Character::default());
        assert_eq!(Character::from_blob("[1, 2]"), Character::default());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn round_trip_any_valid_state(
                gnosis in 1u8..=10,
                ratings in proptest::collection::vec(0u8..=5, 10),
                yantras in -20i32..20,
                majors in proptest::collection::vec(0usize..10, 0..=3),
            ) {
                let mut c = Character::default();
                c.set_gnosis(gnosis);
                for (arcanum, rating) in Arcanum::ALL.into_iter().zip(ratings) {
                    c.set_rating(arcanum, rating);
                }
                c.yantras = yantras;
                for idx in majors {
                    let arcanum = Arcanum::ALL[idx];
                    if !c.is_major(arcanum) {
                        c.toggle_major_arcanum(arcanum).unwrap();
                    }
                }
                let blob = c.to_blob().unwrap();
                prop_assert_eq!(Character::from_blob(&blob), c);
            }
        }
    }
}
