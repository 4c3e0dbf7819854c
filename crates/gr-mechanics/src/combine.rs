//! Merging several spells into one combined casting.

use gr_core::{
    ArcanaRatings, CastingType, CombinedMarker, CombinedSpell, LowestArcanum, PrimaryFactor,
    Spell, SpellDefinition,
};

use crate::error::{CombinationError, CombinationResult};

/// Dice penalty added for each component beyond the first.
pub const PENALTY_PER_EXTRA_SPELL: u32 = 2;

/// How many spells a mage of this Gnosis can cast as one.
pub fn max_components(gnosis: u8) -> usize {
    match gnosis {
        0..=2 => 1,
        3..=5 => 2,
        6..=8 => 3,
        _ => 4,
    }
}

/// Combine `spells` into a single spell named `name`.
///
/// Components keep their selection order in every joined label. The
/// combined spell is cast with whichever component arcanum the character
/// rates lowest, and costs `2 × (n − 1)` extra dice.
pub fn combine(
    spells: &[SpellDefinition],
    ratings: &ArcanaRatings,
    gnosis: u8,
    name: &str,
) -> CombinationResult<CombinedSpell> {
    if spells.len() < 2 {
        return Err(CombinationError::TooFewSpells(spells.len()));
    }
    let max = max_components(gnosis);
    if spells.len() > max {
        return Err(CombinationError::TooManySpells {
            count: spells.len(),
            max,
            gnosis,
        });
    }

    let mut components: Vec<&Spell> = Vec::with_capacity(spells.len());
    for def in spells {
        match def {
            SpellDefinition::Base(s) if s.casting_type == CastingType::Rote => {
                return Err(CombinationError::RoteComponent(s.name.clone()));
            }
            SpellDefinition::Base(s) => components.push(s),
            SpellDefinition::Combined(c) => {
                return Err(CombinationError::CombinedComponent(c.name.clone()));
            }
        }
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(CombinationError::BlankName);
    }

    let withstands: Vec<&str> = components
        .iter()
        .filter_map(|s| s.withstand.as_deref())
        .collect();

    let mut skills: Vec<String> = Vec::new();
    for skill in components.iter().flat_map(|s| &s.skills) {
        if !skills.contains(skill) {
            skills.push(skill.clone());
        }
    }

    let casting_type = if components
        .iter()
        .all(|s| s.casting_type == CastingType::Praxis)
    {
        CastingType::Praxis
    } else {
        CastingType::Improvised
    };

    let mut lowest = LowestArcanum {
        name: components[0].arcanum,
        value: ratings.get(components[0].arcanum),
    };
    for s in &components[1..] {
        let value = ratings.get(s.arcanum);
        if value < lowest.value {
            lowest = LowestArcanum {
                name: s.arcanum,
                value,
            };
        }
    }

    let combined = CombinedSpell {
        name: name.to_string(),
        arcanum: join(&components, "/", |s| s.arcanum.key().to_string()),
        level: join(&components, "/", |s| s.level.to_string()),
        practice: join(&components, "/", |s| s.practice.clone()),
        primary_factor: PrimaryFactor::from(join(&components, "/", |s| {
            s.primary_factor.label().to_string()
        })),
        withstand: (!withstands.is_empty()).then(|| withstands.join("/")),
        skills,
        special_reaches: components
            .iter()
            .flat_map(|s| s.special_reaches.iter().cloned())
            .collect(),
        description: join(&components, "\n\n", |s| s.description.clone()),
        short_description: format!(
            "Combined spell: {}",
            join(&components, ", ", |s| s.name.clone())
        ),
        casting_type,
        component_spells: components.iter().copied().cloned().collect(),
        additional_penalty: PENALTY_PER_EXTRA_SPELL * (components.len() as u32 - 1),
        lowest_arcanum: lowest,
        combined: CombinedMarker,
    };

    tracing::debug!(
        spell = %combined.name,
        components = components.len(),
        casting_arcanum = %lowest.name,
        "combined spells"
    );
    Ok(combined)
}

fn join(components: &[&Spell], sep: &str, field: impl Fn(&Spell) -> String) -> String {
    components
        .iter()
        .map(|&s| field(s))
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{special, spell};
    use gr_core::Arcanum;

    fn three_spells() -> Vec<SpellDefinition> {
        let mut blow = spell("Kinetic Blow", Arcanum::Forces, 1);
        blow.skills = vec!["Athletics".into(), "Brawl".into()];
        blow.special_reaches = vec![special("Kinetic Blow: Strike all targets", 2, 0)];

        let mut flesh = spell("Sculpt Flesh", Arcanum::Life, 3);
        flesh.primary_factor = PrimaryFactor::Duration;
        flesh.practice = "Perfecting".into();
        flesh.withstand = Some("Stamina".into());
        flesh.skills = vec!["Brawl".into(), "Medicine".into()];

        let truth = spell("Tell Truth From Lies", Arcanum::Mind, 1);
        vec![blow.into(), flesh.into(), truth.into()]
    }

    fn ratings() -> ArcanaRatings {
        ArcanaRatings::default()
            .with(Arcanum::Forces, 3)
            .with(Arcanum::Life, 3)
            .with(Arcanum::Mind, 2)
    }

    #[test]
    fn gnosis_caps_component_count() {
        assert_eq!(max_components(1), 1);
        assert_eq!(max_components(3), 2);
        assert_eq!(max_components(5), 2);
        assert_eq!(max_components(6), 3);
        assert_eq!(max_components(9), 4);
        assert_eq!(max_components(10), 4);
    }

    #[test]
    fn gnosis_five_rejects_three_spells() {
        let err = combine(&three_spells(), &ratings(), 5, "Triple").unwrap_err();
        assert_eq!(
            err,
            CombinationError::TooManySpells {
                count: 3,
                max: 2,
                gnosis: 5
            }
        );
    }

    #[test]
    fn gnosis_six_accepts_three_spells() {
        let combined = combine(&three_spells(), &ratings(), 6, "Triple").unwrap();
        assert_eq!(combined.additional_penalty, 4);
        assert_eq!(combined.component_spells.len(), 3);
    }

    #[test]
    fn labels_join_in_selection_order() {
        let c = combine(&three_spells(), &ratings(), 6, "  Triple  ").unwrap();
        assert_eq!(c.name, "Triple");
        assert_eq!(c.arcanum, "forces/life/mind");
        assert_eq!(c.level, "1/3/1");
        assert_eq!(c.practice, "Compelling/Perfecting/Compelling");
        assert_eq!(
            c.primary_factor,
            PrimaryFactor::Other("Potency/Duration/Potency".into())
        );
        assert_eq!(c.withstand.as_deref(), Some("Stamina"));
        assert_eq!(c.skills, vec!["Athletics", "Brawl", "Medicine"]);
        assert_eq!(c.special_reaches.len(), 1);
        assert_eq!(
            c.description,
            "Kinetic Blow rules text\n\nSculpt Flesh rules text\n\nTell Truth From Lies rules text"
        );
        insta::assert_snapshot!(
            c.short_description,
            @"Combined spell: Kinetic Blow, Sculpt Flesh, Tell Truth From Lies"
        );
    }

    #[test]
    fn lowest_rated_arcanum_is_chosen() {
        let c = combine(&three_spells(), &ratings(), 6, "Triple").unwrap();
        assert_eq!(
            c.lowest_arcanum,
            LowestArcanum {
                name: Arcanum::Mind,
                value: 2
            }
        );
    }

    #[test]
    fn ties_go_to_the_first_component() {
        let spells = &three_spells()[..2];
        let c = combine(spells, &ratings(), 3, "Pair").unwrap();
        assert_eq!(c.lowest_arcanum.name, Arcanum::Forces);
        assert_eq!(c.withstand.as_deref(), Some("Stamina"));
        assert_eq!(c.additional_penalty, 2);
    }

    #[test]
    fn praxis_only_when_every_component_is() {
        let a = spell("A", Arcanum::Fate, 1).with_casting_type(CastingType::Praxis);
        let b = spell("B", Arcanum::Time, 1).with_casting_type(CastingType::Praxis);
        let c = spell("C", Arcanum::Time, 1);
        let both = combine(
            &[SpellDefinition::from(a.clone()), SpellDefinition::from(b)],
            &ratings(),
            3,
            "AB",
        )
        .unwrap();
        assert_eq!(both.casting_type, CastingType::Praxis);
        let mixed = combine(
            &[SpellDefinition::from(a), SpellDefinition::from(c)],
            &ratings(),
            3,
            "AC",
        )
        .unwrap();
        assert_eq!(mixed.casting_type, CastingType::Improvised);
    }

    #[test]
    fn rejects_bad_components() {
        let spells = three_spells();
        assert_eq!(
            combine(&spells[..1], &ratings(), 6, "One"),
            Err(CombinationError::TooFewSpells(1))
        );

        let rote = spell("Rote", Arcanum::Prime, 1).with_casting_type(CastingType::Rote);
        assert_eq!(
            combine(&[spells[0].clone(), SpellDefinition::from(rote)], &ratings(), 6, "X"),
            Err(CombinationError::RoteComponent("Rote".into()))
        );

        let pair = combine(&spells[..2], &ratings(), 6, "Pair").unwrap();
        assert_eq!(
            combine(&[SpellDefinition::from(pair), spells[2].clone()], &ratings(), 6, "Nested"),
            Err(CombinationError::CombinedComponent("Pair".into()))
        );

        assert_eq!(
            combine(&spells[..2], &ratings(), 6, "   "),
            Err(CombinationError::BlankName)
        );
    }
}
