//! Spell fixtures shared by the unit tests.

use gr_core::{Arcanum, CastingType, PrimaryFactor, SpecialReach, Spell};

pub(crate) fn spell(name: &str, arcanum: Arcanum, level: u8) -> Spell {
    Spell {
        name: name.to_string(),
        arcanum,
        level,
        casting_type: CastingType::Improvised,
        primary_factor: PrimaryFactor::Potency,
        practice: "Compelling".to_string(),
        withstand: None,
        skills: vec![],
        special_reaches: vec![],
        description: format!("{name} rules text"),
        short_description: String::new(),
        source: None,
    }
}

pub(crate) fn special(name: &str, cost: u32, mana_cost: u32) -> SpecialReach {
    SpecialReach {
        name: name.to_string(),
        cost,
        mana_cost,
        description: String::new(),
    }
}
