//! Pricing a reach selection.
//!
//! Each selected name is looked up first among the spell's own reaches,
//! then in the shared catalog; anything else is ignored. Duration reaches
//! get cheaper when Duration is the effective primary factor: the ladder
//! is free up to the caster's Arcanum and only the steps above it cost
//! dice.

use gr_core::arcanum::MAX_RATING;
use gr_core::{PrimaryFactor, ReachCatalog, ReachDefinition, ReachKind, SpellDefinition};
use serde::{Deserialize, Serialize};

/// Totals for a reach selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachEvaluation {
    /// Reach points spent.
    pub reach_cost: u32,
    /// Dice removed from the pool.
    pub dice_penalty: u32,
    /// Mana spent on reaches.
    pub mana_cost: u32,
}

/// The primary factor in effect: the override when it differs from the
/// spell's own, otherwise the spell's own.
pub fn effective_primary_factor<'a>(
    base: &'a PrimaryFactor,
    override_factor: Option<&'a PrimaryFactor>,
) -> &'a PrimaryFactor {
    match override_factor {
        Some(factor) if factor != base => factor,
        _ => base,
    }
}

/// Dice penalty for a duration reach.
///
/// Without Duration as the primary factor this is the entry's flat penalty.
/// With it, ladder steps up to `min(domain, 5)` are free and the rest cost
/// the difference in cumulative penalty. Non-duration reaches return their
/// flat penalty.
pub fn duration_penalty(reach: &ReachDefinition, effective: &PrimaryFactor, domain: u8) -> u32 {
    let ReachKind::Duration { scale, level } = reach.kind else {
        return reach.dice_penalty;
    };
    if *effective != PrimaryFactor::Duration {
        return reach.dice_penalty;
    }

    let free = domain.min(MAX_RATING);
    if level <= free {
        0
    } else {
        scale
            .cumulative_penalty(level)
            .saturating_sub(scale.cumulative_penalty(free))
    }
}

/// Price the selected reach names for `spell`.
///
/// `domain` is the caster's rating in the spell's casting arcanum.
/// Spell-specific reaches add their reach and Mana cost but never a dice
/// penalty. Unknown names are skipped.
pub fn evaluate<'a>(
    names: impl IntoIterator<Item = &'a str>,
    spell: &SpellDefinition,
    catalog: &ReachCatalog,
    domain: u8,
    override_factor: Option<&PrimaryFactor>,
) -> ReachEvaluation {
    let effective = effective_primary_factor(spell.primary_factor(), override_factor);
    let mut total = ReachEvaluation::default();

    for name in names {
        if let Some(special) = spell.special_reaches().iter().find(|r| r.name == name) {
            total.reach_cost += special.cost;
            total.mana_cost += special.mana_cost;
            continue;
        }
        let Some(reach) = catalog.find(name) else {
            tracing::debug!(reach = name, "ignoring unknown reach");
            continue;
        };
        total.reach_cost += reach.cost;
        total.dice_penalty += duration_penalty(reach, effective, domain);
        total.mana_cost += reach.mana_cost;
    }

    tracing::debug!(
        spell = spell.name(),
        reach_cost = total.reach_cost,
        dice_penalty = total.dice_penalty,
        mana_cost = total.mana_cost,
        "evaluated reaches"
    );
    total
}
