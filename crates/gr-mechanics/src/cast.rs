//! Planning and rolling a casting.
//!
//! [`plan_cast`] is pure: it prices a request against a character and
//! reports the pool, reach budget, Mana, and potency without rolling.
//! [`cast`] then rolls the planned pool.

use gr_core::{
    Arcanum, CastingType, Character, PrimaryFactor, ReachCatalog, SpellDefinition,
};
use serde::Serialize;

use crate::dice::{DieSource, RollOptions, roll};
use crate::error::MechResult;
use crate::pool::{PoolSize, available_reaches, compute_pool};
use crate::reach::{ReachEvaluation, ReachSelection, effective_primary_factor, evaluate};
use crate::resolution::Resolution;

/// Highest potency boost a caster can buy.
pub const MAX_POTENCY_BOOST: u8 = 5;
/// Dice each level of potency boost costs.
pub const DICE_PER_POTENCY_BOOST: i32 = 2;
/// Manual dice modifier range, `-10..=10`.
pub const DICE_MODIFIER_LIMIT: i32 = 10;
/// Manual reach modifier range, `-5..=5`.
pub const REACH_MODIFIER_LIMIT: i32 = 5;
/// Manual Mana modifier range, `-5..=5`.
pub const MANA_MODIFIER_LIMIT: i32 = 5;

/// Everything the caster chooses for one casting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastRequest {
    /// The spell being cast.
    pub spell: SpellDefinition,
    /// Chosen reaches.
    pub reaches: ReachSelection,
    /// Bonus dice from yantras.
    pub yantras: i32,
    /// Extra potency bought with dice (0-5).
    pub potency_boost: u8,
    /// Manual dice adjustment (-10 to 10).
    pub dice_modifier: i32,
    /// Manual reach budget adjustment (-5 to 5).
    pub reach_modifier: i32,
    /// Manual Mana adjustment (-5 to 5).
    pub mana_modifier: i32,
}

impl CastRequest {
    /// A request with no reaches and no modifiers.
    pub fn new(spell: impl Into<SpellDefinition>) -> Self {
        Self {
            spell: spell.into(),
            reaches: ReachSelection::new(),
            yantras: 0,
            potency_boost: 0,
            dice_modifier: 0,
            reach_modifier: 0,
            mana_modifier: 0,
        }
    }

    /// Set the chosen reaches.
    pub fn with_reaches(mut self, reaches: ReachSelection) -> Self {
        self.reaches = reaches;
        self
    }

    /// Set the yantra bonus.
    pub fn with_yantras(mut self, yantras: i32) -> Self {
        self.yantras = yantras;
        self
    }

    /// Set the potency boost (clamped to 0-5).
    pub fn with_potency_boost(mut self, boost: u8) -> Self {
        self.potency_boost = boost.min(MAX_POTENCY_BOOST);
        self
    }

    /// Set the dice modifier (clamped to -10..=10).
    pub fn with_dice_modifier(mut self, modifier: i32) -> Self {
        self.dice_modifier = modifier.clamp(-DICE_MODIFIER_LIMIT, DICE_MODIFIER_LIMIT);
        self
    }

    /// Set the reach modifier (clamped to -5..=5).
    pub fn with_reach_modifier(mut self, modifier: i32) -> Self {
        self.reach_modifier = modifier.clamp(-REACH_MODIFIER_LIMIT, REACH_MODIFIER_LIMIT);
        self
    }

    /// Set the Mana modifier (clamped to -5..=5).
    pub fn with_mana_modifier(mut self, modifier: i32) -> Self {
        self.mana_modifier = modifier.clamp(-MANA_MODIFIER_LIMIT, MANA_MODIFIER_LIMIT);
        self
    }
}

/// A priced casting, ready to roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastPlan {
    /// Spell name.
    pub spell: String,
    /// Casting type of the spellbook entry.
    pub casting_type: CastingType,
    /// Arcanum whose rating drives the pool.
    pub arcanum: Arcanum,
    /// The character's rating in that arcanum.
    pub domain: u8,
    /// Primary factor after any override.
    pub primary_factor: PrimaryFactor,
    /// Selected reach names, in selection order.
    pub selected_reaches: Vec<String>,
    /// Totals from the reach evaluator.
    pub reaches: ReachEvaluation,
    /// Yantra bonus dice added to the pool.
    pub yantras: i32,
    /// Dice removed from the pool after every adjustment.
    pub effective_penalty: i32,
    /// The dice pool.
    pub pool: PoolSize,
    /// Reach points available, including the manual modifier.
    pub available_reaches: i32,
    /// Reach points left; negative means overreach.
    pub remaining_reaches: i32,
    /// Total Mana spent.
    pub mana: u32,
    /// Potency of the effect.
    pub potency: u32,
}

impl CastPlan {
    /// More reaches are used than the caster can afford.
    pub fn is_overreach(&self) -> bool {
        self.remaining_reaches < 0
    }
}

/// The outcome of a rolled casting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CastResult {
    /// Every face drawn, explosions included.
    pub faces: Vec<u8>,
    /// Dice in the pool before explosions.
    pub dice: u32,
    /// Whether the pool was a chance die.
    pub chance_die: bool,
    /// Classified outcome.
    pub resolution: Resolution,
}

/// Price a casting without rolling it.
pub fn plan_cast(character: &Character, request: &CastRequest, catalog: &ReachCatalog) -> CastPlan {
    let spell = &request.spell;
    let arcanum = spell.casting_arcanum();
    let domain = character.rating(arcanum);

    let override_factor = request.reaches.primary_factor_override();
    let selected = request.reaches.names();
    let reaches = evaluate(
        selected.iter().copied(),
        spell,
        catalog,
        domain,
        override_factor,
    );
    let primary_factor = effective_primary_factor(spell.primary_factor(), override_factor).clone();

    let boost = request.potency_boost.min(MAX_POTENCY_BOOST);
    let dice_modifier = request
        .dice_modifier
        .clamp(-DICE_MODIFIER_LIMIT, DICE_MODIFIER_LIMIT);
    let reach_modifier = request
        .reach_modifier
        .clamp(-REACH_MODIFIER_LIMIT, REACH_MODIFIER_LIMIT);
    let mana_modifier = request
        .mana_modifier
        .clamp(-MANA_MODIFIER_LIMIT, MANA_MODIFIER_LIMIT);

    let effective_penalty = signed(reaches.dice_penalty)
        .saturating_add(DICE_PER_POTENCY_BOOST * i32::from(boost))
        .saturating_add(signed(spell.additional_penalty()))
        .saturating_sub(dice_modifier);

    let pool = compute_pool(character.gnosis, domain, request.yantras, effective_penalty);

    let available = signed(available_reaches(
        domain,
        spell.highest_level(),
        spell.casting_type(),
    )) + reach_modifier;
    let remaining = available.saturating_sub(signed(reaches.reach_cost));

    let mana = u32::try_from(
        casting_mana(character, spell)
            .saturating_add(signed(reaches.mana_cost))
            .saturating_add(mana_modifier),
    )
    .unwrap_or(0);

    let potency = match primary_factor {
        PrimaryFactor::Potency => u32::from(domain),
        _ => 1,
    } + u32::from(boost);

    let plan = CastPlan {
        spell: spell.name().to_string(),
        casting_type: spell.casting_type(),
        arcanum,
        domain,
        primary_factor,
        selected_reaches: selected.iter().map(|s| s.to_string()).collect(),
        reaches,
        yantras: request.yantras,
        effective_penalty,
        pool,
        available_reaches: available,
        remaining_reaches: remaining,
        mana,
        potency,
    };

    tracing::debug!(
        spell = %plan.spell,
        overreach = plan.is_overreach(),
        dice = plan.pool.dice(),
        penalty = plan.effective_penalty,
        mana = plan.mana,
        potency = plan.potency,
        "planned casting"
    );
    plan
}

/// Roll a planned casting.
pub fn cast(
    plan: &CastPlan,
    options: &RollOptions,
    source: &mut impl DieSource,
) -> MechResult<CastResult> {
    let dice = plan.pool.dice();
    let chance_die = plan.pool.is_chance_die();
    let faces = roll(dice, options, source)?;
    let resolution = Resolution::classify(&faces, chance_die);
    tracing::debug!(spell = %plan.spell, %resolution, "cast resolved");
    Ok(CastResult {
        faces,
        dice,
        chance_die,
        resolution,
    })
}

/// Mana the casting itself costs: one point for an improvised spell unless
/// every arcanum it draws on is a major arcanum.
fn casting_mana(character: &Character, spell: &SpellDefinition) -> i32 {
    match spell.casting_type() {
        CastingType::Improvised if spell.arcana().iter().all(|a| character.is_major(*a)) => 0,
        CastingType::Improvised => 1,
        CastingType::Rote | CastingType::Praxis => 0,
    }
}

fn signed(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
