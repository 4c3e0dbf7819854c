use colored::Colorize;
use gr_core::ReachCatalog;
use gr_mechanics::{
    Again, CastPlan, CastRequest, ReachSelection, RngDice, RollOptions, cast, plan_cast,
};

use super::{Context, faces, outcome, parse_optional_casting_type};

/// Everything the `cast` subcommand was given.
pub struct CastOptions {
    pub spell: String,
    pub casting_type: Option<String>,
    pub reaches: Vec<String>,
    pub yantras: Option<i32>,
    pub boost: u8,
    pub dice_mod: i32,
    pub reach_mod: i32,
    pub mana_mod: i32,
    pub again: Again,
    pub seed: Option<u64>,
    pub plan_only: bool,
}

pub fn run(ctx: &Context, opts: CastOptions) -> Result<(), String> {
    let character = ctx.character();
    let casting_type = parse_optional_casting_type(opts.casting_type.as_deref())?;
    let spell = character
        .find_spell(&opts.spell, casting_type)
        .map_err(|e| e.to_string())?
        .clone();

    let catalog = ReachCatalog::default();
    let mut selection = ReachSelection::new();
    for reach in &opts.reaches {
        let known = catalog.find(reach).is_some()
            || spell.special_reaches().iter().any(|r| &r.name == reach);
        if !known {
            return Err(format!(
                "unknown reach: \"{reach}\" (see `grimoire reaches --spell \"{}\"`)",
                spell.name()
            ));
        }
        let displaced = selection.duration().map(str::to_string);
        selection.select(reach, &catalog);
        if let Some(old) = displaced.filter(|old| selection.duration() != Some(old.as_str())) {
            println!("  {}", format!("{reach} replaces {old}").dimmed());
        }
    }

    let request = CastRequest::new(spell)
        .with_reaches(selection)
        .with_yantras(opts.yantras.unwrap_or(character.yantras))
        .with_potency_boost(opts.boost)
        .with_dice_modifier(opts.dice_mod)
        .with_reach_modifier(opts.reach_mod)
        .with_mana_modifier(opts.mana_mod);
    let plan = plan_cast(&character, &request, &catalog);
    print_plan(&plan, character.gnosis);

    if opts.plan_only {
        return Ok(());
    }

    let seed = opts.seed.unwrap_or_else(rand::random);
    let options = RollOptions::default().with_again(opts.again);
    let result = cast(&plan, &options, &mut RngDice::seeded(seed)).map_err(|e| e.to_string())?;

    println!();
    println!(
        "  Rolled {} {} ({}): {}",
        result.dice,
        if result.dice == 1 { "die" } else { "dice" },
        opts.again,
        faces(&result.faces, result.chance_die)
    );
    println!("  {}", outcome(&result.resolution));
    println!("  {}", format!("seed {seed}").dimmed());

    Ok(())
}

fn print_plan(plan: &CastPlan, gnosis: u8) {
    println!(
        "  {} [{}, {} {}]",
        plan.spell.bold(),
        plan.casting_type,
        plan.arcanum,
        plan.domain
    );
    if !plan.selected_reaches.is_empty() {
        println!("  reaches:     {}", plan.selected_reaches.join(", "));
    }
    let yantras = match plan.yantras {
        0 => String::new(),
        y if y > 0 => format!(" + yantras {y}"),
        y => format!(" - yantras {}", y.unsigned_abs()),
    };
    println!(
        "  dice pool:   {} (Gnosis {gnosis} + {} {}{yantras}, penalty {})",
        plan.pool.dice().to_string().bold(),
        plan.arcanum,
        plan.domain,
        plan.effective_penalty
    );
    println!(
        "  reach cost:  {} of {} available",
        plan.reaches.reach_cost, plan.available_reaches
    );
    println!("  mana:        {}", plan.mana);
    println!("  potency:     {}", plan.potency);
    println!("  primary:     {}", plan.primary_factor);

    if plan.pool.is_chance_die() {
        println!(
            "  {}",
            "chance die: only a 10 succeeds, and a 1 is a dramatic failure".yellow()
        );
    }
    if plan.is_overreach() {
        println!(
            "  {}",
            format!(
                "warning: overreach by {}; the casting risks Paradox",
                -plan.remaining_reaches
            )
            .yellow()
            .bold()
        );
    }
}
