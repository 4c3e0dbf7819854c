use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use gr_core::{ReachCatalog, SpellDefinition};
use gr_mechanics::available_reaches;

use super::{Context, parse_optional_casting_type, truncate};

pub fn run(ctx: &Context, spell: Option<&str>, casting_type: Option<&str>) -> Result<(), String> {
    let catalog = ReachCatalog::default();

    for (category, entries) in catalog.by_category() {
        println!("  {}", category.bold());
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Cost", "Dice", "Mana", "Description"]);
        for reach in entries {
            table.add_row(vec![
                reach.name.clone(),
                reach.cost.to_string(),
                penalty(reach.dice_penalty),
                reach.mana_cost.to_string(),
                truncate(&reach.description, 60),
            ]);
        }
        println!("{table}");
        println!();
    }

    let Some(name) = spell else {
        return Ok(());
    };
    let spell = resolve_spell(ctx, name, casting_type)?;
    let character = ctx.character();
    let domain = character.rating(spell.casting_arcanum());
    let budget = available_reaches(domain, spell.highest_level(), spell.casting_type());

    println!(
        "  {} [{} {}]",
        spell.name().bold(),
        spell.arcanum_label(),
        spell.level_label()
    );
    println!(
        "  reach budget: {budget} ({} {domain}, {})",
        spell.casting_arcanum(),
        spell.casting_type()
    );
    println!("  primary factor: {}", spell.primary_factor());

    if spell.special_reaches().is_empty() {
        println!("  {}", "No spell-specific reaches.".dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Cost", "Mana"]);
    for reach in spell.special_reaches() {
        table.add_row(vec![
            reach.name.clone(),
            reach.cost.to_string(),
            reach.mana_cost.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}

/// A spellbook entry if the character knows the spell, else the catalog entry.
fn resolve_spell(
    ctx: &Context,
    name: &str,
    casting_type: Option<&str>,
) -> Result<SpellDefinition, String> {
    let casting_type = parse_optional_casting_type(casting_type)?;
    let character = ctx.character();
    if let Ok(known) = character.find_spell(name, casting_type) {
        return Ok(known.clone());
    }

    let catalog = ctx.catalog()?;
    let spell = catalog.find(name).map_err(|e| e.to_string())?.clone();
    Ok(match casting_type {
        Some(ct) => spell.with_casting_type(ct).into(),
        None => spell.into(),
    })
}

fn penalty(dice: u32) -> String {
    if dice == 0 {
        "-".to_string()
    } else {
        format!("-{dice}")
    }
}
