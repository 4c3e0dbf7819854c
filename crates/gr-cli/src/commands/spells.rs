use comfy_table::{ContentArrangement, Table};
use gr_core::Spell;

use super::{Context, parse_arcanum, truncate};

pub fn run(
    ctx: &Context,
    arcanum: Option<&str>,
    search: Option<&str>,
    all: bool,
) -> Result<(), String> {
    let catalog = ctx.catalog()?;
    let character = ctx.character();
    let ratings = &character.arcana_values;
    let arcanum = arcanum.map(parse_arcanum).transpose()?;

    let mut spells: Vec<&Spell> = match (search, all) {
        (Some(term), false) => catalog.search(term, ratings).collect(),
        (Some(term), true) => catalog.search_all(term).collect(),
        (None, false) => catalog.castable(ratings).collect(),
        (None, true) => catalog.spells().iter().collect(),
    };
    if let Some(arcanum) = arcanum {
        spells.retain(|s| s.arcanum == arcanum);
    }

    if spells.is_empty() {
        println!("  No spells found.");
        if !all {
            println!("  Only castable spells are listed; use --all for the whole catalog.");
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Arcanum", "Level", "Primary Factor", "Summary"]);

    for spell in &spells {
        let summary = if spell.short_description.is_empty() {
            &spell.description
        } else {
            &spell.short_description
        };
        table.add_row(vec![
            spell.name.clone(),
            spell.arcanum.to_string(),
            spell.level.to_string(),
            spell.primary_factor.to_string(),
            truncate(summary, 60),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} spells", spells.len());

    Ok(())
}
