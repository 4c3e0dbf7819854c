use comfy_table::{ContentArrangement, Table};

use super::{Context, truncate};

pub fn run(ctx: &Context) -> Result<(), String> {
    let character = ctx.character();

    if character.user_spells.is_empty() {
        println!("  The spellbook is empty. Add spells with `grimoire learn <name>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Name",
        "Type",
        "Arcanum",
        "Level",
        "Primary Factor",
        "Notes",
    ]);

    for spell in &character.user_spells {
        let notes = if spell.is_combined() {
            format!(
                "combined, +{} penalty, cast with {}",
                spell.additional_penalty(),
                spell.casting_arcanum()
            )
        } else {
            truncate(spell.short_description(), 40)
        };
        table.add_row(vec![
            spell.name().to_string(),
            spell.casting_type().to_string(),
            spell.arcanum_label(),
            spell.level_label(),
            spell.primary_factor().to_string(),
            notes,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} spells", character.user_spells.len());

    Ok(())
}
