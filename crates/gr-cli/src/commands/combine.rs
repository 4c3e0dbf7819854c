use colored::Colorize;
use gr_core::{CoreError, SpellDefinition};

use super::Context;

pub fn run(ctx: &Context, name: &str, components: &[String]) -> Result<(), String> {
    let mut character = ctx.character();

    let spells = components
        .iter()
        .map(|c| character.find_spell(c, None).cloned())
        .collect::<Result<Vec<SpellDefinition>, CoreError>>()
        .map_err(|e| e.to_string())?;

    let combined = gr_mechanics::combine(
        &spells,
        &character.arcana_values,
        character.gnosis,
        name,
    )
    .map_err(|e| e.to_string())?;

    let summary = format!(
        "  Combined {} into {} (+{} dice penalty, cast with {})",
        components.join(" + "),
        combined.name.bold(),
        combined.additional_penalty,
        combined.lowest_arcanum.name
    );

    let (combined_name, casting_type) = (combined.name.clone(), combined.casting_type);
    if !character.learn(combined) {
        return Err(CoreError::DuplicateSpell {
            name: combined_name,
            casting_type,
        }
        .to_string());
    }
    ctx.save(&character)?;

    println!("{summary}");
    Ok(())
}
