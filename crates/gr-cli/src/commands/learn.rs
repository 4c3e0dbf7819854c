use colored::Colorize;
use gr_core::CoreError;

use super::{Context, parse_casting_type, parse_optional_casting_type};

pub fn learn(ctx: &Context, name: &str, casting_type: &str) -> Result<(), String> {
    let casting_type = parse_casting_type(casting_type)?;
    let catalog = ctx.catalog()?;
    let spell = catalog
        .find(name)
        .map_err(|e| e.to_string())?
        .clone()
        .with_casting_type(casting_type);

    let mut character = ctx.character();
    if !character.learn(spell) {
        return Err(CoreError::DuplicateSpell {
            name: name.to_string(),
            casting_type,
        }
        .to_string());
    }
    ctx.save(&character)?;

    println!("  Learned {} ({casting_type})", name.bold());
    Ok(())
}

pub fn forget(ctx: &Context, name: &str, casting_type: Option<&str>) -> Result<(), String> {
    let casting_type = parse_optional_casting_type(casting_type)?;
    let mut character = ctx.character();
    let casting_type = character
        .find_spell(name, casting_type)
        .map_err(|e| e.to_string())?
        .casting_type();
    let removed = character
        .forget(name, casting_type)
        .map_err(|e| e.to_string())?;
    ctx.save(&character)?;

    println!("  Forgot {} ({})", removed.name().bold(), removed.casting_type());
    Ok(())
}
