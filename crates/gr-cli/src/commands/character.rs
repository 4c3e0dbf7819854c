use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use gr_core::Arcanum;
use gr_core::arcanum::MAX_RATING;

use super::{Context, parse_arcanum};

pub fn show(ctx: &Context) -> Result<(), String> {
    let character = ctx.character();

    println!("  {}", "Character".bold());
    println!("  gnosis:   {}", character.gnosis);
    println!("  yantras:  {}", character.yantras);
    println!("  spells:   {}", character.user_spells.len());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Arcanum", "Rating", "Major"]);

    for arcanum in Arcanum::ALL {
        let rating = character.rating(arcanum);
        let dots = format!(
            "{}{}",
            "●".repeat(rating.into()),
            "○".repeat((MAX_RATING - rating).into())
        );
        let major = if character.is_major(arcanum) { "yes" } else { "" };
        table.add_row(vec![
            arcanum.to_string(),
            format!("{rating} {dots}"),
            major.to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn set_gnosis(ctx: &Context, value: u8) -> Result<(), String> {
    let mut character = ctx.character();
    character.set_gnosis(value);
    ctx.save(&character)?;
    println!("  Gnosis set to {}", character.gnosis.to_string().bold());
    Ok(())
}

pub fn set_arcanum(ctx: &Context, name: &str, value: u8) -> Result<(), String> {
    let arcanum = parse_arcanum(name)?;
    let mut character = ctx.character();
    character.set_rating(arcanum, value);
    ctx.save(&character)?;
    println!(
        "  {} set to {}",
        arcanum,
        character.rating(arcanum).to_string().bold()
    );
    Ok(())
}

pub fn toggle_major(ctx: &Context, name: &str) -> Result<(), String> {
    let arcanum = parse_arcanum(name)?;
    let mut character = ctx.character();
    let flagged = character
        .toggle_major_arcanum(arcanum)
        .map_err(|e| e.to_string())?;
    ctx.save(&character)?;
    if flagged {
        println!("  {} is now a major arcanum", arcanum.to_string().bold());
    } else {
        println!("  {} is no longer a major arcanum", arcanum.to_string().bold());
    }
    Ok(())
}

pub fn set_yantras(ctx: &Context, value: i32) -> Result<(), String> {
    let mut character = ctx.character();
    character.yantras = value;
    ctx.save(&character)?;
    println!("  Default yantras set to {}", value.to_string().bold());
    Ok(())
}
