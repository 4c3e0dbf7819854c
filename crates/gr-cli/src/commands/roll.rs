use colored::Colorize;
use gr_mechanics::{Again, PoolSize, Resolution, RngDice, RollOptions, roll};

use super::{faces, outcome};

pub fn run(pool: u32, again: Again, seed: Option<u64>) -> Result<(), String> {
    let size = PoolSize {
        raw: i64::from(pool),
    };
    let seed = seed.unwrap_or_else(rand::random);
    let options = RollOptions::default().with_again(again);

    let rolled =
        roll(size.dice(), &options, &mut RngDice::seeded(seed)).map_err(|e| e.to_string())?;
    let resolution = Resolution::classify(&rolled, size.is_chance_die());

    if size.is_chance_die() {
        println!("  {}", "Chance die".yellow());
    }
    println!(
        "  Rolled {} {} ({again}): {}",
        size.dice(),
        if size.dice() == 1 { "die" } else { "dice" },
        faces(&rolled, size.is_chance_die())
    );
    println!("  {}", outcome(&resolution));
    println!("  {}", format!("seed {seed}").dimmed());

    Ok(())
}
