//! CLI frontend for the Grimoire spellcasting calculator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use gr_mechanics::Again;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use commands::Context;
use commands::cast::CastOptions;

#[derive(Parser)]
#[command(
    name = "grimoire",
    about = "Grimoire: dice pools, reaches, and Mana for tabletop mages",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the saved character
    #[arg(long, global = true, env = "GRIMOIRE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Spell catalog JSON file (default: the bundled sample catalog)
    #[arg(long, global = true)]
    spells: Option<PathBuf>,

    /// Show debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or edit the character
    Character {
        #[command(subcommand)]
        action: Option<CharacterAction>,
    },

    /// List catalog spells the character can cast
    Spells {
        /// Only spells of this arcanum
        #[arg(short, long)]
        arcanum: Option<String>,

        /// Match name or description
        #[arg(short, long)]
        search: Option<String>,

        /// Include spells above the character's ratings
        #[arg(long)]
        all: bool,
    },

    /// Add a catalog spell to the spellbook
    Learn {
        /// Spell name
        name: String,

        /// Casting type: improvised, rote, or praxis
        #[arg(long = "as", default_value = "improvised")]
        casting_type: String,
    },

    /// Remove a spell from the spellbook
    Forget {
        /// Spell name
        name: String,

        /// Casting type, needed when the spell is known several ways
        #[arg(long = "as")]
        casting_type: Option<String>,
    },

    /// List the spellbook
    Book,

    /// List available reaches
    Reaches {
        /// Also show this spell's own reaches and reach budget
        #[arg(long)]
        spell: Option<String>,

        /// Casting type of the spell
        #[arg(long = "as")]
        casting_type: Option<String>,
    },

    /// Combine spellbook spells into one and add it to the spellbook
    Combine {
        /// Name of the combined spell
        name: String,

        /// A component spell (repeat for each)
        #[arg(long = "spell", required = true)]
        components: Vec<String>,
    },

    /// Plan and roll a casting
    Cast {
        /// Spellbook spell to cast
        spell: String,

        /// Casting type, needed when the spell is known several ways
        #[arg(long = "as")]
        casting_type: Option<String>,

        /// Reach to apply (repeat for each)
        #[arg(short, long = "reach")]
        reaches: Vec<String>,

        /// Yantra bonus dice (default: the character's saved yantras)
        #[arg(short, long, allow_hyphen_values = true)]
        yantras: Option<i32>,

        /// Potency boost, 0-5; each level costs 2 dice
        #[arg(short, long, default_value = "0")]
        boost: u8,

        /// Manual dice modifier, -10 to 10
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        dice_mod: i32,

        /// Manual reach budget modifier, -5 to 5
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        reach_mod: i32,

        /// Manual Mana modifier, -5 to 5
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        mana_mod: i32,

        #[command(flatten)]
        again: AgainArgs,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,

        /// Show the plan without rolling
        #[arg(long)]
        plan: bool,
    },

    /// Roll a bare dice pool
    Roll {
        /// Number of dice; 1 or less rolls a chance die
        pool: u32,

        #[command(flatten)]
        again: AgainArgs,

        /// RNG seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Subcommand)]
enum CharacterAction {
    /// Show Gnosis, arcana, and yantras
    Show,

    /// Set Gnosis (1-10)
    Gnosis {
        /// New rating
        value: u8,
    },

    /// Set an arcanum rating (0-5)
    Arcanum {
        /// Arcanum name
        name: String,

        /// New rating
        value: u8,
    },

    /// Flag or unflag a major arcanum (at most 3)
    Major {
        /// Arcanum name
        name: String,
    },

    /// Set the default yantra bonus
    Yantras {
        /// Bonus dice
        #[arg(allow_hyphen_values = true)]
        value: i32,
    },
}

#[derive(Args)]
struct AgainArgs {
    /// 8s and up explode
    #[arg(long, conflicts_with = "nine_again")]
    eight_again: bool,

    /// 9s and up explode
    #[arg(long)]
    nine_again: bool,
}

impl AgainArgs {
    fn again(&self) -> Again {
        Again::from_flags(self.eight_again, self.nine_again)
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into())
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::new(cli.data_dir, cli.spells);

    let result = match cli.command {
        Commands::Character { action } => match action.unwrap_or(CharacterAction::Show) {
            CharacterAction::Show => commands::character::show(&ctx),
            CharacterAction::Gnosis { value } => commands::character::set_gnosis(&ctx, value),
            CharacterAction::Arcanum { name, value } => {
                commands::character::set_arcanum(&ctx, &name, value)
            }
            CharacterAction::Major { name } => commands::character::toggle_major(&ctx, &name),
            CharacterAction::Yantras { value } => commands::character::set_yantras(&ctx, value),
        },
        Commands::Spells {
            arcanum,
            search,
            all,
        } => commands::spells::run(&ctx, arcanum.as_deref(), search.as_deref(), all),
        Commands::Learn { name, casting_type } => {
            commands::learn::learn(&ctx, &name, &casting_type)
        }
        Commands::Forget { name, casting_type } => {
            commands::learn::forget(&ctx, &name, casting_type.as_deref())
        }
        Commands::Book => commands::book::run(&ctx),
        Commands::Reaches {
            spell,
            casting_type,
        } => commands::reaches::run(&ctx, spell.as_deref(), casting_type.as_deref()),
        Commands::Combine { name, components } => {
            commands::combine::run(&ctx, &name, &components)
        }
        Commands::Cast {
            spell,
            casting_type,
            reaches,
            yantras,
            boost,
            dice_mod,
            reach_mod,
            mana_mod,
            again,
            seed,
            plan,
        } => commands::cast::run(
            &ctx,
            CastOptions {
                spell,
                casting_type,
                reaches,
                yantras,
                boost,
                dice_mod,
                reach_mod,
                mana_mod,
                again: again.again(),
                seed,
                plan_only: plan,
            },
        ),
        Commands::Roll { pool, again, seed } => commands::roll::run(pool, again.again(), seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_ids_do_not_clash() {
        Cli::command().debug_assert();
    }

    #[test]
    fn combine_components_and_catalog_parse_together() {
        let cli = Cli::try_parse_from([
            "grimoire",
            "--spells",
            "custom.json",
            "combine",
            "Honest Strike",
            "--spell",
            "Kinetic Blow",
            "--spell",
            "Tell Truth From Lies",
        ])
        .unwrap();
        assert_eq!(cli.spells, Some(PathBuf::from("custom.json")));
        let Commands::Combine { name, components } = cli.command else {
            panic!("expected combine");
        };
        assert_eq!(name, "Honest Strike");
        assert_eq!(components, ["Kinetic Blow", "Tell Truth From Lies"]);
    }
}
