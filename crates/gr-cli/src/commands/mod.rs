pub mod book;
pub mod cast;
pub mod character;
pub mod combine;
pub mod learn;
pub mod reaches;
pub mod roll;
pub mod spells;

use std::fs;
use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use gr_core::{
    Arcanum, CastingType, Character, FileStorage, SpellCatalog, load_character, save_character,
};
use gr_mechanics::Resolution;

/// Where the character lives and which catalog to read.
pub struct Context {
    storage: FileStorage,
    spells: Option<PathBuf>,
}

impl Context {
    pub fn new(data_dir: PathBuf, spells: Option<PathBuf>) -> Self {
        Self {
            storage: FileStorage::new(data_dir),
            spells,
        }
    }

    /// Load the saved character, or a fresh one.
    pub fn character(&self) -> Character {
        load_character(&self.storage)
    }

    pub fn save(&self, character: &Character) -> Result<(), String> {
        save_character(&self.storage, character).map_err(|e| {
            format!(
                "failed to save character to {}: {e}",
                self.storage.dir().display()
            )
        })
    }

    /// The spell catalog: the `--spells` file if given, else the bundled one.
    pub fn catalog(&self) -> Result<SpellCatalog, String> {
        match &self.spells {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
                SpellCatalog::from_json(&json)
                    .map_err(|e| format!("bad spell catalog {}: {e}", path.display()))
            }
            None => SpellCatalog::bundled().map_err(|e| e.to_string()),
        }
    }
}

pub fn parse_arcanum(name: &str) -> Result<Arcanum, String> {
    name.parse().map_err(|e: gr_core::CoreError| e.to_string())
}

pub fn parse_casting_type(name: &str) -> Result<CastingType, String> {
    name.parse().map_err(|e: gr_core::CoreError| e.to_string())
}

pub fn parse_optional_casting_type(name: Option<&str>) -> Result<Option<CastingType>, String> {
    name.map(parse_casting_type).transpose()
}

/// Shorten text to fit a table cell.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else if text.is_empty() {
        "-".to_string()
    } else {
        text.to_string()
    }
}

/// Outcome line, colored by result.
pub fn outcome(resolution: &Resolution) -> ColoredString {
    let text = resolution.to_string();
    if resolution.dramatic_failure {
        text.red().bold()
    } else if !resolution.is_success() {
        text.yellow()
    } else {
        text.green().bold()
    }
}

/// Faces as `[10, 3, 8]`, successes highlighted.
pub fn faces(faces: &[u8], chance_die: bool) -> String {
    let threshold = if chance_die { 10 } else { 8 };
    let shown: Vec<String> = faces
        .iter()
        .map(|&f| {
            if f >= threshold {
                f.to_string().bold().to_string()
            } else {
                f.to_string()
            }
        })
        .collect();
    format!("[{}]", shown.join(", "))
}
