use super::types::SavedDeck;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// File extension of saved decks
pub const DECK_EXTENSION: &str = "deck";

/// Get the default deck directory (~/.config/draft-rater/decks)
pub fn get_deck_dir() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("decks"))
}

/// Path of the deck called `name` inside `dir`.
///
/// Names are plain file stems; anything that would escape `dir` is rejected.
pub fn deck_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        anyhow::bail!("Invalid deck name: {:?}", name);
    }
    Ok(dir.join(format!("{}.{}", name, DECK_EXTENSION)))
}

/// Load a saved deck from a JSON file
pub fn load_deck(path: &Path) -> Result<SavedDeck> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open deck file at {}", path.display()))?;

    let deck: SavedDeck = serde_json::from_reader(file)
        .with_context(|| format!("Failed to load deck from {}", path.display()))?;

    tracing::debug!("Loaded deck {} with {} cards", path.display(), deck.len());
    Ok(deck)
}

/// Save a deck as `<dir>/<name>.deck` atomically and return the path written
///
/// Creates `dir` if it doesn't exist.
pub fn save_deck(dir: &Path, name: &str, deck: &SavedDeck) -> Result<PathBuf> {
    let path = deck_path(dir, name)?;
    crate::config::ensure_dir(dir)?;

    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, deck).context("Failed to serialize deck")?;

    file.commit()
        .with_context(|| format!("Failed to save deck to {}", path.display()))?;

    tracing::debug!("Saved {} cards to {}", deck.len(), path.display());
    Ok(path)
}

/// Names of the decks saved in `dir`, sorted. A missing directory has none.
pub fn list_decks(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read deck directory at {}", dir.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read deck directory at {}", dir.display()))?
            .path();
        if path.extension().and_then(|e| e.to_str()) != Some(DECK_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    Ok(names)
}
