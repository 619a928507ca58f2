pub mod storage;
pub mod types;

pub use storage::{deck_path, get_deck_dir, list_decks, load_deck, save_deck, DECK_EXTENSION};
pub use types::SavedDeck;
