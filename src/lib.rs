pub mod analysis;
pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod index;
pub mod output;
pub mod rater;
pub mod scoring;

pub use analysis::{analyze, DeckAnalysis};
pub use cards::Card;
pub use error::{DraftError, Result};
pub use index::{CardIndex, MatchKind, Resolution};
pub use rater::{RatedCard, Rater};
pub use scoring::ScoringConfig;
