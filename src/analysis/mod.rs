pub mod deck;
pub mod synergy;

pub use deck::{analyze, curve_bucket, DeckAnalysis, CURVE_BUCKETS};
pub use synergy::{color_label, detect_synergies};
